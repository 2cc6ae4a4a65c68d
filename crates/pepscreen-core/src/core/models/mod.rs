pub mod docking;
pub mod residue;
pub mod sequence;
pub mod variant;
