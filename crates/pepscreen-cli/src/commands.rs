pub mod collect;
pub mod generate;
pub mod rank;
