//! File adapters around the in-memory core values.
//!
//! The engine never touches the filesystem; these functions translate between
//! the formats exchanged with the docking pipeline (FASTA libraries, metric CSVs,
//! Vina logs) and the typed models in [`crate::core::models`].

pub mod docking;
pub mod error;
pub mod fasta;
pub mod report;

pub use error::IoError;
