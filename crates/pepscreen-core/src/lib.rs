//! # pepscreen Core Library
//!
//! Combinatorial peptide variant generation with biophysical filtering, and
//! multi-criteria ranking of docked variants for synthesis selection.
//!
//! ## Architectural Philosophy
//!
//! The library follows a three-layer architecture:
//!
//! - **[`core`]: The Foundation.** Immutable data models (`AminoAcid`, `ParentSequence`,
//!   `Variant`, `DockingResult`), the static descriptor scales, and the file adapters that
//!   move those values in and out of FASTA and CSV.
//!
//! - **[`engine`]: The Logic Core.** Validated configuration builders, enumeration of the
//!   mutation space under a size cap, declarative filters, metric normalization, and the
//!   deterministic ranking comparator with its selection cutoffs.
//!
//! - **[`workflows`]: The Public API.** End-to-end `generate` and `rank` procedures that tie
//!   the engine pieces together with logging and progress reporting.

pub mod core;
pub mod engine;
pub mod workflows;
