//! # Core Module
//!
//! Stateless building blocks shared by the engine and the workflows.
//!
//! - **Data Models** ([`models`]) - Residues, parent sequences, variants and docking metrics
//! - **Descriptors** ([`descriptors`]) - Net charge, Kyte-Doolittle hydropathy and length
//! - **File I/O** ([`io`]) - FASTA libraries, docking metric tables, Vina logs and reports
//!
//! Nothing in this module performs ranking or filtering decisions; it only
//! represents and moves data.

pub mod descriptors;
pub mod io;
pub mod models;
