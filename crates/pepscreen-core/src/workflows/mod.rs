//! # Workflows Module
//!
//! Top-level entry points for library users. Each workflow validates its
//! configuration, drives the engine, logs phase boundaries and reports progress.
//!
//! - **Generation** ([`generate`]) - Parent sequence to accepted and rejected variant sets
//! - **Ranking** ([`rank`]) - Docked variants to a ranked list and an optional selection

pub mod generate;
pub mod rank;
