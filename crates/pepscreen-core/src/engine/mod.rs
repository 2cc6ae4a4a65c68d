//! # Engine Module
//!
//! The decision-making layer: everything between a validated configuration and
//! an ordered list of candidates.
//!
//! ## Architecture
//!
//! - **Configuration** ([`config`]) - Mutation rules, filter bounds and ranking parameters,
//!   assembled through builders that reject invalid combinations up front
//! - **Enumeration** ([`enumeration`]) - Deterministic walk over the mutation space with a
//!   size check before anything is materialized
//! - **Filtering** ([`filters`]) - Independent acceptance predicates, each with its own
//!   rejection reason
//! - **Ranking** ([`normalization`], [`ranking`], [`selection`]) - Composite scores,
//!   the total order with tie-breaks, and top-N or threshold cutoffs
//! - **Progress Monitoring** ([`progress`]) - Callback-based reporting for front ends
//! - **Error Handling** ([`error`]) - The engine error taxonomy

pub mod config;
pub mod enumeration;
pub mod error;
pub mod filters;
pub mod normalization;
pub mod progress;
pub mod ranking;
pub mod selection;
