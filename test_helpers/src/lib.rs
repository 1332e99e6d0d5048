//! Test helpers shared across crates.
//!
//! This crate provides temporary document directories and the canonical
//! animal/habitat scenario used by integration tests.

pub mod documents;
pub mod scenario;
