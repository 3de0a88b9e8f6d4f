//! Integration tests for dirprint file and tree fingerprints

mod regression_fixtures;
mod tree_determinism;
