//! Utility functions and helpers

pub mod validation;

pub use validation::check_ledger_invariants;
