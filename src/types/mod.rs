//! Type definitions for the scoring services

pub mod transaction;

pub use transaction::{ScoredTransaction, Transaction};
