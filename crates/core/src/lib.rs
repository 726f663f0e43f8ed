//! Fintrack Core - Domain entities, services, and traits.
//!
//! This crate contains the business rules for investments, goals, budgets
//! and expenses. It is database-agnostic and defines traits that are
//! implemented by the `storage-sqlite` crate.

pub mod budgets;
pub mod constants;
pub mod dashboard;
pub mod errors;
pub mod expenses;
pub mod goals;
pub mod investments;
pub mod recompute;
pub mod users;
pub mod utils;

#[cfg(test)]
mod test_support;

pub use recompute::{RecomputeTarget, RecomputeWarning, Recomputed};
pub use users::UserId;

// Re-export error types
pub use errors::Error;
pub use errors::Result;
