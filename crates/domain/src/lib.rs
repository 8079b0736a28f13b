//! Domain model for the Earn pool browser.
//!
//! This crate holds the records fetched from the aggregation backend and the
//! pure arithmetic that runs on them:
//! - Pools, portfolio positions, strategies and account balances
//! - Concentrated-liquidity price/tick math
//! - Deposit range presets and paired-amount calculation
//! - Portfolio totals and display formatting

/// Paired deposit amounts and balance validation.
pub mod deposit;
/// Domain records.
pub mod entities;
/// Error types.
pub mod error;
/// Number and address formatting for display.
pub mod format;
/// Price and tick math.
pub mod math;
/// Aggregate metrics.
pub mod metrics;
/// Value objects.
pub mod value_objects;

pub use error::{DomainError, TickMathError};
