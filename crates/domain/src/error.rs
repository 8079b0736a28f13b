//! Error types for domain calculations.

use rust_decimal::Decimal;
use thiserror::Error;

/// Errors raised by the price/tick math.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TickMathError {
    /// Logarithmic ticks are only defined for strictly positive prices.
    #[error("price must be positive, got {0}")]
    NonPositivePrice(Decimal),
    /// Tick spacing must be a positive step.
    #[error("tick spacing must be positive, got {0}")]
    InvalidSpacing(i32),
    /// The result does not fit the decimal or tick range.
    #[error("overflow computing {0}")]
    Overflow(&'static str),
}

/// Errors raised by deposit and balance calculations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomainError {
    /// Requested amount is larger than the available balance.
    #[error("amount {amount} exceeds balance of {balance}")]
    ExceedsBalance {
        /// Requested amount.
        amount: Decimal,
        /// Available balance.
        balance: Decimal,
    },
    /// Amounts must not be negative.
    #[error("amount must not be negative, got {0}")]
    NegativeAmount(Decimal),
    /// The pool has no usable price for converting between sides.
    #[error("pool {0} has no price to pair amounts with")]
    MissingPrice(String),
    /// Arithmetic overflow.
    #[error("overflow computing {0}")]
    Overflow(&'static str),
    /// Tick math failure.
    #[error(transparent)]
    TickMath(#[from] TickMathError),
}
