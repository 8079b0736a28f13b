use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// An amount quoted in the token itself and in reference currencies.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuotedAmount {
    pub token: Decimal,
    pub xrd: Decimal,
    pub usd: Decimal,
}

/// Result of the add-liquidity preview call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddLiquidityPreview {
    pub x_amount: QuotedAmount,
    pub y_amount: QuotedAmount,
    pub liquidity_amount: Decimal,
}
