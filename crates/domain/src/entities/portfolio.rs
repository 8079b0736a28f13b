use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Which backend listing a position comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PositionKind {
    /// Plain liquidity-provider position.
    Lp,
    /// Position opened by a composed strategy.
    Strategy,
}

impl PositionKind {
    /// Value of the `type` query parameter on the portfolio endpoint.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Lp => "lp",
            Self::Strategy => "strategy",
        }
    }
}

/// A position held by an account.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioItem {
    pub pool_name: String,
    #[serde(default)]
    pub component: String,
    #[serde(default)]
    pub tx: Option<String>,
    #[serde(default)]
    pub left_alt: String,
    #[serde(default)]
    pub right_alt: String,
    #[serde(default)]
    pub invested: Decimal,
    #[serde(default)]
    pub current_value: Decimal,
    #[serde(default)]
    pub invested_xrd: Decimal,
    #[serde(default)]
    pub current_value_xrd: Decimal,
    #[serde(default)]
    pub pnl: Decimal,
    #[serde(default)]
    pub pnl_percentage: Decimal,
    #[serde(default)]
    pub provider: String,
    /// Transaction manifest that closes the position.
    #[serde(default)]
    pub close_manifest: String,
    #[serde(default)]
    pub strategy: bool,
    #[serde(default)]
    pub loan_amount: Option<Decimal>,
    #[serde(default)]
    pub loan_currency: Option<String>,
    #[serde(default)]
    pub borrow_amount: Option<Decimal>,
    #[serde(default)]
    pub borrow_currency: Option<String>,
}

impl PortfolioItem {
    pub fn new(pool_name: impl Into<String>, provider: impl Into<String>) -> Self {
        Self {
            pool_name: pool_name.into(),
            component: String::new(),
            tx: None,
            left_alt: String::new(),
            right_alt: String::new(),
            invested: Decimal::ZERO,
            current_value: Decimal::ZERO,
            invested_xrd: Decimal::ZERO,
            current_value_xrd: Decimal::ZERO,
            pnl: Decimal::ZERO,
            pnl_percentage: Decimal::ZERO,
            provider: provider.into(),
            close_manifest: String::new(),
            strategy: false,
            loan_amount: None,
            loan_currency: None,
            borrow_amount: None,
            borrow_currency: None,
        }
    }

    pub fn kind(&self) -> PositionKind {
        if self.strategy {
            PositionKind::Strategy
        } else {
            PositionKind::Lp
        }
    }
}
