use crate::error::TickMathError;
use crate::math::price_tick::{TickBounds, calculate_price_bounds, calculate_tick_bounds};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Percentage range around the current price, e.g. `-90% .. +900%`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PercentRange {
    pub min: Decimal,
    pub max: Decimal,
}

impl PercentRange {
    /// Creates a range, swapping the bounds if they arrive inverted.
    pub fn new(min: Decimal, max: Decimal) -> Self {
        if min > max {
            Self { min: max, max: min }
        } else {
            Self { min, max }
        }
    }

    /// Low and high prices of the range around `current_price`.
    pub fn price_range(&self, current_price: Decimal) -> Result<(Decimal, Decimal), TickMathError> {
        calculate_price_bounds(current_price, self.min, self.max)
    }

    /// Aligned ticks of the range around `current_price`.
    pub fn tick_bounds(
        &self,
        current_price: Decimal,
        spacing: i32,
    ) -> Result<TickBounds, TickMathError> {
        calculate_tick_bounds(current_price, self.min, self.max, spacing)
    }
}

impl Default for PercentRange {
    fn default() -> Self {
        Self::new(Decimal::from(-90), Decimal::from(900))
    }
}

/// Named deposit ranges offered for precision pools.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RangePreset {
    #[default]
    Wide,
    Concentrated,
    Bold,
    /// Any range that does not match a named preset.
    Manual,
}

impl RangePreset {
    pub const ALL: [RangePreset; 4] = [Self::Wide, Self::Concentrated, Self::Bold, Self::Manual];

    /// Fixed bounds of the preset; `Manual` has none.
    pub fn range(&self) -> Option<PercentRange> {
        let (min, max) = match self {
            Self::Wide => (-90, 900),
            Self::Concentrated => (-50, 100),
            Self::Bold => (-20, 25),
            Self::Manual => return None,
        };
        Some(PercentRange {
            min: Decimal::from(min),
            max: Decimal::from(max),
        })
    }

    /// Returns the preset matching `range` exactly, `Manual` otherwise.
    pub fn detect(range: &PercentRange) -> Self {
        Self::ALL
            .into_iter()
            .find(|preset| preset.range().as_ref() == Some(range))
            .unwrap_or(Self::Manual)
    }
}
