use crate::entities::PortfolioItem;
use crate::error::DomainError;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Aggregate value and PnL across a set of positions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PortfolioTotals {
    pub invested: Decimal,
    pub current_value: Decimal,
    pub pnl: Decimal,
    /// PnL relative to the invested amount, in percent. Zero when nothing is invested.
    pub pnl_percentage: Decimal,
}

impl PortfolioTotals {
    /// Sums the positions.
    ///
    /// # Errors
    /// Returns [`DomainError::Overflow`] when a sum or the PnL does not fit a
    /// `Decimal`. A PnL percentage that overflows is reported as zero.
    pub fn from_items<'a>(
        items: impl IntoIterator<Item = &'a PortfolioItem>,
    ) -> Result<Self, DomainError> {
        let mut invested = Decimal::ZERO;
        let mut current_value = Decimal::ZERO;
        for item in items {
            invested = invested
                .checked_add(item.invested)
                .ok_or(DomainError::Overflow("invested total"))?;
            current_value = current_value
                .checked_add(item.current_value)
                .ok_or(DomainError::Overflow("current value total"))?;
        }
        let pnl = current_value
            .checked_sub(invested)
            .ok_or(DomainError::Overflow("pnl"))?;
        let pnl_percentage = pnl
            .checked_div(invested)
            .and_then(|ratio| ratio.checked_mul(Decimal::ONE_HUNDRED))
            .unwrap_or(Decimal::ZERO);

        Ok(Self {
            invested,
            current_value,
            pnl,
            pnl_percentage,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn item(invested: Decimal, current: Decimal) -> PortfolioItem {
        PortfolioItem {
            invested,
            current_value: current,
            ..PortfolioItem::new("A/B", "ociswap")
        }
    }

    #[test]
    fn test_totals() {
        let items = [item(dec!(100), dec!(110)), item(dec!(300), dec!(290))];
        let totals = PortfolioTotals::from_items(&items).unwrap();
        assert_eq!(totals.invested, dec!(400));
        assert_eq!(totals.current_value, dec!(400));
        assert_eq!(totals.pnl, Decimal::ZERO);

        let totals = PortfolioTotals::from_items(&items[..1]).unwrap();
        assert_eq!(totals.pnl, dec!(10));
        assert_eq!(totals.pnl_percentage, dec!(10));
    }

    #[test]
    fn test_totals_empty() {
        let items: Vec<PortfolioItem> = Vec::new();
        let totals = PortfolioTotals::from_items(&items).unwrap();
        assert_eq!(totals, PortfolioTotals::default());
    }

    #[test]
    fn test_totals_tiny_investment_clamps_percentage() {
        let items = [item(
            dec!(0.0000000000000000000000000001),
            dec!(10000000000000000000000000000),
        )];
        let totals = PortfolioTotals::from_items(&items).unwrap();
        assert_eq!(totals.current_value, dec!(10000000000000000000000000000));
        assert_eq!(totals.pnl_percentage, Decimal::ZERO);
    }

    #[test]
    fn test_totals_sum_overflow_is_an_error() {
        let items = [item(Decimal::MAX, Decimal::ZERO), item(Decimal::MAX, Decimal::ZERO)];
        assert_eq!(
            PortfolioTotals::from_items(&items),
            Err(DomainError::Overflow("invested total"))
        );
    }
}
