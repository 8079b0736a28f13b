//! Paired deposit amounts for two-sided pools.

use crate::entities::Pool;
use crate::error::DomainError;
use rust_decimal::Decimal;

/// Decimal places kept on amounts sent to the ledger.
pub const AMOUNT_DECIMALS: u32 = 18;

/// Side of the pair the user typed an amount for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DepositSide {
    /// Left token.
    X,
    /// Right token.
    Y,
}

/// Computes the amount of the other token to deposit alongside `amount`.
///
/// Single-sided pools take one token only and return `None`. DefiPlaza pools
/// pair through the pool's side ratio; other pools pair through the current
/// price, with the right-to-left direction weighted by `1.5 * price`.
///
/// # Errors
/// Returns an error if `amount` is negative or the pool has no price.
pub fn paired_amount(
    pool: &Pool,
    side: DepositSide,
    amount: Decimal,
) -> Result<Option<Decimal>, DomainError> {
    if amount < Decimal::ZERO {
        return Err(DomainError::NegativeAmount(amount));
    }
    if pool.is_single_sided() {
        return Ok(None);
    }

    let paired = if pool.provider == "defiplaza" {
        let ratio = match side {
            DepositSide::X => pool.x_ratio,
            DepositSide::Y => pool.y_ratio,
        }
        .unwrap_or(Decimal::ZERO);
        amount
            .checked_mul(ratio)
            .ok_or(DomainError::Overflow("paired amount"))?
    } else {
        let price = pool.current_price;
        if price <= Decimal::ZERO {
            return Err(DomainError::MissingPrice(pool.component.clone()));
        }
        match side {
            DepositSide::X => amount
                .checked_mul(price)
                .ok_or(DomainError::Overflow("paired amount"))?,
            DepositSide::Y => {
                let weighted = price
                    .checked_div(Decimal::TWO)
                    .and_then(|half| price.checked_add(half))
                    .ok_or(DomainError::Overflow("paired amount"))?;
                amount
                    .checked_div(weighted)
                    .ok_or(DomainError::Overflow("paired amount"))?
            }
        }
    };

    Ok(Some(paired.round_dp(AMOUNT_DECIMALS)))
}

/// Checks that `amount` does not exceed `balance`.
pub fn validate_amount(amount: Decimal, balance: Decimal) -> Result<(), DomainError> {
    if amount > balance {
        return Err(DomainError::ExceedsBalance { amount, balance });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn ociswap_pool(price: Decimal) -> Pool {
        Pool {
            current_price: price,
            sub_type: "precision".to_string(),
            ..Pool::new("ociswap", "component_1", "XRD/HUG")
        }
    }

    #[test]
    fn test_paired_amount_by_price() {
        let pool = ociswap_pool(dec!(2));
        assert_eq!(
            paired_amount(&pool, DepositSide::X, dec!(10)).unwrap(),
            Some(dec!(20))
        );
        // 30 / (2 + 1)
        assert_eq!(
            paired_amount(&pool, DepositSide::Y, dec!(30)).unwrap(),
            Some(dec!(10))
        );
    }

    #[test]
    fn test_paired_amount_by_ratio() {
        let pool = Pool {
            x_ratio: Some(dec!(0.5)),
            sub_type: "double".to_string(),
            ..Pool::new("defiplaza", "component_2", "DFP2/XRD")
        };
        assert_eq!(
            paired_amount(&pool, DepositSide::X, dec!(8)).unwrap(),
            Some(dec!(4))
        );
        assert_eq!(
            paired_amount(&pool, DepositSide::Y, dec!(8)).unwrap(),
            Some(Decimal::ZERO)
        );
    }

    #[test]
    fn test_paired_amount_edge_cases() {
        let single = Pool {
            sub_type: "single".to_string(),
            ..Pool::new("defiplaza", "component_3", "DFP2")
        };
        assert_eq!(paired_amount(&single, DepositSide::X, dec!(1)).unwrap(), None);

        let unpriced = ociswap_pool(Decimal::ZERO);
        assert!(matches!(
            paired_amount(&unpriced, DepositSide::X, dec!(1)),
            Err(DomainError::MissingPrice(_))
        ));
        assert!(matches!(
            paired_amount(&ociswap_pool(dec!(1)), DepositSide::X, dec!(-1)),
            Err(DomainError::NegativeAmount(_))
        ));
    }

    #[test]
    fn test_paired_amount_overflow() {
        let pool = ociswap_pool(Decimal::MAX);
        assert_eq!(
            paired_amount(&pool, DepositSide::Y, dec!(1)),
            Err(DomainError::Overflow("paired amount"))
        );
        assert_eq!(
            paired_amount(&pool, DepositSide::X, dec!(2)),
            Err(DomainError::Overflow("paired amount"))
        );
    }

    #[test]
    fn test_validate_amount() {
        assert!(validate_amount(dec!(5), dec!(5)).is_ok());
        assert_eq!(
            validate_amount(dec!(5.1), dec!(5)),
            Err(DomainError::ExceedsBalance {
                amount: dec!(5.1),
                balance: dec!(5)
            })
        );
    }
}
