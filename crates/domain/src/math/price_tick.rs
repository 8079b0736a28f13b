use crate::error::TickMathError;
use rust_decimal::Decimal;
use rust_decimal::MathematicalOps;
use rust_decimal::prelude::*;
use serde::{Deserialize, Serialize};

/// Base of the tick grid: each tick moves the price by one basis point.
pub const TICK_BASE: Decimal = Decimal::from_parts(10001, 0, 0, false, 4);

/// Tick spacing used by precision pools.
pub const DEFAULT_TICK_SPACING: i32 = 60;

/// Aligned tick bounds and the prices they map back to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TickBounds {
    pub lower_tick: i32,
    pub upper_tick: i32,
    pub lower_price: Decimal,
    pub upper_price: Decimal,
}

impl TickBounds {
    /// Returns the `(left_bound, right_bound)` pair sent to the liquidity preview API.
    pub fn to_preview_bounds(&self) -> (String, String) {
        (self.lower_tick.to_string(), self.upper_tick.to_string())
    }
}

/// Moves a price by a percentage.
/// P' = P * (1 + pct / 100)
pub fn adjust_price_by_percentage(price: Decimal, pct: Decimal) -> Result<Decimal, TickMathError> {
    let factor = Decimal::ONE
        .checked_add(pct / Decimal::ONE_HUNDRED)
        .ok_or(TickMathError::Overflow("percentage factor"))?;
    price
        .checked_mul(factor)
        .ok_or(TickMathError::Overflow("adjusted price"))
}

/// Returns the lower and upper prices for a percentage range around `price`.
pub fn calculate_price_bounds(
    price: Decimal,
    lower_pct: Decimal,
    upper_pct: Decimal,
) -> Result<(Decimal, Decimal), TickMathError> {
    Ok((
        adjust_price_by_percentage(price, lower_pct)?,
        adjust_price_by_percentage(price, upper_pct)?,
    ))
}

/// Returns the price corresponding to a given tick.
/// P = 1.0001 ^ tick
pub fn tick_to_price(tick: i32) -> Result<Decimal, TickMathError> {
    TICK_BASE
        .checked_powi(i64::from(tick))
        .ok_or(TickMathError::Overflow("tick price"))
}

/// Returns the tick whose price is the greatest one not above `price`.
/// tick = floor(log_1.0001(P))
pub fn price_to_tick(price: Decimal) -> Result<i32, TickMathError> {
    if price <= Decimal::ZERO {
        return Err(TickMathError::NonPositivePrice(price));
    }

    let ln_price = price
        .checked_ln()
        .ok_or(TickMathError::Overflow("ln(price)"))?;
    let ln_base = TICK_BASE
        .checked_ln()
        .ok_or(TickMathError::Overflow("ln(base)"))?;
    let estimate = ln_price
        .checked_div(ln_base)
        .ok_or(TickMathError::Overflow("tick estimate"))?
        .floor();
    let mut tick = estimate.to_i32().ok_or(TickMathError::Overflow("tick"))?;

    // The logarithm carries rounding error; settle the floor against exact powers.
    while tick_to_price(tick)? > price {
        tick = tick.checked_sub(1).ok_or(TickMathError::Overflow("tick"))?;
    }
    while let Some(next) = tick.checked_add(1) {
        match tick_to_price(next) {
            Ok(next_price) if next_price <= price => tick = next,
            _ => break,
        }
    }

    Ok(tick)
}

/// Rounds a tick down to the nearest multiple of `spacing`.
/// Rounds toward negative infinity, so negative ticks move further down.
pub fn align_tick_to_spacing(tick: i32, spacing: i32) -> Result<i32, TickMathError> {
    if spacing <= 0 {
        return Err(TickMathError::InvalidSpacing(spacing));
    }
    tick.div_euclid(spacing)
        .checked_mul(spacing)
        .ok_or(TickMathError::Overflow("aligned tick"))
}

/// Converts a percentage range around `price` into aligned tick bounds.
///
/// Percentages are swapped when given in the wrong order, so the lower bound
/// returned is never above the upper bound.
///
/// # Errors
/// Returns [`TickMathError::NonPositivePrice`] when `price <= 0` or a
/// percentage is `<= -100`, and [`TickMathError::InvalidSpacing`] when
/// `spacing <= 0`.
pub fn calculate_tick_bounds(
    price: Decimal,
    lower_pct: Decimal,
    upper_pct: Decimal,
    spacing: i32,
) -> Result<TickBounds, TickMathError> {
    if price <= Decimal::ZERO {
        return Err(TickMathError::NonPositivePrice(price));
    }
    let (lower_pct, upper_pct) = if lower_pct > upper_pct {
        (upper_pct, lower_pct)
    } else {
        (lower_pct, upper_pct)
    };

    let (lower_price, upper_price) = calculate_price_bounds(price, lower_pct, upper_pct)?;

    let lower_tick = align_tick_to_spacing(price_to_tick(lower_price)?, spacing)?;
    let upper_tick = align_tick_to_spacing(price_to_tick(upper_price)?, spacing)?;

    Ok(TickBounds {
        lower_tick,
        upper_tick,
        lower_price: tick_to_price(lower_tick)?,
        upper_price: tick_to_price(upper_tick)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_tick_to_price() {
        // Tick 0 -> Price 1
        assert_eq!(tick_to_price(0).unwrap(), Decimal::ONE);

        // Tick 100 -> 1.0001^100 ~= 1.010049662
        let p100 = tick_to_price(100).unwrap();
        assert!((p100 - dec!(1.010049662)).abs() < dec!(0.000000001));

        let inverse = tick_to_price(-100).unwrap() * p100;
        assert!((inverse - Decimal::ONE).abs() < dec!(0.000000000001));
    }

    #[test]
    fn test_price_to_tick_is_floor() {
        assert_eq!(price_to_tick(Decimal::ONE).unwrap(), 0);

        let exact = tick_to_price(100).unwrap();
        assert_eq!(price_to_tick(exact).unwrap(), 100);
        assert_eq!(price_to_tick(exact - dec!(0.0000001)).unwrap(), 99);

        // Below one the floor moves away from zero.
        assert_eq!(price_to_tick(dec!(0.99995)).unwrap(), -1);
    }

    #[test]
    fn test_price_to_tick_rejects_non_positive() {
        assert_eq!(
            price_to_tick(Decimal::ZERO),
            Err(TickMathError::NonPositivePrice(Decimal::ZERO))
        );
        assert!(price_to_tick(dec!(-3)).is_err());
    }

    #[test]
    fn test_round_trip_within_one_tick() {
        let prices = [dec!(0.0042), dec!(1), dec!(3.7), dec!(1250.5), dec!(98000)];
        let pcts = [dec!(-90), dec!(-50), dec!(-20), dec!(0), dec!(25), dec!(100), dec!(900)];
        for price in prices {
            for pct in pcts {
                let adjusted = adjust_price_by_percentage(price, pct).unwrap();
                let tick = price_to_tick(adjusted).unwrap();
                let floor = tick_to_price(tick).unwrap();
                let ceil = tick_to_price(tick + 1).unwrap();
                assert!(floor <= adjusted, "{floor} > {adjusted}");
                assert!(adjusted < ceil, "{adjusted} >= {ceil}");
            }
        }
    }

    #[test]
    fn test_align_tick_to_spacing() {
        assert_eq!(align_tick_to_spacing(125, 60).unwrap(), 120);
        assert_eq!(align_tick_to_spacing(-1, 60).unwrap(), -60);
        assert_eq!(align_tick_to_spacing(-120, 60).unwrap(), -120);
        assert_eq!(align_tick_to_spacing(0, 60).unwrap(), 0);
        assert_eq!(
            align_tick_to_spacing(10, 0),
            Err(TickMathError::InvalidSpacing(0))
        );
    }

    #[test]
    fn test_align_is_idempotent() {
        for tick in [-23_027, -61, -60, -1, 0, 1, 59, 60, 23_027] {
            let once = align_tick_to_spacing(tick, 60).unwrap();
            assert_eq!(align_tick_to_spacing(once, 60).unwrap(), once);
            assert_eq!(once % 60, 0);
            assert!(once <= tick);
        }
    }

    #[test]
    fn test_calculate_tick_bounds() {
        let bounds = calculate_tick_bounds(dec!(2), dec!(-90), dec!(900), 60).unwrap();
        assert!(bounds.lower_tick < bounds.upper_tick);
        assert_eq!(bounds.lower_tick % 60, 0);
        assert_eq!(bounds.upper_tick % 60, 0);
        assert!(bounds.lower_price <= dec!(0.2));
        assert!(bounds.upper_price <= dec!(20));
        assert_eq!(bounds.lower_price, tick_to_price(bounds.lower_tick).unwrap());

        let (left, right) = bounds.to_preview_bounds();
        assert_eq!(left, bounds.lower_tick.to_string());
        assert_eq!(right, bounds.upper_tick.to_string());
    }

    #[test]
    fn test_calculate_tick_bounds_swaps_inverted_range() {
        let ordered = calculate_tick_bounds(dec!(5), dec!(-20), dec!(25), 60).unwrap();
        let inverted = calculate_tick_bounds(dec!(5), dec!(25), dec!(-20), 60).unwrap();
        assert_eq!(ordered, inverted);
        assert!(inverted.lower_tick <= inverted.upper_tick);
    }

    #[test]
    fn test_calculate_tick_bounds_rejects_invalid_range() {
        assert!(matches!(
            calculate_tick_bounds(dec!(1), dec!(-100), dec!(10), 60),
            Err(TickMathError::NonPositivePrice(_))
        ));
        assert!(matches!(
            calculate_tick_bounds(dec!(0), dec!(-10), dec!(10), 60),
            Err(TickMathError::NonPositivePrice(_))
        ));
        assert_eq!(
            calculate_tick_bounds(dec!(1), dec!(-10), dec!(10), -60),
            Err(TickMathError::InvalidSpacing(-60))
        );
    }
}
