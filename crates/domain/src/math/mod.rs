//! Concentrated-liquidity price math.

pub mod price_tick;

pub use price_tick::{
    DEFAULT_TICK_SPACING, TICK_BASE, TickBounds, adjust_price_by_percentage,
    align_tick_to_spacing, calculate_price_bounds, calculate_tick_bounds, price_to_tick,
    tick_to_price,
};
