//! Table rendering for command output.

use earn_domain::entities::{Pool, PortfolioItem, Strategy};
use earn_domain::format::{format_large_number, format_number};
use earn_domain::math::TickBounds;
use earn_domain::metrics::PortfolioTotals;
use prettytable::{Table, cell, row};
use rust_decimal::prelude::ToPrimitive;

pub fn pools_table(pools: &[Pool]) -> Table {
    let mut table = Table::new();
    table.set_titles(row!["Pool", "Provider", "Type", "TVL", "Volume 7d", "Bonus 7d", "Bonus"]);
    for pool in pools {
        table.add_row(row![
            pool.name,
            pool.provider,
            pool.sub_type,
            r->format_large_number(pool.tvl),
            r->format_large_number(pool.volume_7d),
            r->format!("{:.2}%", pool.bonus_7d),
            pool.bonus_name
        ]);
    }
    table
}

pub fn portfolio_table(items: &[PortfolioItem]) -> Table {
    let mut table = Table::new();
    table.set_titles(row!["Position", "Provider", "Invested", "Value", "PnL", "PnL %"]);
    for item in items {
        table.add_row(row![
            item.pool_name,
            item.provider,
            r->money(item.invested),
            r->money(item.current_value),
            r->money(item.pnl),
            r->format!("{:.2}%", item.pnl_percentage)
        ]);
    }
    table
}

pub fn totals_table(totals: &PortfolioTotals) -> Table {
    let mut table = Table::new();
    table.add_row(row!["Invested", r->money(totals.invested)]);
    table.add_row(row!["Current value", r->money(totals.current_value)]);
    table.add_row(row!["PnL", r->money(totals.pnl)]);
    table.add_row(row!["PnL %", r->format!("{:.2}%", totals.pnl_percentage)]);
    table
}

pub fn strategies_table(strategies: &[Strategy]) -> Table {
    let mut table = Table::new();
    table.set_titles(row!["Id", "Strategy", "Rewards", "Requires"]);
    for strategy in strategies {
        let assets: Vec<&str> = strategy
            .required_assets
            .iter()
            .map(|a| a.symbol.as_str())
            .collect();
        table.add_row(row![
            strategy.id,
            strategy.name,
            r->format!(
                "{:.2}% {:?}",
                strategy.total_rewards.value, strategy.total_rewards.kind
            ),
            assets.join(", ")
        ]);
    }
    table
}

pub fn ticks_table(bounds: &TickBounds) -> Table {
    let mut table = Table::new();
    table.set_titles(row!["", "Tick", "Price"]);
    table.add_row(row![
        "Lower",
        r->bounds.lower_tick,
        r->format_number(bounds.lower_price.to_f64().unwrap_or(f64::NAN))
    ]);
    table.add_row(row![
        "Upper",
        r->bounds.upper_tick,
        r->format_number(bounds.upper_price.to_f64().unwrap_or(f64::NAN))
    ]);
    table
}

fn money(value: rust_decimal::Decimal) -> String {
    format!("${}", format_large_number(value.to_f64().unwrap_or(0.0)))
}
