use crate::filter::FlagSet;
use crate::model::{ViewModel, ViewState};
use crate::sort::SortKey;
use earn_domain::entities::{PortfolioItem, PositionKind};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PortfolioTab {
    #[default]
    All,
    Liquidity,
    Strategies,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PortfolioColumn {
    PoolName,
    Provider,
    Invested,
    CurrentValue,
    Pnl,
    PnlPercentage,
}

/// Providers the user has switched on. Empty selection shows every position.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PortfolioFilters {
    pub providers: FlagSet,
}

pub type PortfolioViewState = ViewState<PortfolioTab, PortfolioColumn, PortfolioFilters>;

#[derive(Debug, Clone, Copy, Default)]
pub struct PortfolioView;

impl ViewModel for PortfolioView {
    type Item = PortfolioItem;
    type Tab = PortfolioTab;
    type Column = PortfolioColumn;
    type Filters = PortfolioFilters;

    fn matches_tab(&self, item: &PortfolioItem, tab: PortfolioTab) -> bool {
        match tab {
            PortfolioTab::All => true,
            PortfolioTab::Liquidity => item.kind() == PositionKind::Lp,
            PortfolioTab::Strategies => item.kind() == PositionKind::Strategy,
        }
    }

    fn search_fields<'a>(&self, item: &'a PortfolioItem) -> Vec<&'a str> {
        vec![item.pool_name.as_str()]
    }

    fn matches_filters(&self, item: &PortfolioItem, filters: &PortfolioFilters) -> bool {
        filters
            .providers
            .matches_any(|provider| provider.eq_ignore_ascii_case(&item.provider))
    }

    fn sort_key(&self, item: &PortfolioItem, column: PortfolioColumn) -> SortKey {
        match column {
            PortfolioColumn::PoolName => SortKey::text(&item.pool_name),
            PortfolioColumn::Provider => SortKey::text(&item.provider),
            PortfolioColumn::Invested => SortKey::Decimal(item.invested),
            PortfolioColumn::CurrentValue => SortKey::Decimal(item.current_value),
            PortfolioColumn::Pnl => SortKey::Decimal(item.pnl),
            PortfolioColumn::PnlPercentage => SortKey::Decimal(item.pnl_percentage),
        }
    }
}
