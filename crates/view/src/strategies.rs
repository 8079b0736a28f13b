use crate::filter::{FlagSet, NumericFilter};
use crate::model::{ViewModel, ViewState};
use crate::sort::SortKey;
use earn_domain::entities::{RewardKind, Strategy};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StrategyTab {
    #[default]
    All,
    Apy,
    Apr,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StrategyColumn {
    Name,
    TotalRewards,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StrategyFilters {
    /// Asset symbols; a strategy passes if it requires any selected one.
    pub assets: FlagSet,
    pub rewards: NumericFilter,
}

pub type StrategyViewState = ViewState<StrategyTab, StrategyColumn, StrategyFilters>;

#[derive(Debug, Clone, Copy, Default)]
pub struct StrategyView;

impl StrategyView {
    /// Asset checkboxes for the strategies in `strategies`, all unchecked.
    pub fn asset_filters(strategies: &[Strategy]) -> FlagSet {
        FlagSet::new(
            strategies
                .iter()
                .flat_map(|s| s.required_assets.iter())
                .map(|asset| asset.symbol.to_uppercase()),
            false,
        )
    }
}

impl ViewModel for StrategyView {
    type Item = Strategy;
    type Tab = StrategyTab;
    type Column = StrategyColumn;
    type Filters = StrategyFilters;

    fn matches_tab(&self, strategy: &Strategy, tab: StrategyTab) -> bool {
        match tab {
            StrategyTab::All => true,
            StrategyTab::Apy => strategy.total_rewards.kind == RewardKind::Apy,
            StrategyTab::Apr => strategy.total_rewards.kind == RewardKind::Apr,
        }
    }

    fn search_fields<'a>(&self, strategy: &'a Strategy) -> Vec<&'a str> {
        vec![strategy.name.as_str(), strategy.description.as_str()]
    }

    fn matches_filters(&self, strategy: &Strategy, filters: &StrategyFilters) -> bool {
        filters.rewards.matches(strategy.total_rewards.value)
            && filters.assets.matches_any(|symbol| strategy.requires(symbol))
    }

    fn sort_key(&self, strategy: &Strategy, column: StrategyColumn) -> SortKey {
        match column {
            StrategyColumn::Name => SortKey::text(&strategy.name),
            StrategyColumn::TotalRewards => SortKey::Number(strategy.total_rewards.value),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::derive_view;
    use crate::sort::{SortDirection, SortState};
    use earn_domain::entities::{RequiredAsset, TotalRewards};

    fn strategy(id: u64, name: &str, value: f64, kind: RewardKind, assets: &[&str]) -> Strategy {
        Strategy {
            id,
            name: name.to_string(),
            description: format!("{name} strategy"),
            steps: Vec::new(),
            required_assets: assets
                .iter()
                .map(|symbol| RequiredAsset {
                    resource_address: format!("resource_{}", symbol.to_lowercase()),
                    symbol: symbol.to_string(),
                })
                .collect(),
            reward_tokens: Vec::new(),
            total_rewards: TotalRewards { value, kind },
            rewards_breakdown: Vec::new(),
            dapps_utilized: Vec::new(),
        }
    }

    fn sample() -> Vec<Strategy> {
        vec![
            strategy(1, "Leveraged XRD", 24.0, RewardKind::Apy, &["XRD"]),
            strategy(2, "Stable Loop", 8.5, RewardKind::Apr, &["xUSDC", "XRD"]),
            strategy(3, "Bitcoin Carry", 12.0, RewardKind::Apy, &["xwBTC"]),
        ]
    }

    fn ids(strategies: &[Strategy]) -> Vec<u64> {
        strategies.iter().map(|s| s.id).collect()
    }

    #[test]
    fn test_tabs_by_reward_kind() {
        let base = sample();
        let state = StrategyViewState {
            tab: StrategyTab::Apr,
            ..StrategyViewState::default()
        };
        assert_eq!(ids(&derive_view(&StrategyView, &base, &state)), [2]);
    }

    #[test]
    fn test_asset_and_rewards_filters() {
        let base = sample();
        let mut state = StrategyViewState::default();
        state.filters.assets = StrategyView::asset_filters(&base);
        assert_eq!(derive_view(&StrategyView, &base, &state).len(), 3);

        state.filters.assets.set("XRD", true);
        assert_eq!(ids(&derive_view(&StrategyView, &base, &state)), [1, 2]);

        state.filters.rewards = NumericFilter::above(10.0);
        assert_eq!(ids(&derive_view(&StrategyView, &base, &state)), [1]);
    }

    #[test]
    fn test_sort_by_total_rewards() {
        let base = sample();
        let state = StrategyViewState {
            sort: SortState::new(StrategyColumn::TotalRewards, SortDirection::Desc),
            ..StrategyViewState::default()
        };
        assert_eq!(ids(&derive_view(&StrategyView, &base, &state)), [1, 3, 2]);
    }

    #[test]
    fn test_search_looks_at_description() {
        let base = sample();
        let state = StrategyViewState {
            search: "carry".to_string(),
            ..StrategyViewState::default()
        };
        assert_eq!(ids(&derive_view(&StrategyView, &base, &state)), [3]);
    }
}
