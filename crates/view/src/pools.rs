use crate::filter::{FlagSet, NumericFilter, TagAliases};
use crate::model::{ViewModel, ViewState};
use crate::sort::SortKey;
use earn_domain::entities::{Balances, Pool, PoolSide, PortfolioItem};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::str::FromStr;

/// Tag checkboxes offered by the pool list.
pub const POOL_TAGS: [&str; 8] = [
    "bridged token",
    "stablecoin",
    "dex",
    "defi",
    "dao",
    "meme",
    "lending",
    "gamefi",
];

/// Pool flavours matched against [`Pool::sub_type`].
pub const POOL_TYPES: [&str; 5] = ["double", "single", "precision", "flex", "basic"];

/// Providers listed in the provider filter, all enabled by default.
pub const POOL_PROVIDERS: [&str; 2] = ["ociswap", "defiplaza"];

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PoolTab {
    #[default]
    All,
    Double,
    Single,
    Boosted,
    MyPools,
    OwnedTokens,
}

impl PoolTab {
    pub const ALL: [PoolTab; 6] = [
        Self::All,
        Self::Double,
        Self::Single,
        Self::Boosted,
        Self::MyPools,
        Self::OwnedTokens,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Double => "double",
            Self::Single => "single",
            Self::Boosted => "boosted",
            Self::MyPools => "my_pools",
            Self::OwnedTokens => "owned_tokens",
        }
    }
}

impl FromStr for PoolTab {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|tab| tab.as_str() == s)
            .ok_or(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PoolColumn {
    Tvl,
    Bonus7d,
    Volume7d,
    BonusName,
}

impl PoolColumn {
    pub const ALL: [PoolColumn; 4] = [Self::Tvl, Self::Bonus7d, Self::Volume7d, Self::BonusName];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Tvl => "tvl",
            Self::Bonus7d => "bonus_7d",
            Self::Volume7d => "volume_7d",
            Self::BonusName => "bonus_name",
        }
    }
}

impl FromStr for PoolColumn {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|column| column.as_str() == s)
            .ok_or(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PoolFilters {
    pub tvl: NumericFilter,
    pub bonus: NumericFilter,
    pub volume: NumericFilter,
    pub tags: FlagSet,
    pub pool_types: FlagSet,
    pub providers: FlagSet,
}

impl Default for PoolFilters {
    fn default() -> Self {
        Self {
            tvl: NumericFilter::default(),
            bonus: NumericFilter::default(),
            volume: NumericFilter::default(),
            tags: FlagSet::new(POOL_TAGS, false),
            pool_types: FlagSet::new(POOL_TYPES, false),
            providers: FlagSet::new(POOL_PROVIDERS, true),
        }
    }
}

pub type PoolViewState = ViewState<PoolTab, PoolColumn, PoolFilters>;

/// Pool list context: what the connected account holds and how tags group.
#[derive(Debug, Clone, Default)]
pub struct PoolView {
    my_components: BTreeSet<String>,
    owned_tokens: BTreeSet<String>,
    tag_aliases: TagAliases,
}

impl PoolView {
    pub fn new(tag_aliases: TagAliases) -> Self {
        Self {
            tag_aliases,
            ..Self::default()
        }
    }

    /// Components the user has positions in, for the "my pools" tab.
    pub fn with_portfolio<'a>(mut self, items: impl IntoIterator<Item = &'a PortfolioItem>) -> Self {
        self.my_components = items
            .into_iter()
            .filter(|item| !item.component.is_empty())
            .map(|item| item.component.clone())
            .collect();
        self
    }

    /// Resources held by the account, for the "owned tokens" tab.
    pub fn with_balances(mut self, balances: &Balances) -> Self {
        self.owned_tokens = balances.held_resources().map(str::to_string).collect();
        self
    }

    pub fn is_my_pool(&self, pool: &Pool) -> bool {
        !pool.is_single_sided() && self.my_components.contains(&pool.component)
    }

    pub fn holds_token_of(&self, pool: &Pool) -> bool {
        self.owned_tokens.contains(&pool.left_token) || self.owned_tokens.contains(&pool.right_token)
    }

    fn provider_enabled(providers: &FlagSet, provider: &str) -> bool {
        // Providers missing from the set are shown.
        providers.none_selected() || providers.get(provider).unwrap_or(true)
    }
}

impl ViewModel for PoolView {
    type Item = Pool;
    type Tab = PoolTab;
    type Column = PoolColumn;
    type Filters = PoolFilters;

    fn matches_tab(&self, pool: &Pool, tab: PoolTab) -> bool {
        match tab {
            PoolTab::All => true,
            PoolTab::Double => pool.pool_type == PoolSide::Double,
            PoolTab::Single => pool.pool_type == PoolSide::Single,
            PoolTab::Boosted => pool.boosted,
            PoolTab::MyPools => self.is_my_pool(pool),
            PoolTab::OwnedTokens => self.holds_token_of(pool),
        }
    }

    fn search_fields<'a>(&self, pool: &'a Pool) -> Vec<&'a str> {
        let mut fields = vec![pool.name.as_str()];
        fields.extend(pool.left_alt.as_deref());
        fields.extend(pool.right_alt.as_deref());
        fields
    }

    fn matches_filters(&self, pool: &Pool, filters: &PoolFilters) -> bool {
        filters.tvl.matches(pool.tvl)
            && filters.bonus.matches(pool.bonus_7d)
            && filters.volume.matches(pool.volume_7d)
            && filters
                .tags
                .matches_any(|tag| self.tag_aliases.matches(tag, &pool.tags))
            && filters
                .pool_types
                .matches_any(|sub_type| sub_type == pool.sub_type)
            && Self::provider_enabled(&filters.providers, &pool.provider)
    }

    fn sort_key(&self, pool: &Pool, column: PoolColumn) -> SortKey {
        match column {
            PoolColumn::Tvl => SortKey::Number(pool.tvl),
            PoolColumn::Bonus7d => SortKey::Number(pool.bonus_7d),
            PoolColumn::Volume7d => SortKey::Number(pool.volume_7d),
            PoolColumn::BonusName => SortKey::text(&pool.bonus_name),
        }
    }
}

/// Highlights shown above the pool list.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FeaturedPools {
    pub deepest_liquidity: Vec<Pool>,
    pub highest_volume: Vec<Pool>,
    pub best_bonus: Vec<Pool>,
}

const FEATURED_COUNT: usize = 3;

pub fn featured_pools(pools: &[Pool]) -> FeaturedPools {
    let top = |mut ranked: Vec<&Pool>, metric: fn(&Pool) -> f64| {
        ranked.sort_by(|a, b| metric(b).total_cmp(&metric(a)));
        ranked
            .into_iter()
            .take(FEATURED_COUNT)
            .cloned()
            .collect::<Vec<_>>()
    };

    FeaturedPools {
        deepest_liquidity: top(pools.iter().collect(), |p| p.tvl),
        highest_volume: top(pools.iter().collect(), |p| p.volume_7d),
        best_bonus: top(pools.iter().filter(|p| p.boosted).collect(), |p| p.bonus_7d),
    }
}
