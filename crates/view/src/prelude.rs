pub use crate::debounce::{Debounce, LatestGuard, RequestGate, Ticket};
pub use crate::filter::{FilterCondition, FlagSet, NumericFilter, TagAliases};
pub use crate::model::{StateOf, ViewModel, ViewState};
pub use crate::pipeline::derive_view;
pub use crate::pools::{
    FeaturedPools, PoolColumn, PoolFilters, PoolTab, PoolView, PoolViewState, featured_pools,
};
pub use crate::portfolio::{
    PortfolioColumn, PortfolioFilters, PortfolioTab, PortfolioView, PortfolioViewState,
};
pub use crate::query::{MemoryQueryHost, PoolQuery, QueryHost, UrlSync};
pub use crate::search::{FuzzyMatcher, SearchOptions, rank};
pub use crate::sort::{SortDirection, SortKey, SortState, sort_items};
pub use crate::store::{ControlChange, ViewConfig, ViewStore};
pub use crate::strategies::{
    StrategyColumn, StrategyFilters, StrategyTab, StrategyView, StrategyViewState,
};
