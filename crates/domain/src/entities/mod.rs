pub mod balances;
pub mod pool;
pub mod portfolio;
pub mod preview;
pub mod strategy;

// Re-export for easier access
pub use balances::{Balances, ResourceBalance};
pub use pool::{Pool, PoolSide};
pub use portfolio::{PortfolioItem, PositionKind};
pub use preview::{AddLiquidityPreview, QuotedAmount};
pub use strategy::{
    RequiredAsset, RewardKind, RewardShare, Strategy, StrategyManifest, StrategyStep,
    TotalRewards,
};
