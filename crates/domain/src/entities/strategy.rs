use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StrategyStep {
    pub icon: String,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequiredAsset {
    pub resource_address: String,
    pub symbol: String,
}

/// How the headline reward rate compounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum RewardKind {
    Apy,
    Apr,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TotalRewards {
    pub value: f64,
    #[serde(rename = "type")]
    pub kind: RewardKind,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RewardShare {
    pub token: String,
    pub apy: f64,
}

/// A multi-step action bundle assembled by the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Strategy {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub steps: Vec<StrategyStep>,
    #[serde(default)]
    pub required_assets: Vec<RequiredAsset>,
    #[serde(default)]
    pub reward_tokens: Vec<String>,
    pub total_rewards: TotalRewards,
    #[serde(default)]
    pub rewards_breakdown: Vec<RewardShare>,
    #[serde(default)]
    pub dapps_utilized: Vec<StrategyStep>,
}

impl Strategy {
    pub fn requires(&self, symbol: &str) -> bool {
        self.required_assets
            .iter()
            .any(|asset| asset.symbol.eq_ignore_ascii_case(symbol))
    }
}

/// Manifest returned by the backend for executing a strategy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StrategyManifest {
    pub manifest: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strategy_deserializes() {
        let json = r#"{
            "id": 4,
            "name": "Staking",
            "description": "Lock up tokens",
            "steps": [{"icon": "lock", "label": "Stake"}],
            "requiredAssets": [{"resource_address": "resource_rdx1xrd", "symbol": "XRD"}],
            "rewardTokens": ["XRD"],
            "totalRewards": {"value": 7.5, "type": "APY"},
            "rewardsBreakdown": [{"token": "XRD", "apy": 7.5}]
        }"#;

        let strategy: Strategy = serde_json::from_str(json).unwrap();
        assert_eq!(strategy.total_rewards.kind, RewardKind::Apy);
        assert!(strategy.requires("xrd"));
        assert!(!strategy.requires("HUG"));
        assert!(strategy.dapps_utilized.is_empty());
    }
}
