use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Whether a pool takes one or both sides of the pair on deposit.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PoolSide {
    #[default]
    Double,
    Single,
}

/// A liquidity pool as reported by the aggregation backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pool {
    /// DEX the pool lives on (`ociswap`, `defiplaza`, ...).
    #[serde(rename = "type")]
    pub provider: String,
    /// On-ledger component address.
    pub component: String,
    /// Pool flavour (`double`, `single`, `precision`, `flex`, `basic`).
    #[serde(default)]
    pub sub_type: String,
    #[serde(default)]
    pub pool_type: PoolSide,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub tvl: f64,
    #[serde(default)]
    pub volume_7d: f64,
    #[serde(default)]
    pub volume_24h: f64,
    #[serde(default)]
    pub bonus_7d: f64,
    #[serde(default)]
    pub bonus_24h: f64,
    #[serde(default)]
    pub bonus_name: String,
    #[serde(default)]
    pub current_price: Decimal,
    #[serde(default, rename = "xRatio")]
    pub x_ratio: Option<Decimal>,
    #[serde(default, rename = "yRatio")]
    pub y_ratio: Option<Decimal>,
    pub left_token: String,
    pub right_token: String,
    #[serde(default)]
    pub left_alt: Option<String>,
    #[serde(default)]
    pub right_alt: Option<String>,
    #[serde(default)]
    pub left_name: String,
    #[serde(default)]
    pub right_name: String,
    #[serde(default)]
    pub boosted: bool,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub deposit_link: Option<String>,
}

impl Pool {
    /// Creates a pool with zeroed metrics.
    pub fn new(
        provider: impl Into<String>,
        component: impl Into<String>,
        name: impl Into<String>,
    ) -> Self {
        Self {
            provider: provider.into(),
            component: component.into(),
            sub_type: String::new(),
            pool_type: PoolSide::Double,
            name: name.into(),
            tvl: 0.0,
            volume_7d: 0.0,
            volume_24h: 0.0,
            bonus_7d: 0.0,
            bonus_24h: 0.0,
            bonus_name: String::new(),
            current_price: Decimal::ZERO,
            x_ratio: None,
            y_ratio: None,
            left_token: String::new(),
            right_token: String::new(),
            left_alt: None,
            right_alt: None,
            left_name: String::new(),
            right_name: String::new(),
            boosted: false,
            tags: Vec::new(),
            deposit_link: None,
        }
    }

    pub fn is_single_sided(&self) -> bool {
        self.sub_type == "single"
    }

    /// Returns true if either side of the pair is `resource`.
    pub fn involves(&self, resource: &str) -> bool {
        self.left_token == resource || self.right_token == resource
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_pool_deserializes_backend_shape() {
        let json = r#"{
            "type": "ociswap",
            "component": "component_rdx1abc",
            "sub_type": "precision",
            "pool_type": "double",
            "name": "XRD/HUG",
            "tvl": 125000.5,
            "volume_7d": 3000,
            "bonus_7d": 12.5,
            "current_price": 0.0123,
            "xRatio": "0.5",
            "left_token": "resource_rdx1xrd",
            "right_token": "resource_rdx1hug",
            "left_alt": "XRD",
            "right_alt": "HUG",
            "boosted": true,
            "tags": ["meme"]
        }"#;

        let pool: Pool = serde_json::from_str(json).unwrap();
        assert_eq!(pool.provider, "ociswap");
        assert_eq!(pool.pool_type, PoolSide::Double);
        assert_eq!(pool.current_price, dec!(0.0123));
        assert_eq!(pool.x_ratio, Some(dec!(0.5)));
        assert_eq!(pool.y_ratio, None);
        assert!(pool.boosted);
        assert!(pool.involves("resource_rdx1hug"));
        assert!(!pool.is_single_sided());
    }
}
