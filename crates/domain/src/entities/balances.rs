use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceBalance {
    pub resource_address: String,
    pub balance: Decimal,
}

/// Fungible and non-fungible holdings of one account.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Balances {
    pub account: String,
    #[serde(default)]
    pub fungibles: Vec<ResourceBalance>,
    #[serde(default)]
    pub non_fungibles: Vec<ResourceBalance>,
}

impl Balances {
    pub fn empty(account: impl Into<String>) -> Self {
        Self {
            account: account.into(),
            ..Self::default()
        }
    }

    /// Balance of a fungible resource, zero if the account does not hold it.
    pub fn fungible_balance(&self, resource: &str) -> Decimal {
        self.fungibles
            .iter()
            .find(|f| f.resource_address == resource)
            .map(|f| f.balance)
            .unwrap_or(Decimal::ZERO)
    }

    /// Returns true if the account holds a positive amount of `resource`.
    pub fn holds(&self, resource: &str) -> bool {
        self.fungible_balance(resource) > Decimal::ZERO
    }

    /// Addresses of every fungible resource with a positive balance.
    pub fn held_resources(&self) -> impl Iterator<Item = &str> {
        self.fungibles
            .iter()
            .filter(|f| f.balance > Decimal::ZERO)
            .map(|f| f.resource_address.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_fungible_balance_defaults_to_zero() {
        let balances = Balances {
            account: "account_rdx1".to_string(),
            fungibles: vec![
                ResourceBalance {
                    resource_address: "xrd".to_string(),
                    balance: dec!(12.5),
                },
                ResourceBalance {
                    resource_address: "hug".to_string(),
                    balance: Decimal::ZERO,
                },
            ],
            non_fungibles: vec![],
        };

        assert_eq!(balances.fungible_balance("xrd"), dec!(12.5));
        assert_eq!(balances.fungible_balance("oci"), Decimal::ZERO);
        assert!(balances.holds("xrd"));
        assert!(!balances.holds("hug"));
        assert_eq!(balances.held_resources().collect::<Vec<_>>(), vec!["xrd"]);
    }
}
