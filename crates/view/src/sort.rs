use crate::model::ViewModel;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    None,
    Asc,
    Desc,
}

impl SortDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Asc => "asc",
            Self::Desc => "desc",
        }
    }
}

impl FromStr for SortDirection {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "none" => Ok(Self::None),
            "asc" => Ok(Self::Asc),
            "desc" => Ok(Self::Desc),
            _ => Err(()),
        }
    }
}

/// Column and direction of the active sort.
///
/// `column` is `None` exactly when `direction` is [`SortDirection::None`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortState<C> {
    pub column: Option<C>,
    pub direction: SortDirection,
}

impl<C> Default for SortState<C> {
    fn default() -> Self {
        Self {
            column: None,
            direction: SortDirection::None,
        }
    }
}

impl<C: Copy + Eq> SortState<C> {
    pub fn new(column: C, direction: SortDirection) -> Self {
        match direction {
            SortDirection::None => Self::default(),
            _ => Self {
                column: Some(column),
                direction,
            },
        }
    }

    /// State after a click on `column`.
    ///
    /// The same column cycles `none → asc → desc → none`; a different column
    /// starts over at `asc`.
    pub fn click(&self, column: C) -> Self {
        let direction = if self.column == Some(column) {
            match self.direction {
                SortDirection::None => SortDirection::Asc,
                SortDirection::Asc => SortDirection::Desc,
                SortDirection::Desc => SortDirection::None,
            }
        } else {
            SortDirection::Asc
        };
        Self::new(column, direction)
    }

    pub fn is_active(&self) -> bool {
        self.column.is_some() && self.direction != SortDirection::None
    }
}

/// Comparable value extracted from a record for one column.
#[derive(Debug, Clone, PartialEq)]
pub enum SortKey {
    Number(f64),
    Decimal(Decimal),
    /// Lowercased text.
    Text(String),
}

impl SortKey {
    /// Text key compared without regard to case.
    pub fn text(value: &str) -> Self {
        Self::Text(value.to_lowercase())
    }

    fn rank(&self) -> u8 {
        match self {
            Self::Number(_) => 0,
            Self::Decimal(_) => 1,
            Self::Text(_) => 2,
        }
    }

    /// Total order: NaN sorts after every number, and keys of different
    /// kinds order by kind.
    fn compare(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Self::Number(a), Self::Number(b)) => a.total_cmp(b),
            (Self::Decimal(a), Self::Decimal(b)) => a.cmp(b),
            (Self::Text(a), Self::Text(b)) => a.cmp(b),
            _ => self.rank().cmp(&other.rank()),
        }
    }
}

/// Sorts references to records by the active column.
///
/// With no active sort the input order is returned untouched. The sort is
/// stable, so equal keys keep their relative order in both directions.
pub fn sort_items<'a, M: ViewModel>(
    model: &M,
    items: Vec<&'a M::Item>,
    sort: &SortState<M::Column>,
) -> Vec<&'a M::Item> {
    let Some(column) = sort.column else {
        return items;
    };
    let descending = match sort.direction {
        SortDirection::None => return items,
        SortDirection::Asc => false,
        SortDirection::Desc => true,
    };

    let mut keyed: Vec<(SortKey, &'a M::Item)> = items
        .into_iter()
        .map(|item| (model.sort_key(item, column), item))
        .collect();
    keyed.sort_by(|(a, _), (b, _)| {
        if descending {
            b.compare(a)
        } else {
            a.compare(b)
        }
    });
    keyed.into_iter().map(|(_, item)| item).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_click_cycles_same_column() {
        let sort = SortState::<u8>::default();
        let asc = sort.click(1);
        assert_eq!(asc, SortState::new(1, SortDirection::Asc));
        let desc = asc.click(1);
        assert_eq!(desc.direction, SortDirection::Desc);
        let none = desc.click(1);
        assert_eq!(none, SortState::default());
        assert!(!none.is_active());
    }

    #[test]
    fn test_click_other_column_resets_to_asc() {
        let desc = SortState::new(1u8, SortDirection::Desc);
        let other = desc.click(2);
        assert_eq!(other, SortState::new(2, SortDirection::Asc));
    }

    #[test]
    fn test_new_with_none_clears_column() {
        let sort = SortState::new(3u8, SortDirection::None);
        assert_eq!(sort.column, None);
    }

    #[test]
    fn test_sort_key_text_ignores_case() {
        assert_eq!(
            SortKey::text("Alpha").compare(&SortKey::text("beta")),
            Ordering::Less
        );
        assert_eq!(
            SortKey::text("GAMMA").compare(&SortKey::text("gamma")),
            Ordering::Equal
        );
    }

    #[test]
    fn test_number_keys_order_nan_last() {
        let mut keys = vec![
            SortKey::Number(f64::NAN),
            SortKey::Number(2.0),
            SortKey::Number(-1.0),
            SortKey::Number(f64::NAN),
        ];
        keys.sort_by(|a, b| a.compare(b));
        assert_eq!(keys[0], SortKey::Number(-1.0));
        assert_eq!(keys[1], SortKey::Number(2.0));
        assert!(matches!(keys[2], SortKey::Number(v) if v.is_nan()));
        assert!(matches!(keys[3], SortKey::Number(v) if v.is_nan()));
    }

    #[test]
    fn test_mixed_keys_order_by_kind() {
        assert_eq!(
            SortKey::Number(9.0).compare(&SortKey::text("a")),
            Ordering::Less
        );
        assert_eq!(
            SortKey::text("a").compare(&SortKey::Decimal(Decimal::ONE)),
            Ordering::Greater
        );
    }

    #[test]
    fn test_direction_round_trips_through_str() {
        for direction in [SortDirection::None, SortDirection::Asc, SortDirection::Desc] {
            assert_eq!(direction.as_str().parse::<SortDirection>(), Ok(direction));
        }
        assert!("up".parse::<SortDirection>().is_err());
    }
}
