use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::str::FromStr;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FilterCondition {
    #[default]
    Above,
    Below,
}

impl FilterCondition {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Above => "above",
            Self::Below => "below",
        }
    }
}

impl FromStr for FilterCondition {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "above" => Ok(Self::Above),
            "below" => Ok(Self::Below),
            _ => Err(()),
        }
    }
}

/// Threshold on one numeric metric. Inactive while `value` is unset.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct NumericFilter {
    pub condition: FilterCondition,
    pub value: Option<f64>,
}

impl NumericFilter {
    pub fn above(value: f64) -> Self {
        Self {
            condition: FilterCondition::Above,
            value: Some(value),
        }
    }

    pub fn below(value: f64) -> Self {
        Self {
            condition: FilterCondition::Below,
            value: Some(value),
        }
    }

    pub fn is_active(&self) -> bool {
        self.value.is_some()
    }

    /// Both bounds are inclusive.
    pub fn matches(&self, metric: f64) -> bool {
        match (self.value, self.condition) {
            (None, _) => true,
            (Some(threshold), FilterCondition::Above) => metric >= threshold,
            (Some(threshold), FilterCondition::Below) => metric <= threshold,
        }
    }
}

/// Named on/off switches, such as tag or provider checkboxes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlagSet {
    flags: BTreeMap<String, bool>,
}

impl FlagSet {
    pub fn new<I, S>(names: I, enabled: bool) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            flags: names.into_iter().map(|n| (n.into(), enabled)).collect(),
        }
    }

    /// Sets a flag, adding it if unknown.
    pub fn set(&mut self, name: &str, enabled: bool) {
        self.flags.insert(name.to_string(), enabled);
    }

    pub fn toggle(&mut self, name: &str) {
        let entry = self.flags.entry(name.to_string()).or_insert(false);
        *entry = !*entry;
    }

    /// `None` for names the set does not know about.
    pub fn get(&self, name: &str) -> Option<bool> {
        self.flags.get(name).copied()
    }

    pub fn is_enabled(&self, name: &str) -> bool {
        self.get(name).unwrap_or(false)
    }

    pub fn selected(&self) -> impl Iterator<Item = &str> {
        self.flags
            .iter()
            .filter(|(_, on)| **on)
            .map(|(name, _)| name.as_str())
    }

    pub fn unselected(&self) -> impl Iterator<Item = &str> {
        self.flags
            .iter()
            .filter(|(_, on)| !**on)
            .map(|(name, _)| name.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, bool)> {
        self.flags.iter().map(|(name, on)| (name.as_str(), *on))
    }

    pub fn none_selected(&self) -> bool {
        self.selected().next().is_none()
    }

    /// True when nothing is selected or `pred` holds for a selected name.
    pub fn matches_any(&self, mut pred: impl FnMut(&str) -> bool) -> bool {
        self.none_selected() || self.selected().any(|name| pred(name))
    }
}

/// Maps a filter tag to the pool tags it stands for.
///
/// Tags not listed match themselves only. Comparison ignores case.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagAliases {
    aliases: BTreeMap<String, BTreeSet<String>>,
}

impl Default for TagAliases {
    fn default() -> Self {
        let mut aliases = Self::empty();
        aliases.insert("stablecoin", ["stablecoin", "stable coin"]);
        aliases
    }
}

impl TagAliases {
    pub fn empty() -> Self {
        Self {
            aliases: BTreeMap::new(),
        }
    }

    pub fn insert<I, S>(&mut self, tag: &str, equivalents: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let entry = self.aliases.entry(tag.to_lowercase()).or_default();
        entry.insert(tag.to_lowercase());
        entry.extend(equivalents.into_iter().map(|s| s.as_ref().to_lowercase()));
    }

    /// All lowercased names `tag` covers, itself included.
    pub fn expand(&self, tag: &str) -> BTreeSet<String> {
        let key = tag.to_lowercase();
        match self.aliases.get(&key) {
            Some(set) => set.clone(),
            None => BTreeSet::from([key]),
        }
    }

    /// Whether any of `item_tags` falls under the filter tag `tag`.
    pub fn matches<S: AsRef<str>>(&self, tag: &str, item_tags: &[S]) -> bool {
        let names = self.expand(tag);
        item_tags
            .iter()
            .any(|t| names.contains(&t.as_ref().to_lowercase()))
    }
}
