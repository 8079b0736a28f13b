use crate::search::SearchOptions;
use crate::sort::{SortKey, SortState};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Describes one kind of list: its records, tabs, sort columns and filters.
///
/// Implementors carry whatever context the predicates need (the user's
/// positions, held tokens, tag aliases), so the same pipeline serves pools,
/// portfolio items and strategies.
pub trait ViewModel {
    type Item: Clone;
    type Tab: Copy + Eq + Default + fmt::Debug;
    type Column: Copy + Eq + fmt::Debug;
    type Filters: Clone + Default + PartialEq + fmt::Debug;

    /// Category filter, applied first.
    fn matches_tab(&self, item: &Self::Item, tab: Self::Tab) -> bool;

    /// Fields the free-text search looks at.
    fn search_fields<'a>(&self, item: &'a Self::Item) -> Vec<&'a str>;

    /// Numeric, tag and category filters, applied after search.
    fn matches_filters(&self, item: &Self::Item, filters: &Self::Filters) -> bool;

    fn sort_key(&self, item: &Self::Item, column: Self::Column) -> SortKey;

    fn search_options(&self) -> SearchOptions {
        SearchOptions::default()
    }
}

/// The full tuple of controls for one list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ViewState<T, C, F> {
    pub tab: T,
    pub search: String,
    pub sort: SortState<C>,
    pub filters: F,
}

impl<T: Default, C, F: Default> Default for ViewState<T, C, F> {
    fn default() -> Self {
        Self {
            tab: T::default(),
            search: String::new(),
            sort: SortState::default(),
            filters: F::default(),
        }
    }
}

/// Control state of a given view model.
pub type StateOf<M> = ViewState<
    <M as ViewModel>::Tab,
    <M as ViewModel>::Column,
    <M as ViewModel>::Filters,
>;
