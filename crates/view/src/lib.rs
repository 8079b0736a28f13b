//! Derived list views for pools, portfolio positions and strategies.
//!
//! Each list is a pure projection of one base collection and a set of
//! independent controls:
//! - Tab/category selection
//! - Fuzzy text search (debounced)
//! - Numeric, tag, pool-type and provider filters
//! - Three-state column sort
//!
//! A [`store::ViewStore`] recomputes the projection on every control change
//! and notifies subscribers; [`query::UrlSync`] mirrors pool controls into a
//! shareable query string.

/// Prelude module for convenient imports.
pub mod prelude;

/// Debounced values and latest-response guards.
pub mod debounce;
/// Numeric and flag filters.
pub mod filter;
/// The view-model trait and control state.
pub mod model;
/// The fixed tab → search → filter → sort pipeline.
pub mod pipeline;
/// Pool list view.
pub mod pools;
/// Portfolio list view.
pub mod portfolio;
/// Query-string mirror of pool controls.
pub mod query;
/// Approximate text search.
pub mod search;
/// Column sorting.
pub mod sort;
/// Stateful view store with subscriptions.
pub mod store;
/// Strategy list view.
pub mod strategies;
