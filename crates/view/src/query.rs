//! Pool list state in the location query string.
//!
//! Only values that differ from the defaults are written, so a pristine list
//! has an empty query. Provider switches are on by default and are written
//! only when turned off.

use crate::filter::{FilterCondition, FlagSet, NumericFilter};
use crate::pools::{PoolColumn, PoolFilters, PoolTab, PoolView, PoolViewState};
use crate::sort::{SortDirection, SortState};
use crate::store::{ControlChange, ViewStore};
use std::sync::{Arc, Mutex, PoisonError};
use tracing::debug;
use url::form_urlencoded;

const SEARCH: &str = "search";
const TAB: &str = "tab";
const SORT: &str = "sort";
const DIRECTION: &str = "direction";
const TAG_PREFIX: &str = "tag_";
const TYPE_PREFIX: &str = "type_";
const PROVIDER_PREFIX: &str = "provider_";
const CONDITION_SUFFIX: &str = "_condition";

/// Metric keys and the filter they address.
const METRICS: [&str; 3] = ["tvl", "bonus", "volume"];

/// Codec between [`PoolViewState`] and a query string.
pub struct PoolQuery;

impl PoolQuery {
    /// Reads a query string, with or without the leading `?`.
    ///
    /// Unknown keys and values that fail to parse are skipped; the affected
    /// control keeps its default.
    pub fn parse(query: &str) -> PoolViewState {
        let query = query.strip_prefix('?').unwrap_or(query);
        let mut state = PoolViewState::default();
        let mut sort_column = None;
        let mut sort_direction = None;

        for (key, value) in form_urlencoded::parse(query.as_bytes()) {
            let (key, value) = (key.as_ref(), value.as_ref());
            match key {
                SEARCH => state.search = value.to_string(),
                TAB => {
                    if let Ok(tab) = value.parse::<PoolTab>() {
                        state.tab = tab;
                    }
                }
                SORT => sort_column = value.parse::<PoolColumn>().ok(),
                DIRECTION => sort_direction = value.parse::<SortDirection>().ok(),
                _ => Self::parse_filter(&mut state, key, value),
            }
        }

        if let (Some(column), Some(direction)) = (sort_column, sort_direction) {
            state.sort = SortState::new(column, direction);
        }
        state
    }

    fn parse_filter(state: &mut PoolViewState, key: &str, value: &str) {
        let filters = &mut state.filters;

        if let Some(name) = key.strip_prefix(TAG_PREFIX) {
            set_known(&mut filters.tags, name, value == "true");
        } else if let Some(name) = key.strip_prefix(TYPE_PREFIX) {
            set_known(&mut filters.pool_types, name, value == "true");
        } else if let Some(name) = key.strip_prefix(PROVIDER_PREFIX) {
            set_known(&mut filters.providers, name, value != "false");
        } else if let Some(metric) = key.strip_suffix(CONDITION_SUFFIX) {
            if let (Some(filter), Ok(condition)) = (
                metric_filter(filters, metric),
                value.parse::<FilterCondition>(),
            ) {
                filter.condition = condition;
            }
        } else if let Some(filter) = metric_filter(filters, key) {
            if let Ok(number) = value.parse::<f64>() {
                if number.is_finite() {
                    filter.value = Some(number);
                }
            }
        }
    }

    /// Writes the non-default parts of `state`, without a leading `?`.
    pub fn serialize(state: &PoolViewState) -> String {
        let mut out = form_urlencoded::Serializer::new(String::new());

        if !state.search.is_empty() {
            out.append_pair(SEARCH, &state.search);
        }
        if state.tab != PoolTab::default() {
            out.append_pair(TAB, state.tab.as_str());
        }
        if let (Some(column), true) = (state.sort.column, state.sort.is_active()) {
            out.append_pair(SORT, column.as_str());
            out.append_pair(DIRECTION, state.sort.direction.as_str());
        }

        let filters = &state.filters;
        for (metric, filter) in METRICS
            .into_iter()
            .zip([&filters.tvl, &filters.bonus, &filters.volume])
        {
            if let Some(value) = filter.value {
                out.append_pair(metric, &value.to_string());
            }
            if filter.condition != FilterCondition::default() {
                out.append_pair(
                    &format!("{metric}{CONDITION_SUFFIX}"),
                    filter.condition.as_str(),
                );
            }
        }
        for tag in filters.tags.selected() {
            out.append_pair(&format!("{TAG_PREFIX}{tag}"), "true");
        }
        for pool_type in filters.pool_types.selected() {
            out.append_pair(&format!("{TYPE_PREFIX}{pool_type}"), "true");
        }
        for provider in filters.providers.unselected() {
            out.append_pair(&format!("{PROVIDER_PREFIX}{provider}"), "false");
        }

        out.finish()
    }
}

fn set_known(flags: &mut FlagSet, name: &str, enabled: bool) {
    if flags.get(name).is_some() {
        flags.set(name, enabled);
    }
}

fn metric_filter<'a>(
    filters: &'a mut PoolFilters,
    metric: &str,
) -> Option<&'a mut NumericFilter> {
    match metric {
        "tvl" => Some(&mut filters.tvl),
        "bonus" => Some(&mut filters.bonus),
        "volume" => Some(&mut filters.volume),
        _ => None,
    }
}

/// Where the query string lives: a browser location, a config file, memory.
pub trait QueryHost {
    fn query(&self) -> String;

    /// Replaces the query in place, without adding a history entry.
    fn replace_query(&mut self, query: &str);
}

#[derive(Debug, Default)]
struct HostState {
    query: String,
    writes: usize,
}

/// In-process [`QueryHost`]. Clones share the same query.
#[derive(Debug, Clone, Default)]
pub struct MemoryQueryHost {
    inner: Arc<Mutex<HostState>>,
}

impl MemoryQueryHost {
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            inner: Arc::new(Mutex::new(HostState {
                query: query.into(),
                writes: 0,
            })),
        }
    }

    /// Number of `replace_query` calls so far.
    pub fn writes(&self) -> usize {
        self.inner
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .writes
    }
}

impl QueryHost for MemoryQueryHost {
    fn query(&self) -> String {
        self.inner
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .query
            .clone()
    }

    fn replace_query(&mut self, query: &str) {
        let mut inner = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
        inner.query = query.to_string();
        inner.writes += 1;
    }
}

/// Keeps a [`QueryHost`] in step with the pool list controls.
#[derive(Debug)]
pub struct UrlSync<H> {
    host: H,
    last: String,
}

impl<H: QueryHost> UrlSync<H> {
    pub fn new(host: H) -> Self {
        let last = host.query();
        Self { host, last }
    }

    /// Control state encoded in the host's current query.
    pub fn init(&self) -> PoolViewState {
        PoolQuery::parse(&self.last)
    }

    /// Writes `state` to the host if its encoding changed.
    /// Returns whether a write happened.
    pub fn sync(&mut self, state: &PoolViewState) -> bool {
        let query = PoolQuery::serialize(state);
        if query == self.last {
            return false;
        }
        debug!(query = %query, "Updating location query");
        self.host.replace_query(&query);
        self.last = query;
        true
    }

    /// Clears the whole query, unknown keys included, and returns the
    /// default state.
    pub fn reset(&mut self) -> PoolViewState {
        self.host.replace_query("");
        self.last.clear();
        PoolViewState::default()
    }

    pub fn host(&self) -> &H {
        &self.host
    }
}

impl<H: QueryHost + 'static> UrlSync<H> {
    /// Hands the sync over to `store`: each control change rewrites the
    /// query and a store reset clears it.
    pub fn follow(mut self, store: &mut ViewStore<PoolView>) {
        store.watch_state(move |change, state| match change {
            ControlChange::Updated => {
                self.sync(state);
            }
            ControlChange::Reset => {
                self.reset();
            }
        });
    }
}
