use crate::debounce::{Debounce, LatestGuard, Ticket};
use crate::model::{StateOf, ViewModel};
use crate::pipeline::derive_view;
use crate::sort::SortState;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::debug;

/// Tuning for a [`ViewStore`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViewConfig {
    /// Quiet period before a typed search term is applied.
    pub search_debounce: Duration,
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            search_debounce: Duration::from_millis(300),
        }
    }
}

type Listener<T> = Box<dyn FnMut(&[T])>;
type StateListener<S> = Box<dyn FnMut(ControlChange, &S)>;

/// How the controls of a [`ViewStore`] moved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlChange {
    /// A single control changed value.
    Updated,
    /// Every control went back to its default.
    Reset,
}

/// Owns one list's base records and controls, and the view derived from them.
///
/// Every control change recomputes the view and notifies subscribers before
/// returning. Search input is the exception: it waits in a debounce until
/// [`ViewStore::flush_search`] finds it due.
pub struct ViewStore<M: ViewModel> {
    model: M,
    base: Arc<[M::Item]>,
    state: StateOf<M>,
    search: Debounce<String>,
    output: Vec<M::Item>,
    listeners: Vec<Listener<M::Item>>,
    state_listeners: Vec<StateListener<StateOf<M>>>,
    fetches: LatestGuard,
}

impl<M: ViewModel> ViewStore<M> {
    pub fn new(model: M, config: ViewConfig) -> Self {
        Self {
            model,
            base: Arc::from(Vec::new()),
            state: StateOf::<M>::default(),
            search: Debounce::new(config.search_debounce),
            output: Vec::new(),
            listeners: Vec::new(),
            state_listeners: Vec::new(),
            fetches: LatestGuard::new(),
        }
    }

    /// Starts from a restored control state, e.g. one parsed from a URL.
    pub fn with_state(mut self, state: StateOf<M>) -> Self {
        self.state = state;
        self.recompute();
        self
    }

    /// The current derived view.
    pub fn items(&self) -> &[M::Item] {
        &self.output
    }

    pub fn state(&self) -> &StateOf<M> {
        &self.state
    }

    pub fn base(&self) -> &[M::Item] {
        &self.base
    }

    pub fn model(&self) -> &M {
        &self.model
    }

    /// Registers a callback run with the new view after every recompute.
    pub fn subscribe(&mut self, listener: impl FnMut(&[M::Item]) + 'static) {
        self.listeners.push(Box::new(listener));
    }

    /// Registers a callback run with the controls after each user-driven
    /// change. Base and model updates do not trigger it, and neither does
    /// [`ViewStore::with_state`].
    pub fn watch_state(&mut self, listener: impl FnMut(ControlChange, &StateOf<M>) + 'static) {
        self.state_listeners.push(Box::new(listener));
    }

    /// Replaces the base records. Fetches still in flight can no longer
    /// overwrite them.
    pub fn set_base(&mut self, items: impl Into<Arc<[M::Item]>>) {
        self.fetches.invalidate();
        self.install_base(items.into());
    }

    /// Ticket for a base-collection fetch about to start.
    pub fn begin_fetch(&mut self) -> Ticket {
        self.fetches.issue()
    }

    /// Installs fetched records unless a newer fetch has started since.
    pub fn apply_fetch(&mut self, ticket: Ticket, items: Vec<M::Item>) -> bool {
        if !self.fetches.is_latest(ticket) {
            debug!(?ticket, "Discarding stale fetch result");
            return false;
        }
        self.install_base(items.into());
        true
    }

    /// Lets the view model pick up new context, such as fresh balances.
    pub fn update_model(&mut self, update: impl FnOnce(&mut M)) {
        update(&mut self.model);
        self.recompute();
    }

    pub fn select_tab(&mut self, tab: M::Tab) {
        if self.state.tab != tab {
            self.state.tab = tab;
            self.controls_changed(ControlChange::Updated);
        }
    }

    pub fn click_sort(&mut self, column: M::Column) {
        self.state.sort = self.state.sort.click(column);
        self.controls_changed(ControlChange::Updated);
    }

    pub fn set_sort(&mut self, sort: SortState<M::Column>) {
        self.state.sort = sort;
        self.controls_changed(ControlChange::Updated);
    }

    pub fn set_filters(&mut self, filters: M::Filters) {
        self.state.filters = filters;
        self.controls_changed(ControlChange::Updated);
    }

    pub fn update_filters(&mut self, update: impl FnOnce(&mut M::Filters)) {
        update(&mut self.state.filters);
        self.controls_changed(ControlChange::Updated);
    }

    /// Queues a search term; it applies once typing pauses.
    pub fn set_search(&mut self, term: impl Into<String>, now: Instant) {
        self.search.push(term.into(), now);
    }

    /// Applies the queued search term if it is due.
    /// Returns whether the view changed.
    pub fn flush_search(&mut self, now: Instant) -> bool {
        match self.search.poll(now) {
            Some(term) => self.apply_search(term),
            None => false,
        }
    }

    /// When the queued search term becomes due, if any.
    pub fn search_deadline(&self) -> Option<Instant> {
        self.search.deadline()
    }

    /// Applies a search term without waiting.
    pub fn set_search_now(&mut self, term: impl Into<String>) -> bool {
        self.search.cancel();
        self.apply_search(term.into())
    }

    /// Restores every control to its default.
    pub fn reset(&mut self) {
        self.search.cancel();
        self.state = StateOf::<M>::default();
        self.controls_changed(ControlChange::Reset);
    }

    fn apply_search(&mut self, term: String) -> bool {
        if self.state.search == term {
            return false;
        }
        self.state.search = term;
        self.controls_changed(ControlChange::Updated);
        true
    }

    fn install_base(&mut self, items: Arc<[M::Item]>) {
        self.base = items;
        self.recompute();
    }

    fn controls_changed(&mut self, change: ControlChange) {
        self.recompute();
        for listener in &mut self.state_listeners {
            listener(change, &self.state);
        }
    }

    fn recompute(&mut self) {
        self.output = derive_view(&self.model, &self.base, &self.state);
        debug!(
            base = self.base.len(),
            visible = self.output.len(),
            tab = ?self.state.tab,
            "Recomputed view"
        );
        for listener in &mut self.listeners {
            listener(&self.output);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::NumericFilter;
    use crate::pools::{PoolColumn, PoolTab, PoolView, PoolViewState};
    use earn_domain::entities::Pool;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn pool(name: &str, tvl: f64) -> Pool {
        Pool {
            tvl,
            ..Pool::new("ociswap", format!("component_{name}"), name)
        }
    }

    fn store() -> ViewStore<PoolView> {
        let mut store = ViewStore::new(PoolView::default(), ViewConfig::default());
        store.set_base(vec![pool("AAA", 100.0), pool("BBB", 50.0)]);
        store
    }

    fn names(store: &ViewStore<PoolView>) -> Vec<String> {
        store.items().iter().map(|p| p.name.clone()).collect()
    }

    #[test]
    fn test_controls_recompute_and_notify() {
        let mut store = store();
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        store.subscribe(move |items: &[Pool]| sink.borrow_mut().push(items.len()));

        store.click_sort(PoolColumn::Tvl);
        assert_eq!(names(&store), ["BBB", "AAA"]);

        store.update_filters(|f| f.tvl = NumericFilter::above(75.0));
        assert_eq!(names(&store), ["AAA"]);

        store.reset();
        assert_eq!(names(&store), ["AAA", "BBB"]);
        assert_eq!(*seen.borrow(), vec![2, 1, 2]);
    }

    #[test]
    fn test_search_waits_for_debounce() {
        let mut store = store();
        let t0 = Instant::now();

        store.set_search("bb", t0);
        store.set_search("bbb", t0 + Duration::from_millis(100));
        assert!(!store.flush_search(t0 + Duration::from_millis(300)));
        assert_eq!(names(&store), ["AAA", "BBB"]);

        assert!(store.flush_search(t0 + Duration::from_millis(400)));
        assert_eq!(names(&store), ["BBB"]);
        assert_eq!(store.state().search, "bbb");
    }

    #[test]
    fn test_new_base_uses_current_controls() {
        let mut store = store();
        store.update_filters(|f| f.tvl = NumericFilter::above(75.0));
        store.set_base(vec![pool("CCC", 80.0), pool("DDD", 10.0)]);
        assert_eq!(names(&store), ["CCC"]);
    }

    #[test]
    fn test_stale_fetch_is_discarded() {
        let mut store = store();
        let slow = store.begin_fetch();
        let fast = store.begin_fetch();

        assert!(store.apply_fetch(fast, vec![pool("NEW", 1.0)]));
        assert!(!store.apply_fetch(slow, vec![pool("OLD", 1.0)]));
        assert_eq!(names(&store), ["NEW"]);
    }

    #[test]
    fn test_set_base_supersedes_pending_fetch() {
        let mut store = store();
        let pending = store.begin_fetch();
        store.set_base(vec![pool("LOCAL", 1.0)]);
        assert!(!store.apply_fetch(pending, vec![pool("REMOTE", 1.0)]));
        assert_eq!(names(&store), ["LOCAL"]);
    }

    #[test]
    fn test_state_watchers_see_control_changes_only() {
        let mut store = store();
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        store.watch_state(move |change, state: &PoolViewState| {
            sink.borrow_mut().push((change, state.tab));
        });

        store.set_base(vec![pool("CCC", 1.0)]);
        store.update_model(|_| {});
        store.select_tab(PoolTab::Boosted);
        store.select_tab(PoolTab::Boosted);
        store.reset();

        assert_eq!(
            *seen.borrow(),
            vec![
                (ControlChange::Updated, PoolTab::Boosted),
                (ControlChange::Reset, PoolTab::All),
            ]
        );
    }

    #[test]
    fn test_restored_state() {
        let state = PoolViewState {
            tab: PoolTab::Boosted,
            ..PoolViewState::default()
        };
        let mut store = ViewStore::new(PoolView::default(), ViewConfig::default()).with_state(state);
        store.set_base(vec![pool("AAA", 1.0)]);
        assert!(store.items().is_empty());

        store.select_tab(PoolTab::All);
        assert_eq!(names(&store), ["AAA"]);
    }
}
