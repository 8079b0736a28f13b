use crate::model::{StateOf, ViewModel};
use crate::search::rank;
use crate::sort::sort_items;

/// Derives the visible list from the base records and the control state.
///
/// Stages run in a fixed order: tab, search, filters, sort. Without an active
/// sort the order coming out of search is kept, which is the base order when
/// the search term is blank.
pub fn derive_view<M: ViewModel>(model: &M, base: &[M::Item], state: &StateOf<M>) -> Vec<M::Item> {
    let in_tab: Vec<&M::Item> = base
        .iter()
        .filter(|item| model.matches_tab(item, state.tab))
        .collect();

    let searched = rank(in_tab, &state.search, model.search_options(), |item| {
        model.search_fields(item)
    });

    let filtered: Vec<&M::Item> = searched
        .into_iter()
        .filter(|item| model.matches_filters(item, &state.filters))
        .collect();

    sort_items(model, filtered, &state.sort)
        .into_iter()
        .cloned()
        .collect()
}
