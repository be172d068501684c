use manual_logging::{manual_debug, manual_warn};

use crate::{watch_url, AppState, Effect, Msg, StoreError, PAGE_SIZE};

/// Pure update function: applies a message to state and returns any effects.
///
/// List interactions (move, toggle, select-all) are dropped while a search is
/// in flight, since the pending result will replace every id they refer to.
/// Interactions naming an id that is no longer listed are logged and dropped.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let effects = match msg {
        Msg::KeywordChanged(keyword) => {
            state.set_keyword_input(keyword);
            Vec::new()
        }
        Msg::SearchSubmitted => match state.begin_search() {
            Some((generation, keyword)) => vec![Effect::FetchCatalog {
                generation,
                keyword,
                page_size: PAGE_SIZE,
            }],
            None => Vec::new(),
        },
        Msg::CatalogFetched { generation, result } => {
            state.apply_catalog(generation, result);
            Vec::new()
        }
        Msg::ItemMoved { moved, target } => {
            if !interactions_allowed(&state, "move") {
                return (state, Vec::new());
            }
            drop_stale(state.reorder(&moved, &target), "move");
            Vec::new()
        }
        Msg::ItemToggled { id } => {
            if !interactions_allowed(&state, "toggle") {
                return (state, Vec::new());
            }
            drop_stale(state.toggle(&id), "toggle");
            Vec::new()
        }
        Msg::SelectAllToggled { checked } => {
            if !interactions_allowed(&state, "select-all") {
                return (state, Vec::new());
            }
            state.set_all(checked);
            Vec::new()
        }
        Msg::ItemClicked { id } => {
            if state.list().contains(&id) {
                vec![Effect::OpenReference { url: watch_url(&id) }]
            } else {
                drop_stale(Err(StoreError::InvalidReference(id)), "click");
                Vec::new()
            }
        }
        Msg::ExportClicked => {
            if state.list().is_empty() {
                manual_debug!("export ignored: no results");
                Vec::new()
            } else {
                vec![Effect::SaveExport {
                    keyword: state.searched_keyword().to_string(),
                    items: state.selected_items(),
                }]
            }
        }
        Msg::Tick | Msg::NoOp => Vec::new(),
    };

    (state, effects)
}

fn interactions_allowed(state: &AppState, action: &str) -> bool {
    if state.search_in_flight() {
        manual_debug!("{} dropped: search in flight", action);
        return false;
    }
    true
}

fn drop_stale(result: Result<(), StoreError>, action: &str) {
    if let Err(err) = result {
        manual_warn!("stale {} event dropped: {}", action, err);
    }
}
