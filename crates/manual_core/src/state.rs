use manual_logging::{manual_info, manual_warn};

use crate::merge::{merge_records, MergeOutcome};
use crate::rank::rank_items;
use crate::view_model::{AppViewModel, SearchStats, VideoRowView};
use crate::{CatalogPage, Item, StoreError, UpstreamError, VideoId, VideoList};

/// Monotonic search request counter; completions for older values are stale.
pub type SearchGeneration = u64;

#[derive(Debug, Clone, PartialEq, Eq)]
struct PendingSearch {
    generation: SearchGeneration,
    keyword: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppState {
    keyword_input: String,
    searched_keyword: String,
    list: VideoList,
    generation: SearchGeneration,
    in_flight: Option<PendingSearch>,
    last_search: Option<SearchStats>,
    last_error: Option<String>,
    dirty: bool,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn view(&self) -> AppViewModel {
        let rows = self
            .list
            .items()
            .iter()
            .map(|item| VideoRowView {
                id: item.id.clone(),
                title: item.title.clone(),
                view_metric: item.view_metric,
                duration_text: item.duration_text.clone(),
                thumbnail_ref: item.thumbnail_ref.clone(),
                selected: self.list.is_selected(&item.id),
            })
            .collect();
        AppViewModel {
            keyword_input: self.keyword_input.clone(),
            searched_keyword: self.searched_keyword.clone(),
            rows,
            all_selected: self.list.all_selected(),
            selected_count: self.list.selected_count(),
            search_in_flight: self.in_flight.is_some(),
            last_search: self.last_search.clone(),
            last_error: self.last_error.clone(),
            dirty: self.dirty,
        }
    }

    pub fn list(&self) -> &VideoList {
        &self.list
    }

    pub fn searched_keyword(&self) -> &str {
        &self.searched_keyword
    }

    pub fn search_in_flight(&self) -> bool {
        self.in_flight.is_some()
    }

    /// Returns whether a redraw is pending and clears the flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub(crate) fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    pub(crate) fn set_keyword_input(&mut self, keyword: String) {
        if self.keyword_input != keyword {
            self.keyword_input = keyword;
            self.mark_dirty();
        }
    }

    /// Starts a new search for the current input. Any earlier in-flight search
    /// becomes stale. Returns `None` when the input is blank.
    pub(crate) fn begin_search(&mut self) -> Option<(SearchGeneration, String)> {
        let keyword = self.keyword_input.trim().to_string();
        if keyword.is_empty() {
            return None;
        }
        self.generation += 1;
        self.in_flight = Some(PendingSearch {
            generation: self.generation,
            keyword: keyword.clone(),
        });
        self.last_error = None;
        self.mark_dirty();
        Some((self.generation, keyword))
    }

    /// Applies a completed fetch: merge, rank and replace run as one unit.
    ///
    /// Completions for any generation other than the in-flight one are
    /// dropped. On failure the current list is kept.
    pub(crate) fn apply_catalog(
        &mut self,
        generation: SearchGeneration,
        result: Result<CatalogPage, UpstreamError>,
    ) {
        let keyword = match self.in_flight.take() {
            Some(pending) if pending.generation == generation => pending.keyword,
            other => {
                manual_info!(
                    "dropping stale catalog result generation={} current={:?}",
                    generation,
                    other.as_ref().map(|p| p.generation)
                );
                self.in_flight = other;
                return;
            }
        };
        self.mark_dirty();

        let page = match result {
            Ok(page) => page,
            Err(err) => {
                manual_warn!("search for {:?} failed: {}", keyword, err);
                self.last_error = Some(err.to_string());
                return;
            }
        };

        let fetched = page.search.len();
        let MergeOutcome {
            items,
            filtered_out,
            duplicates,
            missing_stats,
            surplus_stats: _,
            malformed_stats,
        } = merge_records(&page.search, &page.stats);
        let ranked = rank_items(items);
        let retained = ranked.len();

        if let Err(err) = self.list.replace(ranked) {
            // The merger drops duplicates, so this only fires on a merger bug.
            manual_warn!("rejecting catalog result for {:?}: {}", keyword, err);
            self.last_error = Some(err.to_string());
            return;
        }
        manual_info!(
            "search {:?}: fetched={} retained={} filtered_out={}",
            keyword,
            fetched,
            retained,
            filtered_out
        );
        self.searched_keyword = keyword;
        self.last_error = None;
        self.last_search = Some(SearchStats {
            fetched,
            retained,
            filtered_out,
            duplicates,
            missing_stats,
            malformed_stats,
        });
    }

    pub(crate) fn reorder(&mut self, moved: &VideoId, target: &VideoId) -> Result<(), StoreError> {
        let before = self.list.position(moved);
        self.list.reorder(moved, target)?;
        if self.list.position(moved) != before {
            self.mark_dirty();
        }
        Ok(())
    }

    pub(crate) fn toggle(&mut self, id: &VideoId) -> Result<(), StoreError> {
        self.list.toggle(id)?;
        self.mark_dirty();
        Ok(())
    }

    pub(crate) fn set_all(&mut self, checked: bool) {
        self.list.set_all(checked);
        self.mark_dirty();
    }

    pub(crate) fn selected_items(&self) -> Vec<Item> {
        self.list.selected_in_order().cloned().collect()
    }
}
