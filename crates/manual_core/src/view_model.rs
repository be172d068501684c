use crate::VideoId;

/// Counters from the most recent successful search.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SearchStats {
    pub fetched: usize,
    pub retained: usize,
    pub filtered_out: usize,
    pub duplicates: usize,
    pub missing_stats: usize,
    pub malformed_stats: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppViewModel {
    pub keyword_input: String,
    pub searched_keyword: String,
    pub rows: Vec<VideoRowView>,
    pub all_selected: bool,
    pub selected_count: usize,
    pub search_in_flight: bool,
    pub last_search: Option<SearchStats>,
    pub last_error: Option<String>,
    pub dirty: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VideoRowView {
    pub id: VideoId,
    pub title: String,
    pub view_metric: u64,
    pub duration_text: String,
    pub thumbnail_ref: String,
    pub selected: bool,
}
