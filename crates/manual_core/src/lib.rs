//! Video manual core: pure state machine, record merging and the ordered list.
mod catalog;
mod effect;
mod item;
pub mod merge;
mod msg;
mod rank;
mod state;
mod store;
mod update;
mod view_model;

pub use catalog::{CatalogPage, RawSearchRecord, RawStatsRecord, UpstreamError, UpstreamErrorKind};
pub use effect::Effect;
pub use item::{watch_url, Item, VideoId, PAGE_SIZE, WATCH_URL_BASE};
pub use merge::{merge_records, MergeOutcome};
pub use msg::Msg;
pub use rank::rank_items;
pub use state::{AppState, SearchGeneration};
pub use store::{StoreError, VideoList};
pub use update::update;
pub use view_model::{AppViewModel, SearchStats, VideoRowView};
