use crate::{CatalogPage, SearchGeneration, UpstreamError, VideoId};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// User edited the keyword input.
    KeywordChanged(String),
    /// User submitted the current keyword for searching.
    SearchSubmitted,
    /// Engine finished both fetches for a search.
    CatalogFetched {
        generation: SearchGeneration,
        result: Result<CatalogPage, UpstreamError>,
    },
    /// Drag ended with `moved` dropped onto `target`.
    ItemMoved { moved: VideoId, target: VideoId },
    /// Row checkbox flipped.
    ItemToggled { id: VideoId },
    /// Header checkbox set.
    SelectAllToggled { checked: bool },
    /// Row title clicked.
    ItemClicked { id: VideoId },
    /// User asked for the selection to be exported.
    ExportClicked,
    /// UI/render tick to coalesce rendering.
    Tick,
    /// Fallback for placeholder wiring.
    NoOp,
}
