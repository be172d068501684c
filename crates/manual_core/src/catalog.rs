use std::fmt;

/// One entry of the raw search response, in upstream relevance order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawSearchRecord {
    pub id: String,
    pub title: String,
    pub thumbnail_ref: String,
}

/// One entry of the raw statistics response.
///
/// Both fields are kept as the upstream text; parsing happens in the merger so
/// that a malformed value only affects its own item.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RawStatsRecord {
    pub view_count_text: Option<String>,
    pub duration_code: Option<String>,
}

/// Search and statistics records fetched for one keyword.
///
/// `stats[i]` describes `search[i]`; the upstream offers no join key.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CatalogPage {
    pub search: Vec<RawSearchRecord>,
    pub stats: Vec<RawStatsRecord>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpstreamErrorKind {
    Configuration,
    Transport,
    HttpStatus(u16),
    MalformedPayload,
}

/// A failed catalog fetch, surfaced to the user. The result list is left as is.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpstreamError {
    pub kind: UpstreamErrorKind,
    pub message: String,
}

impl UpstreamError {
    pub fn new(kind: UpstreamErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

impl fmt::Display for UpstreamError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            UpstreamErrorKind::Configuration => write!(f, "configuration: {}", self.message),
            UpstreamErrorKind::Transport => write!(f, "transport: {}", self.message),
            UpstreamErrorKind::HttpStatus(code) => write!(f, "http status {code}: {}", self.message),
            UpstreamErrorKind::MalformedPayload => {
                write!(f, "malformed payload: {}", self.message)
            }
        }
    }
}

impl std::error::Error for UpstreamError {}
