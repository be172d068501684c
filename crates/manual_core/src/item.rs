use std::fmt;

use url::Url;

/// Host-qualified path of the public watch page.
pub const WATCH_URL_BASE: &str = "https://www.youtube.com/watch";

/// Fixed number of results requested per search.
pub const PAGE_SIZE: u32 = 50;

/// Opaque, stable video identity as assigned by the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct VideoId(String);

impl VideoId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for VideoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for VideoId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for VideoId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// One merged catalog entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Item {
    pub id: VideoId,
    pub title: String,
    pub view_metric: u64,
    pub duration_text: String,
    pub thumbnail_ref: String,
}

impl Item {
    pub fn watch_url(&self) -> String {
        watch_url(&self.id)
    }
}

/// Canonical watch URL for a video id: `https://www.youtube.com/watch?v=<id>`.
///
/// The id is form-encoded as a query value, so ids with reserved characters
/// cannot break out of the `v` parameter.
pub fn watch_url(id: &VideoId) -> String {
    match Url::parse_with_params(WATCH_URL_BASE, &[("v", id.as_str())]) {
        Ok(url) => url.to_string(),
        Err(_) => format!("{WATCH_URL_BASE}?v={id}"),
    }
}

#[cfg(test)]
mod tests {
    use super::{watch_url, VideoId};

    #[test]
    fn watch_url_uses_query_parameter() {
        assert_eq!(
            watch_url(&VideoId::new("dQw4w9WgXcQ")),
            "https://www.youtube.com/watch?v=dQw4w9WgXcQ"
        );
    }

    #[test]
    fn watch_url_encodes_reserved_characters() {
        assert_eq!(
            watch_url(&VideoId::new("a&b=c")),
            "https://www.youtube.com/watch?v=a%26b%3Dc"
        );
    }
}
