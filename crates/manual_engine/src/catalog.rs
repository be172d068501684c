use std::collections::HashMap;
use std::time::Duration;

use futures_util::StreamExt;
use manual_core::{CatalogPage, RawSearchRecord, RawStatsRecord};
use manual_logging::{manual_debug, manual_warn};
use serde::Deserialize;

use crate::{FailureKind, FetchError};

pub const DEFAULT_API_BASE: &str = "https://www.googleapis.com/youtube/v3";

#[derive(Debug, Clone)]
pub struct CatalogSettings {
    pub api_base: String,
    pub api_key: Option<String>,
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
    pub max_bytes: u64,
}

impl Default for CatalogSettings {
    fn default() -> Self {
        Self {
            api_base: DEFAULT_API_BASE.to_string(),
            api_key: None,
            connect_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(30),
            max_bytes: 5 * 1024 * 1024,
        }
    }
}

/// Source of raw search and statistics records for a keyword.
#[async_trait::async_trait]
pub trait CatalogClient: Send + Sync {
    async fn fetch_page(&self, keyword: &str, page_size: u32) -> Result<CatalogPage, FetchError>;
}

/// YouTube Data API v3 client: `search` then `videos` for the returned ids.
#[derive(Debug, Clone)]
pub struct YouTubeCatalogClient {
    settings: CatalogSettings,
    client: reqwest::Client,
}

impl YouTubeCatalogClient {
    pub fn new(settings: CatalogSettings) -> Result<Self, FetchError> {
        let client = reqwest::Client::builder()
            .connect_timeout(settings.connect_timeout)
            .timeout(settings.request_timeout)
            .build()
            .map_err(|err| FetchError::new(FailureKind::Network, err.to_string()))?;
        Ok(Self { settings, client })
    }

    fn endpoint(&self, resource: &str, params: &[(&str, &str)]) -> Result<reqwest::Url, FetchError> {
        let base = self.settings.api_base.trim_end_matches('/');
        reqwest::Url::parse_with_params(&format!("{base}/{resource}"), params)
            .map_err(|err| FetchError::new(FailureKind::InvalidUrl, err.to_string()))
    }

    async fn get_json<T: serde::de::DeserializeOwned>(&self, url: reqwest::Url) -> Result<T, FetchError> {
        let response = self.client.get(url).send().await.map_err(map_reqwest_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::new(
                FailureKind::HttpStatus(status.as_u16()),
                status.to_string(),
            ));
        }

        if let Some(content_len) = response.content_length() {
            if content_len > self.settings.max_bytes {
                return Err(FetchError::new(
                    FailureKind::TooLarge {
                        max_bytes: self.settings.max_bytes,
                        actual: Some(content_len),
                    },
                    "response too large",
                ));
            }
        }

        let mut bytes = Vec::new();
        let mut stream = response.bytes_stream();
        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(map_reqwest_error)?;
            let next_len = bytes.len() as u64 + chunk.len() as u64;
            if next_len > self.settings.max_bytes {
                return Err(FetchError::new(
                    FailureKind::TooLarge {
                        max_bytes: self.settings.max_bytes,
                        actual: Some(next_len),
                    },
                    "response too large",
                ));
            }
            bytes.extend_from_slice(&chunk);
        }

        serde_json::from_slice(&bytes)
            .map_err(|err| FetchError::new(FailureKind::MalformedPayload, err.to_string()))
    }
}

#[async_trait::async_trait]
impl CatalogClient for YouTubeCatalogClient {
    async fn fetch_page(&self, keyword: &str, page_size: u32) -> Result<CatalogPage, FetchError> {
        let api_key = self
            .settings
            .api_key
            .as_deref()
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| FetchError::new(FailureKind::MissingApiKey, "no api key configured"))?;

        let max_results = page_size.to_string();
        let search_url = self.endpoint(
            "search",
            &[
                ("part", "snippet"),
                ("q", keyword),
                ("type", "video"),
                ("maxResults", &max_results),
                ("key", api_key),
            ],
        )?;
        let search: SearchResponse = self.get_json(search_url).await?;
        let records = search_records(search);
        manual_debug!("search {:?} returned {} records", keyword, records.len());

        if records.is_empty() {
            return Ok(CatalogPage::default());
        }

        let ids = records
            .iter()
            .map(|r| r.id.as_str())
            .collect::<Vec<_>>()
            .join(",");
        let videos_url = self.endpoint(
            "videos",
            &[
                ("part", "statistics,contentDetails"),
                ("id", &ids),
                ("key", api_key),
            ],
        )?;
        let videos: VideosResponse = self.get_json(videos_url).await?;
        let stats = align_stats(&records, videos);

        Ok(CatalogPage {
            search: records,
            stats,
        })
    }
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    items: Vec<SearchItem>,
}

#[derive(Debug, Deserialize)]
struct SearchItem {
    id: SearchItemId,
    snippet: Snippet,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SearchItemId {
    video_id: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Snippet {
    #[serde(default)]
    title: String,
    #[serde(default)]
    thumbnails: Thumbnails,
}

#[derive(Debug, Default, Deserialize)]
struct Thumbnails {
    medium: Option<Thumbnail>,
    default: Option<Thumbnail>,
    high: Option<Thumbnail>,
}

#[derive(Debug, Deserialize)]
struct Thumbnail {
    url: String,
}

#[derive(Debug, Deserialize)]
struct VideosResponse {
    #[serde(default)]
    items: Vec<VideoItem>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct VideoItem {
    id: String,
    #[serde(default)]
    statistics: Option<Statistics>,
    #[serde(default)]
    content_details: Option<ContentDetails>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Statistics {
    view_count: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ContentDetails {
    duration: Option<String>,
}

fn search_records(response: SearchResponse) -> Vec<RawSearchRecord> {
    response
        .items
        .into_iter()
        .filter_map(|item| {
            let id = item.id.video_id.filter(|id| !id.is_empty())?;
            let thumbnails = item.snippet.thumbnails;
            let thumbnail_ref = thumbnails
                .medium
                .or(thumbnails.default)
                .or(thumbnails.high)
                .map(|t| t.url)
                .unwrap_or_default();
            Some(RawSearchRecord {
                id,
                title: item.snippet.title,
                thumbnail_ref,
            })
        })
        .collect()
}

/// Lays the statistics out in search order, one entry per search record.
///
/// The videos endpoint omits ids it cannot resolve, which would shift every
/// later entry under a purely positional join; entries are matched by id and
/// gaps become empty records.
fn align_stats(records: &[RawSearchRecord], response: VideosResponse) -> Vec<RawStatsRecord> {
    let mut by_id: HashMap<String, RawStatsRecord> = response
        .items
        .into_iter()
        .map(|item| {
            let stats = RawStatsRecord {
                view_count_text: item.statistics.and_then(|s| s.view_count),
                duration_code: item.content_details.and_then(|c| c.duration),
            };
            (item.id, stats)
        })
        .collect();

    let aligned: Vec<RawStatsRecord> = records
        .iter()
        .map(|record| by_id.remove(&record.id).unwrap_or_default())
        .collect();
    if !by_id.is_empty() {
        manual_warn!("videos response had {} unrequested ids", by_id.len());
    }
    aligned
}

fn map_reqwest_error(err: reqwest::Error) -> FetchError {
    if err.is_timeout() {
        return FetchError::new(FailureKind::Timeout, err.to_string());
    }
    FetchError::new(FailureKind::Network, err.to_string())
}
