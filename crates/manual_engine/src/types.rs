use std::fmt;

use manual_core::{CatalogPage, SearchGeneration, UpstreamError, UpstreamErrorKind};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineEvent {
    /// Both fetches for a search finished (or one of them failed).
    CatalogFetched {
        generation: SearchGeneration,
        keyword: String,
        result: Result<CatalogPage, FetchError>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchError {
    pub kind: FailureKind,
    pub message: String,
}

impl FetchError {
    pub(crate) fn new(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

impl fmt::Display for FetchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.kind, self.message)
    }
}

impl std::error::Error for FetchError {}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureKind {
    MissingApiKey,
    InvalidUrl,
    HttpStatus(u16),
    Timeout,
    TooLarge { max_bytes: u64, actual: Option<u64> },
    MalformedPayload,
    Network,
    EngineUnavailable,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureKind::MissingApiKey => write!(f, "missing api key"),
            FailureKind::InvalidUrl => write!(f, "invalid url"),
            FailureKind::HttpStatus(code) => write!(f, "http status {code}"),
            FailureKind::Timeout => write!(f, "timeout"),
            FailureKind::TooLarge { max_bytes, actual } => {
                write!(f, "response too large (max {max_bytes}, actual {actual:?})")
            }
            FailureKind::MalformedPayload => write!(f, "malformed payload"),
            FailureKind::Network => write!(f, "network error"),
            FailureKind::EngineUnavailable => write!(f, "engine unavailable"),
        }
    }
}

impl From<FetchError> for UpstreamError {
    fn from(err: FetchError) -> Self {
        let kind = match err.kind {
            FailureKind::MissingApiKey | FailureKind::InvalidUrl => {
                UpstreamErrorKind::Configuration
            }
            FailureKind::HttpStatus(code) => UpstreamErrorKind::HttpStatus(code),
            FailureKind::Timeout
            | FailureKind::Network
            | FailureKind::TooLarge { .. }
            | FailureKind::EngineUnavailable => UpstreamErrorKind::Transport,
            FailureKind::MalformedPayload => UpstreamErrorKind::MalformedPayload,
        };
        UpstreamError::new(kind, err.message)
    }
}
