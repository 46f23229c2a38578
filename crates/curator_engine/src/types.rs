use std::fmt;

use serde::Deserialize;

pub type FileId = u64;

/// Media category as the backend routes it. The app maps this onto the core
/// state machine's own kind enum.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaKind {
    Image,
    Video,
    Audio,
    Document,
    Vector,
    Archive,
}

/// Listing endpoint for a category, `None` where the backend has no dedicated
/// candidate listing. Exhaustive so a new category cannot slip through as an
/// accidental `None`.
pub fn listing_route(kind: MediaKind) -> Option<&'static str> {
    match kind {
        MediaKind::Image => Some("image-files"),
        MediaKind::Video => Some("video-files"),
        MediaKind::Audio => Some("audio-files"),
        MediaKind::Document => Some("document-files"),
        MediaKind::Vector | MediaKind::Archive => None,
    }
}

/// One candidate file as the backend serializes it.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CandidateRecord {
    pub id: FileId,
    pub display_name: String,
    pub path: String,
}

/// One page of a candidate listing.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageResponse {
    pub content: Vec<CandidateRecord>,
    pub is_last_page: bool,
    /// Echo of the requested page index. Parsed, but correctness never
    /// depends on it.
    #[serde(default)]
    pub page: u32,
}

/// Results flowing back from the engine thread to the app loop.
#[derive(Debug)]
pub enum EngineEvent {
    PageFetched {
        /// Loader session the fetch was issued for, passed through opaquely.
        session: u64,
        kind: MediaKind,
        page_index: u32,
        result: Result<PageResponse, FetchError>,
    },
    GroupLoaded {
        result: Result<crate::GroupRecord, FetchError>,
    },
    GroupSaved {
        result: Result<crate::GroupRecord, FetchError>,
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
    InvalidUrl,
    HttpStatus(u16),
    Timeout,
    Network,
    Decode,
    /// The category has no candidate listing endpoint. The state machine
    /// never asks for one; this is defense in depth for direct callers.
    NoListing,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureKind::InvalidUrl => write!(f, "invalid url"),
            FailureKind::HttpStatus(code) => write!(f, "http status {code}"),
            FailureKind::Timeout => write!(f, "timeout"),
            FailureKind::Network => write!(f, "network error"),
            FailureKind::Decode => write!(f, "malformed response payload"),
            FailureKind::NoListing => write!(f, "category has no candidate listing"),
        }
    }
}
