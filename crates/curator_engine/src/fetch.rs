use std::time::Duration;

use url::Url;

use crate::types::{listing_route, FailureKind, FetchError, MediaKind, PageResponse};

#[derive(Debug, Clone)]
pub struct FetchSettings {
    pub base_url: Url,
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
}

impl FetchSettings {
    pub fn new(base_url: Url) -> Self {
        Self {
            base_url,
            connect_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(30),
        }
    }
}

/// The paged-list provider seam. The HTTP implementation below is the real
/// one; tests substitute their own.
#[async_trait::async_trait]
pub trait CandidateSource: Send + Sync {
    async fn fetch_page(
        &self,
        kind: MediaKind,
        page_index: u32,
        page_size: u32,
    ) -> Result<PageResponse, FetchError>;
}

#[derive(Debug, Clone)]
pub struct HttpCandidateSource {
    client: reqwest::Client,
    settings: FetchSettings,
}

impl HttpCandidateSource {
    pub fn new(settings: FetchSettings) -> Result<Self, FetchError> {
        let client = build_client(&settings)?;
        Ok(Self { client, settings })
    }
}

pub(crate) fn build_client(settings: &FetchSettings) -> Result<reqwest::Client, FetchError> {
    reqwest::Client::builder()
        .connect_timeout(settings.connect_timeout)
        .timeout(settings.request_timeout)
        .build()
        .map_err(|err| FetchError::new(FailureKind::Network, err.to_string()))
}

pub(crate) fn api_url(base: &Url, route: &str) -> Result<Url, FetchError> {
    base.join(&format!("api/{route}"))
        .map_err(|err| FetchError::new(FailureKind::InvalidUrl, err.to_string()))
}

#[async_trait::async_trait]
impl CandidateSource for HttpCandidateSource {
    async fn fetch_page(
        &self,
        kind: MediaKind,
        page_index: u32,
        page_size: u32,
    ) -> Result<PageResponse, FetchError> {
        let route = listing_route(kind).ok_or_else(|| {
            FetchError::new(FailureKind::NoListing, format!("{kind:?} has no listing"))
        })?;
        let url = api_url(&self.settings.base_url, route)?;

        let response = self
            .client
            .get(url)
            .query(&[("pageIndex", page_index), ("pageSize", page_size)])
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::new(
                FailureKind::HttpStatus(status.as_u16()),
                status.to_string(),
            ));
        }

        response
            .json::<PageResponse>()
            .await
            .map_err(map_reqwest_error)
    }
}

pub(crate) fn map_reqwest_error(err: reqwest::Error) -> FetchError {
    if err.is_timeout() {
        return FetchError::new(FailureKind::Timeout, err.to_string());
    }
    if err.is_decode() {
        return FetchError::new(FailureKind::Decode, err.to_string());
    }
    FetchError::new(FailureKind::Network, err.to_string())
}
