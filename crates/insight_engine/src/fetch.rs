use std::time::Duration;

use futures_util::StreamExt;
use url::Url;

use crate::{FailureKind, FetchError, FetchOutput};

/// Path segment the insight service serves problems under.
const INSIGHT_ROUTE: &str = "leetcode";

#[derive(Debug, Clone)]
pub struct FetchSettings {
    /// Scheme and host of the insight service, optionally with a path prefix.
    pub base_url: String,
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
    pub max_bytes: u64,
}

impl Default for FetchSettings {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8080".to_string(),
            connect_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(60),
            max_bytes: 2 * 1024 * 1024,
        }
    }
}

/// Builds `{base}/leetcode/{query}`, percent-encoding `query` as one path segment.
///
/// `.` and `..` are rejected: as path segments they would be dropped or climb
/// out of the route instead of reaching the service as a query.
pub fn request_url(base_url: &str, query: &str) -> Result<Url, FetchError> {
    if query == "." || query == ".." {
        return Err(FetchError::new(
            FailureKind::InvalidUrl,
            format!("query {query:?} is not a usable path segment"),
        ));
    }
    let mut url = Url::parse(base_url)
        .map_err(|err| FetchError::new(FailureKind::InvalidUrl, err.to_string()))?;
    url.path_segments_mut()
        .map_err(|()| FetchError::new(FailureKind::InvalidUrl, "base url cannot take a path"))?
        .pop_if_empty()
        .push(INSIGHT_ROUTE)
        .push(query);
    Ok(url)
}

#[async_trait::async_trait]
pub trait Fetcher: Send + Sync {
    async fn fetch(&self, url: &Url) -> Result<FetchOutput, FetchError>;
}

#[derive(Debug, Clone)]
pub struct ReqwestFetcher {
    client: reqwest::Client,
    max_bytes: u64,
}

impl ReqwestFetcher {
    pub fn new(settings: &FetchSettings) -> Result<Self, FetchError> {
        let client = reqwest::Client::builder()
            .connect_timeout(settings.connect_timeout)
            .timeout(settings.request_timeout)
            .build()
            .map_err(|err| FetchError::new(FailureKind::Network, err.to_string()))?;
        Ok(Self {
            client,
            max_bytes: settings.max_bytes,
        })
    }

    fn too_large(&self, actual: u64) -> FetchError {
        FetchError::new(
            FailureKind::TooLarge {
                max_bytes: self.max_bytes,
                actual: Some(actual),
            },
            "response too large",
        )
    }
}

#[async_trait::async_trait]
impl Fetcher for ReqwestFetcher {
    async fn fetch(&self, url: &Url) -> Result<FetchOutput, FetchError> {
        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(map_reqwest_error)?;

        // Error statuses still carry a JSON body worth reading.
        let status = response.status().as_u16();

        if let Some(content_len) = response.content_length() {
            if content_len > self.max_bytes {
                return Err(self.too_large(content_len));
            }
        }

        let mut bytes = Vec::new();
        let mut stream = response.bytes_stream();
        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(map_reqwest_error)?;
            let next_len = bytes.len() as u64 + chunk.len() as u64;
            if next_len > self.max_bytes {
                return Err(self.too_large(next_len));
            }
            bytes.extend_from_slice(&chunk);
        }

        Ok(FetchOutput { status, bytes })
    }
}

fn map_reqwest_error(err: reqwest::Error) -> FetchError {
    if err.is_timeout() {
        return FetchError::new(FailureKind::Timeout, err.to_string());
    }
    if err.is_decode() {
        return FetchError::new(FailureKind::Decode, err.to_string());
    }
    FetchError::new(FailureKind::Network, err.to_string())
}
