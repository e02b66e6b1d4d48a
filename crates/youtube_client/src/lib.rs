use domain::{Channel, ListResponse, Video};
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use tracing::debug;

pub const DEFAULT_BASE_URL: &str = "https://www.googleapis.com/youtube/v3";

const VIDEO_PARTS: &str = "snippet,statistics,contentDetails";
const CHANNEL_PARTS: &str = "snippet,statistics";

/// Failure of a single upstream lookup, tagged by kind where it happens
#[derive(Debug, thiserror::Error)]
pub enum LookupError {
    #[error("YouTube API rejected the key or the quota is exhausted")]
    QuotaOrAuth,

    #[error("YouTube API error: {0}")]
    Status(u16),

    #[error("request to YouTube API timed out")]
    Timeout,

    #[error("unable to reach YouTube API: {0}")]
    Unreachable(#[source] reqwest::Error),

    #[error("unexpected response body from YouTube API: {0}")]
    Decode(#[source] reqwest::Error),
}

impl LookupError {
    // the request url carries the api key, so it never ends up in an error
    fn transport(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout
        } else {
            Self::Unreachable(err.without_url())
        }
    }

    fn decode(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout
        } else {
            Self::Decode(err.without_url())
        }
    }
}

/// Video-Lookup and Channel-Lookup against the YouTube Data API.
/// `Ok(None)` means the upstream answered with an empty item list.
#[async_trait::async_trait]
pub trait YouTubeApi: Send + Sync {
    async fn lookup_video(
        &self,
        api_key: &str,
        video_id: &str,
    ) -> Result<Option<Video>, LookupError>;

    async fn lookup_channel(
        &self,
        api_key: &str,
        channel_id: &str,
    ) -> Result<Option<Channel>, LookupError>;
}

#[derive(Debug, Clone)]
pub struct YouTubeClient {
    client: reqwest::Client,
    base_url: String,
}

impl YouTubeClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(reqwest::Client::new(), base_url)
    }

    pub fn with_client(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { client, base_url }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn list<T: DeserializeOwned>(
        &self,
        resource: &str,
        part: &str,
        id: &str,
        api_key: &str,
    ) -> Result<Option<T>, LookupError> {
        debug!(resource, id, "querying YouTube API");

        let response = self
            .client
            .get(format!("{}/{}", self.base_url, resource))
            .query(&[("part", part), ("id", id), ("key", api_key)])
            .send()
            .await
            .map_err(LookupError::transport)?;

        match response.status() {
            StatusCode::FORBIDDEN => return Err(LookupError::QuotaOrAuth),
            status if !status.is_success() => return Err(LookupError::Status(status.as_u16())),
            _ => {}
        }

        let list: ListResponse<T> = response.json().await.map_err(LookupError::decode)?;
        Ok(list.into_first())
    }
}

impl Default for YouTubeClient {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

#[async_trait::async_trait]
impl YouTubeApi for YouTubeClient {
    async fn lookup_video(
        &self,
        api_key: &str,
        video_id: &str,
    ) -> Result<Option<Video>, LookupError> {
        self.list("videos", VIDEO_PARTS, video_id, api_key).await
    }

    async fn lookup_channel(
        &self,
        api_key: &str,
        channel_id: &str,
    ) -> Result<Option<Channel>, LookupError> {
        self.list("channels", CHANNEL_PARTS, channel_id, api_key).await
    }
}
