use std::sync::Arc;

use axum::{
    Json,
    body::Bytes,
    extract::{State, rejection::BytesRejection},
    http::{Method, StatusCode},
    response::{IntoResponse, Response},
};
use chrono::Utc;
use domain::Channel;
use serde_json::Value;
use tracing::{error, info, warn};
use youtube_client::{YouTubeApi, YouTubeClient};

use crate::{Config, HandlerError, ResponsePayload};

/// YouTube video ids are always 11 characters
pub const VIDEO_ID_LEN: usize = 11;

/// Looks up a video and its channel and shapes them into a [`ResponsePayload`]
#[derive(Clone)]
pub struct VideoInfoHandler {
    config: Arc<Config>,
    api: Arc<dyn YouTubeApi>,
}

impl VideoInfoHandler {
    pub fn new(config: Config, api: Arc<dyn YouTubeApi>) -> Self {
        Self {
            config: Arc::new(config),
            api,
        }
    }

    /// Use the real YouTube client pointed at `config.api_base_url`
    pub fn from_config(config: Config) -> Self {
        let api = Arc::new(YouTubeClient::new(config.api_base_url.clone()));
        Self::new(config, api)
    }

    /// Validate a POST body and run both lookups
    pub async fn fetch(&self, body: &[u8]) -> Result<ResponsePayload, HandlerError> {
        let video_id = parse_video_id(body)?;

        let Some(api_key) = self.config.api_key.as_deref() else {
            error!("YouTube API key not found in configuration");
            return Err(HandlerError::Configuration);
        };

        let video = self
            .api
            .lookup_video(api_key, &video_id)
            .await
            .inspect_err(|err| error!(%err, %video_id, "video lookup failed"))?
            .ok_or_else(|| {
                info!(%video_id, "video not found");
                HandlerError::NotFound
            })?;

        let channel = match video.snippet.channel_id.as_deref() {
            Some(channel_id) => self.lookup_channel(api_key, channel_id).await,
            None => {
                warn!(%video_id, "video has no channel id, skipping channel lookup");
                None
            }
        };

        Ok(ResponsePayload::new(video, channel, Utc::now()))
    }

    // failures here degrade the response instead of failing it
    async fn lookup_channel(&self, api_key: &str, channel_id: &str) -> Option<Channel> {
        match self.api.lookup_channel(api_key, channel_id).await {
            Ok(Some(channel)) => Some(channel),
            Ok(None) => {
                warn!(%channel_id, "channel lookup returned no items");
                None
            }
            Err(err) => {
                warn!(%err, %channel_id, "error fetching channel data");
                None
            }
        }
    }
}

fn parse_video_id(body: &[u8]) -> Result<String, HandlerError> {
    let body: Value = serde_json::from_slice(body).unwrap_or(Value::Null);

    let video_id = body
        .get("videoId")
        .filter(|id| is_truthy(id))
        .ok_or(HandlerError::MissingVideoId)?;

    match video_id.as_str() {
        // counted like a javascript string length
        Some(id) if id.encode_utf16().count() == VIDEO_ID_LEN => Ok(id.to_string()),
        _ => Err(HandlerError::InvalidVideoId),
    }
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|n| n != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

pub(crate) async fn video_info(
    State(handler): State<VideoInfoHandler>,
    method: Method,
    body: Result<Bytes, BytesRejection>,
) -> Response {
    match method {
        Method::OPTIONS => StatusCode::OK.into_response(),
        Method::POST => {
            let body = match body {
                Ok(body) => body,
                Err(rejection) => return unreadable_body(rejection).into_response(),
            };
            match handler.fetch(&body).await {
                Ok(payload) => (StatusCode::OK, Json(payload)).into_response(),
                Err(err) => err.into_response(),
            }
        }
        _ => HandlerError::MethodNotAllowed.into_response(),
    }
}

// a body that cannot be read counts as absent, unless it was over the size limit
fn unreadable_body(rejection: BytesRejection) -> HandlerError {
    warn!(%rejection, "unable to read request body");
    if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
        HandlerError::PayloadTooLarge
    } else {
        HandlerError::MissingVideoId
    }
}
