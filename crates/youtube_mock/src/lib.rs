use axum::{
    Json, Router,
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
};
use domain::{ErrorBody, ErrorResponse, ListResponse};
use serde::Deserialize;
use std::net::SocketAddr;
use std::sync::Arc;

mod store;

pub use store::{InMemoryRepository, Repository, SEED_CHANNEL_ID, SEED_VIDEO_ID};

/// Any request made with this key is answered like an exhausted quota
pub const QUOTA_EXCEEDED_KEY: &str = "quota-exceeded";

/// Any request made with this key is answered with a backend error
pub const BACKEND_ERROR_KEY: &str = "backend-error";

#[derive(Debug, Deserialize)]
pub struct ListParams {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub part: String,
    #[serde(default)]
    pub key: String,
}

impl ListParams {
    fn wants(&self, part: &str) -> bool {
        self.part.split(',').map(str::trim).any(|p| p == part)
    }

    fn first_id(&self) -> &str {
        self.id.split(',').next().unwrap_or_default()
    }
}

fn google_error(status: StatusCode, message: &str) -> Response {
    let body = ErrorResponse {
        error: ErrorBody {
            code: status.as_u16(),
            message: message.to_string(),
        },
    };
    (status, Json(body)).into_response()
}

fn check_key(params: &ListParams) -> Result<(), Response> {
    match params.key.as_str() {
        "" | QUOTA_EXCEEDED_KEY => Err(google_error(
            StatusCode::FORBIDDEN,
            "The request cannot be completed because you have exceeded your quota.",
        )),
        BACKEND_ERROR_KEY => Err(google_error(
            StatusCode::INTERNAL_SERVER_ERROR,
            "Backend Error",
        )),
        _ => Ok(()),
    }
}

fn list_of<T>(kind: &str, items: Vec<T>) -> ListResponse<T> {
    ListResponse {
        kind: Some(kind.to_string()),
        etag: Some(format!("etag-{}", items.len())),
        items,
    }
}

async fn videos_list(
    State(repo): State<Arc<dyn Repository>>,
    Query(params): Query<ListParams>,
) -> Response {
    if let Err(rejection) = check_key(&params) {
        return rejection;
    }

    let items = repo
        .get_video(params.first_id())
        .map(|mut video| {
            if !params.wants("statistics") {
                video.statistics = Default::default();
            }
            if !params.wants("contentDetails") {
                video.content_details = Default::default();
            }
            video
        })
        .into_iter()
        .collect();

    (
        StatusCode::OK,
        Json(list_of("youtube#videoListResponse", items)),
    )
        .into_response()
}

async fn channels_list(
    State(repo): State<Arc<dyn Repository>>,
    Query(params): Query<ListParams>,
) -> Response {
    if let Err(rejection) = check_key(&params) {
        return rejection;
    }

    let items = repo
        .get_channel(params.first_id())
        .map(|mut channel| {
            if !params.wants("statistics") {
                channel.statistics = Default::default();
            }
            channel
        })
        .into_iter()
        .collect();

    (
        StatusCode::OK,
        Json(list_of("youtube#channelListResponse", items)),
    )
        .into_response()
}

/// Create the router for the mocked `videos` and `channels` endpoints
pub fn create_router(repo: Arc<dyn Repository>) -> Router {
    Router::new()
        .route("/videos", get(videos_list))
        .route("/channels", get(channels_list))
        .with_state(repo)
}

/// Serve the mock on an ephemeral local port, returning its address
pub async fn spawn(repo: Arc<dyn Repository>) -> std::io::Result<SocketAddr> {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    let app = create_router(repo);

    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });

    Ok(addr)
}
