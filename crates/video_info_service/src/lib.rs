use axum::{
    Router,
    http::{HeaderValue, header},
    middleware::map_response,
    response::Response,
    routing::any,
};

mod config;
mod error;
mod handler;
mod payload;

pub use config::{
    API_BASE_URL_VAR, API_KEY_VAR, Config, ConfigError, DEFAULT_LISTEN_ADDR, LISTEN_ADDR_VAR,
};
pub use error::{ErrorResponse, HandlerError};
pub use handler::{VIDEO_ID_LEN, VideoInfoHandler};
pub use payload::{
    ChannelCounts, ChannelRecord, ChannelRecordSnippet, ContentDetailsRecord, ResponsePayload,
    VideoCounts, VideoRecord, VideoRecordSnippet,
};

/// Path the handler was originally deployed under
pub const API_PATH: &str = "/api/youtube";

async fn add_cors_headers(mut response: Response) -> Response {
    let headers = response.headers_mut();
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_ORIGIN,
        HeaderValue::from_static("*"),
    );
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_METHODS,
        HeaderValue::from_static("POST, OPTIONS"),
    );
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_HEADERS,
        HeaderValue::from_static("Content-Type"),
    );
    response
}

/// Create the router for the video info endpoint.
/// Every method is routed to the handler, which rejects anything but POST and OPTIONS itself.
pub fn create_router(handler: VideoInfoHandler) -> Router {
    Router::new()
        .route("/", any(handler::video_info))
        .route(API_PATH, any(handler::video_info))
        .with_state(handler)
        .layer(map_response(add_cors_headers))
}
