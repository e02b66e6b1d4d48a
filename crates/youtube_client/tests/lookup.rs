use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

use youtube_client::{LookupError, YouTubeApi, YouTubeClient};
use youtube_mock::{
    BACKEND_ERROR_KEY, InMemoryRepository, QUOTA_EXCEEDED_KEY, SEED_CHANNEL_ID, SEED_VIDEO_ID,
};

const KEY: &str = "test-key";

async fn client() -> YouTubeClient {
    let addr = youtube_mock::spawn(Arc::new(InMemoryRepository::new()))
        .await
        .unwrap();
    YouTubeClient::new(format!("http://{addr}"))
}

#[tokio::test]
async fn finds_seeded_video() {
    let video = client()
        .await
        .lookup_video(KEY, SEED_VIDEO_ID)
        .await
        .unwrap()
        .expect("seeded video");

    assert_eq!(video.id.as_deref(), Some(SEED_VIDEO_ID));
    assert_eq!(video.snippet.channel_id.as_deref(), Some(SEED_CHANNEL_ID));
    assert_eq!(video.content_details.duration.as_deref(), Some("PT3M33S"));
    assert!(video.statistics.view_count.is_some());
}

#[tokio::test]
async fn unknown_video_is_none() {
    let video = client().await.lookup_video(KEY, "xxxxxxxxxxx").await.unwrap();
    assert!(video.is_none());
}

#[tokio::test]
async fn finds_seeded_channel() {
    let channel = client()
        .await
        .lookup_channel(KEY, SEED_CHANNEL_ID)
        .await
        .unwrap()
        .expect("seeded channel");

    assert_eq!(channel.id, SEED_CHANNEL_ID);
    assert_eq!(channel.statistics.video_count.as_deref(), Some("300"));
}

#[tokio::test]
async fn forbidden_is_quota_error() {
    let err = client()
        .await
        .lookup_video(QUOTA_EXCEEDED_KEY, SEED_VIDEO_ID)
        .await
        .unwrap_err();
    assert!(matches!(err, LookupError::QuotaOrAuth));
}

#[tokio::test]
async fn server_error_keeps_status() {
    let err = client()
        .await
        .lookup_channel(BACKEND_ERROR_KEY, SEED_CHANNEL_ID)
        .await
        .unwrap_err();
    assert!(matches!(err, LookupError::Status(500)));
}

#[tokio::test]
async fn unreachable_host_does_not_leak_key() {
    // nothing listens on the discard port
    let client = YouTubeClient::new("http://127.0.0.1:9");
    let err = client
        .lookup_video("secret-key", SEED_VIDEO_ID)
        .await
        .unwrap_err();

    assert!(matches!(err, LookupError::Unreachable(_)));
    assert!(!format!("{err:?}").contains("secret-key"));
    assert!(!err.to_string().contains("secret-key"));
}

#[tokio::test]
async fn non_json_body_is_decode_error() {
    let addr = canned_server("text/plain", "not json!").await;

    let err = YouTubeClient::new(format!("http://{addr}"))
        .lookup_video(KEY, SEED_VIDEO_ID)
        .await
        .unwrap_err();
    assert!(matches!(err, LookupError::Decode(_)));
}

#[tokio::test]
async fn null_items_is_none() {
    let addr = canned_server("application/json", r#"{"items":null}"#).await;

    let video = YouTubeClient::new(format!("http://{addr}"))
        .lookup_video(KEY, SEED_VIDEO_ID)
        .await
        .unwrap();
    assert!(video.is_none());
}

#[tokio::test]
async fn transport_timeout_is_tagged() {
    let addr = silent_server().await;
    let client = reqwest::Client::builder()
        .timeout(Duration::from_millis(200))
        .build()
        .unwrap();

    let err = YouTubeClient::with_client(client, format!("http://{addr}"))
        .lookup_video(KEY, SEED_VIDEO_ID)
        .await
        .unwrap_err();
    assert!(matches!(err, LookupError::Timeout), "{err:?}");
}

// answers every connection with a fixed 200
async fn canned_server(content_type: &'static str, body: &'static str) -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        while let Ok((mut stream, _)) = listener.accept().await {
            let mut buf = [0u8; 4096];
            let _ = stream.read(&mut buf).await;
            let response = format!(
                "HTTP/1.1 200 OK\r\ncontent-type: {content_type}\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{body}",
                body.len()
            );
            let _ = stream.write_all(response.as_bytes()).await;
        }
    });

    addr
}

// accepts connections and never answers
async fn silent_server() -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        let mut open = Vec::new();
        while let Ok((stream, _)) = listener.accept().await {
            open.push(stream);
        }
    });

    addr
}
