#![allow(dead_code)]

use axum::{
    Router,
    body::{Body, Bytes},
    http::{HeaderMap, Method, Request, StatusCode},
};
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;

pub struct Reply {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Bytes,
}

impl Reply {
    pub fn json(&self) -> Value {
        serde_json::from_slice(&self.body).expect("response body is json")
    }

    pub fn error_message(&self) -> String {
        self.json()["error"]
            .as_str()
            .expect("error field")
            .to_string()
    }

    pub fn assert_cors(&self) {
        assert_eq!(self.headers["access-control-allow-origin"], "*");
        assert_eq!(self.headers["access-control-allow-methods"], "POST, OPTIONS");
        assert_eq!(self.headers["access-control-allow-headers"], "Content-Type");
    }
}

pub async fn send(app: &Router, method: Method, body: impl Into<Body>) -> Reply {
    let request = Request::builder()
        .method(method)
        .uri("/")
        .header("content-type", "application/json")
        .body(body.into())
        .unwrap();

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let headers = response.headers().clone();
    let body = response.into_body().collect().await.unwrap().to_bytes();

    Reply {
        status,
        headers,
        body,
    }
}

/// A stand-in upstream that answers every request with `200` and the given JSON
pub async fn canned_upstream(body: &'static str) -> std::net::SocketAddr {
    use tokio::io::{AsyncReadExt, AsyncWriteExt};

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        while let Ok((mut stream, _)) = listener.accept().await {
            let mut buf = [0u8; 4096];
            let _ = stream.read(&mut buf).await;
            let response = format!(
                "HTTP/1.1 200 OK\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{body}",
                body.len()
            );
            let _ = stream.write_all(response.as_bytes()).await;
        }
    });

    addr
}

pub async fn post_json(app: &Router, body: Value) -> Reply {
    send(app, Method::POST, body.to_string()).await
}
