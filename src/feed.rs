//! Event feed access.
//!
//! This module provides:
//!
//! - `EventSource`: the seam the poller fetches through
//! - `HttpFeed`: reads the feed over HTTP (the usual `/data/events.json`)
//! - `FileFeed`: reads the same JSON straight from disk
//!
//! Every way a fetch can fail (transport, status, payload) is reported as a
//! `FeedError`. Callers treat all of them the same way: the attempt is dropped.

use anyhow::Result;
use futures::future::{BoxFuture, FutureExt};
use std::path::PathBuf;
use std::sync::Arc;
use thiserror::Error;

use crate::config::FeedConfig;
use crate::event::Event;

/// User agent for feed requests
const USER_AGENT: &str = concat!("Healwatch/", env!("CARGO_PKG_VERSION"));

/// Errors that can occur while fetching the feed
#[derive(Error, Debug)]
pub enum FeedError {
    #[error("Request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Feed returned status {0}")]
    Status(reqwest::StatusCode),

    #[error("Malformed feed payload: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Something the poller can read a full event list from
pub trait EventSource: Send + Sync {
    /// Where the events come from, for logs and the status bar
    fn describe(&self) -> String;

    /// Read and parse the whole feed
    fn fetch(&self) -> BoxFuture<'_, Result<Vec<Event>, FeedError>>;
}

/// Parse a feed payload (a JSON array of events)
pub fn parse_events(payload: &[u8]) -> Result<Vec<Event>, FeedError> {
    Ok(serde_json::from_slice(payload)?)
}

/// HTTP feed client
#[derive(Clone)]
pub struct HttpFeed {
    client: reqwest::Client,
    url: String,
}

impl HttpFeed {
    /// Create a client for the given feed URL
    pub fn new(url: impl Into<String>) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .build()?;

        Ok(Self {
            client,
            url: url.into(),
        })
    }

    async fn get(&self) -> Result<Vec<Event>, FeedError> {
        let response = self
            .client
            .get(&self.url)
            .header("Accept", "application/json")
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(FeedError::Status(status));
        }

        // Read the body first so payload problems surface as Parse, not Transport
        let body = response.bytes().await?;
        parse_events(&body)
    }
}

impl EventSource for HttpFeed {
    fn describe(&self) -> String {
        self.url.clone()
    }

    fn fetch(&self) -> BoxFuture<'_, Result<Vec<Event>, FeedError>> {
        self.get().boxed()
    }
}

/// Feed read from a local `events.json`
#[derive(Debug, Clone)]
pub struct FileFeed {
    path: PathBuf,
}

impl FileFeed {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl EventSource for FileFeed {
    fn describe(&self) -> String {
        self.path.display().to_string()
    }

    fn fetch(&self) -> BoxFuture<'_, Result<Vec<Event>, FeedError>> {
        async move {
            let payload = tokio::fs::read(&self.path).await?;
            parse_events(&payload)
        }
        .boxed()
    }
}

/// Build the configured source. A file path wins over the URL.
pub fn source_for(config: &FeedConfig) -> Result<Arc<dyn EventSource>> {
    match &config.file {
        Some(path) => {
            tracing::info!("Reading events from file {}", path.display());
            Ok(Arc::new(FileFeed::new(path)))
        }
        None => {
            tracing::info!("Reading events from {}", config.url);
            Ok(Arc::new(HttpFeed::new(&config.url)?))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::{EventId, Status};
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    const SAMPLE: &str = r#"[
        {"id": "101", "timestamp": "2025-03-14T09:26:53.000Z", "workflowName": "Invoice Sync",
         "error": "Completed Successfully", "status": "Resolved", "fixAttempted": false},
        {"id": "102", "timestamp": "2025-03-14T09:27:10.000Z", "workflowName": "Lead Router",
         "error": "Cannot find variable 'lead'", "status": "Detected", "fixAttempted": true}
    ]"#;

    /// Serve exactly one canned HTTP response and return the feed URL
    async fn serve_once(status_line: &'static str, body: &'static str) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut buf = [0u8; 4096];
            let _ = socket.read(&mut buf).await;
            let response = format!(
                "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                status_line,
                body.len(),
                body
            );
            socket.write_all(response.as_bytes()).await.unwrap();
            socket.shutdown().await.ok();
        });

        format!("http://{}/data/events.json", addr)
    }

    /// Client for a loopback test server, bypassing any proxy set in the environment
    fn local_feed(url: String) -> HttpFeed {
        HttpFeed {
            client: reqwest::Client::builder().no_proxy().build().unwrap(),
            url,
        }
    }

    #[test]
    fn test_parse_events() {
        let events = parse_events(SAMPLE.as_bytes()).unwrap();
        assert_eq!(events.len(), 2);
        assert_eq!(events[0].id, EventId::Text("101".to_string()));
        assert_eq!(events[1].status, Status::Detected);
    }

    #[test]
    fn test_parse_tolerates_null_error_text() {
        let payload = br#"[
            {"id": "1", "timestamp": null, "workflowName": "Invoice Sync", "error": null, "status": "Detected"},
            {"id": 1.5, "timestamp": "2025-03-14T09:27:10.000Z", "workflowName": "Lead Router",
             "error": "timeout", "status": "Resolved"}
        ]"#;
        let events = parse_events(payload).unwrap();
        assert_eq!(events.len(), 2);
        assert_eq!(events[0].error, "");
        assert_eq!(events[1].id, EventId::Text("1.5".to_string()));
    }

    #[test]
    fn test_parse_rejects_non_array() {
        let err = parse_events(br#"{"data": []}"#).unwrap_err();
        assert!(matches!(err, FeedError::Parse(_)));
        assert!(parse_events(b"<html>").is_err());
    }

    #[tokio::test]
    async fn test_http_feed_success() {
        let url = serve_once("200 OK", SAMPLE).await;
        let feed = local_feed(url);

        let events = feed.fetch().await.unwrap();
        assert_eq!(events.len(), 2);
        assert_eq!(events[1].workflow_name, "Lead Router");
    }

    #[tokio::test]
    async fn test_http_feed_error_status() {
        let url = serve_once("404 Not Found", "[]").await;
        let feed = local_feed(url);

        let err = feed.fetch().await.unwrap_err();
        match err {
            FeedError::Status(code) => assert_eq!(code.as_u16(), 404),
            other => panic!("expected status error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_http_feed_malformed_payload() {
        let url = serve_once("200 OK", "not json").await;
        let feed = local_feed(url);

        assert!(matches!(feed.fetch().await, Err(FeedError::Parse(_))));
    }

    #[tokio::test]
    async fn test_http_feed_unreachable() {
        // Bind then drop to get a port nobody is listening on
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let feed = local_feed(format!("http://{}/data/events.json", addr));
        assert!(matches!(feed.fetch().await, Err(FeedError::Transport(_))));
    }

    #[tokio::test]
    async fn test_file_feed() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("events.json");
        std::fs::write(&path, SAMPLE).unwrap();

        let feed = FileFeed::new(&path);
        assert_eq!(feed.fetch().await.unwrap().len(), 2);

        std::fs::remove_file(&path).unwrap();
        assert!(matches!(feed.fetch().await, Err(FeedError::Io(_))));
    }

    #[test]
    fn test_source_prefers_file() {
        let config = FeedConfig {
            file: Some(PathBuf::from("/tmp/events.json")),
            ..FeedConfig::default()
        };
        let source = source_for(&config).unwrap();
        assert_eq!(source.describe(), "/tmp/events.json");

        let source = source_for(&FeedConfig::default()).unwrap();
        assert_eq!(source.describe(), FeedConfig::default().url);
    }
}
