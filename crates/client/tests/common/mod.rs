#![allow(dead_code)]

use std::collections::HashMap;
use std::net::{Ipv4Addr, SocketAddr};
use std::sync::{Arc, Mutex};

use axum::extract::State;
use axum::http::{header, StatusCode, Uri};
use axum::response::{IntoResponse, Response};
use axum::Router;
use tokio::net::TcpListener;

#[derive(Clone)]
struct Canned {
    status: StatusCode,
    content_type: &'static str,
    body: String,
}

/// In-process stand-in for the OFAC backend. Routes are matched on the
/// path only; every request's path and query is recorded.
#[derive(Clone, Default)]
pub struct MockBackend {
    routes: Arc<Mutex<HashMap<String, Canned>>>,
    hits: Arc<Mutex<Vec<String>>>,
}

impl MockBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn json(self, path: &str, status: StatusCode, body: serde_json::Value) -> Self {
        self.raw(path, status, "application/json; charset=utf-8", &body.to_string())
    }

    pub fn raw(
        self,
        path: &str,
        status: StatusCode,
        content_type: &'static str,
        body: &str,
    ) -> Self {
        self.routes.lock().unwrap().insert(
            path.to_string(),
            Canned { status, content_type, body: body.to_string() },
        );
        self
    }

    pub fn hits(&self) -> Vec<String> {
        self.hits.lock().unwrap().clone()
    }

    /// Serve on an ephemeral localhost port and return the base URL.
    pub async fn start(&self) -> anyhow::Result<String> {
        let app = Router::new().fallback(handle).with_state(self.clone());
        let listener = TcpListener::bind((Ipv4Addr::LOCALHOST, 0)).await?;
        let addr: SocketAddr = listener.local_addr()?;
        tokio::spawn(async move {
            if let Err(e) = axum::serve(listener, app).await {
                eprintln!("mock backend error: {}", e);
            }
        });
        Ok(format!("http://{}:{}", addr.ip(), addr.port()))
    }
}

async fn handle(State(backend): State<MockBackend>, uri: Uri) -> Response {
    let recorded = uri
        .path_and_query()
        .map(|pq| pq.as_str().to_string())
        .unwrap_or_else(|| uri.path().to_string());
    backend.hits.lock().unwrap().push(recorded);

    let canned = backend.routes.lock().unwrap().get(uri.path()).cloned();
    match canned {
        Some(c) => (c.status, [(header::CONTENT_TYPE, c.content_type)], c.body).into_response(),
        None => StatusCode::NOT_FOUND.into_response(),
    }
}

/// A base URL nothing listens on.
pub async fn closed_port_url() -> anyhow::Result<String> {
    let listener = TcpListener::bind((Ipv4Addr::LOCALHOST, 0)).await?;
    let addr = listener.local_addr()?;
    drop(listener);
    Ok(format!("http://{}:{}", addr.ip(), addr.port()))
}
