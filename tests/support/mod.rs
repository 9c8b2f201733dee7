#![allow(dead_code)]

use advising_admin::identity::{DemoIdentityProvider, IdentityContext, MemoryPersistence};
use advising_admin::{AdminState, AdvisingStorage, admin_router};
use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Request, StatusCode},
};
use serde_json::Value;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};
use tower::ServiceExt;

pub async fn test_storage() -> AdvisingStorage {
    AdvisingStorage::connect("sqlite::memory:")
        .await
        .expect("failed to open in-memory database")
}

/// A throwaway on-disk database, so the pool really hands out several connections.
pub struct TempDatabase {
    pub path: PathBuf,
    pub storage: AdvisingStorage,
}

impl TempDatabase {
    pub async fn open(tag: &str) -> Self {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("system time before UNIX_EPOCH")
            .as_nanos();
        let mut path = std::env::temp_dir();
        path.push(format!(
            "advising-{tag}-{}-{nanos}.sqlite",
            std::process::id()
        ));
        let storage = AdvisingStorage::connect(&format!("sqlite:{}", path.display()))
            .await
            .expect("failed to open file database");
        Self { path, storage }
    }
}

impl Drop for TempDatabase {
    fn drop(&mut self) {
        for suffix in ["", "-wal", "-shm", "-journal"] {
            let mut name = self.path.clone().into_os_string();
            name.push(suffix);
            let _ = std::fs::remove_file(name);
        }
    }
}

pub async fn test_app() -> Router {
    test_app_with(test_storage().await)
}

pub fn test_app_with(storage: AdvisingStorage) -> Router {
    let identity = IdentityContext::load(
        Arc::new(MemoryPersistence::new()),
        Arc::new(DemoIdentityProvider::new("university.edu")),
    )
    .expect("failed to build identity context")
    .into_shared();
    admin_router(AdminState::new(storage), identity)
}

pub async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(Body::from(json.to_string())),
        None => builder.body(Body::empty()),
    }
    .expect("failed to build request");
    dispatch(app, request).await
}

pub async fn send_raw(app: &Router, method: &str, uri: &str, raw: &str) -> (StatusCode, Value) {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(raw.to_string()))
        .expect("failed to build request");
    dispatch(app, request).await
}

async fn dispatch(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let resp = app.clone().oneshot(request).await.expect("request failed");
    let status = resp.status();
    let body = to_bytes(resp.into_body(), usize::MAX)
        .await
        .expect("failed to read response body");
    let value = if body.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&body).expect("response body was not JSON")
    };
    (status, value)
}
