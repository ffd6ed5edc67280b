#![allow(dead_code)]

use async_trait::async_trait;
use axum::{
    body::Body,
    extract::Request,
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use edge_redirect::infrastructure::store::{StoreError, StoreResult, UrlStore};
use edge_redirect::infrastructure::upstream::Upstream;
use edge_redirect::state::AppState;
use edge_redirect::utils::extract_origin::OriginPolicy;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

/// In-memory store that counts reads and can be switched to failing.
#[derive(Default)]
pub struct FakeStore {
    values: Mutex<HashMap<String, Value>>,
    reads: AtomicUsize,
    failing: AtomicBool,
    healthy: AtomicBool,
}

impl FakeStore {
    pub fn new() -> Arc<Self> {
        let store = Self::default();
        store.healthy.store(true, Ordering::SeqCst);
        Arc::new(store)
    }

    pub fn with_urls(urls: &[&str]) -> Arc<Self> {
        let store = Self::new();
        store.set("urls", serde_json::json!(urls));
        store
    }

    pub fn set(&self, key: &str, value: Value) {
        self.values.lock().unwrap().insert(key.to_string(), value);
    }

    pub fn fail(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    pub fn set_healthy(&self, healthy: bool) {
        self.healthy.store(healthy, Ordering::SeqCst);
    }

    pub fn reads(&self) -> usize {
        self.reads.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl UrlStore for FakeStore {
    async fn get_json(&self, key: &str) -> StoreResult<Option<Value>> {
        self.reads.fetch_add(1, Ordering::SeqCst);
        if self.failing.load(Ordering::SeqCst) {
            return Err(StoreError::Connection("connection refused".to_string()));
        }
        Ok(self.values.lock().unwrap().get(key).cloned())
    }

    async fn health_check(&self) -> bool {
        self.healthy.load(Ordering::SeqCst)
    }

    fn backend(&self) -> &'static str {
        "fake"
    }
}

/// Upstream that answers `200 upstream:<path and query>` and records calls.
#[derive(Default)]
pub struct RecordingUpstream {
    pub calls: Mutex<Vec<String>>,
}

impl RecordingUpstream {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl Upstream for RecordingUpstream {
    async fn forward(&self, request: Request) -> Response {
        let target = request
            .uri()
            .path_and_query()
            .map(|pq| pq.as_str().to_string())
            .unwrap_or_else(|| "/".to_string());
        self.calls.lock().unwrap().push(target.clone());

        (
            StatusCode::OK,
            [(header::CONTENT_TYPE, "text/plain")],
            Body::from(format!("upstream:{}", target)),
        )
            .into_response()
    }
}

pub fn create_test_state(store: Arc<FakeStore>, upstream: Arc<RecordingUpstream>) -> AppState {
    AppState::new(store, upstream, OriginPolicy::default())
}
