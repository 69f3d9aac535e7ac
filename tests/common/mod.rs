//! Shared utilities for integration testing.

#![allow(dead_code)]

use std::net::SocketAddr;
use std::sync::{Arc, OnceLock};
use std::time::Duration;

use async_trait::async_trait;
use tokio::net::TcpListener;

use item_service::config::AppConfig;
use item_service::store::{Item, ItemStore, MemoryStore, NewItem, StoreError};
use item_service::{HttpServer, Shutdown, Telemetry};

static TELEMETRY: OnceLock<Telemetry> = OnceLock::new();

/// Process-wide telemetry handle. The metrics recorder is global, so all
/// test apps in one binary share it; tests that assert on count deltas
/// must use label tuples no other test in the binary produces.
pub fn telemetry() -> Telemetry {
    TELEMETRY
        .get_or_init(|| Telemetry::init().expect("recorder installs once per process"))
        .clone()
}

/// HTTP client pointed at localhost.
pub fn client() -> reqwest::Client {
    reqwest::Client::builder().no_proxy().build().unwrap()
}

pub struct TestApp {
    pub addr: SocketAddr,
    pub telemetry: Telemetry,
    shutdown: Shutdown,
}

impl TestApp {
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }
}

impl Drop for TestApp {
    fn drop(&mut self) {
        self.shutdown.trigger();
    }
}

/// Spawn the service on an ephemeral port with the given store.
pub async fn spawn_app(store: Arc<dyn ItemStore>) -> TestApp {
    let telemetry = telemetry();
    let config = AppConfig::default();

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let shutdown = Shutdown::new();
    let rx = shutdown.subscribe();
    let server = HttpServer::new(&config, store, telemetry.clone());
    tokio::spawn(async move {
        let _ = server.run(listener, rx).await;
    });

    TestApp {
        addr,
        telemetry,
        shutdown,
    }
}

/// Spawn the service backed by an empty in-memory store.
pub async fn spawn_default_app() -> TestApp {
    spawn_app(Arc::new(MemoryStore::new())).await
}

/// Store that fails every operation, for exercising the error paths.
pub struct FailingStore;

#[async_trait]
impl ItemStore for FailingStore {
    async fn ping(&self) -> Result<(), StoreError> {
        Err(StoreError::Unavailable("injected failure".into()))
    }

    async fn list(&self) -> Result<Vec<Item>, StoreError> {
        Err(StoreError::Unavailable("injected failure".into()))
    }

    async fn insert(&self, _new: NewItem) -> Result<Item, StoreError> {
        Err(StoreError::Unavailable("injected failure".into()))
    }
}

/// Store whose reads sleep, for latency floor assertions.
pub struct SlowStore {
    inner: MemoryStore,
    delay: Duration,
}

impl SlowStore {
    pub fn new(delay: Duration) -> Self {
        Self {
            inner: MemoryStore::new(),
            delay,
        }
    }
}

#[async_trait]
impl ItemStore for SlowStore {
    async fn ping(&self) -> Result<(), StoreError> {
        self.inner.ping().await
    }

    async fn list(&self) -> Result<Vec<Item>, StoreError> {
        tokio::time::sleep(self.delay).await;
        self.inner.list().await
    }

    async fn insert(&self, new: NewItem) -> Result<Item, StoreError> {
        self.inner.insert(new).await
    }
}

/// Pull a single sample out of a text exposition: the first line for
/// `name` whose label set contains every `(key, value)` pair given.
pub fn metric_value(exposition: &str, name: &str, labels: &[(&str, &str)]) -> Option<f64> {
    exposition.lines().find_map(|line| {
        let rest = line.strip_prefix(name)?;
        // Reject longer metric names sharing the prefix.
        if !(rest.starts_with('{') || rest.starts_with(' ')) {
            return None;
        }
        if !labels
            .iter()
            .all(|(k, v)| rest.contains(&format!("{k}=\"{v}\"")))
        {
            return None;
        }
        rest.rsplit(' ').next()?.parse().ok()
    })
}
