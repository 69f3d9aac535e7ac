//! Document store subsystem.
//!
//! # Data Flow
//! ```text
//! connection string (config)
//!     → from_uri (scheme dispatch)
//!     → ItemStore handle (Arc<dyn ItemStore>)
//!     → shared with the HTTP handlers via AppState
//! ```
//!
//! # Design Decisions
//! - The store is a narrow trait; handlers never see a concrete backend
//! - Identity and creation timestamp are assigned by the store, not the caller
//! - An unreachable backend degrades the process instead of aborting it:
//!   `unavailable()` hands out a store whose every operation fails

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

pub mod memory;

pub use memory::MemoryStore;

/// A single persisted item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    /// Identity assigned by the store.
    pub id: Uuid,

    pub name: String,

    /// Creation timestamp assigned by the store.
    pub created_at: DateTime<Utc>,
}

/// Item contents as supplied by a caller.
#[derive(Debug, Clone)]
pub struct NewItem {
    pub name: String,
}

/// Error type for store operations.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("invalid store uri: {0}")]
    InvalidUri(#[from] url::ParseError),

    #[error("unsupported store uri scheme {0:?}")]
    UnsupportedScheme(String),

    #[error("store unavailable: {0}")]
    Unavailable(String),
}

/// Narrow interface to the document store backing `/items`.
#[async_trait]
pub trait ItemStore: Send + Sync {
    /// Connectivity probe. A failure is reported by the caller, never fatal.
    async fn ping(&self) -> Result<(), StoreError>;

    /// All items, newest `created_at` first.
    async fn list(&self) -> Result<Vec<Item>, StoreError>;

    /// Persist a new item, assigning identity and creation timestamp.
    async fn insert(&self, new: NewItem) -> Result<Item, StoreError>;
}

/// Construct a store from a connection string.
///
/// `memory://` selects the embedded backend. Any other scheme is rejected
/// so the caller can decide whether to degrade or abort.
pub fn from_uri(uri: &str) -> Result<Arc<dyn ItemStore>, StoreError> {
    let parsed = url::Url::parse(uri)?;
    match parsed.scheme() {
        "memory" => Ok(Arc::new(MemoryStore::new())),
        other => Err(StoreError::UnsupportedScheme(other.to_string())),
    }
}

/// Store handle used when the configured backend could not be constructed:
/// every operation fails with [`StoreError::Unavailable`], so requests that
/// need the store fail individually while the process keeps serving.
pub fn unavailable(uri: &str) -> Arc<dyn ItemStore> {
    Arc::new(UnavailableStore {
        uri: uri.to_string(),
    })
}

struct UnavailableStore {
    uri: String,
}

impl UnavailableStore {
    fn error(&self) -> StoreError {
        StoreError::Unavailable(format!("no backend reachable for {}", self.uri))
    }
}

#[async_trait]
impl ItemStore for UnavailableStore {
    async fn ping(&self) -> Result<(), StoreError> {
        Err(self.error())
    }

    async fn list(&self) -> Result<Vec<Item>, StoreError> {
        Err(self.error())
    }

    async fn insert(&self, _new: NewItem) -> Result<Item, StoreError> {
        Err(self.error())
    }
}
