//! In-memory `ItemStore` implementation.
//!
//! Suitable for testing, development, and single-process deployments.
//! Thread-safe via `DashMap`; a monotonic insert sequence keeps list
//! ordering stable when creation timestamps collide.

use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;
use chrono::Utc;
use dashmap::DashMap;
use uuid::Uuid;

use super::{Item, ItemStore, NewItem, StoreError};

struct Entry {
    seq: u64,
    item: Item,
}

/// Embedded document store keyed by item id.
pub struct MemoryStore {
    items: DashMap<Uuid, Entry>,
    seq: AtomicU64,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            items: DashMap::new(),
            seq: AtomicU64::new(0),
        }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ItemStore for MemoryStore {
    async fn ping(&self) -> Result<(), StoreError> {
        Ok(())
    }

    async fn list(&self) -> Result<Vec<Item>, StoreError> {
        let mut entries: Vec<(u64, Item)> = self
            .items
            .iter()
            .map(|r| (r.value().seq, r.value().item.clone()))
            .collect();
        // Newest first; insert sequence breaks timestamp ties.
        entries.sort_by(|a, b| {
            b.1.created_at
                .cmp(&a.1.created_at)
                .then_with(|| b.0.cmp(&a.0))
        });
        Ok(entries.into_iter().map(|(_, item)| item).collect())
    }

    async fn insert(&self, new: NewItem) -> Result<Item, StoreError> {
        let item = Item {
            id: Uuid::new_v4(),
            name: new.name,
            created_at: Utc::now(),
        };
        let seq = self.seq.fetch_add(1, Ordering::Relaxed);
        self.items.insert(item.id, Entry {
            seq,
            item: item.clone(),
        });
        Ok(item)
    }
}
