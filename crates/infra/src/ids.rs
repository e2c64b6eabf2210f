//! Storage-id sources.

use std::sync::atomic::{AtomicU64, Ordering};

use uuid::Uuid;

use meridian_catalog::IdSource;
use meridian_core::CatalogItemId;

/// Time-ordered uuid ids (v7).
#[derive(Debug, Default, Clone, Copy)]
pub struct UuidIds;

impl IdSource for UuidIds {
    fn next_id(&self) -> CatalogItemId {
        CatalogItemId::new()
    }
}

/// Deterministic sequential ids for tests.
#[derive(Debug, Default)]
pub struct SequentialIds {
    next: AtomicU64,
}

impl SequentialIds {
    pub fn new() -> Self {
        Self::default()
    }
}

impl IdSource for SequentialIds {
    fn next_id(&self) -> CatalogItemId {
        let n = self.next.fetch_add(1, Ordering::Relaxed);
        CatalogItemId::from_uuid(Uuid::from_u128(n as u128))
    }
}
