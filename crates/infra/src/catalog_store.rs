//! In-memory published-catalog store.

use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use meridian_catalog::{CatalogProduct, CatalogUpsert, CatalogWriter, StoreError, UpsertOutcome};
use meridian_core::{CatalogItemId, ProductId, ShopId};

/// A stored catalog record: storage id plus the denormalized body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogRecord {
    pub id: CatalogItemId,
    pub shop_id: ShopId,
    pub product: CatalogProduct,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// In-memory catalog store keyed by the stable product id.
///
/// Intended for tests/dev. Upserts apply the set-always half of the write on
/// every call; the set-on-insert half (storage id, `created_at`) only when no
/// record exists yet.
#[derive(Debug, Default)]
pub struct InMemoryCatalogStore {
    records: RwLock<HashMap<ProductId, CatalogRecord>>,
}

impl InMemoryCatalogStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn find(&self, product_id: &ProductId) -> Option<CatalogRecord> {
        let records = self.records.read().ok()?;
        records.get(product_id).cloned()
    }

    pub fn len(&self) -> usize {
        self.records.read().map(|records| records.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl CatalogWriter for InMemoryCatalogStore {
    async fn upsert_product(&self, upsert: CatalogUpsert) -> Result<UpsertOutcome, StoreError> {
        let mut records = self
            .records
            .write()
            .map_err(|_| StoreError::backend("catalog store lock poisoned"))?;

        let key = upsert.product.product_id;
        match records.get_mut(&key) {
            Some(record) => {
                record.product = upsert.product;
                record.shop_id = upsert.shop_id;
                record.updated_at = upsert.updated_at;
                Ok(UpsertOutcome::Updated)
            }
            None => {
                records.insert(
                    key,
                    CatalogRecord {
                        id: upsert.insert_id,
                        shop_id: upsert.shop_id,
                        product: upsert.product,
                        created_at: upsert.created_at,
                        updated_at: upsert.updated_at,
                    },
                );
                Ok(UpsertOutcome::Inserted)
            }
        }
    }
}
