//! In-memory shop store.

use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;

use meridian_catalog::{ShopLookup, StoreError};
use meridian_core::{CurrencyCode, ShopId};

/// Shop fields the pipeline cares about.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShopRecord {
    pub id: ShopId,
    pub name: String,
    pub currency: CurrencyCode,
}

/// In-memory shop store. Intended for tests/dev.
#[derive(Debug, Default)]
pub struct InMemoryShopStore {
    shops: RwLock<HashMap<ShopId, ShopRecord>>,
}

impl InMemoryShopStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&self, shop: ShopRecord) {
        if let Ok(mut shops) = self.shops.write() {
            shops.insert(shop.id, shop);
        }
    }
}

#[async_trait]
impl ShopLookup for InMemoryShopStore {
    async fn shop_currency(&self, id: &ShopId) -> Result<Option<CurrencyCode>, StoreError> {
        let shops = self
            .shops
            .read()
            .map_err(|_| StoreError::backend("shop store lock poisoned"))?;
        Ok(shops.get(id).map(|shop| shop.currency.clone()))
    }
}
