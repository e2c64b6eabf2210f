//! In-memory media library.

use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;

use meridian_catalog::{CatalogMediaItem, MediaLookup, StoreError};
use meridian_core::ProductId;

/// In-memory media library, returning a product's media ordered by priority.
/// Intended for tests/dev.
#[derive(Debug, Default)]
pub struct InMemoryMediaLibrary {
    media: RwLock<HashMap<ProductId, Vec<CatalogMediaItem>>>,
}

impl InMemoryMediaLibrary {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&self, product_id: ProductId, item: CatalogMediaItem) {
        if let Ok(mut media) = self.media.write() {
            let items = media.entry(product_id).or_default();
            items.push(item);
            items.sort_by_key(|item| item.priority);
        }
    }
}

#[async_trait]
impl MediaLookup for InMemoryMediaLibrary {
    async fn product_media(
        &self,
        product_id: &ProductId,
    ) -> Result<Vec<CatalogMediaItem>, StoreError> {
        let media = self
            .media
            .read()
            .map_err(|_| StoreError::backend("media library lock poisoned"))?;
        Ok(media.get(product_id).cloned().unwrap_or_default())
    }
}
