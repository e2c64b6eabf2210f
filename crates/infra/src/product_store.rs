//! In-memory canonical product store.

use std::sync::RwLock;

use async_trait::async_trait;

use meridian_catalog::{ProductDocument, ProductSource, StoreError};
use meridian_core::{DomainError, ProductId};

/// Insertion-ordered in-memory product document store.
///
/// Intended for tests/dev. Not optimized for performance. Order matters: the
/// published variant list follows the order documents were inserted in.
#[derive(Debug, Default)]
pub struct InMemoryProductStore {
    docs: RwLock<Vec<ProductDocument>>,
}

impl InMemoryProductStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a document, validating it at the boundary.
    ///
    /// Replacement keeps the document's original position.
    pub fn upsert(&self, doc: ProductDocument) -> Result<(), DomainError> {
        doc.validate()?;
        if let Ok(mut docs) = self.docs.write() {
            match docs.iter_mut().find(|existing| existing.id == doc.id) {
                Some(existing) => *existing = doc,
                None => docs.push(doc),
            }
        }
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.docs.read().map(|docs| docs.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl ProductSource for InMemoryProductStore {
    async fn find_product(&self, id: &ProductId) -> Result<Option<ProductDocument>, StoreError> {
        let docs = self
            .docs
            .read()
            .map_err(|_| StoreError::backend("product store lock poisoned"))?;
        Ok(docs.iter().find(|doc| doc.id == *id).cloned())
    }

    async fn find_variant_tree(
        &self,
        product_id: &ProductId,
    ) -> Result<Vec<ProductDocument>, StoreError> {
        let docs = self
            .docs
            .read()
            .map_err(|_| StoreError::backend("product store lock poisoned"))?;
        Ok(docs
            .iter()
            .filter(|doc| doc.ancestors.contains(product_id))
            .cloned()
            .collect())
    }
}
