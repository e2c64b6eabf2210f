//! Collaborator ports of the publication pipeline.
//!
//! Stores are opaque: the pipeline needs find-one/find-many projections and
//! one keyed upsert, nothing more. In-memory implementations live in
//! `meridian-infra`; deployments wire in their own store-backed ones.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use meridian_core::{CatalogItemId, CurrencyCode, ProductId, ShopId};

use crate::document::ProductDocument;
use crate::error::StoreError;
use crate::product::{CatalogMediaItem, CatalogProduct, CatalogProductVariant};

/// Read access to canonical product documents.
#[async_trait]
pub trait ProductSource: Send + Sync {
    /// Find one product-shaped document by id.
    async fn find_product(&self, id: &ProductId) -> Result<Option<ProductDocument>, StoreError>;

    /// All documents whose ancestor chain contains `product_id` (variants and
    /// options alike). Implementations must return a stable order; the
    /// published variant list follows it.
    async fn find_variant_tree(
        &self,
        product_id: &ProductId,
    ) -> Result<Vec<ProductDocument>, StoreError>;
}

/// Currency-only projection of a shop.
#[async_trait]
pub trait ShopLookup: Send + Sync {
    async fn shop_currency(&self, id: &ShopId) -> Result<Option<CurrencyCode>, StoreError>;
}

/// Media attached to a product, ordered by priority.
#[async_trait]
pub trait MediaLookup: Send + Sync {
    async fn product_media(
        &self,
        product_id: &ProductId,
    ) -> Result<Vec<CatalogMediaItem>, StoreError>;
}

/// Product-level inventory predicates over the denormalized variant list.
///
/// The aggregation rules (ALL vs ANY, how options weigh in) belong to the
/// implementation; the pipeline only awaits the three booleans and splices
/// them into the published record.
#[async_trait]
pub trait InventoryLookup: Send + Sync {
    async fn is_backorder(&self, variants: &[CatalogProductVariant]) -> Result<bool, StoreError>;
    async fn is_low_quantity(&self, variants: &[CatalogProductVariant])
    -> Result<bool, StoreError>;
    async fn is_sold_out(&self, variants: &[CatalogProductVariant]) -> Result<bool, StoreError>;
}

/// Outcome of a catalog upsert.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpsertOutcome {
    Inserted,
    Updated,
}

/// One catalog write, split into its set-always and set-on-insert halves.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogUpsert {
    /// Applied on every write.
    pub product: CatalogProduct,
    pub shop_id: ShopId,
    pub updated_at: DateTime<Utc>,
    /// Applied only when no record exists yet under the product id.
    pub insert_id: CatalogItemId,
    pub created_at: DateTime<Utc>,
}

/// Write access to the published catalog.
#[async_trait]
pub trait CatalogWriter: Send + Sync {
    /// Upsert keyed by the record's stable `product_id`.
    async fn upsert_product(&self, upsert: CatalogUpsert) -> Result<UpsertOutcome, StoreError>;
}

/// Storage-id generation for fresh catalog records.
pub trait IdSource: Send + Sync {
    fn next_id(&self) -> CatalogItemId;
}
