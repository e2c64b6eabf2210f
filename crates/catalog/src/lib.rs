//! Catalog publication pipeline.
//!
//! Builds the publicly servable, denormalized catalog record for a product:
//! price aggregation, variant/option tree flattening, inventory-derived
//! flags, media, and the final keyed upsert. Collaborating stores are opaque
//! ports so the pipeline stays deterministic under test.

pub mod document;
pub mod error;
pub mod flatten;
pub mod ports;
pub mod pricing;
pub mod product;
pub mod publish;
pub mod publisher;

pub use document::ProductDocument;
pub use error::{PublishError, StoreError};
pub use flatten::{FlattenedTree, flatten_variant_tree};
pub use ports::{
    CatalogUpsert, CatalogWriter, IdSource, InventoryLookup, MediaLookup, ProductSource,
    ShopLookup, UpsertOutcome,
};
pub use pricing::PriceRange;
pub use product::{
    CatalogMediaItem, CatalogProduct, CatalogProductVariant, MediaUrls, PricingEntry,
};
pub use publish::{PublishContext, PublishOutcome, SkipReason, publish_product_to_catalog};
pub use publisher::{CatalogPublisher, PublishSummary};
