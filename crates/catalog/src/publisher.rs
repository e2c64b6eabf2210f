//! Publication service: fetch, build, batch republish.

use std::sync::Arc;

use tracing::{info, warn};

use meridian_core::{Clock, ProductId};

use crate::error::PublishError;
use crate::ports::{
    CatalogWriter, IdSource, InventoryLookup, MediaLookup, ProductSource, ShopLookup,
};
use crate::publish::{PublishContext, PublishOutcome, SkipReason, publish_product_to_catalog};

/// Composed publication service over the collaborator ports.
pub struct CatalogPublisher {
    products: Arc<dyn ProductSource>,
    shops: Arc<dyn ShopLookup>,
    media: Arc<dyn MediaLookup>,
    inventory: Arc<dyn InventoryLookup>,
    catalog: Arc<dyn CatalogWriter>,
    ids: Arc<dyn IdSource>,
    clock: Arc<dyn Clock>,
}

/// Tally of one `publish_many` batch.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct PublishSummary {
    pub published: Vec<ProductId>,
    pub skipped: Vec<(ProductId, SkipReason)>,
    pub failed: Vec<(ProductId, PublishError)>,
}

impl PublishSummary {
    pub fn is_clean(&self) -> bool {
        self.skipped.is_empty() && self.failed.is_empty()
    }
}

impl CatalogPublisher {
    pub fn new(
        products: Arc<dyn ProductSource>,
        shops: Arc<dyn ShopLookup>,
        media: Arc<dyn MediaLookup>,
        inventory: Arc<dyn InventoryLookup>,
        catalog: Arc<dyn CatalogWriter>,
        ids: Arc<dyn IdSource>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            products,
            shops,
            media,
            inventory,
            catalog,
            ids,
            clock,
        }
    }

    fn context(&self) -> PublishContext<'_> {
        PublishContext {
            shops: self.shops.as_ref(),
            media: self.media.as_ref(),
            inventory: self.inventory.as_ref(),
            catalog: self.catalog.as_ref(),
            ids: self.ids.as_ref(),
            clock: self.clock.as_ref(),
        }
    }

    /// Publish one product by id.
    pub async fn publish(&self, product_id: &ProductId) -> Result<PublishOutcome, PublishError> {
        let Some(product) = self.products.find_product(product_id).await? else {
            info!(product_id = %product_id, "cannot publish a missing product to the catalog");
            return Ok(PublishOutcome::Skipped(SkipReason::MissingProduct));
        };

        let variant_docs = self.products.find_variant_tree(product_id).await?;
        publish_product_to_catalog(&product, &variant_docs, &self.context()).await
    }

    /// Republish a batch of products.
    ///
    /// Each product publishes independently; one bad product never aborts the
    /// batch. Store failures are logged and tallied instead of returned.
    pub async fn publish_many(&self, product_ids: &[ProductId]) -> PublishSummary {
        let mut summary = PublishSummary::default();

        for product_id in product_ids {
            match self.publish(product_id).await {
                Ok(PublishOutcome::Published(_)) => summary.published.push(*product_id),
                Ok(PublishOutcome::Skipped(reason)) => summary.skipped.push((*product_id, reason)),
                Err(err) => {
                    warn!(product_id = %product_id, error = %err, "catalog publish failed");
                    summary.failed.push((*product_id, err));
                }
            }
        }

        summary
    }
}
