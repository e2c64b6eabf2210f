//! Catalog document builder.

use std::collections::BTreeMap;

use tracing::{debug, info};

use meridian_core::Clock;

use crate::document::ProductDocument;
use crate::error::PublishError;
use crate::flatten::flatten_variant_tree;
use crate::ports::{CatalogUpsert, CatalogWriter, IdSource, InventoryLookup, MediaLookup, ShopLookup};
use crate::pricing::PriceRange;
use crate::product::{CatalogProduct, PricingEntry};

/// Reasons a publish is skipped without a write.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// No product exists under the requested id.
    MissingProduct,
    /// The document is a variant; only top-level products publish.
    ProductIsVariant,
    /// The owning shop could not be found.
    ShopNotFound,
}

/// Result of a publish attempt that did not fail at the store layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PublishOutcome {
    Published(CatalogProduct),
    Skipped(SkipReason),
}

impl PublishOutcome {
    pub fn is_published(&self) -> bool {
        matches!(self, Self::Published(_))
    }
}

/// Collaborators of one publish operation.
pub struct PublishContext<'a> {
    pub shops: &'a dyn ShopLookup,
    pub media: &'a dyn MediaLookup,
    pub inventory: &'a dyn InventoryLookup,
    pub catalog: &'a dyn CatalogWriter,
    pub ids: &'a dyn IdSource,
    pub clock: &'a dyn Clock,
}

/// Publish one product to the catalog.
///
/// Computes the full denormalized record and performs exactly one upsert.
/// Not-applicable inputs are skipped (logged, no write) so a batch republish
/// can keep going; store failures propagate.
pub async fn publish_product_to_catalog(
    product: &ProductDocument,
    variant_docs: &[ProductDocument],
    ctx: &PublishContext<'_>,
) -> Result<PublishOutcome, PublishError> {
    if !product.ancestors.is_empty() {
        info!(product_id = %product.id, "cannot publish a variant as a catalog product");
        return Ok(PublishOutcome::Skipped(SkipReason::ProductIsVariant));
    }

    let Some(currency) = ctx.shops.shop_currency(&product.shop_id).await? else {
        info!(product_id = %product.id, shop_id = %product.shop_id, "product's shop not found");
        return Ok(PublishOutcome::Skipped(SkipReason::ShopNotFound));
    };

    let media = ctx.media.product_media(&product.id).await?;
    let primary_image = media.iter().find(|item| item.to_grid).cloned();

    let live: Vec<&ProductDocument> = variant_docs.iter().filter(|doc| doc.is_live()).collect();
    let tree = flatten_variant_tree(&currency, &live);
    let product_range = PriceRange::from_prices(&tree.prices);

    let is_backorder = ctx.inventory.is_backorder(&tree.variants).await?;
    let is_low_quantity = ctx.inventory.is_low_quantity(&tree.variants).await?;
    let is_sold_out = ctx.inventory.is_sold_out(&tree.variants).await?;

    let mut pricing = BTreeMap::new();
    pricing.insert(currency, PricingEntry::from_range(&product_range, None));

    let catalog_product = CatalogProduct {
        product_id: product.id,
        shop_id: product.shop_id,
        title: product.title.clone(),
        slug: product.handle.clone(),
        description: product.description.clone(),
        page_title: product.page_title.clone(),
        meta_description: product.meta_description.clone(),
        vendor: product.vendor.clone(),
        sku: product.sku.clone(),
        barcode: product.barcode.clone(),
        price: product.price,
        pricing,
        is_backorder,
        is_low_quantity,
        is_sold_out,
        is_deleted: product.is_deleted,
        is_visible: product.is_visible,
        is_taxable: product.is_taxable,
        low_inventory_warning_threshold: product.low_inventory_warning_threshold,
        min_order_quantity: product.min_order_quantity,
        media,
        primary_image,
        tag_ids: product.tag_ids.clone(),
        variants: tree.variants,
        created_at: product.created_at,
        updated_at: product.last_updated(),
    };

    let now = ctx.clock.now();
    let outcome = ctx
        .catalog
        .upsert_product(CatalogUpsert {
            product: catalog_product.clone(),
            shop_id: product.shop_id,
            updated_at: now,
            insert_id: ctx.ids.next_id(),
            created_at: now,
        })
        .await?;

    debug!(product_id = %product.id, ?outcome, "published product to catalog");
    Ok(PublishOutcome::Published(catalog_product))
}
