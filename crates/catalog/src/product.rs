//! Published catalog shapes.
//!
//! Everything here is an explicit allow-list: fields are copied from source
//! documents one by one, so a new source field never reaches the public
//! catalog without a deliberate mapping.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use meridian_core::{CurrencyCode, ProductId, ShopId, TagId};

use crate::document::ProductDocument;
use crate::pricing::PriceRange;

/// Currency-keyed pricing entry on a published record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PricingEntry {
    /// Human-readable range ("10", "15 - 25", or empty when unpriced).
    pub display_price: String,
    pub min_price: Option<Decimal>,
    pub max_price: Option<Decimal>,
    /// The document's own scalar price; `None` at product level.
    pub price: Option<Decimal>,
}

impl PricingEntry {
    /// Entry for a computed range plus the document's own price.
    pub fn from_range(range: &PriceRange, own_price: Option<Decimal>) -> Self {
        Self {
            display_price: range.range.clone(),
            min_price: range.min,
            max_price: range.max,
            price: own_price,
        }
    }
}

/// Size-keyed URLs of one media asset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MediaUrls {
    pub thumbnail: String,
    pub small: String,
    pub medium: String,
    pub large: String,
    pub original: String,
}

/// A media record attached to a published product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogMediaItem {
    /// Display ordering; lower shows first.
    pub priority: i64,
    /// Marks an image usable in grid/listing views.
    pub to_grid: bool,
    /// Variant this asset belongs to, when not product-wide.
    pub variant_id: Option<ProductId>,
    pub urls: MediaUrls,
}

/// Denormalized variant on a published catalog product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogProductVariant {
    /// Stable pointer back to the source document.
    pub variant_id: ProductId,
    pub ancestor_ids: Vec<ProductId>,
    pub shop_id: ShopId,
    pub title: String,
    pub option_title: Option<String>,
    pub sku: Option<String>,
    pub barcode: Option<String>,
    pub index: i32,
    pub price: Option<Decimal>,
    pub compare_at_price: Option<Decimal>,
    pub pricing: BTreeMap<CurrencyCode, PricingEntry>,
    pub inventory_management: bool,
    pub inventory_policy: bool,
    pub is_taxable: bool,
    pub low_inventory_warning_threshold: Option<i64>,
    pub min_order_quantity: Option<i64>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    /// Options nested under a top-level variant; `None` on options themselves.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<CatalogProductVariant>>,
}

impl CatalogProductVariant {
    /// Allow-listed mapping from a source document plus its computed range.
    pub fn from_document(
        doc: &ProductDocument,
        currency: &CurrencyCode,
        range: &PriceRange,
    ) -> Self {
        let mut pricing = BTreeMap::new();
        pricing.insert(currency.clone(), PricingEntry::from_range(range, doc.price));

        Self {
            variant_id: doc.id,
            ancestor_ids: doc.ancestors.clone(),
            shop_id: doc.shop_id,
            title: doc.title.clone(),
            option_title: doc.option_title.clone(),
            sku: doc.sku.clone(),
            barcode: doc.barcode.clone(),
            index: doc.index,
            price: doc.price,
            compare_at_price: doc.compare_at_price,
            pricing,
            inventory_management: doc.inventory_management,
            inventory_policy: doc.inventory_policy,
            is_taxable: doc.is_taxable,
            low_inventory_warning_threshold: doc.low_inventory_warning_threshold,
            min_order_quantity: doc.min_order_quantity,
            created_at: doc.created_at,
            updated_at: doc.last_updated(),
            options: None,
        }
    }
}

/// The published, read-optimized snapshot of a product and its variant tree.
///
/// Rebuilt wholesale on every publish; never patched incrementally.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogProduct {
    /// Stable pointer back to the source product document.
    pub product_id: ProductId,
    pub shop_id: ShopId,
    pub title: String,
    pub slug: Option<String>,
    pub description: Option<String>,
    pub page_title: Option<String>,
    pub meta_description: Option<String>,
    pub vendor: Option<String>,
    pub sku: Option<String>,
    pub barcode: Option<String>,
    pub price: Option<Decimal>,
    pub pricing: BTreeMap<CurrencyCode, PricingEntry>,
    pub is_backorder: bool,
    pub is_low_quantity: bool,
    pub is_sold_out: bool,
    pub is_deleted: bool,
    pub is_visible: bool,
    pub is_taxable: bool,
    pub low_inventory_warning_threshold: Option<i64>,
    pub min_order_quantity: Option<i64>,
    pub media: Vec<CatalogMediaItem>,
    pub primary_image: Option<CatalogMediaItem>,
    pub tag_ids: Vec<TagId>,
    pub variants: Vec<CatalogProductVariant>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn usd() -> CurrencyCode {
        CurrencyCode::new("USD").unwrap()
    }

    #[test]
    fn variant_mapping_copies_the_allow_list() {
        let created = Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap();
        let mut doc = ProductDocument::new(ProductId::new(), ShopId::new(), "Blue / Large", created);
        doc.ancestors = vec![ProductId::new()];
        doc.option_title = Some("Large".to_string());
        doc.sku = Some("MUG-BL-L".to_string());
        doc.index = 3;
        doc.price = Some(Decimal::new(1999, 2));
        doc.inventory_management = true;

        let range = PriceRange::from_prices(&[Decimal::new(1999, 2)]);
        let variant = CatalogProductVariant::from_document(&doc, &usd(), &range);

        assert_eq!(variant.variant_id, doc.id);
        assert_eq!(variant.ancestor_ids, doc.ancestors);
        assert_eq!(variant.title, "Blue / Large");
        assert_eq!(variant.option_title.as_deref(), Some("Large"));
        assert_eq!(variant.sku.as_deref(), Some("MUG-BL-L"));
        assert_eq!(variant.index, 3);
        assert!(variant.inventory_management);
        assert_eq!(variant.options, None);

        let entry = variant.pricing.get(&usd()).unwrap();
        assert_eq!(entry.display_price, "19.99");
        assert_eq!(entry.price, Some(Decimal::new(1999, 2)));
    }

    #[test]
    fn variant_updated_at_falls_back_to_created_at() {
        let created = Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap();
        let mut doc = ProductDocument::new(ProductId::new(), ShopId::new(), "Variant", created);
        doc.ancestors = vec![ProductId::new()];

        let variant = CatalogProductVariant::from_document(&doc, &usd(), &PriceRange::empty());
        assert_eq!(variant.updated_at, created);
    }
}
