//! Canonical product-shaped documents.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use meridian_core::{DomainError, ProductId, ShopId, TagId};

/// A canonical product-shaped document.
///
/// Products, variants, and options share this shape; the `ancestors` chain
/// encodes depth (empty = top-level product, one entry = variant, two
/// entries = option under that variant).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductDocument {
    pub id: ProductId,
    pub shop_id: ShopId,
    /// Parent chain, outermost first.
    pub ancestors: Vec<ProductId>,
    pub title: String,
    /// URL slug; set on top-level products.
    pub handle: Option<String>,
    pub description: Option<String>,
    pub page_title: Option<String>,
    pub meta_description: Option<String>,
    pub vendor: Option<String>,
    pub sku: Option<String>,
    pub barcode: Option<String>,
    /// Display label for a variant/option axis (e.g. "Small").
    pub option_title: Option<String>,
    /// Ordering hint among sibling variants.
    pub index: i32,
    pub price: Option<Decimal>,
    pub compare_at_price: Option<Decimal>,
    pub is_deleted: bool,
    pub is_visible: bool,
    pub is_taxable: bool,
    /// Whether stock is tracked for this document.
    pub inventory_management: bool,
    /// Whether selling stops at zero stock.
    pub inventory_policy: bool,
    pub low_inventory_warning_threshold: Option<i64>,
    pub min_order_quantity: Option<i64>,
    pub tag_ids: Vec<TagId>,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl ProductDocument {
    /// New top-level document with default flags (visible, not deleted).
    pub fn new(
        id: ProductId,
        shop_id: ShopId,
        title: impl Into<String>,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            shop_id,
            ancestors: Vec::new(),
            title: title.into(),
            handle: None,
            description: None,
            page_title: None,
            meta_description: None,
            vendor: None,
            sku: None,
            barcode: None,
            option_title: None,
            index: 0,
            price: None,
            compare_at_price: None,
            is_deleted: false,
            is_visible: true,
            is_taxable: false,
            inventory_management: false,
            inventory_policy: false,
            low_inventory_warning_threshold: None,
            min_order_quantity: None,
            tag_ids: Vec::new(),
            created_at,
            updated_at: None,
        }
    }

    /// Depth in the product tree (0 = product, 1 = variant, 2 = option).
    pub fn depth(&self) -> usize {
        self.ancestors.len()
    }

    pub fn is_top_level(&self) -> bool {
        self.ancestors.is_empty()
    }

    /// Publishable: not deleted and visible.
    pub fn is_live(&self) -> bool {
        !self.is_deleted && self.is_visible
    }

    /// Effective last-modified timestamp.
    pub fn last_updated(&self) -> DateTime<Utc> {
        self.updated_at.unwrap_or(self.created_at)
    }

    /// Boundary validation for documents entering a store.
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.title.trim().is_empty() {
            return Err(DomainError::validation("title cannot be empty"));
        }
        if self.ancestors.len() > 2 {
            return Err(DomainError::validation(format!(
                "ancestor chain deeper than an option ({} entries)",
                self.ancestors.len()
            )));
        }
        if let Some(price) = self.price {
            if price.is_sign_negative() {
                return Err(DomainError::validation("price cannot be negative"));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn doc() -> ProductDocument {
        ProductDocument::new(
            ProductId::new(),
            ShopId::new(),
            "Ceramic Mug",
            Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
        )
    }

    #[test]
    fn new_document_is_live_and_top_level() {
        let doc = doc();
        assert!(doc.is_top_level());
        assert!(doc.is_live());
        assert_eq!(doc.depth(), 0);
        assert!(doc.validate().is_ok());
    }

    #[test]
    fn deleted_or_hidden_documents_are_not_live() {
        let mut deleted = doc();
        deleted.is_deleted = true;
        assert!(!deleted.is_live());

        let mut hidden = doc();
        hidden.is_visible = false;
        assert!(!hidden.is_live());
    }

    #[test]
    fn last_updated_falls_back_to_created_at() {
        let mut doc = doc();
        assert_eq!(doc.last_updated(), doc.created_at);

        let later = doc.created_at + chrono::Duration::hours(3);
        doc.updated_at = Some(later);
        assert_eq!(doc.last_updated(), later);
    }

    #[test]
    fn validate_rejects_blank_title() {
        let mut doc = doc();
        doc.title = "   ".to_string();
        let err = doc.validate().unwrap_err();
        match err {
            DomainError::Validation(_) => {}
            _ => panic!("Expected Validation error for blank title"),
        }
    }

    #[test]
    fn validate_rejects_overdeep_ancestor_chain() {
        let mut doc = doc();
        doc.ancestors = vec![ProductId::new(), ProductId::new(), ProductId::new()];
        assert!(doc.validate().is_err());
    }

    #[test]
    fn validate_rejects_negative_price() {
        let mut doc = doc();
        doc.price = Some(Decimal::new(-100, 2));
        assert!(doc.validate().is_err());
    }
}
