//! Variant/option tree flattening.

use std::collections::HashMap;

use rust_decimal::Decimal;
use tracing::warn;

use meridian_core::{CurrencyCode, ProductId};

use crate::document::ProductDocument;
use crate::pricing::PriceRange;
use crate::product::CatalogProductVariant;

/// Result of flattening one product's variant documents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlattenedTree {
    /// Denormalized top-level variants in input order, options nested.
    pub variants: Vec<CatalogProductVariant>,
    /// Every (min, max) collected per top variant, for product-level
    /// aggregation.
    pub prices: Vec<Decimal>,
}

/// Partition a flat list of variant documents into top-level variants and
/// their options, denormalizing each with its computed price range.
///
/// A top variant with options takes its displayed range from the options'
/// prices; its own price is ignored in that case. Options always range over
/// their own singleton price. Documents whose ancestor chain is neither
/// variant- nor option-shaped are skipped.
pub fn flatten_variant_tree(
    currency: &CurrencyCode,
    docs: &[&ProductDocument],
) -> FlattenedTree {
    let mut tops: Vec<&ProductDocument> = Vec::new();
    let mut options: HashMap<ProductId, Vec<&ProductDocument>> = HashMap::new();

    for &doc in docs {
        match doc.ancestors.as_slice() {
            [_product] => tops.push(doc),
            [_product, parent] => options.entry(*parent).or_default().push(doc),
            chain => {
                warn!(
                    variant_id = %doc.id,
                    depth = chain.len(),
                    "skipping variant document with unexpected ancestor depth"
                );
            }
        }
    }

    let mut variants = Vec::with_capacity(tops.len());
    let mut prices = Vec::new();

    for top in tops {
        let children = options.remove(&top.id);

        let range = match &children {
            Some(list) => {
                let option_prices: Vec<Decimal> = list.iter().filter_map(|o| o.price).collect();
                PriceRange::from_prices(&option_prices)
            }
            None => singleton_range(top.price),
        };

        if let (Some(min), Some(max)) = (range.min, range.max) {
            prices.push(min);
            prices.push(max);
        }

        let mut variant = CatalogProductVariant::from_document(top, currency, &range);
        if let Some(list) = children {
            variant.options = Some(
                list.iter()
                    .map(|option| {
                        CatalogProductVariant::from_document(
                            option,
                            currency,
                            &singleton_range(option.price),
                        )
                    })
                    .collect(),
            );
        }
        variants.push(variant);
    }

    FlattenedTree { variants, prices }
}

fn singleton_range(price: Option<Decimal>) -> PriceRange {
    match price {
        Some(price) => PriceRange::from_prices(&[price]),
        None => PriceRange::empty(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use meridian_core::ShopId;

    fn usd() -> CurrencyCode {
        CurrencyCode::new("USD").unwrap()
    }

    fn price(units: i64) -> Decimal {
        Decimal::new(units, 0)
    }

    struct Tree {
        shop_id: ShopId,
        product_id: ProductId,
        docs: Vec<ProductDocument>,
    }

    impl Tree {
        fn new() -> Self {
            Self {
                shop_id: ShopId::new(),
                product_id: ProductId::new(),
                docs: Vec::new(),
            }
        }

        fn variant(&mut self, title: &str, price: Option<Decimal>) -> ProductId {
            let created = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
            let mut doc = ProductDocument::new(ProductId::new(), self.shop_id, title, created);
            doc.ancestors = vec![self.product_id];
            doc.price = price;
            let id = doc.id;
            self.docs.push(doc);
            id
        }

        fn option(&mut self, parent: ProductId, title: &str, price: Option<Decimal>) -> ProductId {
            let created = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
            let mut doc = ProductDocument::new(ProductId::new(), self.shop_id, title, created);
            doc.ancestors = vec![self.product_id, parent];
            doc.price = price;
            let id = doc.id;
            self.docs.push(doc);
            id
        }

        fn flatten(&self) -> FlattenedTree {
            let refs: Vec<&ProductDocument> = self.docs.iter().collect();
            flatten_variant_tree(&usd(), &refs)
        }
    }

    #[test]
    fn variant_without_options_ranges_over_its_own_price() {
        let mut tree = Tree::new();
        tree.variant("Solo", Some(price(10)));

        let flat = tree.flatten();
        assert_eq!(flat.variants.len(), 1);
        let entry = flat.variants[0].pricing.get(&usd()).unwrap();
        assert_eq!(entry.display_price, "10");
        assert_eq!(entry.min_price, Some(price(10)));
        assert_eq!(entry.max_price, Some(price(10)));
        assert_eq!(flat.prices, vec![price(10), price(10)]);
    }

    #[test]
    fn option_prices_override_the_parent_variant_price() {
        let mut tree = Tree::new();
        let parent = tree.variant("Parent", Some(price(20)));
        tree.option(parent, "Small", Some(price(15)));
        tree.option(parent, "Large", Some(price(25)));

        let flat = tree.flatten();
        assert_eq!(flat.variants.len(), 1);

        let variant = &flat.variants[0];
        let entry = variant.pricing.get(&usd()).unwrap();
        assert_eq!(entry.display_price, "15 - 25");
        assert_eq!(entry.min_price, Some(price(15)));
        assert_eq!(entry.max_price, Some(price(25)));
        // The variant's own scalar price is still copied, only the range comes
        // from the options.
        assert_eq!(entry.price, Some(price(20)));

        let options = variant.options.as_ref().unwrap();
        assert_eq!(options.len(), 2);
        assert_eq!(
            options[0].pricing.get(&usd()).unwrap().display_price,
            "15"
        );
        assert_eq!(
            options[1].pricing.get(&usd()).unwrap().display_price,
            "25"
        );
    }

    #[test]
    fn collected_prices_cover_every_top_variant() {
        let mut tree = Tree::new();
        tree.variant("V1", Some(price(10)));
        let v2 = tree.variant("V2", Some(price(20)));
        tree.option(v2, "O1", Some(price(15)));
        tree.option(v2, "O2", Some(price(25)));

        let flat = tree.flatten();
        assert_eq!(flat.prices, vec![price(10), price(10), price(15), price(25)]);
        assert_eq!(PriceRange::from_prices(&flat.prices).range, "10 - 25");
    }

    #[test]
    fn top_variant_order_follows_input_order() {
        let mut tree = Tree::new();
        tree.variant("First", Some(price(3)));
        tree.variant("Second", Some(price(1)));
        tree.variant("Third", Some(price(2)));

        let flat = tree.flatten();
        let titles: Vec<&str> = flat.variants.iter().map(|v| v.title.as_str()).collect();
        assert_eq!(titles, vec!["First", "Second", "Third"]);
    }

    #[test]
    fn unpriced_variant_yields_empty_range_and_no_collected_prices() {
        let mut tree = Tree::new();
        tree.variant("Unpriced", None);

        let flat = tree.flatten();
        let entry = flat.variants[0].pricing.get(&usd()).unwrap();
        assert_eq!(entry.display_price, "");
        assert_eq!(entry.min_price, None);
        assert!(flat.prices.is_empty());
    }

    #[test]
    fn documents_with_unexpected_depth_are_skipped() {
        let mut tree = Tree::new();
        tree.variant("Keep", Some(price(5)));

        let created = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let mut stray = ProductDocument::new(ProductId::new(), tree.shop_id, "Stray", created);
        stray.ancestors = vec![tree.product_id, ProductId::new(), ProductId::new()];
        tree.docs.push(stray);

        let flat = tree.flatten();
        assert_eq!(flat.variants.len(), 1);
        assert_eq!(flat.variants[0].title, "Keep");
    }

    #[test]
    fn options_group_under_their_own_parent() {
        let mut tree = Tree::new();
        let v1 = tree.variant("V1", None);
        let v2 = tree.variant("V2", None);
        tree.option(v1, "V1-O1", Some(price(1)));
        tree.option(v2, "V2-O1", Some(price(2)));
        tree.option(v1, "V1-O2", Some(price(3)));

        let flat = tree.flatten();
        let v1_options = flat.variants[0].options.as_ref().unwrap();
        let v2_options = flat.variants[1].options.as_ref().unwrap();
        assert_eq!(
            v1_options.iter().map(|o| o.title.as_str()).collect::<Vec<_>>(),
            vec!["V1-O1", "V1-O2"]
        );
        assert_eq!(
            v2_options.iter().map(|o| o.title.as_str()).collect::<Vec<_>>(),
            vec!["V2-O1"]
        );
    }
}
