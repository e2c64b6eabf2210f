//! Threshold-based inventory flags.

use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;

use meridian_catalog::{CatalogProductVariant, InventoryLookup, StoreError};
use meridian_core::ProductId;

/// Stock state of one sellable variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InventoryLevel {
    /// Units available to sell.
    pub available: i64,
    /// Whether stock is tracked for this variant; untracked variants never
    /// count toward product-level flags.
    pub is_managed: bool,
    /// Whether selling may continue below zero stock.
    pub allows_backorder: bool,
    /// At or below this (while still in stock) the variant counts as low.
    pub low_stock_threshold: i64,
}

impl InventoryLevel {
    /// Tracked stock with a low-stock threshold; backorder off.
    pub fn managed(available: i64, low_stock_threshold: i64) -> Self {
        Self {
            available,
            is_managed: true,
            allows_backorder: false,
            low_stock_threshold,
        }
    }

    /// Untracked stock: sells regardless of quantity.
    pub fn untracked() -> Self {
        Self {
            available: 0,
            is_managed: false,
            allows_backorder: true,
            low_stock_threshold: 0,
        }
    }

    pub fn with_backorder(mut self) -> Self {
        self.allows_backorder = true;
        self
    }

    fn in_stock(&self) -> bool {
        self.available > 0
    }

    fn is_low(&self) -> bool {
        self.in_stock() && self.available <= self.low_stock_threshold
    }
}

/// In-memory inventory service resolving product-level flags.
///
/// The sellable units of a product are its options where present, otherwise
/// the top-level variant itself; only inventory-managed units participate.
/// Variants without a recorded level are treated as untracked.
///
/// Aggregation rules: sold out when at least one managed unit exists and
/// none has stock; low quantity when any managed unit is at or below its
/// threshold while still in stock; backorder when sold out and every managed
/// unit allows selling below zero.
#[derive(Debug, Default)]
pub struct ThresholdInventory {
    levels: RwLock<HashMap<ProductId, InventoryLevel>>,
}

impl ThresholdInventory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the level of one variant.
    pub fn set_level(&self, variant_id: ProductId, level: InventoryLevel) {
        if let Ok(mut levels) = self.levels.write() {
            levels.insert(variant_id, level);
        }
    }

    /// Managed levels of every sellable unit in the list.
    fn managed_units(
        &self,
        variants: &[CatalogProductVariant],
    ) -> Result<Vec<InventoryLevel>, StoreError> {
        let levels = self
            .levels
            .read()
            .map_err(|_| StoreError::backend("inventory level table lock poisoned"))?;

        let mut units = Vec::new();
        for variant in variants {
            match &variant.options {
                Some(options) if !options.is_empty() => {
                    for option in options {
                        if let Some(level) = levels.get(&option.variant_id) {
                            if level.is_managed {
                                units.push(*level);
                            }
                        }
                    }
                }
                _ => {
                    if let Some(level) = levels.get(&variant.variant_id) {
                        if level.is_managed {
                            units.push(*level);
                        }
                    }
                }
            }
        }
        Ok(units)
    }
}

#[async_trait]
impl InventoryLookup for ThresholdInventory {
    async fn is_backorder(
        &self,
        variants: &[CatalogProductVariant],
    ) -> Result<bool, StoreError> {
        let units = self.managed_units(variants)?;
        Ok(!units.is_empty()
            && units.iter().all(|u| !u.in_stock())
            && units.iter().all(|u| u.allows_backorder))
    }

    async fn is_low_quantity(
        &self,
        variants: &[CatalogProductVariant],
    ) -> Result<bool, StoreError> {
        let units = self.managed_units(variants)?;
        Ok(units.iter().any(|u| u.is_low()))
    }

    async fn is_sold_out(&self, variants: &[CatalogProductVariant]) -> Result<bool, StoreError> {
        let units = self.managed_units(variants)?;
        Ok(!units.is_empty() && units.iter().all(|u| !u.in_stock()))
    }
}
