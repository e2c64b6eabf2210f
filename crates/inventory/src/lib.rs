//! Inventory flag resolution for the catalog pipeline.
//!
//! Implements the catalog's `InventoryLookup` port: product-level
//! backorder / low-quantity / sold-out booleans derived from per-variant
//! stock levels.

pub mod levels;

pub use levels::{InventoryLevel, ThresholdInventory};
