//! # Catalog Unit Conversion
//!
//! Inventory items carry their own unit tables. A "case" of butter and a
//! "case" of pistachios hold different amounts, so every multiplier into the
//! item's base unit is per-item data rather than a global factor.
//!
//! The same per-item conversion backs the inventory unit-converter panel,
//! purchase-order receiving (order quantities accumulate into on-hand stock
//! in base units) and reorder suggestions (a base-unit deficit rounded up to
//! whole packs).
//!
//! ```rust
//! use kitchen_units::catalog::{convert_to_base, CatalogItem};
//!
//! let pistachios = CatalogItem::new("pist-01", "Pistachios", "kg").with_unit("case", "Case (25 kg)", 25.0);
//! assert_eq!(convert_to_base(&pistachios, 2.0, "case"), 50.0);
//! assert_eq!(convert_to_base(&pistachios, 2.0, "pallet"), 2.0);
//! ```

use crate::quantity_parser::round2;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::{debug, info, warn};

/// Base unit synthesized for items that do not name one
pub const FALLBACK_BASE_UNIT: &str = "each";

/// One entry of an item's unit table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogUnit {
    pub display: String,
    /// How many base units one of this unit holds
    pub to_base: f64,
}

/// An inventory item with its own unit table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogItem {
    pub id: String,
    pub name: String,
    pub base_unit: String,
    /// Keyed by lowercased unit name
    #[serde(default)]
    pub units: BTreeMap<String, CatalogUnit>,
    /// Stock on hand, in base units
    #[serde(default)]
    pub on_hand: f64,
    /// Target stock level, in base units
    #[serde(default)]
    pub par_level: f64,
}

/// A purchase-order line as received at the back door
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PurchaseOrderLine {
    pub item_id: String,
    pub qty: f64,
    pub unit: String,
}

/// Record of one purchase-order line applied to stock
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReceivingRecord {
    pub item_id: String,
    pub base_qty: f64,
    pub on_hand_after: f64,
    pub received_at: DateTime<Utc>,
}

/// Result of receiving a purchase order against the catalog
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReceivingOutcome {
    pub items: Vec<CatalogItem>,
    pub records: Vec<ReceivingRecord>,
    /// Lines whose item is not in the catalog
    pub unmatched: Vec<PurchaseOrderLine>,
}

/// Packs to order to bring an item back to par
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReorderSuggestion {
    pub item_id: String,
    pub unit: String,
    pub packs: u32,
    /// Shortfall below par, in base units
    pub deficit: f64,
}

fn unit_key(unit: &str) -> String {
    unit.trim().to_lowercase()
}

impl CatalogItem {
    /// Create an item whose unit table holds just its base unit
    pub fn new(id: &str, name: &str, base_unit: &str) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            base_unit: base_unit.to_string(),
            units: BTreeMap::new(),
            on_hand: 0.0,
            par_level: 0.0,
        }
        .with_base_unit()
    }

    /// Add or replace a unit holding `to_base` base units
    pub fn with_unit(mut self, unit: &str, display: &str, to_base: f64) -> Self {
        self.units.insert(
            unit_key(unit),
            CatalogUnit {
                display: display.to_string(),
                to_base,
            },
        );
        self
    }

    pub fn with_stock(mut self, on_hand: f64, par_level: f64) -> Self {
        self.on_hand = on_hand;
        self.par_level = par_level;
        self
    }

    /// Ensure the unit table holds the base unit with a multiplier of 1
    ///
    /// Items without a base unit get [`FALLBACK_BASE_UNIT`]. Call after
    /// deserializing items from storage.
    pub fn with_base_unit(mut self) -> Self {
        if self.base_unit.trim().is_empty() {
            warn!(item_id = %self.id, "item has no base unit, using fallback");
            self.base_unit = FALLBACK_BASE_UNIT.to_string();
        }
        let key = unit_key(&self.base_unit);
        if !self.units.contains_key(&key) {
            self.units.insert(
                key,
                CatalogUnit {
                    display: self.base_unit.clone(),
                    to_base: 1.0,
                },
            );
        }
        self
    }

    /// Multiplier for `unit`, if the item knows it and it is usable
    pub fn multiplier(&self, unit: &str) -> Option<f64> {
        let entry = self.units.get(&unit_key(unit))?;
        if entry.to_base.is_finite() && entry.to_base > 0.0 {
            Some(entry.to_base)
        } else {
            warn!(item_id = %self.id, unit, to_base = entry.to_base, "ignoring unusable unit multiplier");
            None
        }
    }
}

/// Express `qty` of `unit` in the item's base unit; unknown units pass through
pub fn convert_to_base(item: &CatalogItem, qty: f64, unit: &str) -> f64 {
    match item.multiplier(unit) {
        Some(multiplier) => qty * multiplier,
        None => {
            debug!(item_id = %item.id, unit, "unknown unit, quantity passed through");
            qty
        }
    }
}

/// Express a base-unit quantity in `unit`; unknown units pass through
pub fn convert_from_base(item: &CatalogItem, base_qty: f64, unit: &str) -> f64 {
    match item.multiplier(unit) {
        Some(multiplier) => base_qty / multiplier,
        None => {
            debug!(item_id = %item.id, unit, "unknown unit, quantity passed through");
            base_qty
        }
    }
}

/// Converter panel lookup between two of an item's units, rounded to 2 decimals
pub fn convert_between(item: &CatalogItem, qty: f64, from: &str, to: &str) -> f64 {
    round2(convert_from_base(item, convert_to_base(item, qty, from), to))
}

/// Apply purchase-order lines to stock
///
/// Returns the updated items, one record per applied line, and the lines
/// that matched no item. Lines with a non-finite quantity are reported as
/// unmatched rather than corrupting stock.
pub fn receive_order(
    items: &[CatalogItem],
    lines: &[PurchaseOrderLine],
    received_at: DateTime<Utc>,
) -> ReceivingOutcome {
    let mut updated: Vec<CatalogItem> = items.to_vec();
    let mut records = Vec::new();
    let mut unmatched = Vec::new();

    for line in lines {
        let Some(item) = updated.iter_mut().find(|item| item.id == line.item_id) else {
            warn!(item_id = %line.item_id, "received line for unknown item");
            unmatched.push(line.clone());
            continue;
        };
        if !line.qty.is_finite() {
            warn!(item_id = %line.item_id, "received line with unusable quantity");
            unmatched.push(line.clone());
            continue;
        }

        let base_qty = convert_to_base(item, line.qty, &line.unit);
        item.on_hand += base_qty;
        info!(item_id = %item.id, unit = %line.unit, base_qty, on_hand = item.on_hand, "stock received");

        records.push(ReceivingRecord {
            item_id: item.id.clone(),
            base_qty,
            on_hand_after: item.on_hand,
            received_at,
        });
    }

    ReceivingOutcome {
        items: updated,
        records,
        unmatched,
    }
}

/// Whole packs of `pack_unit` needed to bring the item back up to par
///
/// `None` when stock is at or above par. An unknown pack unit counts in base
/// units.
pub fn reorder_suggestion(item: &CatalogItem, pack_unit: &str) -> Option<ReorderSuggestion> {
    let deficit = item.par_level - item.on_hand;
    if !(deficit > 0.0) {
        return None;
    }

    let packs_needed = convert_from_base(item, deficit, pack_unit);
    // absorb float noise so an exact fit does not round up an extra pack
    let packs = (packs_needed - 1e-9).ceil().max(1.0) as u32;

    debug!(item_id = %item.id, deficit, packs, "reorder suggested");
    Some(ReorderSuggestion {
        item_id: item.id.clone(),
        unit: pack_unit.to_string(),
        packs,
        deficit,
    })
}
