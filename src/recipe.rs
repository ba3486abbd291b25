//! # Recipe Data Model
//!
//! Recipes as the editor stores them: ingredient rows carrying their quantity,
//! unit and cost as display strings, divider rows carrying only a label, plus
//! recipe-level portion count, unit system, currency, directions and
//! nutrition totals.
//!
//! ## Derived fields
//!
//! `cost_per_unit` is derived from `cost / qty`. It is recomputed by
//! [`IngredientRow::recompute_cost_per_unit`] after every mutation instead of
//! being kept in sync implicitly:
//!
//! - editing the quantity re-derives the cost from the known cost per unit
//! - editing the cost re-derives the cost per unit
//! - bulk rewrites (scaling, unit conversion) call the recompute step
//!
//! ```rust
//! use kitchen_units::recipe::IngredientRow;
//!
//! let row = IngredientRow::new(1, "2", "LBS", "butter").with_cost("10.00");
//! assert_eq!(row.cost_per_unit, Some(5.0));
//!
//! let row = row.with_quantity_edit("3");
//! assert_eq!(row.cost, "15.00");
//! ```

use crate::currency::{format_cost, Currency};
use crate::nutrition::NutritionFacts;
use crate::quantity_parser::{format_fixed2, parse_cost_value, parse_quantity};
use crate::units::{canonicalize, Unit, UnitSystem};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Stable row identifier, preserved across conversions and scaling
pub type RowId = u64;

/// Upper bound for a row's yield percentage
pub const MAX_YIELD_PCT: f64 = 999.0;

/// One ingredient line of a recipe
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IngredientRow {
    pub id: RowId,
    /// Quantity as typed ("1 1/2", "¾", "2.50")
    pub qty: String,
    /// Unit code or free-form unit text
    pub unit: String,
    pub item: String,
    /// Preparation note ("diced", "room temperature")
    #[serde(default)]
    pub prep: String,
    /// Usable yield after trimming, 0 to 999 percent
    #[serde(default = "default_yield", deserialize_with = "deserialize_yield")]
    pub yield_pct: f64,
    /// Cost for the row's quantity, as typed
    #[serde(default)]
    pub cost: String,
    #[serde(default)]
    pub cost_per_unit: Option<f64>,
}

/// A recipe line: an ingredient, or a divider labelling a section
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RecipeRow {
    Ingredient(IngredientRow),
    Divider { id: RowId, label: String },
}

/// A recipe and its per-recipe settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recipe {
    pub name: String,
    #[serde(default = "default_portions")]
    pub portions: u32,
    #[serde(default)]
    pub unit_system: UnitSystem,
    #[serde(default)]
    pub currency: Currency,
    #[serde(default)]
    pub rows: Vec<RecipeRow>,
    #[serde(default)]
    pub directions: String,
    #[serde(default)]
    pub oven_temp: Option<String>,
    /// Totals for the whole recipe
    #[serde(default)]
    pub nutrition: Option<NutritionFacts>,
    #[serde(default)]
    pub menu_price: Option<f64>,
}

fn default_yield() -> f64 {
    100.0
}

/// Bring a yield percentage into 0..=999; anything not finite reads as 100
pub fn clamp_yield(yield_pct: f64) -> f64 {
    if yield_pct.is_finite() {
        yield_pct.clamp(0.0, MAX_YIELD_PCT)
    } else {
        default_yield()
    }
}

fn deserialize_yield<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    f64::deserialize(deserializer).map(clamp_yield)
}

fn default_portions() -> u32 {
    1
}

fn round4(value: f64) -> f64 {
    (value * 10_000.0).round() / 10_000.0
}

impl IngredientRow {
    /// Create an ingredient row with full yield and no cost
    pub fn new(id: RowId, qty: &str, unit: &str, item: &str) -> Self {
        Self {
            id,
            qty: qty.to_string(),
            unit: unit.to_string(),
            item: item.to_string(),
            prep: String::new(),
            yield_pct: default_yield(),
            cost: String::new(),
            cost_per_unit: None,
        }
    }

    /// Set the cost and derive the cost per unit
    pub fn with_cost(mut self, cost: &str) -> Self {
        self.cost = cost.to_string();
        self.recompute_cost_per_unit();
        self
    }

    pub fn with_prep(mut self, prep: &str) -> Self {
        self.prep = prep.to_string();
        self
    }

    /// Set the yield percentage, clamped to 0..=999
    pub fn with_yield(mut self, yield_pct: f64) -> Self {
        self.yield_pct = clamp_yield(yield_pct);
        self
    }

    /// Apply a quantity edit; the cost follows the known cost per unit
    pub fn with_quantity_edit(mut self, qty: &str) -> Self {
        self.qty = qty.to_string();
        if let (Some(quantity), Some(per_unit)) = (self.quantity(), self.cost_per_unit) {
            self.cost = format_fixed2(quantity * per_unit);
        }
        self.recompute_cost_per_unit();
        self
    }

    /// Apply a cost edit; the cost per unit is re-derived
    pub fn with_cost_edit(self, cost: &str) -> Self {
        self.with_cost(cost)
    }

    pub fn quantity(&self) -> Option<f64> {
        parse_quantity(&self.qty)
    }

    pub fn cost_value(&self) -> Option<f64> {
        parse_cost_value(&self.cost)
    }

    pub fn canonical_unit(&self) -> Unit {
        canonicalize(&self.unit)
    }

    /// Re-derive `cost_per_unit` from `cost / qty`
    ///
    /// Leaves the previous value when either side is missing or the quantity
    /// is zero.
    pub fn recompute_cost_per_unit(&mut self) {
        if let (Some(cost), Some(quantity)) = (self.cost_value(), self.quantity()) {
            if quantity != 0.0 {
                let per_unit = round4(cost / quantity);
                if per_unit.is_finite() {
                    self.cost_per_unit = Some(per_unit);
                }
            }
        }
    }
}

impl RecipeRow {
    pub fn id(&self) -> RowId {
        match self {
            RecipeRow::Ingredient(row) => row.id,
            RecipeRow::Divider { id, .. } => *id,
        }
    }

    pub fn is_divider(&self) -> bool {
        matches!(self, RecipeRow::Divider { .. })
    }

    pub fn as_ingredient(&self) -> Option<&IngredientRow> {
        match self {
            RecipeRow::Ingredient(row) => Some(row),
            RecipeRow::Divider { .. } => None,
        }
    }

    /// Rewrite ingredient rows with `f`; dividers pass through untouched
    pub fn map_ingredient(&self, f: impl FnOnce(&IngredientRow) -> IngredientRow) -> RecipeRow {
        match self {
            RecipeRow::Ingredient(row) => RecipeRow::Ingredient(f(row)),
            RecipeRow::Divider { .. } => self.clone(),
        }
    }
}

impl From<IngredientRow> for RecipeRow {
    fn from(row: IngredientRow) -> Self {
        RecipeRow::Ingredient(row)
    }
}

impl Recipe {
    pub fn new(name: &str, portions: u32) -> Self {
        Self {
            name: name.to_string(),
            portions,
            unit_system: UnitSystem::default(),
            currency: Currency::default(),
            rows: Vec::new(),
            directions: String::new(),
            oven_temp: None,
            nutrition: None,
            menu_price: None,
        }
    }

    pub fn with_row(mut self, row: impl Into<RecipeRow>) -> Self {
        self.rows.push(row.into());
        self
    }

    pub fn with_divider(mut self, id: RowId, label: &str) -> Self {
        self.rows.push(RecipeRow::Divider {
            id,
            label: label.to_string(),
        });
        self
    }

    pub fn with_directions(mut self, directions: &str) -> Self {
        self.directions = directions.to_string();
        self
    }

    pub fn with_nutrition(mut self, nutrition: NutritionFacts) -> Self {
        self.nutrition = Some(nutrition);
        self
    }

    pub fn ingredients(&self) -> impl Iterator<Item = &IngredientRow> {
        self.rows.iter().filter_map(RecipeRow::as_ingredient)
    }

    /// Switch to the next display currency; amounts are unchanged
    pub fn cycle_currency(&self) -> Recipe {
        let mut recipe = self.clone();
        recipe.currency = self.currency.next();
        recipe
    }

    /// A row's cost formatted with the recipe currency, if it parses
    pub fn formatted_cost(&self, row: &IngredientRow) -> Option<String> {
        row.cost_value().map(|cost| format_cost(cost, self.currency))
    }

    /// Nutrition per serving, when totals are known
    pub fn nutrition_per_serving(&self) -> Option<NutritionFacts> {
        self.nutrition
            .as_ref()
            .map(|facts| facts.per_serving(self.portions))
    }
}

impl fmt::Display for IngredientRow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.qty, self.unit, self.item)?;
        if !self.prep.is_empty() {
            write!(f, ", {}", self.prep)?;
        }
        Ok(())
    }
}
