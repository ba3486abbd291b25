//! # Plate Costing and Yield
//!
//! Recipe cost roll-up for the plate-costing dashboard. A row's yield
//! percentage says how much of the purchased amount survives trimming, so the
//! effective (as-purchased) cost of a row is `cost / (yield / 100)`.

use crate::quantity_parser::round2;
use crate::recipe::{clamp_yield, IngredientRow, Recipe};
use log::debug;
use serde::{Deserialize, Serialize};

/// Cost roll-up of one recipe
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CostSummary {
    /// Sum of row costs as entered
    pub total_cost: f64,
    /// Sum of yield-adjusted row costs
    pub effective_total: f64,
    pub cost_per_portion: f64,
    /// Cost per portion as a percentage of the menu price
    pub food_cost_pct: Option<f64>,
    pub priced_rows: usize,
    /// Ingredient rows without a usable cost or with zero yield
    pub skipped_rows: usize,
}

/// Yield-adjusted cost of a row; `None` without a cost or with zero yield
pub fn effective_cost(row: &IngredientRow) -> Option<f64> {
    let cost = row.cost_value()?;
    let fraction = yield_fraction(row)?;
    Some(cost / fraction)
}

/// Quantity that must be purchased to end up with the row's quantity
pub fn as_purchased_quantity(row: &IngredientRow) -> Option<f64> {
    let quantity = row.quantity()?;
    let fraction = yield_fraction(row)?;
    Some(round2(quantity / fraction))
}

/// Roll up every ingredient row of `recipe`
///
/// # Examples
///
/// ```rust
/// use kitchen_units::costing::summarize_costs;
/// use kitchen_units::recipe::{IngredientRow, Recipe};
///
/// let recipe = Recipe::new("Salad", 4)
///     .with_row(IngredientRow::new(1, "1", "LBS", "romaine").with_cost("4.00").with_yield(80.0))
///     .with_row(IngredientRow::new(2, "2", "OZ", "parmesan").with_cost("3.00"));
/// let summary = summarize_costs(&recipe);
/// assert_eq!(summary.total_cost, 7.0);
/// assert_eq!(summary.effective_total, 8.0);
/// assert_eq!(summary.cost_per_portion, 2.0);
/// ```
pub fn summarize_costs(recipe: &Recipe) -> CostSummary {
    let mut total_cost = 0.0;
    let mut effective_total = 0.0;
    let mut priced_rows = 0;
    let mut skipped_rows = 0;

    for row in recipe.ingredients() {
        match (row.cost_value(), effective_cost(row)) {
            (Some(cost), Some(effective)) => {
                total_cost += cost;
                effective_total += effective;
                priced_rows += 1;
            }
            _ => {
                debug!("Row {} ({}) excluded from costing", row.id, row.item);
                skipped_rows += 1;
            }
        }
    }

    let cost_per_portion = round2(effective_total / recipe.portions.max(1) as f64);
    let food_cost_pct = recipe
        .menu_price
        .and_then(|price| food_cost_percentage(cost_per_portion, price));

    CostSummary {
        total_cost: round2(total_cost),
        effective_total: round2(effective_total),
        cost_per_portion,
        food_cost_pct,
        priced_rows,
        skipped_rows,
    }
}

/// Portion cost as a percentage of the menu price; `None` for a non-positive price
pub fn food_cost_percentage(cost_per_portion: f64, menu_price: f64) -> Option<f64> {
    if !(menu_price.is_finite() && menu_price > 0.0) {
        return None;
    }
    Some(round2(cost_per_portion / menu_price * 100.0))
}

// yield_pct is a public field and may hold anything
fn yield_fraction(row: &IngredientRow) -> Option<f64> {
    let yield_pct = clamp_yield(row.yield_pct);
    (yield_pct > 0.0).then(|| yield_pct / 100.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_effective_cost() {
        let row = IngredientRow::new(1, "1", "LBS", "carrots").with_cost("2.00").with_yield(50.0);
        assert_eq!(effective_cost(&row), Some(4.0));

        let row = row.with_yield(0.0);
        assert_eq!(effective_cost(&row), None);

        let row = IngredientRow::new(2, "1", "LBS", "onion");
        assert_eq!(effective_cost(&row), None);
    }

    #[test]
    fn test_out_of_range_yield_is_clamped() {
        let mut row = IngredientRow::new(1, "1", "LBS", "beets").with_cost("10.00");
        row.yield_pct = 5000.0;
        let effective = effective_cost(&row).unwrap();
        assert!((effective - 10.0 / 9.99).abs() < 1e-9);

        row.yield_pct = f64::NAN;
        assert_eq!(effective_cost(&row), Some(10.0));

        row.yield_pct = -20.0;
        assert_eq!(effective_cost(&row), None);
    }

    #[test]
    fn test_as_purchased_quantity() {
        let row = IngredientRow::new(1, "3", "LBS", "beef").with_yield(75.0);
        assert_eq!(as_purchased_quantity(&row), Some(4.0));
        let row = IngredientRow::new(2, "2", "CUP", "stock").with_yield(200.0);
        assert_eq!(as_purchased_quantity(&row), Some(1.0));
    }

    #[test]
    fn test_summary_skips_unpriced_rows() {
        let recipe = Recipe::new("Stew", 0)
            .with_divider(1, "Vegetables")
            .with_row(IngredientRow::new(2, "2", "LBS", "potatoes").with_cost("$3.00"))
            .with_row(IngredientRow::new(3, "1", "bunch", "thyme"))
            .with_row(IngredientRow::new(4, "1", "LBS", "leeks").with_cost("2.00").with_yield(0.0));
        let summary = summarize_costs(&recipe);
        assert_eq!(summary.total_cost, 3.0);
        assert_eq!(summary.effective_total, 3.0);
        // zero portions guarded to one
        assert_eq!(summary.cost_per_portion, 3.0);
        assert_eq!(summary.priced_rows, 1);
        assert_eq!(summary.skipped_rows, 2);
        assert_eq!(summary.food_cost_pct, None);
    }

    #[test]
    fn test_food_cost_percentage() {
        assert_eq!(food_cost_percentage(3.0, 12.0), Some(25.0));
        assert_eq!(food_cost_percentage(3.0, 0.0), None);
        assert_eq!(food_cost_percentage(3.0, -1.0), None);

        let mut recipe = Recipe::new("Tart", 2)
            .with_row(IngredientRow::new(1, "1", "LBS", "pears").with_cost("6.00"));
        recipe.menu_price = Some(10.0);
        assert_eq!(summarize_costs(&recipe).food_cost_pct, Some(30.0));
    }
}
