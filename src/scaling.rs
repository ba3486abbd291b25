//! # Recipe Scaling
//!
//! Resizes a recipe by a single factor: every ingredient quantity and cost is
//! multiplied and written back with two decimals, dividers are left alone,
//! and the cost per unit is re-derived for each rewritten row.
//!
//! ```rust
//! use kitchen_units::recipe::{IngredientRow, Recipe};
//! use kitchen_units::scaling::scale_to_portions;
//!
//! let recipe = Recipe::new("Risotto", 6)
//!     .with_row(IngredientRow::new(1, "2", "CUP", "arborio rice").with_cost("10.00"));
//! let scaled = scale_to_portions(&recipe, 9).unwrap();
//! let row = scaled.ingredients().next().unwrap();
//! assert_eq!((row.qty.as_str(), row.cost.as_str()), ("3.00", "15.00"));
//! assert_eq!(scaled.portions, 9);
//! ```

use crate::errors::KitchenError;
use crate::quantity_parser::format_fixed2;
use crate::recipe::{IngredientRow, Recipe, RecipeRow};
use log::{debug, info, warn};

/// Multiply every ingredient row's quantity and cost by `factor`
///
/// Rows whose quantity does not parse are left exactly as they were; a cost
/// that does not parse is kept as typed. A factor that is not a positive
/// finite number leaves all rows unchanged.
pub fn scale_rows(rows: &[RecipeRow], factor: f64) -> Vec<RecipeRow> {
    if !(factor.is_finite() && factor > 0.0) {
        warn!("Ignoring invalid scale factor {}", factor);
        return rows.to_vec();
    }

    let scaled: Vec<RecipeRow> = rows
        .iter()
        .map(|row| row.map_ingredient(|ingredient| scale_ingredient(ingredient, factor)))
        .collect();

    info!("Scaled {} rows by factor {:.4}", scaled.len(), factor);
    scaled
}

/// Scale factor for resizing from `current` to `target` portions
///
/// A current count of zero is treated as one; a target of zero is rejected.
pub fn portion_scale_factor(current: u32, target: u32) -> Result<f64, KitchenError> {
    if target == 0 {
        return Err(KitchenError::InvalidScaleFactor(
            "target portions must be at least 1".to_string(),
        ));
    }
    Ok(target as f64 / current.max(1) as f64)
}

/// Resize a recipe to `target` portions
pub fn scale_to_portions(recipe: &Recipe, target: u32) -> Result<Recipe, KitchenError> {
    let factor = portion_scale_factor(recipe.portions, target)?;
    let mut scaled = scale_recipe(recipe, factor)?;
    scaled.portions = target;
    Ok(scaled)
}

/// Scale a whole recipe by `factor`, including portions and nutrition totals
pub fn scale_recipe(recipe: &Recipe, factor: f64) -> Result<Recipe, KitchenError> {
    if !(factor.is_finite() && factor > 0.0) {
        return Err(KitchenError::InvalidScaleFactor(factor.to_string()));
    }

    let mut scaled = recipe.clone();
    scaled.rows = scale_rows(&recipe.rows, factor);
    scaled.portions = ((recipe.portions.max(1) as f64) * factor).round().max(1.0) as u32;
    scaled.nutrition = recipe.nutrition.as_ref().map(|facts| facts.scaled(factor));
    debug!(
        "Recipe '{}' scaled from {} to {} portions",
        recipe.name, recipe.portions, scaled.portions
    );
    Ok(scaled)
}

fn scale_ingredient(row: &IngredientRow, factor: f64) -> IngredientRow {
    let Some(quantity) = row.quantity() else {
        debug!("Row {} has no numeric quantity, left as-is", row.id);
        return row.clone();
    };

    let mut scaled = row.clone();
    scaled.qty = format_fixed2(quantity * factor);
    if let Some(cost) = row.cost_value() {
        scaled.cost = format_fixed2(cost * factor);
    }

    scaled.recompute_cost_per_unit();
    scaled
}
