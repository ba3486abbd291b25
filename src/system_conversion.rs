//! # Unit System Conversion
//!
//! The recipe editor's "Convert Units" action. Each ingredient row goes
//! through parse → canonicalize → normalize → cross systems, and is written
//! back with its new quantity string and unit code. A row that cannot be
//! converted (no numeric quantity, custom unit, already in the target system)
//! is left exactly as it was; the rest of the recipe still converts.

use crate::conversion_graph::ConversionGraph;
use crate::normalizer::{normalize_imperial, normalize_metric};
use crate::quantity_parser::format_quantity;
use crate::recipe::{IngredientRow, Recipe, RecipeRow};
use crate::temperature::{convert_temp_field, convert_temps_in_text};
use crate::units::{Quantity, UnitSystem};
use log::{debug, info};
use serde::{Deserialize, Serialize};

/// Legibility passes applied around the system crossing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConversionOptions {
    /// Promote large `ML`/`G` results to `L`/`KG`
    pub normalize_metric: bool,
    /// Collapse Metric→Imperial results into the most legible Imperial unit
    pub normalize_imported_imperial: bool,
}

impl Default for ConversionOptions {
    fn default() -> Self {
        Self {
            normalize_metric: true,
            normalize_imported_imperial: true,
        }
    }
}

/// Convert one ingredient row into `target`, or return it unchanged
pub fn convert_row(
    graph: &ConversionGraph,
    row: &IngredientRow,
    target: UnitSystem,
    options: &ConversionOptions,
) -> IngredientRow {
    let Some(quantity) = row.quantity() else {
        debug!("Row {} skipped: quantity '{}' is not numeric", row.id, row.qty);
        return row.clone();
    };
    let unit = row.canonical_unit();
    if unit.is_custom() {
        debug!("Row {} kept: custom unit '{}'", row.id, row.unit);
        return row.clone();
    }

    let converted: Option<Quantity> = match (unit.system(), target) {
        (Some(UnitSystem::Imperial), UnitSystem::Metric) => {
            let legible = normalize_imperial(graph, quantity, &unit);
            graph
                .to_metric(legible.amount, &legible.unit)
                .map(|metric| {
                    if options.normalize_metric {
                        normalize_metric(metric.amount, &metric.unit)
                    } else {
                        metric
                    }
                })
        }
        (Some(UnitSystem::Metric), UnitSystem::Imperial) => graph
            .to_imperial(quantity, &unit)
            .map(|imperial| {
                if options.normalize_imported_imperial {
                    normalize_imperial(graph, imperial.amount, &imperial.unit)
                } else {
                    imperial
                }
            }),
        _ => None,
    };

    match converted {
        Some(result) => {
            debug!(
                "Row {}: {} {} -> {}",
                row.id, row.qty, row.unit, result
            );
            let mut updated = row.clone();
            updated.qty = format_quantity(result.amount);
            updated.unit = result.unit.code().to_string();
            updated.recompute_cost_per_unit();
            updated
        }
        None => {
            debug!("Row {} left as-is ({} in {})", row.id, unit, target);
            row.clone()
        }
    }
}

/// Convert every ingredient row; dividers and unconvertible rows pass through
pub fn convert_rows(
    graph: &ConversionGraph,
    rows: &[RecipeRow],
    target: UnitSystem,
    options: &ConversionOptions,
) -> Vec<RecipeRow> {
    let converted: Vec<RecipeRow> = rows
        .iter()
        .map(|row| row.map_ingredient(|ingredient| convert_row(graph, ingredient, target, options)))
        .collect();

    let changed = rows
        .iter()
        .zip(converted.iter())
        .filter(|(before, after)| before != after)
        .count();
    info!("Converted {} of {} rows to {}", changed, rows.len(), target);
    converted
}

/// Switch a whole recipe to `target`: rows, directions and oven temperature
///
/// Temperatures are only rewritten when the recipe actually changes system,
/// since bare temperatures are read as being in the current system.
pub fn convert_recipe(
    graph: &ConversionGraph,
    recipe: &Recipe,
    target: UnitSystem,
    options: &ConversionOptions,
) -> Recipe {
    let mut converted = recipe.clone();
    converted.rows = convert_rows(graph, &recipe.rows, target, options);

    if recipe.unit_system != target {
        let to_metric = target == UnitSystem::Metric;
        converted.directions = convert_temps_in_text(&recipe.directions, to_metric);
        converted.oven_temp = recipe
            .oven_temp
            .as_deref()
            .map(|field| convert_temp_field(field, to_metric));
    }

    converted.unit_system = target;
    converted
}
