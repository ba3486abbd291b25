//! # Unit Normalizer
//!
//! Picks the most legible unit for a quantity, so a recipe reads `4 GALLON`
//! instead of `3072 TSP`. Thresholds come from the conversion graph's base
//! factors: a unit is chosen when the base-unit amount reaches one whole unit.

use crate::conversion_graph::ConversionGraph;
use crate::quantity_parser::round2;
use crate::units::{Dimension, Quantity, Unit, UnitSystem};
use log::trace;

/// Imperial volume units, largest first
static IMPERIAL_VOLUME_LADDER: [Unit; 7] = [
    Unit::Gallon,
    Unit::Quart,
    Unit::Pint,
    Unit::Cup,
    Unit::FluidOunce,
    Unit::Tablespoon,
    Unit::Teaspoon,
];

const OUNCES_PER_POUND: f64 = 16.0;
const METRIC_PROMOTION: f64 = 1000.0;

/// Collapse an Imperial volume into the largest unit it fills at least once
///
/// Non-volume, non-Imperial or non-positive input is returned unchanged.
///
/// # Examples
///
/// ```rust
/// use kitchen_units::conversion_graph::ConversionGraph;
/// use kitchen_units::normalizer::normalize_imperial_volume;
/// use kitchen_units::units::Unit;
///
/// let graph = ConversionGraph::standard();
/// let q = normalize_imperial_volume(graph, 3072.0, &Unit::Teaspoon);
/// assert_eq!((q.amount, q.unit), (4.0, Unit::Gallon));
/// ```
pub fn normalize_imperial_volume(graph: &ConversionGraph, quantity: f64, unit: &Unit) -> Quantity {
    if unit.system() != Some(UnitSystem::Imperial) || unit.dimension() != Some(Dimension::Volume) {
        return Quantity::new(quantity, unit.clone());
    }

    let base = graph.to_base(quantity, unit);
    if !(base > 0.0) {
        return Quantity::new(quantity, unit.clone());
    }

    for candidate in IMPERIAL_VOLUME_LADDER.iter() {
        let Some(threshold) = graph.base_factor(candidate) else {
            continue;
        };
        if base >= threshold {
            trace!("{} {} normalized to {}", quantity, unit, candidate);
            return Quantity::new(round2(base / threshold), candidate.clone());
        }
    }

    // Less than one teaspoon
    Quantity::new(round2(base), Unit::Teaspoon)
}

/// Report Imperial weights of a pound or more in pounds, the rest in ounces
pub fn normalize_imperial_weight(graph: &ConversionGraph, quantity: f64, unit: &Unit) -> Quantity {
    if !matches!(unit, Unit::Ounce | Unit::Pound) {
        return Quantity::new(quantity, unit.clone());
    }

    let ounces = graph.to_base(quantity, unit);
    if !(ounces > 0.0) {
        return Quantity::new(quantity, unit.clone());
    }

    if ounces >= OUNCES_PER_POUND {
        Quantity::new(round2(ounces / OUNCES_PER_POUND), Unit::Pound)
    } else {
        Quantity::new(round2(ounces), Unit::Ounce)
    }
}

/// Normalize any Imperial quantity by dimension; other units pass through
pub fn normalize_imperial(graph: &ConversionGraph, quantity: f64, unit: &Unit) -> Quantity {
    match unit.dimension() {
        Some(Dimension::Volume) => normalize_imperial_volume(graph, quantity, unit),
        Some(Dimension::Weight) => normalize_imperial_weight(graph, quantity, unit),
        None => Quantity::new(quantity, unit.clone()),
    }
}

/// Promote `ML` and `G` amounts of a thousand or more to `L` and `KG`
///
/// Only promotes; `0.91 KG` stays in kilograms.
pub fn normalize_metric(quantity: f64, unit: &Unit) -> Quantity {
    match unit {
        Unit::Milliliter if quantity >= METRIC_PROMOTION => {
            Quantity::new(round2(quantity / METRIC_PROMOTION), Unit::Liter)
        }
        Unit::Gram if quantity >= METRIC_PROMOTION => {
            Quantity::new(round2(quantity / METRIC_PROMOTION), Unit::Kilogram)
        }
        _ => Quantity::new(quantity, unit.clone()),
    }
}
