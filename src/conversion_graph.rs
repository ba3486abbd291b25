//! # Unit Conversion Graph
//!
//! Fixed conversion factors for the global recipe vocabulary. Each
//! (system, dimension) pair has its own base unit:
//!
//! | System   | Volume base | Weight base |
//! |----------|-------------|-------------|
//! | Imperial | teaspoon    | ounce       |
//! | Metric   | milliliter  | gram        |
//!
//! System toggles use a per-unit pair table (`CUP → ML ×236.588`,
//! `LBS → KG ×0.453592`, ...) and its algebraic inverse for the way back.
//! Arbitrary pairs route through the bases and the TSP↔ML / OZ↔G bridges.
//! Results are rounded to two decimals only at the end of a conversion.
//!
//! ```rust
//! use kitchen_units::conversion_graph::ConversionGraph;
//! use kitchen_units::units::Unit;
//!
//! let graph = ConversionGraph::standard();
//! assert_eq!(graph.convert(2.0, &Unit::Cup, &Unit::Tablespoon), Some(32.0));
//! let metric = graph.to_metric(2.0, &Unit::Pound).unwrap();
//! assert_eq!((metric.amount, metric.unit), (0.91, Unit::Kilogram));
//! ```

use crate::quantity_parser::round2;
use crate::units::{Dimension, Quantity, Unit, UnitSystem};
use log::{debug, trace};
use std::collections::HashMap;
use std::sync::LazyLock;

/// Milliliters in one US teaspoon
pub const ML_PER_TSP: f64 = 4.92892;
/// Grams in one avoirdupois ounce
pub const G_PER_OZ: f64 = 28.3495;

static STANDARD_GRAPH: LazyLock<ConversionGraph> = LazyLock::new(ConversionGraph::new);

/// Imperial unit, metric target, multiplier
const METRIC_PAIRS: [(Unit, Unit, f64); 9] = [
    (Unit::Teaspoon, Unit::Milliliter, 4.92892),
    (Unit::Tablespoon, Unit::Milliliter, 14.7868),
    (Unit::FluidOunce, Unit::Milliliter, 29.5735),
    (Unit::Cup, Unit::Milliliter, 236.588),
    (Unit::Pint, Unit::Milliliter, 473.176),
    (Unit::Quart, Unit::Liter, 0.946353),
    (Unit::Gallon, Unit::Liter, 3.78541),
    (Unit::Ounce, Unit::Gram, 28.3495),
    (Unit::Pound, Unit::Kilogram, 0.453592),
];

/// Metric units that map back to Imperial, with the Imperial unit they invert
const IMPERIAL_RETURNS: [(Unit, Unit); 4] = [
    (Unit::Gram, Unit::Ounce),
    (Unit::Kilogram, Unit::Pound),
    (Unit::Liter, Unit::Quart),
    (Unit::Milliliter, Unit::Teaspoon),
];

/// Immutable conversion tables, built once and shared by reference
#[derive(Debug, Clone)]
pub struct ConversionGraph {
    base_factors: HashMap<Unit, f64>,
    metric_pairs: HashMap<Unit, (Unit, f64)>,
    imperial_pairs: HashMap<Unit, (Unit, f64)>,
}

impl ConversionGraph {
    /// Build the standard kitchen conversion tables
    pub fn new() -> Self {
        let base_factors = HashMap::from([
            (Unit::Teaspoon, 1.0),
            (Unit::Tablespoon, 3.0),
            (Unit::FluidOunce, 6.0),
            (Unit::Cup, 48.0),
            (Unit::Pint, 96.0),
            (Unit::Quart, 192.0),
            (Unit::Gallon, 768.0),
            (Unit::Ounce, 1.0),
            (Unit::Pound, 16.0),
            (Unit::Milliliter, 1.0),
            (Unit::Liter, 1000.0),
            (Unit::Gram, 1.0),
            (Unit::Kilogram, 1000.0),
        ]);

        let metric_pairs: HashMap<Unit, (Unit, f64)> = METRIC_PAIRS
            .iter()
            .map(|(from, to, factor)| (from.clone(), (to.clone(), *factor)))
            .collect();

        let imperial_pairs = IMPERIAL_RETURNS
            .iter()
            .filter_map(|(metric, imperial)| {
                let (_, forward) = metric_pairs.get(imperial)?;
                Some((metric.clone(), (imperial.clone(), 1.0 / forward)))
            })
            .collect();

        Self {
            base_factors,
            metric_pairs,
            imperial_pairs,
        }
    }

    /// Shared instance of the standard tables
    pub fn standard() -> &'static ConversionGraph {
        &STANDARD_GRAPH
    }

    /// Multiplier from `unit` into the base unit of its system and dimension
    pub fn base_factor(&self, unit: &Unit) -> Option<f64> {
        self.base_factors.get(unit).copied()
    }

    /// Express `quantity` in the base unit; unknown units pass through unchanged
    pub fn to_base(&self, quantity: f64, unit: &Unit) -> f64 {
        match self.base_factor(unit) {
            Some(factor) => quantity * factor,
            None => quantity,
        }
    }

    /// Express a base-unit quantity in `unit`; unknown units pass through unchanged
    pub fn from_base(&self, base_quantity: f64, unit: &Unit) -> f64 {
        match self.base_factor(unit) {
            Some(factor) => base_quantity / factor,
            None => base_quantity,
        }
    }

    /// Convert between any two units of the same dimension
    ///
    /// Returns `None` when either unit is unknown or the dimensions differ,
    /// leaving the caller to keep the original value.
    pub fn convert(&self, quantity: f64, from: &Unit, to: &Unit) -> Option<f64> {
        if from == to {
            return Some(round2(quantity));
        }

        let dimension = match (from.dimension(), to.dimension()) {
            (Some(a), Some(b)) if a == b => a,
            _ => {
                debug!("No conversion path from {} to {}", from, to);
                return None;
            }
        };

        if let Some((target, factor)) = self.pair_for(from) {
            if target == to {
                return Some(round2(quantity * factor));
            }
        }

        let mut base = quantity * self.base_factor(from)?;
        let to_factor = self.base_factor(to)?;

        match (from.system(), to.system()) {
            (Some(UnitSystem::Imperial), Some(UnitSystem::Metric)) => {
                base *= Self::bridge(dimension)
            }
            (Some(UnitSystem::Metric), Some(UnitSystem::Imperial)) => {
                base /= Self::bridge(dimension)
            }
            _ => {}
        }

        let converted = base / to_factor;
        trace!("{} {} -> {} {}", quantity, from, converted, to);
        Some(round2(converted))
    }

    /// Cross an Imperial quantity into its Metric counterpart unit
    pub fn to_metric(&self, quantity: f64, unit: &Unit) -> Option<Quantity> {
        let (target, factor) = self.metric_pairs.get(unit)?;
        Some(Quantity::new(round2(quantity * factor), target.clone()))
    }

    /// Cross a Metric quantity back into its Imperial counterpart unit
    pub fn to_imperial(&self, quantity: f64, unit: &Unit) -> Option<Quantity> {
        let (target, factor) = self.imperial_pairs.get(unit)?;
        Some(Quantity::new(round2(quantity * factor), target.clone()))
    }

    fn pair_for(&self, unit: &Unit) -> Option<&(Unit, f64)> {
        self.metric_pairs
            .get(unit)
            .or_else(|| self.imperial_pairs.get(unit))
    }

    fn bridge(dimension: Dimension) -> f64 {
        match dimension {
            Dimension::Volume => ML_PER_TSP,
            Dimension::Weight => G_PER_OZ,
        }
    }
}

impl Default for ConversionGraph {
    fn default() -> Self {
        Self::new()
    }
}
