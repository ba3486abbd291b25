//! # Kitchen Units
//!
//! Quantity parsing and unit conversion for recipe costing and kitchen
//! inventory. Ingredient rows hold free-text quantities ("1 1/2", "¾") and
//! unit spellings ("Tablespoons", "fl. oz."); this crate reads them, switches
//! recipes between Imperial and Metric, scales them by portion count, and
//! converts inventory quantities through per-item unit tables.
//!
//! ```rust
//! use kitchen_units::conversion_graph::ConversionGraph;
//! use kitchen_units::recipe::{IngredientRow, Recipe};
//! use kitchen_units::system_conversion::{convert_recipe, ConversionOptions};
//! use kitchen_units::units::UnitSystem;
//!
//! let recipe = Recipe::new("Brisket", 8)
//!     .with_row(IngredientRow::new(1, "2", "LBS", "brisket"))
//!     .with_directions("Smoke at 225°F until tender.");
//! let metric = convert_recipe(
//!     ConversionGraph::standard(),
//!     &recipe,
//!     UnitSystem::Metric,
//!     &ConversionOptions::default(),
//! );
//! let row = metric.ingredients().next().unwrap();
//! assert_eq!((row.qty.as_str(), row.unit.as_str()), ("0.91", "KG"));
//! assert_eq!(metric.directions, "Smoke at 107°C until tender.");
//! ```

pub mod catalog;
pub mod config;
pub mod conversion_graph;
pub mod costing;
pub mod currency;
pub mod errors;
pub mod normalizer;
pub mod nutrition;
pub mod quantity_parser;
pub mod recipe;
pub mod scaling;
pub mod system_conversion;
pub mod telemetry;
pub mod temperature;
pub mod units;
