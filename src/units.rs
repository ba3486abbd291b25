//! # Units and Unit Aliases
//!
//! The fixed vocabulary of recipe units, the measurement systems and
//! dimensions they belong to, and the alias table that folds spelling and case
//! variants (`"tbsp"`, `"Tablespoon"`, `"TBSP."`) into one unit.
//!
//! Units outside the vocabulary are kept as [`Unit::Custom`] so rows using
//! them pass through every conversion untouched.
//!
//! ```rust
//! use kitchen_units::units::{canonicalize, Unit};
//!
//! assert_eq!(canonicalize("Tablespoons"), Unit::Tablespoon);
//! assert_eq!(canonicalize("fl. oz."), Unit::FluidOunce);
//! assert_eq!(canonicalize("bunch"), Unit::Custom("BUNCH".to_string()));
//! ```

use crate::errors::KitchenError;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

/// Recipe units, identified by their row codes
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", from = "String")]
pub enum Unit {
    // Imperial volume
    Teaspoon,
    Tablespoon,
    FluidOunce,
    Cup,
    Pint,
    Quart,
    Gallon,
    // Imperial weight
    Ounce,
    Pound,
    // Metric volume
    Milliliter,
    Liter,
    // Metric weight
    Gram,
    Kilogram,
    /// Unit outside the vocabulary, stored uppercased
    Custom(String),
}

/// Measurement system a unit belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum UnitSystem {
    #[default]
    Imperial,
    Metric,
}

/// Physical dimension of a unit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Dimension {
    Volume,
    Weight,
}

/// A magnitude paired with its unit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Quantity {
    pub amount: f64,
    pub unit: Unit,
}

impl Quantity {
    pub fn new(amount: f64, unit: Unit) -> Self {
        Self { amount, unit }
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {}",
            crate::quantity_parser::format_quantity(self.amount),
            self.unit.code()
        )
    }
}

static UNIT_ALIASES: LazyLock<HashMap<&'static str, Unit>> = LazyLock::new(|| {
    let mut map = HashMap::new();

    // Imperial volume
    map.insert("tsp", Unit::Teaspoon);
    map.insert("tsps", Unit::Teaspoon);
    map.insert("teaspoon", Unit::Teaspoon);
    map.insert("teaspoons", Unit::Teaspoon);
    map.insert("tbsp", Unit::Tablespoon);
    map.insert("tbsps", Unit::Tablespoon);
    map.insert("tbs", Unit::Tablespoon);
    map.insert("tbl", Unit::Tablespoon);
    map.insert("tablespoon", Unit::Tablespoon);
    map.insert("tablespoons", Unit::Tablespoon);
    map.insert("fl oz", Unit::FluidOunce);
    map.insert("floz", Unit::FluidOunce);
    map.insert("fl ounce", Unit::FluidOunce);
    map.insert("fluid ounce", Unit::FluidOunce);
    map.insert("fluid ounces", Unit::FluidOunce);
    map.insert("cup", Unit::Cup);
    map.insert("cups", Unit::Cup);
    map.insert("c", Unit::Cup);
    map.insert("pint", Unit::Pint);
    map.insert("pints", Unit::Pint);
    map.insert("pt", Unit::Pint);
    map.insert("quart", Unit::Quart);
    map.insert("quarts", Unit::Quart);
    map.insert("qt", Unit::Quart);
    map.insert("qts", Unit::Quart);
    map.insert("gallon", Unit::Gallon);
    map.insert("gallons", Unit::Gallon);
    map.insert("gal", Unit::Gallon);

    // Imperial weight
    map.insert("oz", Unit::Ounce);
    map.insert("ounce", Unit::Ounce);
    map.insert("ounces", Unit::Ounce);
    map.insert("lb", Unit::Pound);
    map.insert("lbs", Unit::Pound);
    map.insert("pound", Unit::Pound);
    map.insert("pounds", Unit::Pound);

    // Metric volume
    map.insert("ml", Unit::Milliliter);
    map.insert("milliliter", Unit::Milliliter);
    map.insert("milliliters", Unit::Milliliter);
    map.insert("millilitre", Unit::Milliliter);
    map.insert("millilitres", Unit::Milliliter);
    map.insert("l", Unit::Liter);
    map.insert("lt", Unit::Liter);
    map.insert("liter", Unit::Liter);
    map.insert("liters", Unit::Liter);
    map.insert("litre", Unit::Liter);
    map.insert("litres", Unit::Liter);

    // Metric weight
    map.insert("g", Unit::Gram);
    map.insert("gr", Unit::Gram);
    map.insert("gram", Unit::Gram);
    map.insert("grams", Unit::Gram);
    map.insert("gramme", Unit::Gram);
    map.insert("grammes", Unit::Gram);
    map.insert("kg", Unit::Kilogram);
    map.insert("kgs", Unit::Kilogram);
    map.insert("kilo", Unit::Kilogram);
    map.insert("kilogram", Unit::Kilogram);
    map.insert("kilograms", Unit::Kilogram);

    map
});

/// Fold a raw unit string into a [`Unit`]
///
/// Matching is case-insensitive (ligatures such as `ﬂ` fold to their
/// letters), ignores periods and collapses inner
/// whitespace. A trailing plural `s` is dropped when the remaining word is at
/// least two letters long, so `"cs"` (a case) is never read as cups.
/// Unknown input comes back as [`Unit::Custom`] holding the trimmed,
/// uppercased original.
pub fn canonicalize(raw: &str) -> Unit {
    // through uppercase first so a Custom code folds to the same key
    let key = raw
        .to_uppercase()
        .to_lowercase()
        .replace('.', "")
        .split_whitespace()
        .collect::<Vec<&str>>()
        .join(" ");

    if let Some(unit) = UNIT_ALIASES.get(key.as_str()) {
        return unit.clone();
    }

    if key.len() > 2 {
        if let Some(singular) = key.strip_suffix('s') {
            if let Some(unit) = UNIT_ALIASES.get(singular) {
                return unit.clone();
            }
        }
    }

    Unit::Custom(raw.trim().to_uppercase())
}

impl Unit {
    /// Row code written back into ingredient rows
    pub fn code(&self) -> &str {
        match self {
            Unit::Teaspoon => "TSP",
            Unit::Tablespoon => "TBSP",
            Unit::FluidOunce => "FL OZ",
            Unit::Cup => "CUP",
            Unit::Pint => "PINT",
            Unit::Quart => "QTS",
            Unit::Gallon => "GALLON",
            Unit::Ounce => "OZ",
            Unit::Pound => "LBS",
            Unit::Milliliter => "ML",
            Unit::Liter => "L",
            Unit::Gram => "G",
            Unit::Kilogram => "KG",
            Unit::Custom(code) => code,
        }
    }

    pub fn system(&self) -> Option<UnitSystem> {
        match self {
            Unit::Teaspoon
            | Unit::Tablespoon
            | Unit::FluidOunce
            | Unit::Cup
            | Unit::Pint
            | Unit::Quart
            | Unit::Gallon
            | Unit::Ounce
            | Unit::Pound => Some(UnitSystem::Imperial),
            Unit::Milliliter | Unit::Liter | Unit::Gram | Unit::Kilogram => {
                Some(UnitSystem::Metric)
            }
            Unit::Custom(_) => None,
        }
    }

    pub fn dimension(&self) -> Option<Dimension> {
        match self {
            Unit::Teaspoon
            | Unit::Tablespoon
            | Unit::FluidOunce
            | Unit::Cup
            | Unit::Pint
            | Unit::Quart
            | Unit::Gallon
            | Unit::Milliliter
            | Unit::Liter => Some(Dimension::Volume),
            Unit::Ounce | Unit::Pound | Unit::Gram | Unit::Kilogram => Some(Dimension::Weight),
            Unit::Custom(_) => None,
        }
    }

    /// Free-form unit outside the conversion tables
    pub fn is_custom(&self) -> bool {
        matches!(self, Unit::Custom(_))
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

impl From<String> for Unit {
    fn from(raw: String) -> Self {
        canonicalize(&raw)
    }
}

impl From<Unit> for String {
    fn from(unit: Unit) -> Self {
        unit.code().to_string()
    }
}

impl UnitSystem {
    pub fn other(self) -> Self {
        match self {
            UnitSystem::Imperial => UnitSystem::Metric,
            UnitSystem::Metric => UnitSystem::Imperial,
        }
    }
}

impl fmt::Display for UnitSystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UnitSystem::Imperial => write!(f, "Imperial"),
            UnitSystem::Metric => write!(f, "Metric"),
        }
    }
}

impl FromStr for UnitSystem {
    type Err = KitchenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "imperial" | "us" => Ok(UnitSystem::Imperial),
            "metric" | "si" => Ok(UnitSystem::Metric),
            _ => Err(KitchenError::InvalidUnitSystem(s.to_string())),
        }
    }
}
