//! # Nutrition Facts
//!
//! Whole-recipe nutrition totals, scaled together with the recipe and divided
//! into per-serving values for the nutrition label.

use serde::{Deserialize, Serialize};

/// Nutrient amounts for a whole recipe or a single serving
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct NutritionFacts {
    pub calories: f64,
    pub total_fat_g: f64,
    pub saturated_fat_g: f64,
    pub sodium_mg: f64,
    pub total_carbs_g: f64,
    pub sugars_g: f64,
    pub protein_g: f64,
}

impl NutritionFacts {
    /// Multiply every nutrient by `factor`
    pub fn scaled(&self, factor: f64) -> Self {
        self.map(|value| value * factor)
    }

    /// Per-serving amounts; a portion count of zero is treated as one
    pub fn per_serving(&self, portions: u32) -> Self {
        let portions = portions.max(1) as f64;
        self.map(|value| value / portions)
    }

    /// Round each nutrient to the increments printed on a label
    ///
    /// # Examples
    ///
    /// ```rust
    /// use kitchen_units::nutrition::NutritionFacts;
    ///
    /// let facts = NutritionFacts { calories: 247.0, total_fat_g: 3.3, ..Default::default() };
    /// let label = facts.label_rounded();
    /// assert_eq!(label.calories, 250.0);
    /// assert_eq!(label.total_fat_g, 3.5);
    /// ```
    pub fn label_rounded(&self) -> Self {
        Self {
            calories: round_calories(self.calories),
            total_fat_g: round_fat(self.total_fat_g),
            saturated_fat_g: round_fat(self.saturated_fat_g),
            sodium_mg: round_sodium(self.sodium_mg),
            total_carbs_g: round_grams(self.total_carbs_g),
            sugars_g: round_grams(self.sugars_g),
            protein_g: round_grams(self.protein_g),
        }
    }

    fn map(&self, f: impl Fn(f64) -> f64) -> Self {
        Self {
            calories: f(self.calories),
            total_fat_g: f(self.total_fat_g),
            saturated_fat_g: f(self.saturated_fat_g),
            sodium_mg: f(self.sodium_mg),
            total_carbs_g: f(self.total_carbs_g),
            sugars_g: f(self.sugars_g),
            protein_g: f(self.protein_g),
        }
    }
}

fn round_to(value: f64, step: f64) -> f64 {
    (value / step).round() * step
}

fn round_calories(value: f64) -> f64 {
    if value < 5.0 {
        0.0
    } else if value <= 50.0 {
        round_to(value, 5.0)
    } else {
        round_to(value, 10.0)
    }
}

fn round_fat(value: f64) -> f64 {
    if value < 0.5 {
        0.0
    } else if value < 5.0 {
        round_to(value, 0.5)
    } else {
        value.round()
    }
}

fn round_sodium(value: f64) -> f64 {
    if value < 5.0 {
        0.0
    } else if value <= 140.0 {
        round_to(value, 5.0)
    } else {
        round_to(value, 10.0)
    }
}

fn round_grams(value: f64) -> f64 {
    if value < 0.5 {
        0.0
    } else {
        value.round()
    }
}
