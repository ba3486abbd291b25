#[cfg(test)]
mod tests {
    use kitchen_units::conversion_graph::ConversionGraph;
    use kitchen_units::normalizer::{normalize_imperial_volume, normalize_imperial_weight, normalize_metric};
    use kitchen_units::quantity_parser::parse_quantity;
    use kitchen_units::recipe::{IngredientRow, Recipe, RecipeRow};
    use kitchen_units::scaling::{scale_rows, scale_to_portions};
    use kitchen_units::system_conversion::{convert_row, ConversionOptions};
    use kitchen_units::temperature::convert_temps_in_text;
    use kitchen_units::units::{canonicalize, Unit, UnitSystem};

    const LADDER: [Unit; 7] = [
        Unit::Gallon,
        Unit::Quart,
        Unit::Pint,
        Unit::Cup,
        Unit::FluidOunce,
        Unit::Tablespoon,
        Unit::Teaspoon,
    ];

    fn graph() -> &'static ConversionGraph {
        ConversionGraph::standard()
    }

    fn assert_close(actual: f64, expected: f64, tolerance: f64) {
        assert!(
            (actual - expected).abs() <= tolerance + 1e-9,
            "expected {expected} ± {tolerance}, got {actual}"
        );
    }

    #[test]
    fn test_round_trip_through_metric() {
        let pairs = [
            (Unit::Teaspoon, Unit::Milliliter),
            (Unit::Ounce, Unit::Gram),
            (Unit::Pound, Unit::Kilogram),
            (Unit::Quart, Unit::Liter),
        ];
        let samples = [0.25, 0.5, 1.0, 1.5, 2.0, 3.0, 4.0, 5.0, 8.0, 10.0, 12.5, 16.0, 24.0, 100.0];

        for (imperial, metric) in pairs.iter() {
            for &value in samples.iter() {
                let there = graph().to_metric(value, imperial).unwrap();
                assert_eq!(&there.unit, metric);
                let back = graph().to_imperial(there.amount, &there.unit).unwrap();
                assert_eq!(&back.unit, imperial);
                assert_close(back.amount, value, 0.01);
            }
        }
    }

    #[test]
    fn test_round_trip_from_metric() {
        // imperial value is rounded to 2 places, so the error grows with the factor back
        let pairs = [
            (Unit::Milliliter, Unit::Teaspoon, 4.92892),
            (Unit::Gram, Unit::Ounce, 28.3495),
            (Unit::Kilogram, Unit::Pound, 0.453592),
            (Unit::Liter, Unit::Quart, 0.946353),
        ];
        let samples = [0.25, 0.5, 1.0, 1.5, 2.0, 3.0, 5.0, 10.0, 12.5, 24.0, 100.0, 250.0, 454.0, 1000.0];

        for (metric, imperial, factor) in pairs.iter() {
            let tolerance = (0.005 * factor + 0.005_f64).max(0.01);
            for &value in samples.iter() {
                let there = graph().to_imperial(value, metric).unwrap();
                assert_eq!(&there.unit, imperial);
                let back = graph().to_metric(there.amount, &there.unit).unwrap();
                assert_eq!(&back.unit, metric);
                assert_close(back.amount, value, tolerance);
            }
        }
    }

    #[test]
    fn test_pairwise_conversion_round_trip() {
        let back = graph()
            .convert(3.0, &Unit::Cup, &Unit::Milliliter)
            .and_then(|ml| graph().convert(ml, &Unit::Milliliter, &Unit::Cup))
            .unwrap();
        assert_close(back, 3.0, 0.01);
        assert_eq!(graph().convert(1.0, &Unit::Gallon, &Unit::Cup), Some(16.0));
        assert_eq!(graph().convert(1.0, &Unit::Cup, &Unit::Gram), None);
        assert_eq!(graph().convert(1.0, &Unit::Custom("CASE".into()), &Unit::Cup), None);
    }

    #[test]
    fn test_normalization_picks_largest_fitting_unit() {
        let inputs = [
            (3072.0, Unit::Teaspoon),
            (1.0, Unit::Teaspoon),
            (4.0, Unit::Teaspoon),
            (7.0, Unit::Tablespoon),
            (20.0, Unit::FluidOunce),
            (3.5, Unit::Cup),
            (5.0, Unit::Pint),
            (9.0, Unit::Quart),
            (0.5, Unit::Gallon),
            (250.0, Unit::Teaspoon),
        ];

        for (quantity, unit) in inputs.iter() {
            let base = graph().to_base(*quantity, unit);
            let result = normalize_imperial_volume(graph(), *quantity, unit);
            let threshold = graph().base_factor(&result.unit).unwrap();
            assert!(threshold <= base, "{quantity} {unit}: {} is too large", result.unit);

            let position = LADDER.iter().position(|u| u == &result.unit).unwrap();
            for larger in LADDER[..position].iter() {
                assert!(
                    graph().base_factor(larger).unwrap() > base,
                    "{quantity} {unit}: {larger} would also fit"
                );
            }
            assert_close(result.amount * threshold, base, 0.005 * threshold);
        }
    }

    #[test]
    fn test_normalization_edges() {
        let tiny = normalize_imperial_volume(graph(), 0.25, &Unit::Teaspoon);
        assert_eq!((tiny.amount, tiny.unit), (0.25, Unit::Teaspoon));

        let metric = normalize_imperial_volume(graph(), 3000.0, &Unit::Milliliter);
        assert_eq!((metric.amount, metric.unit), (3000.0, Unit::Milliliter));

        let pounds = normalize_imperial_weight(graph(), 40.0, &Unit::Ounce);
        assert_eq!((pounds.amount, pounds.unit), (2.5, Unit::Pound));

        let liters = normalize_metric(1500.0, &Unit::Milliliter);
        assert_eq!((liters.amount, liters.unit), (1.5, Unit::Liter));
    }

    #[test]
    fn test_scaling_is_linear() {
        let rows: Vec<RecipeRow> = ["2", "1 1/2", "0.33", "7", "0.125"]
            .iter()
            .enumerate()
            .map(|(i, qty)| IngredientRow::new(i as u64, qty, "CUP", "stock").into())
            .collect();

        for (f1, f2) in [(1.5, 2.0), (0.75, 3.0), (2.5, 0.4)] {
            let twice = scale_rows(&scale_rows(&rows, f1), f2);
            let once = scale_rows(&rows, f1 * f2);
            for (a, b) in twice.iter().zip(once.iter()) {
                let a = parse_quantity(&a.as_ingredient().unwrap().qty).unwrap();
                let b = parse_quantity(&b.as_ingredient().unwrap().qty).unwrap();
                assert_close(a, b, 0.005 * f2 + 0.01);
            }
        }
    }

    #[test]
    fn test_scaling_by_one_is_stable() {
        let rows: Vec<RecipeRow> = vec![
            IngredientRow::new(1, "1 1/2", "TBSP", "butter").with_cost("1.20").into(),
            IngredientRow::new(2, "a handful", "", "parsley").into(),
        ];
        let once = scale_rows(&rows, 1.0);
        assert_eq!(once[0].as_ingredient().unwrap().qty, "1.50");
        assert_eq!(scale_rows(&once, 1.0), once);
    }

    #[test]
    fn test_parser_robustness() {
        assert_eq!(parse_quantity("1 1/2"), Some(1.5));
        assert_eq!(parse_quantity("¾"), Some(0.75));
        assert_eq!(parse_quantity("2 ¼"), Some(2.25));
        assert_eq!(parse_quantity(".5"), Some(0.5));
        assert_eq!(parse_quantity(""), None);
        assert_eq!(parse_quantity("   "), None);
        assert_eq!(parse_quantity("abc"), None);
        assert_eq!(parse_quantity("1/0"), None);
    }

    #[test]
    fn test_alias_canonicalization_is_idempotent() {
        let raw = [
            "tsp", "Teaspoons", "TBSP.", "tbs", "fl. oz.", "Fluid Ounces", "cups", "C", "pt",
            "Quarts", "gal", "oz", "LB", "pounds", "ml", "Millilitres", "l", "liters", "g",
            "Grams", "KG", "kilos", "bunch", "cs", "Pinch", "each", "", "  sprigs  ", "ﬂ oz",
            "ﬂ. oz.", "ß", "ﬁsh", "Stück",
        ];
        for unit in raw.iter() {
            let once = canonicalize(unit);
            let twice = canonicalize(once.code());
            assert_eq!(twice, once, "'{unit}' is not stable");
        }
    }

    #[test]
    fn test_ligature_units_convert() {
        assert_eq!(canonicalize("ﬂ oz"), Unit::FluidOunce);
        let row = IngredientRow::new(1, "4", "ﬂ oz", "cream");
        let row = convert_row(graph(), &row, UnitSystem::Metric, &ConversionOptions::default());
        assert_eq!((row.qty.as_str(), row.unit.as_str()), ("118.29", "ML"));
    }

    #[test]
    fn test_scenario_teaspoons_collapse_to_gallons() {
        let result = normalize_imperial_volume(graph(), parse_quantity("3072").unwrap(), &canonicalize("TSP"));
        assert_eq!(result.to_string(), "4 GALLON");
    }

    #[test]
    fn test_scenario_pounds_to_kilograms() {
        let row = IngredientRow::new(1, "2", "LBS", "chuck roast");
        let row = convert_row(graph(), &row, UnitSystem::Metric, &ConversionOptions::default());
        assert_eq!(row.qty, "0.91");
        assert_eq!(row.unit, "KG");
    }

    #[test]
    fn test_scenario_scale_six_to_nine_portions() {
        let recipe = Recipe::new("Braise", 6)
            .with_row(IngredientRow::new(1, "2", "LBS", "short rib").with_cost("10.00"));
        let scaled = scale_to_portions(&recipe, 9).unwrap();
        let row = scaled.ingredients().next().unwrap();
        assert_eq!(row.qty, "3.00");
        assert_eq!(row.cost, "15.00");
    }

    #[test]
    fn test_scenario_oven_temperature() {
        assert_eq!(convert_temps_in_text("Bake at 350°F", true), "Bake at 177°C");
        assert_eq!(convert_temps_in_text("Preheat oven to 350", true), "Preheat oven to 177°C");
        assert_eq!(convert_temps_in_text("Bake at 350F", true), "Bake at 177C");
        assert_eq!(convert_temps_in_text("Bake at 350 F", true), "Bake at 177 C");
    }
}
