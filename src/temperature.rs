//! # Temperature Conversion
//!
//! Rewrites oven temperatures when a recipe switches unit system, both inside
//! free-form directions and in the discrete oven-temperature field.
//!
//! In directions any 2 or 3 digit number can be a temperature: `350°F`,
//! `180 degrees C`, `350F`, `350°` and a bare `350` all count. A number with
//! no F/C letter is taken to be in the system being converted from. A bare
//! number is skipped when a word other than a connector follows it
//! (`20 minutes`, `150 g`), when it sits inside a larger number, price, time
//! or ratio, or when it opens a range whose end is not a temperature
//! (`12 to 15 minutes`). Temperatures already in the target system are left
//! as written.
//!
//! ```rust
//! use kitchen_units::temperature::convert_temps_in_text;
//!
//! assert_eq!(convert_temps_in_text("Bake at 350°F", true), "Bake at 177°C");
//! assert_eq!(convert_temps_in_text("Preheat oven to 350", true), "Preheat oven to 177°C");
//! assert_eq!(convert_temps_in_text("Roast at 200°C for 20 minutes", false), "Roast at 392°F for 20 minutes");
//! ```

use lazy_static::lazy_static;
use log::debug;
use regex::{Captures, Regex};

lazy_static! {
    static ref TEMPERATURE_REGEX: Regex = Regex::new(
        r"(?i)\b(?P<value>\d{2,3})(?:(?P<gap>\s*)(?P<degree>°|degrees?\b))?(?:(?P<unit_gap>\s*)(?P<unit>fahrenheit\b|celsius\b|[CF]\b))?"
    )
    .expect("Temperature pattern should be valid");
    static ref RANGE_CONNECTOR_REGEX: Regex =
        Regex::new(r"(?i)^\s*(?:-|–|to\b|or\b|and\b)\s*").expect("Range connector pattern should be valid");
    static ref FIELD_REGEX: Regex = Regex::new(
        r"(?i)^\s*(?P<value>-?\d+(?:\.\d+)?)\s*(?P<degree>°|degrees?)?\s*(?P<unit>fahrenheit|celsius|[CF])?\s*$"
    )
    .expect("Temperature field pattern should be valid");
}

/// Words that may follow a bare temperature ("preheat to 350 and bake")
const CONNECTOR_WORDS: [&str; 8] = ["and", "then", "until", "for", "or", "before", "to", "while"];

/// How a matched number reads in its surrounding text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Reading {
    /// Not a temperature in the system being converted from
    Plain,
    /// Carries a degree marker or an F/C unit
    Marked,
    /// A bare number standing alone
    Bare,
    /// A bare number opening a range of temperatures ("350 to 375°F")
    RangeStart,
}

/// Convert one temperature, rounded to the nearest degree
///
/// `to_metric` converts Fahrenheit to Celsius, otherwise Celsius to Fahrenheit.
pub fn convert_single_temp(value: f64, to_metric: bool) -> f64 {
    let converted = if to_metric {
        (value - 32.0) * 5.0 / 9.0
    } else {
        value * 9.0 / 5.0 + 32.0
    };
    let rounded = converted.round();
    if rounded == 0.0 {
        0.0
    } else {
        rounded
    }
}

/// Rewrite every temperature in `text`
pub fn convert_temps_in_text(text: &str, to_metric: bool) -> String {
    let (source, target_letter, target_word) = system_labels(to_metric);

    TEMPERATURE_REGEX
        .replace_all(text, |caps: &Captures| {
            let original = caps[0].to_string();
            let (start, end) = caps.get(0).map_or((0, 0), |m| (m.start(), m.end()));

            if embedded_after(&text[..start]) {
                return original;
            }
            let reading = read_match(caps, &text[end..], source);
            if reading == Reading::Plain {
                return original;
            }

            let Ok(value) = caps["value"].parse::<f64>() else {
                return original;
            };
            let converted = convert_single_temp(value, to_metric);

            let rewritten = match reading {
                Reading::RangeStart => converted.to_string(),
                Reading::Bare => format!("{}°{}", converted, target_letter),
                _ => {
                    let gap = caps.name("gap").map_or("", |m| m.as_str());
                    let degree = caps.name("degree").map_or("", |m| m.as_str());
                    let unit_gap = caps.name("unit_gap").map_or("", |m| m.as_str());
                    let unit = match caps.name("unit") {
                        Some(word) if word.as_str().len() > 1 => target_word,
                        Some(_) => target_letter,
                        None => "",
                    };
                    match (unit.is_empty(), degree.starts_with('°')) {
                        (false, _) => format!("{}{}{}{}{}", converted, gap, degree, unit_gap, unit),
                        (true, true) => format!("{}{}{}{}", converted, gap, degree, target_letter),
                        (true, false) => format!("{}{}{} {}", converted, gap, degree, target_letter),
                    }
                }
            };

            debug!("Temperature '{}' rewritten to '{}'", original, rewritten);
            rewritten
        })
        .into_owned()
}

/// Classify a temperature match given the text that follows it
fn read_match(caps: &Captures, rest: &str, source: &str) -> Reading {
    if glued_to_number(rest) {
        return Reading::Plain;
    }

    let degree = caps.name("degree");
    match caps.name("unit").map(|m| m.as_str()) {
        // a lone lowercase letter is a unit only after a degree marker ("12 c flour")
        Some(unit) if degree.is_none() && unit.len() == 1 && unit.chars().all(char::is_lowercase) => {
            Reading::Plain
        }
        Some(unit) if !unit.to_uppercase().starts_with(source) => Reading::Plain,
        Some(_) => Reading::Marked,
        None if degree.is_some() => Reading::Marked,
        None => read_bare(rest, source),
    }
}

fn read_bare(rest: &str, source: &str) -> Reading {
    if let Some(connector) = RANGE_CONNECTOR_REGEX.find(rest) {
        let tail = &rest[connector.end()..];
        let range_end = TEMPERATURE_REGEX
            .captures(tail)
            .filter(|caps| caps.get(0).is_some_and(|m| m.start() == 0));
        if let Some(caps) = range_end {
            let end = caps.get(0).map_or(0, |m| m.end());
            return match read_match(&caps, &tail[end..], source) {
                Reading::Plain => Reading::Plain,
                _ => Reading::RangeStart,
            };
        }
    }

    let word: String = rest
        .trim_start()
        .chars()
        .take_while(|c| c.is_alphabetic())
        .collect();
    if word.is_empty() || CONNECTOR_WORDS.contains(&word.to_lowercase().as_str()) {
        Reading::Bare
    } else {
        Reading::Plain
    }
}

/// The number continues past the match ("1350", "12.50", "10:30", "80%")
fn glued_to_number(rest: &str) -> bool {
    let mut chars = rest.chars();
    match chars.next() {
        Some(c) if c.is_ascii_digit() || c == '%' => true,
        Some('.' | ',' | ':' | '/') => chars.next().is_some_and(|c| c.is_ascii_digit()),
        _ => false,
    }
}

/// The match is the tail of a price, decimal, time or ratio ("$12", "1.50", "1/12")
fn embedded_after(before: &str) -> bool {
    let mut chars = before.chars().rev();
    match chars.next() {
        Some('$' | '£' | '€' | '#') => true,
        Some('.' | ',' | ':' | '/' | '-' | '–') => chars.next().is_some_and(|c| c.is_ascii_digit()),
        _ => false,
    }
}

/// Convert a discrete temperature field such as `"350"` or `"350°F"`
///
/// A plain number is taken to be in the system being converted from. Fields
/// that do not hold a temperature, or already hold one in the target system,
/// come back unchanged.
pub fn convert_temp_field(raw: &str, to_metric: bool) -> String {
    let (source, target_letter, _) = system_labels(to_metric);

    let Some(caps) = FIELD_REGEX.captures(raw) else {
        return raw.to_string();
    };

    let stated = caps.name("unit").map(|m| m.as_str().to_uppercase());
    if let Some(stated) = &stated {
        if !stated.starts_with(source) {
            return raw.to_string();
        }
    }

    let Ok(value) = caps["value"].parse::<f64>() else {
        return raw.to_string();
    };
    let converted = convert_single_temp(value, to_metric);

    if stated.is_some() || caps.name("degree").is_some() {
        format!("{}°{}", converted, target_letter)
    } else {
        format!("{}", converted)
    }
}

fn system_labels(to_metric: bool) -> (&'static str, &'static str, &'static str) {
    if to_metric {
        ("F", "C", "Celsius")
    } else {
        ("C", "F", "Fahrenheit")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_temperatures() {
        assert_eq!(convert_single_temp(350.0, true), 177.0);
        assert_eq!(convert_single_temp(212.0, true), 100.0);
        assert_eq!(convert_single_temp(32.0, true), 0.0);
        assert_eq!(convert_single_temp(180.0, false), 356.0);
        assert_eq!(convert_single_temp(-18.0, false), 0.0);
    }

    #[test]
    fn test_text_to_metric() {
        assert_eq!(convert_temps_in_text("Bake at 350°F", true), "Bake at 177°C");
        assert_eq!(
            convert_temps_in_text("Heat oil to 180 degrees F.", true),
            "Heat oil to 82 degrees C."
        );
        assert_eq!(
            convert_temps_in_text("Preheat to 425 °F, then drop to 375°F", true),
            "Preheat to 218 °C, then drop to 191°C"
        );
        assert_eq!(
            convert_temps_in_text("Cook to 165 degrees Fahrenheit", true),
            "Cook to 74 degrees Celsius"
        );
    }

    #[test]
    fn test_bare_degrees_assume_source_system() {
        assert_eq!(convert_temps_in_text("Bake at 350°", true), "Bake at 177°C");
        assert_eq!(convert_temps_in_text("Bake at 180 degrees", false), "Bake at 356 degrees F");
    }

    #[test]
    fn test_bare_numbers_assume_source_system() {
        assert_eq!(convert_temps_in_text("Preheat oven to 350", true), "Preheat oven to 177°C");
        assert_eq!(
            convert_temps_in_text("Preheat to 350 and bake 25 minutes.", true),
            "Preheat to 177°C and bake 25 minutes."
        );
        assert_eq!(convert_temps_in_text("Heat the oven to 200.", false), "Heat the oven to 392°F.");
    }

    #[test]
    fn test_letter_without_degree_marker() {
        assert_eq!(convert_temps_in_text("Bake at 350F", true), "Bake at 177C");
        assert_eq!(convert_temps_in_text("Bake at 350 F", true), "Bake at 177 C");
        assert_eq!(convert_temps_in_text("Roast at 220 Celsius", false), "Roast at 428 Fahrenheit");
        // lowercase c after a number is cups
        assert_eq!(convert_temps_in_text("Add 12 c flour", true), "Add 12 c flour");
    }

    #[test]
    fn test_temperature_ranges() {
        assert_eq!(convert_temps_in_text("Bake at 350 to 375°F", true), "Bake at 177 to 191°C");
        assert_eq!(convert_temps_in_text("Bake 12 to 15 minutes", true), "Bake 12 to 15 minutes");
        assert_eq!(convert_temps_in_text("Bake 12-15 minutes", true), "Bake 12-15 minutes");
    }

    #[test]
    fn test_prices_times_and_ratios_untouched() {
        let text = "Costs $12.50, rest until 10:30, about 80% hydration, a 1/12 share";
        assert_eq!(convert_temps_in_text(text, true), text);
    }

    #[test]
    fn test_target_system_left_alone() {
        assert_eq!(convert_temps_in_text("Bake at 180°C", true), "Bake at 180°C");
        assert_eq!(convert_temps_in_text("Bake at 350°F", false), "Bake at 350°F");
    }

    #[test]
    fn test_plain_numbers_untouched() {
        let text = "Simmer 20 minutes, then add 150 g sugar";
        assert_eq!(convert_temps_in_text(text, true), text);
        assert_eq!(convert_temps_in_text("Bake at 1350°F", true), "Bake at 1350°F");
    }

    #[test]
    fn test_temperature_fields() {
        assert_eq!(convert_temp_field("350", true), "177");
        assert_eq!(convert_temp_field("350°F", true), "177°C");
        assert_eq!(convert_temp_field(" 180 C ", false), "356°F");
        assert_eq!(convert_temp_field("180°C", true), "180°C");
        assert_eq!(convert_temp_field("hot", true), "hot");
        assert_eq!(convert_temp_field("", true), "");
    }
}
