//! # Quantity Parser
//!
//! Turns the free-form quantity strings typed into recipe and order rows into
//! numbers, and formats numbers back into row strings.
//!
//! ## Accepted formats
//!
//! - Integers and decimals: `"2"`, `"2.5"`, `".5"`
//! - Fractions: `"1/2"`, `"3⁄4"`
//! - Mixed numbers: `"1 1/2"`, `"1½"`
//! - Vulgar fraction glyphs: `¼ ½ ¾ ⅓ ⅔ ⅛ ⅜ ⅝ ⅞`
//!
//! Anything else is "no value" (`None`), never zero and never NaN.
//!
//! ## Usage
//!
//! ```rust
//! use kitchen_units::quantity_parser::{parse_quantity, format_quantity};
//!
//! assert_eq!(parse_quantity("1 1/2"), Some(1.5));
//! assert_eq!(parse_quantity("¾"), Some(0.75));
//! assert_eq!(parse_quantity("abc"), None);
//! assert_eq!(format_quantity(4.0), "4");
//! ```

use lazy_static::lazy_static;
use log::trace;
use regex::Regex;

/// Vulgar fraction glyphs and their ASCII fraction text
const VULGAR_FRACTIONS: [(char, &str); 9] = [
    ('¼', "1/4"),
    ('½', "1/2"),
    ('¾', "3/4"),
    ('⅓', "1/3"),
    ('⅔', "2/3"),
    ('⅛', "1/8"),
    ('⅜', "3/8"),
    ('⅝', "5/8"),
    ('⅞', "7/8"),
];

/// Currency symbols stripped from cost strings
const CURRENCY_SYMBOLS: [char; 4] = ['$', '€', '£', '¥'];

lazy_static! {
    // Each pattern only needs to match a leading token; trailing words after
    // whitespace ("2 cups") are ignored.
    static ref MIXED_REGEX: Regex = Regex::new(r"^(-)?(\d+)\s+(\d+)/(\d+)(?:\s|$)")
        .expect("Mixed number pattern should be valid");
    static ref FRACTION_REGEX: Regex = Regex::new(r"^(-)?(\d+)/(\d+)(?:\s|$)")
        .expect("Fraction pattern should be valid");
    static ref DECIMAL_REGEX: Regex = Regex::new(r"^([-+]?(?:\d+(?:\.\d*)?|\.\d+))(?:\s|$)")
        .expect("Decimal pattern should be valid");
    static ref COST_REGEX: Regex = Regex::new(r"^[-+]?(?:\d+(?:\.\d*)?|\.\d+)$")
        .expect("Cost pattern should be valid");
}

/// Parse a quantity string into a finite number
///
/// Returns `None` for empty, whitespace-only, non-numeric or malformed input
/// (including a zero denominator).
///
/// # Examples
///
/// ```rust
/// use kitchen_units::quantity_parser::parse_quantity;
///
/// assert_eq!(parse_quantity("2.5"), Some(2.5));
/// assert_eq!(parse_quantity("1/2"), Some(0.5));
/// assert_eq!(parse_quantity("1½ cups"), Some(1.5));
/// assert_eq!(parse_quantity(""), None);
/// ```
pub fn parse_quantity(raw: &str) -> Option<f64> {
    let text = expand_vulgar_fractions(raw);
    if text.is_empty() {
        return None;
    }

    let value = if let Some(captures) = MIXED_REGEX.captures(&text) {
        let whole: f64 = captures[2].parse().ok()?;
        let fraction = ratio(&captures[3], &captures[4])?;
        signed(captures.get(1).is_some(), whole + fraction)
    } else if let Some(captures) = FRACTION_REGEX.captures(&text) {
        let fraction = ratio(&captures[2], &captures[3])?;
        signed(captures.get(1).is_some(), fraction)
    } else if let Some(captures) = DECIMAL_REGEX.captures(&text) {
        captures[1].parse::<f64>().ok()?
    } else {
        trace!("No numeric value in quantity '{}'", raw);
        return None;
    };

    value.is_finite().then_some(value)
}

/// Parse a monetary string, ignoring currency symbols and thousands separators
///
/// # Examples
///
/// ```rust
/// use kitchen_units::quantity_parser::parse_cost_value;
///
/// assert_eq!(parse_cost_value("$1,234.50"), Some(1234.5));
/// assert_eq!(parse_cost_value("€ 10"), Some(10.0));
/// assert_eq!(parse_cost_value("n/a"), None);
/// ```
pub fn parse_cost_value(raw: &str) -> Option<f64> {
    let cleaned: String = raw
        .chars()
        .filter(|c| !CURRENCY_SYMBOLS.contains(c) && *c != ',' && !c.is_whitespace())
        .collect();

    if !COST_REGEX.is_match(&cleaned) {
        return None;
    }

    cleaned.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Round to two decimal places, folding negative zero into zero
pub fn round2(value: f64) -> f64 {
    let rounded = (value * 100.0).round() / 100.0;
    if rounded == 0.0 {
        0.0
    } else {
        rounded
    }
}

/// Format a converted quantity for a row: two decimals at most, no trailing zeros
pub fn format_quantity(value: f64) -> String {
    format!("{}", round2(value))
}

/// Format a scaled quantity or cost with exactly two decimals
pub fn format_fixed2(value: f64) -> String {
    format!("{:.2}", round2(value))
}

fn expand_vulgar_fractions(raw: &str) -> String {
    let mut expanded = String::with_capacity(raw.len() + 8);
    for c in raw.chars() {
        match VULGAR_FRACTIONS.iter().find(|(glyph, _)| *glyph == c) {
            Some((_, ascii)) => {
                expanded.push(' ');
                expanded.push_str(ascii);
                expanded.push(' ');
            }
            None if c == '⁄' => expanded.push('/'),
            None => expanded.push(c),
        }
    }
    expanded.split_whitespace().collect::<Vec<&str>>().join(" ")
}

fn ratio(numerator: &str, denominator: &str) -> Option<f64> {
    let numerator: f64 = numerator.parse().ok()?;
    let denominator: f64 = denominator.parse().ok()?;
    if denominator == 0.0 {
        return None;
    }
    Some(numerator / denominator)
}

fn signed(negative: bool, value: f64) -> f64 {
    if negative {
        -value
    } else {
        value
    }
}
