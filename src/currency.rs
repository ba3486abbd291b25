//! # Currency Display
//!
//! The recipe editor's "Cycle Currency" action only switches the symbol costs
//! are shown with; amounts are never converted between currencies.

use crate::errors::KitchenError;
use crate::quantity_parser::format_fixed2;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    #[default]
    Usd,
    Eur,
    Gbp,
}

impl Currency {
    pub fn symbol(self) -> &'static str {
        match self {
            Currency::Usd => "$",
            Currency::Eur => "€",
            Currency::Gbp => "£",
        }
    }

    pub fn code(self) -> &'static str {
        match self {
            Currency::Usd => "USD",
            Currency::Eur => "EUR",
            Currency::Gbp => "GBP",
        }
    }

    /// Next currency in the display cycle (USD → EUR → GBP → USD)
    pub fn next(self) -> Self {
        match self {
            Currency::Usd => Currency::Eur,
            Currency::Eur => Currency::Gbp,
            Currency::Gbp => Currency::Usd,
        }
    }
}

/// Format an amount with the currency symbol and two decimals
pub fn format_cost(amount: f64, currency: Currency) -> String {
    if amount < 0.0 {
        format!("-{}{}", currency.symbol(), format_fixed2(-amount))
    } else {
        format!("{}{}", currency.symbol(), format_fixed2(amount))
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

impl FromStr for Currency {
    type Err = KitchenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "USD" | "$" => Ok(Currency::Usd),
            "EUR" | "€" => Ok(Currency::Eur),
            "GBP" | "£" => Ok(Currency::Gbp),
            _ => Err(KitchenError::InvalidCurrency(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cycle_returns_to_start() {
        let start = Currency::Usd;
        assert_eq!(start.next(), Currency::Eur);
        assert_eq!(start.next().next(), Currency::Gbp);
        assert_eq!(start.next().next().next(), start);
    }

    #[test]
    fn test_format_cost() {
        assert_eq!(format_cost(15.0, Currency::Usd), "$15.00");
        assert_eq!(format_cost(2.5, Currency::Eur), "€2.50");
        assert_eq!(format_cost(-3.456, Currency::Gbp), "-£3.46");
    }

    #[test]
    fn test_parse_currency() {
        assert_eq!("usd".parse::<Currency>(), Ok(Currency::Usd));
        assert_eq!("€".parse::<Currency>(), Ok(Currency::Eur));
        assert!("JPY".parse::<Currency>().is_err());
    }

    #[test]
    fn test_serde_codes() {
        assert_eq!(serde_json::to_string(&Currency::Gbp).unwrap(), "\"GBP\"");
        let c: Currency = serde_json::from_str("\"EUR\"").unwrap();
        assert_eq!(c, Currency::Eur);
    }
}
