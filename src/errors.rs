//! # Error Types Module
//!
//! Errors raised at the edges of the conversion engine: parsing user-facing
//! names (unit systems, currencies), portion counts and configuration values.
//! The conversion core itself never fails; it passes unusable input through.

/// Errors for the fallible edges of the kitchen unit engine
#[derive(Debug, Clone, PartialEq)]
pub enum KitchenError {
    /// Unit system name was neither Imperial nor Metric
    InvalidUnitSystem(String),
    /// Currency code is not one of the supported currencies
    InvalidCurrency(String),
    /// Scale factor or portion count that cannot be applied
    InvalidScaleFactor(String),
    /// Configuration value could not be interpreted
    Config(String),
}

impl std::fmt::Display for KitchenError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            KitchenError::InvalidUnitSystem(value) => write!(f, "Invalid unit system: {value}"),
            KitchenError::InvalidCurrency(value) => write!(f, "Invalid currency: {value}"),
            KitchenError::InvalidScaleFactor(value) => write!(f, "Invalid scale factor: {value}"),
            KitchenError::Config(msg) => write!(f, "Configuration error: {msg}"),
        }
    }
}

impl std::error::Error for KitchenError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        assert_eq!(
            KitchenError::InvalidUnitSystem("Nautical".to_string()).to_string(),
            "Invalid unit system: Nautical"
        );
        assert_eq!(
            KitchenError::Config("KITCHEN_CURRENCY".to_string()).to_string(),
            "Configuration error: KITCHEN_CURRENCY"
        );
    }

    #[test]
    fn test_error_is_std_error() {
        let err: Box<dyn std::error::Error> =
            Box::new(KitchenError::InvalidScaleFactor("0".to_string()));
        assert!(err.to_string().contains("scale factor"));
    }
}
