//! Supported currency codes

use serde::{Deserialize, Serialize};
use std::fmt::Display;
use std::str::FromStr;

/// A currency supported by the converter. The set is fixed; codes outside it
/// are rejected at parse time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Currency {
    USD,
    EUR,
    CAD,
    BGN,
    INR,
}

impl Currency {
    pub fn all() -> &'static [Currency] {
        &[
            Currency::USD,
            Currency::EUR,
            Currency::CAD,
            Currency::BGN,
            Currency::INR,
        ]
    }

    pub fn code(&self) -> &'static str {
        match self {
            Currency::USD => "USD",
            Currency::EUR => "EUR",
            Currency::CAD => "CAD",
            Currency::BGN => "BGN",
            Currency::INR => "INR",
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Currency::USD => "US Dollar",
            Currency::EUR => "Euro",
            Currency::CAD => "Canadian Dollar",
            Currency::BGN => "Bulgarian Lev",
            Currency::INR => "Indian Rupee",
        }
    }
}

impl Display for Currency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

impl FromStr for Currency {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "USD" => Ok(Currency::USD),
            "EUR" => Ok(Currency::EUR),
            "CAD" => Ok(Currency::CAD),
            "BGN" => Ok(Currency::BGN),
            "INR" => Ok(Currency::INR),
            _ => {
                let supported = Currency::all()
                    .iter()
                    .map(|c| c.code())
                    .collect::<Vec<_>>()
                    .join(", ");
                Err(format!("Unsupported currency: {s}. Supported: {supported}"))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_currency_parse() {
        assert_eq!("USD".parse::<Currency>().unwrap(), Currency::USD);
        assert_eq!("bgn".parse::<Currency>().unwrap(), Currency::BGN);
        assert_eq!("Eur".parse::<Currency>().unwrap(), Currency::EUR);
    }

    #[test]
    fn test_unsupported_currency_is_rejected() {
        let result = "GBP".parse::<Currency>();
        assert!(result.is_err());
        assert!(result.unwrap_err().contains("Unsupported currency: GBP"));
    }

    #[test]
    fn test_currency_display() {
        assert_eq!(Currency::INR.to_string(), "INR");
    }

    #[test]
    fn test_all_currencies() {
        assert_eq!(Currency::all().len(), 5);
    }
}
