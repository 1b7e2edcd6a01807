//! Money Formatting
//!
//! Amounts are carried as `u64` minor units everywhere; this module only turns
//! them into locale-formatted strings for customer-facing messages.

use rusty_money::{Money, iso::{self, Currency}};
use thiserror::Error;

/// Errors raised while configuring the store currency.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CurrencyError {
    /// The code is not a known ISO 4217 currency.
    #[error("unknown currency code: {0}")]
    UnknownCode(String),
}

/// The currency a store prices its catalogue in.
#[derive(Debug, Clone, Copy)]
pub struct StoreCurrency {
    code: &'static str,
    currency: &'static Currency,
}

impl StoreCurrency {
    /// Look up a currency by its ISO 4217 alphabetic code (case-insensitive).
    ///
    /// # Errors
    ///
    /// Returns [`CurrencyError::UnknownCode`] when the code is not recognised.
    pub fn from_code(code: &str) -> Result<Self, CurrencyError> {
        let upper = code.trim().to_ascii_uppercase();

        let currency =
            iso::find(&upper).ok_or_else(|| CurrencyError::UnknownCode(code.to_string()))?;

        Ok(Self {
            code: currency.iso_alpha_code,
            currency,
        })
    }

    /// ISO 4217 alphabetic code.
    pub const fn code(&self) -> &'static str {
        self.code
    }

    /// Format an amount of minor units for display, e.g. `$50.00`.
    pub fn format(&self, amount: u64) -> String {
        match i64::try_from(amount) {
            Ok(minor) => Money::from_minor(minor, self.currency).to_string(),
            Err(_overflow) => format!("{amount} {}", self.code),
        }
    }
}

impl Default for StoreCurrency {
    fn default() -> Self {
        Self {
            code: iso::VND.iso_alpha_code,
            currency: iso::VND,
        }
    }
}
