//! Store Config

use clap::Args;
use storefront::money::{CurrencyError, StoreCurrency};

/// Storefront settings.
#[derive(Debug, Args)]
pub struct StoreConfig {
    /// ISO 4217 code used to format amounts in customer-facing messages
    #[arg(long = "store-currency", env = "STORE_CURRENCY", default_value = "VND")]
    pub currency: String,
}

impl StoreConfig {
    /// Resolve the configured currency.
    ///
    /// # Errors
    ///
    /// Returns an error when the code is not a known currency.
    pub fn currency(&self) -> Result<StoreCurrency, CurrencyError> {
        StoreCurrency::from_code(&self.currency)
    }
}
