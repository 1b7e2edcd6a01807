//! App Context

use std::sync::Arc;

use storefront::money::StoreCurrency;
use thiserror::Error;

use crate::{
    database::{self, Db},
    domain::{
        catalog::{CatalogService, PgCatalogService},
        customers::{CustomersService, PgCustomersService},
        promotions::{PgPromotionsService, PromotionsService},
    },
};

#[derive(Debug, Error)]
pub enum AppInitError {
    #[error("failed to connect to database")]
    Database(#[source] sqlx::Error),
}

#[derive(Clone)]
pub struct AppContext {
    pub promotions: Arc<dyn PromotionsService>,
    pub catalog: Arc<dyn CatalogService>,
    pub customers: Arc<dyn CustomersService>,

    /// Currency used when formatting amounts for customers.
    pub currency: StoreCurrency,
}

impl AppContext {
    /// Build application context from a database URL.
    ///
    /// # Errors
    ///
    /// Returns an error when establishing a database connection fails.
    pub async fn from_database_url(
        url: &str,
        currency: StoreCurrency,
    ) -> Result<Self, AppInitError> {
        let pool = database::connect(url)
            .await
            .map_err(AppInitError::Database)?;

        let db = Db::new(pool);

        Ok(Self {
            promotions: Arc::new(PgPromotionsService::new(db.clone())),
            catalog: Arc::new(PgCatalogService::new(db.clone())),
            customers: Arc::new(PgCustomersService::new(db)),
            currency,
        })
    }
}
