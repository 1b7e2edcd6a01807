//! Customers service.

use async_trait::async_trait;
use mockall::automock;
use storefront::membership::{CustomerUuid, MembershipTier};
use tracing::info;

use crate::{
    database::Db,
    domain::customers::{
        errors::CustomersServiceError, data::NewCustomer, records::CustomerRecord,
        repository::PgCustomersRepository,
    },
};

#[derive(Debug, Clone)]
pub struct PgCustomersService {
    db: Db,
    repository: PgCustomersRepository,
}

impl PgCustomersService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: PgCustomersRepository::new(),
        }
    }
}

#[async_trait]
impl CustomersService for PgCustomersService {
    #[tracing::instrument(
        name = "customers.service.create_customer",
        skip(self, customer),
        fields(customer_uuid = %customer.uuid),
        err
    )]
    async fn create_customer(
        &self,
        customer: NewCustomer,
    ) -> Result<CustomerRecord, CustomersServiceError> {
        let mut tx = self.db.begin().await?;

        let created = self.repository.create_customer(&mut tx, customer).await?;

        tx.commit().await?;

        info!(customer_uuid = %created.uuid, "created customer");

        Ok(created)
    }

    #[tracing::instrument(
        name = "customers.service.get_customer",
        skip(self, customer),
        fields(customer_uuid = %customer),
        err
    )]
    async fn get_customer(
        &self,
        customer: CustomerUuid,
    ) -> Result<CustomerRecord, CustomersServiceError> {
        let mut tx = self.db.begin().await?;

        let record = self.repository.get_customer(&mut tx, customer).await?;

        tx.commit().await?;

        Ok(record)
    }

    #[tracing::instrument(
        name = "customers.service.set_membership_tier",
        skip(self, customer, tier),
        fields(customer_uuid = %customer, membership_tier = ?tier),
        err
    )]
    async fn set_membership_tier(
        &self,
        customer: CustomerUuid,
        tier: Option<MembershipTier>,
    ) -> Result<CustomerRecord, CustomersServiceError> {
        let mut tx = self.db.begin().await?;

        let updated = self
            .repository
            .update_membership_tier(&mut tx, customer, tier)
            .await?;

        tx.commit().await?;

        info!(customer_uuid = %customer, "updated membership tier");

        Ok(updated)
    }
}

#[automock]
#[async_trait]
pub trait CustomersService: Send + Sync {
    /// Creates a customer.
    async fn create_customer(
        &self,
        customer: NewCustomer,
    ) -> Result<CustomerRecord, CustomersServiceError>;

    /// Retrieve a single customer.
    async fn get_customer(
        &self,
        customer: CustomerUuid,
    ) -> Result<CustomerRecord, CustomersServiceError>;

    /// Replaces a customer's membership tier; `None` clears it.
    async fn set_membership_tier(
        &self,
        customer: CustomerUuid,
        tier: Option<MembershipTier>,
    ) -> Result<CustomerRecord, CustomersServiceError>;
}
