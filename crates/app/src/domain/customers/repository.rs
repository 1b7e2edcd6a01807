//! Customers Repository

use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query_as};
use storefront::{
    membership::{CustomerUuid, MembershipTier},
    promotions::evaluation::Requester,
};

use crate::domain::customers::{data::NewCustomer, records::CustomerRecord};

const COLUMN_MEMBERSHIP_TIER: &str = "membership_tier";

const CREATE_CUSTOMER_SQL: &str = include_str!("sql/create_customer.sql");
const GET_CUSTOMER_SQL: &str = include_str!("sql/get_customer.sql");
const UPDATE_MEMBERSHIP_TIER_SQL: &str = include_str!("sql/update_membership_tier.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgCustomersRepository;

impl PgCustomersRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn create_customer(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        customer: NewCustomer,
    ) -> Result<CustomerRecord, sqlx::Error> {
        query_as::<Postgres, CustomerRecord>(CREATE_CUSTOMER_SQL)
            .bind(customer.uuid.into_uuid())
            .bind(customer.membership_tier.map(|tier| tier.as_str()))
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn get_customer(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        customer: CustomerUuid,
    ) -> Result<CustomerRecord, sqlx::Error> {
        query_as::<Postgres, CustomerRecord>(GET_CUSTOMER_SQL)
            .bind(customer.into_uuid())
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn find_customer(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        customer: CustomerUuid,
    ) -> Result<Option<CustomerRecord>, sqlx::Error> {
        query_as::<Postgres, CustomerRecord>(GET_CUSTOMER_SQL)
            .bind(customer.into_uuid())
            .fetch_optional(&mut **tx)
            .await
    }

    pub(crate) async fn update_membership_tier(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        customer: CustomerUuid,
        tier: Option<MembershipTier>,
    ) -> Result<CustomerRecord, sqlx::Error> {
        query_as::<Postgres, CustomerRecord>(UPDATE_MEMBERSHIP_TIER_SQL)
            .bind(customer.into_uuid())
            .bind(tier.map(|tier| tier.as_str()))
            .fetch_one(&mut **tx)
            .await
    }

    /// Describe who is placing an order.
    ///
    /// A customer ID that matches no stored customer yields a signed-in
    /// requester without a tier.
    pub(crate) async fn requester(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        customer: Option<CustomerUuid>,
    ) -> Result<Requester, sqlx::Error> {
        let Some(customer) = customer else {
            return Ok(Requester::Anonymous);
        };

        let tier = self
            .find_customer(tx, customer)
            .await?
            .and_then(|record| record.membership_tier);

        Ok(Requester::Customer { tier })
    }
}

impl<'r> FromRow<'r, PgRow> for CustomerRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        let membership_tier = row
            .try_get::<Option<String>, _>(COLUMN_MEMBERSHIP_TIER)?
            .map(|tier| tier.parse::<MembershipTier>())
            .transpose()
            .map_err(|e| sqlx::Error::ColumnDecode {
                index: COLUMN_MEMBERSHIP_TIER.to_string(),
                source: Box::new(e),
            })?;

        Ok(Self {
            uuid: CustomerUuid::from_uuid(row.try_get("uuid")?),
            membership_tier,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            updated_at: row.try_get::<SqlxTimestamp, _>("updated_at")?.to_jiff(),
            deleted_at: row
                .try_get::<Option<SqlxTimestamp>, _>("deleted_at")?
                .map(SqlxTimestamp::to_jiff),
        })
    }
}
