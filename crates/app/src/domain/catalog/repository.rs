//! Catalog Repository

use jiff_sqlx::Timestamp as SqlxTimestamp;
use smallvec::SmallVec;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query_as, query_scalar};
use storefront::products::{ItemRef, ProductSet, ProductUuid, VariantUuid};
use uuid::Uuid;

use crate::domain::catalog::{
    data::{NewProduct, NewVariant},
    records::{ProductRecord, VariantRecord},
};

const CREATE_PRODUCT_SQL: &str = include_str!("sql/create_product.sql");
const GET_PRODUCT_SQL: &str = include_str!("sql/get_product.sql");
const CREATE_VARIANT_SQL: &str = include_str!("sql/create_variant.sql");
const RESOLVE_VARIANT_PRODUCTS_SQL: &str = include_str!("sql/resolve_variant_products.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgCatalogRepository;

impl PgCatalogRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn create_product(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        product: NewProduct,
    ) -> Result<ProductRecord, sqlx::Error> {
        query_as::<Postgres, ProductRecord>(CREATE_PRODUCT_SQL)
            .bind(product.uuid.into_uuid())
            .bind(product.name)
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn get_product(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        product: ProductUuid,
    ) -> Result<ProductRecord, sqlx::Error> {
        query_as::<Postgres, ProductRecord>(GET_PRODUCT_SQL)
            .bind(product.into_uuid())
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn create_variant(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        variant: NewVariant,
    ) -> Result<VariantRecord, sqlx::Error> {
        query_as::<Postgres, VariantRecord>(CREATE_VARIANT_SQL)
            .bind(variant.uuid.into_uuid())
            .bind(variant.product.into_uuid())
            .bind(variant.sku)
            .fetch_one(&mut **tx)
            .await
    }

    /// Resolve order lines to the products they belong to.
    ///
    /// Product lines are taken as given. Variant lines are looked up in one
    /// query; variants that do not exist are left out of the result.
    pub(crate) async fn resolve_products(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        items: &[ItemRef],
    ) -> Result<ProductSet, sqlx::Error> {
        let mut products = ProductSet::new();
        let mut variants: SmallVec<[Uuid; 8]> = SmallVec::new();

        for item in items {
            match item {
                ItemRef::Product(product) => {
                    products.insert(*product);
                }
                ItemRef::Variant(variant) => variants.push(variant.into_uuid()),
            }
        }

        if variants.is_empty() {
            return Ok(products);
        }

        let resolved: Vec<Uuid> = query_scalar(RESOLVE_VARIANT_PRODUCTS_SQL)
            .bind(variants.as_slice())
            .fetch_all(&mut **tx)
            .await?;

        products.extend(resolved.into_iter().map(ProductUuid::from_uuid));

        Ok(products)
    }
}

impl<'r> FromRow<'r, PgRow> for ProductRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: ProductUuid::from_uuid(row.try_get("uuid")?),
            name: row.try_get("name")?,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            updated_at: row.try_get::<SqlxTimestamp, _>("updated_at")?.to_jiff(),
            deleted_at: row
                .try_get::<Option<SqlxTimestamp>, _>("deleted_at")?
                .map(SqlxTimestamp::to_jiff),
        })
    }
}

impl<'r> FromRow<'r, PgRow> for VariantRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: VariantUuid::from_uuid(row.try_get("uuid")?),
            product: ProductUuid::from_uuid(row.try_get("product_uuid")?),
            sku: row.try_get("sku")?,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            updated_at: row.try_get::<SqlxTimestamp, _>("updated_at")?.to_jiff(),
            deleted_at: row
                .try_get::<Option<SqlxTimestamp>, _>("deleted_at")?
                .map(SqlxTimestamp::to_jiff),
        })
    }
}
