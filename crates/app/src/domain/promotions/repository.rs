//! Promotions Repository

use jiff_sqlx::Timestamp as SqlxTimestamp;
use rustc_hash::FxHashMap;
use sqlx::{
    FromRow, Postgres, Row, Transaction,
    error::BoxDynError,
    postgres::{PgArguments, PgRow},
    query, query_as, query_scalar,
    query::QueryAs,
};
use storefront::{
    membership::MembershipTier,
    products::{ProductSet, ProductUuid},
    promotions::{
        DiscountKind, Promotion, PromotionDiscount, PromotionUuid, code::PromotionCode,
    },
};
use uuid::Uuid;

use crate::domain::promotions::{
    data::{NewPromotion, PromotionDefinition},
    records::PromotionRecord,
};

const COLUMN_CODE: &str = "code";
const COLUMN_DISCOUNT_TYPE: &str = "discount_type";
const COLUMN_DISCOUNT_VALUE: &str = "discount_value";
const COLUMN_MAX_DISCOUNT: &str = "max_discount";
const COLUMN_MEMBERSHIP_LEVEL: &str = "membership_level";
const COLUMN_MIN_ORDER_VALUE: &str = "min_order_value";
const COLUMN_MAX_USES: &str = "max_uses";
const COLUMN_USED_COUNT: &str = "used_count";

const CREATE_PROMOTION_SQL: &str = include_str!("sql/create_promotion.sql");
const UPDATE_PROMOTION_SQL: &str = include_str!("sql/update_promotion.sql");
const GET_PROMOTION_SQL: &str = include_str!("sql/get_promotion.sql");
const FIND_PROMOTION_BY_CODE_SQL: &str = include_str!("sql/find_promotion_by_code.sql");
const LIST_PROMOTIONS_SQL: &str = include_str!("sql/list_promotions.sql");
const DELETE_PROMOTION_SQL: &str = include_str!("sql/delete_promotion.sql");
const INCREMENT_USED_COUNT_SQL: &str = include_str!("sql/increment_used_count.sql");
const LIST_PROMOTION_PRODUCTS_SQL: &str = include_str!("sql/list_promotion_products.sql");
const CREATE_PROMOTION_PRODUCTS_SQL: &str = include_str!("sql/create_promotion_products.sql");
const DELETE_PROMOTION_PRODUCTS_SQL: &str = include_str!("sql/delete_promotion_products.sql");

type PromotionQuery<'q> = QueryAs<'q, Postgres, PromotionRecord, PgArguments>;

#[derive(Debug, Clone, Default)]
pub(crate) struct PgPromotionsRepository;

impl PgPromotionsRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn create_promotion(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        promotion: NewPromotion,
    ) -> Result<PromotionRecord, sqlx::Error> {
        let NewPromotion { uuid, definition } = promotion;

        let columns = DefinitionColumns::try_from_definition(&definition)?;

        let mut record = columns
            .bind(query_as::<Postgres, PromotionRecord>(CREATE_PROMOTION_SQL).bind(uuid.into_uuid()))
            .fetch_one(&mut **tx)
            .await?;

        insert_products(tx, uuid, &definition.applicable_products).await?;

        record.promotion.applicable_products = definition.applicable_products;

        Ok(record)
    }

    pub(crate) async fn update_promotion(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        uuid: PromotionUuid,
        definition: PromotionDefinition,
    ) -> Result<PromotionRecord, sqlx::Error> {
        let columns = DefinitionColumns::try_from_definition(&definition)?;

        let mut record = columns
            .bind(query_as::<Postgres, PromotionRecord>(UPDATE_PROMOTION_SQL).bind(uuid.into_uuid()))
            .fetch_one(&mut **tx)
            .await?;

        query(DELETE_PROMOTION_PRODUCTS_SQL)
            .bind(uuid.into_uuid())
            .execute(&mut **tx)
            .await?;

        insert_products(tx, uuid, &definition.applicable_products).await?;

        record.promotion.applicable_products = definition.applicable_products;

        Ok(record)
    }

    pub(crate) async fn get_promotion(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        uuid: PromotionUuid,
    ) -> Result<PromotionRecord, sqlx::Error> {
        let record = query_as::<Postgres, PromotionRecord>(GET_PROMOTION_SQL)
            .bind(uuid.into_uuid())
            .fetch_one(&mut **tx)
            .await?;

        let mut records = [record];

        load_products(tx, &mut records).await?;

        let [record] = records;

        Ok(record)
    }

    pub(crate) async fn find_promotion_by_code(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        code: &PromotionCode,
    ) -> Result<Option<PromotionRecord>, sqlx::Error> {
        let Some(record) = query_as::<Postgres, PromotionRecord>(FIND_PROMOTION_BY_CODE_SQL)
            .bind(code.as_str())
            .fetch_optional(&mut **tx)
            .await?
        else {
            return Ok(None);
        };

        let mut records = [record];

        load_products(tx, &mut records).await?;

        let [record] = records;

        Ok(Some(record))
    }

    pub(crate) async fn list_promotions(
        &self,
        tx: &mut Transaction<'_, Postgres>,
    ) -> Result<Vec<PromotionRecord>, sqlx::Error> {
        let mut records = query_as::<Postgres, PromotionRecord>(LIST_PROMOTIONS_SQL)
            .fetch_all(&mut **tx)
            .await?;

        load_products(tx, &mut records).await?;

        Ok(records)
    }

    pub(crate) async fn delete_promotion(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        uuid: PromotionUuid,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(DELETE_PROMOTION_SQL)
            .bind(uuid.into_uuid())
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }

    /// Add one redemption in a single statement and return the new count.
    pub(crate) async fn increment_used_count(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        uuid: PromotionUuid,
    ) -> Result<u64, sqlx::Error> {
        let used_count: i64 = query_scalar(INCREMENT_USED_COUNT_SQL)
            .bind(uuid.into_uuid())
            .fetch_one(&mut **tx)
            .await?;

        try_u64_from_i64(used_count, COLUMN_USED_COUNT)
    }
}

/// Column values for the administrator-editable fields, bound as `$2..$11`.
struct DefinitionColumns<'a> {
    code: &'a str,
    discount_type: &'static str,
    discount_value: i64,
    max_discount: Option<i64>,
    membership_level: Option<&'static str>,
    min_order_value: i64,
    max_uses: i64,
    starts_at: Option<SqlxTimestamp>,
    ends_at: Option<SqlxTimestamp>,
    is_active: bool,
}

impl<'a> DefinitionColumns<'a> {
    fn try_from_definition(definition: &'a PromotionDefinition) -> Result<Self, sqlx::Error> {
        let (discount_type, discount_value, max_discount) =
            to_discount_sql_values(definition.discount)?;

        Ok(Self {
            code: definition.code.as_str(),
            discount_type,
            discount_value,
            max_discount,
            membership_level: definition.membership.map(|tier| tier.as_str()),
            min_order_value: try_i64_from_u64(definition.min_order_value, COLUMN_MIN_ORDER_VALUE)?,
            max_uses: try_i64_from_u64(definition.max_uses, COLUMN_MAX_USES)?,
            starts_at: definition.starts_at.map(SqlxTimestamp::from),
            ends_at: definition.ends_at.map(SqlxTimestamp::from),
            is_active: definition.is_active,
        })
    }

    fn bind<'q>(self, query: PromotionQuery<'q>) -> PromotionQuery<'q>
    where
        'a: 'q,
    {
        query
            .bind(self.code)
            .bind(self.discount_type)
            .bind(self.discount_value)
            .bind(self.max_discount)
            .bind(self.membership_level)
            .bind(self.min_order_value)
            .bind(self.max_uses)
            .bind(self.starts_at)
            .bind(self.ends_at)
            .bind(self.is_active)
    }
}

fn to_discount_sql_values(
    discount: PromotionDiscount,
) -> Result<(&'static str, i64, Option<i64>), sqlx::Error> {
    let discount_type = discount.kind().as_str();

    match discount {
        PromotionDiscount::PercentageOff {
            percentage,
            max_discount,
        } => Ok((
            discount_type,
            i64::from(percentage),
            try_optional_i64_from_u64(max_discount, COLUMN_MAX_DISCOUNT)?,
        )),
        PromotionDiscount::AmountOff { amount } | PromotionDiscount::ShippingOff { amount } => Ok((
            discount_type,
            try_i64_from_u64(amount, COLUMN_DISCOUNT_VALUE)?,
            None,
        )),
    }
}

fn from_discount_sql_values(
    discount_type: &str,
    discount_value: u64,
    max_discount: Option<u64>,
) -> Result<PromotionDiscount, sqlx::Error> {
    match DiscountKind::from_str_opt(discount_type) {
        Some(DiscountKind::Percentage) => Ok(PromotionDiscount::PercentageOff {
            percentage: u16::try_from(discount_value)
                .map_err(|e| decode_error(COLUMN_DISCOUNT_VALUE, e))?,
            max_discount,
        }),
        Some(DiscountKind::Fixed) => Ok(PromotionDiscount::AmountOff {
            amount: discount_value,
        }),
        Some(DiscountKind::Shipping) => Ok(PromotionDiscount::ShippingOff {
            amount: discount_value,
        }),
        None => Err(decode_error(
            COLUMN_DISCOUNT_TYPE,
            format!("unknown discount type: {discount_type}"),
        )),
    }
}

async fn insert_products(
    tx: &mut Transaction<'_, Postgres>,
    promotion: PromotionUuid,
    products: &ProductSet,
) -> Result<(), sqlx::Error> {
    if products.is_empty() {
        return Ok(());
    }

    let product_uuids: Vec<Uuid> = products.iter().map(|product| product.into_uuid()).collect();

    query(CREATE_PROMOTION_PRODUCTS_SQL)
        .bind(promotion.into_uuid())
        .bind(product_uuids.as_slice())
        .execute(&mut **tx)
        .await?;

    Ok(())
}

/// Fill in `applicable_products` for every record with one query.
async fn load_products(
    tx: &mut Transaction<'_, Postgres>,
    records: &mut [PromotionRecord],
) -> Result<(), sqlx::Error> {
    if records.is_empty() {
        return Ok(());
    }

    let promotion_uuids: Vec<Uuid> = records
        .iter()
        .map(|record| record.promotion.uuid.into_uuid())
        .collect();

    let rows: Vec<(Uuid, Uuid)> = query_as(LIST_PROMOTION_PRODUCTS_SQL)
        .bind(promotion_uuids.as_slice())
        .fetch_all(&mut **tx)
        .await?;

    let mut by_promotion: FxHashMap<Uuid, ProductSet> = FxHashMap::default();

    for (promotion, product) in rows {
        by_promotion
            .entry(promotion)
            .or_default()
            .insert(ProductUuid::from_uuid(product));
    }

    for record in records {
        if let Some(products) = by_promotion.remove(&record.promotion.uuid.into_uuid()) {
            record.promotion.applicable_products = products;
        }
    }

    Ok(())
}

fn decode_error(column: &'static str, source: impl Into<BoxDynError>) -> sqlx::Error {
    sqlx::Error::ColumnDecode {
        index: column.to_string(),
        source: source.into(),
    }
}

fn try_optional_i64_from_u64(
    value: Option<u64>,
    column: &'static str,
) -> Result<Option<i64>, sqlx::Error> {
    value.map(|v| try_i64_from_u64(v, column)).transpose()
}

fn try_i64_from_u64(value: u64, column: &'static str) -> Result<i64, sqlx::Error> {
    i64::try_from(value).map_err(|e| decode_error(column, e))
}

fn try_u64_from_i64(value: i64, column: &'static str) -> Result<u64, sqlx::Error> {
    u64::try_from(value).map_err(|e| decode_error(column, e))
}

impl<'r> FromRow<'r, PgRow> for PromotionRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        let code = PromotionCode::parse(row.try_get::<&str, _>(COLUMN_CODE)?)
            .map_err(|e| decode_error(COLUMN_CODE, e))?;

        let discount_type: &str = row.try_get(COLUMN_DISCOUNT_TYPE)?;

        let discount_value =
            try_u64_from_i64(row.try_get(COLUMN_DISCOUNT_VALUE)?, COLUMN_DISCOUNT_VALUE)?;

        let max_discount = row
            .try_get::<Option<i64>, _>(COLUMN_MAX_DISCOUNT)?
            .map(|value| try_u64_from_i64(value, COLUMN_MAX_DISCOUNT))
            .transpose()?;

        let membership = row
            .try_get::<Option<&str>, _>(COLUMN_MEMBERSHIP_LEVEL)?
            .map(str::parse::<MembershipTier>)
            .transpose()
            .map_err(|e| decode_error(COLUMN_MEMBERSHIP_LEVEL, e))?;

        Ok(Self {
            promotion: Promotion {
                uuid: PromotionUuid::from_uuid(row.try_get("uuid")?),
                code,
                discount: from_discount_sql_values(discount_type, discount_value, max_discount)?,
                membership,
                min_order_value: try_u64_from_i64(
                    row.try_get(COLUMN_MIN_ORDER_VALUE)?,
                    COLUMN_MIN_ORDER_VALUE,
                )?,
                max_uses: try_u64_from_i64(row.try_get(COLUMN_MAX_USES)?, COLUMN_MAX_USES)?,
                used_count: try_u64_from_i64(row.try_get(COLUMN_USED_COUNT)?, COLUMN_USED_COUNT)?,
                applicable_products: ProductSet::new(),
                starts_at: row
                    .try_get::<Option<SqlxTimestamp>, _>("starts_at")?
                    .map(SqlxTimestamp::to_jiff),
                ends_at: row
                    .try_get::<Option<SqlxTimestamp>, _>("ends_at")?
                    .map(SqlxTimestamp::to_jiff),
                is_active: row.try_get("is_active")?,
            },
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            updated_at: row.try_get::<SqlxTimestamp, _>("updated_at")?.to_jiff(),
            deleted_at: row
                .try_get::<Option<SqlxTimestamp>, _>("deleted_at")?
                .map(SqlxTimestamp::to_jiff),
        })
    }
}
