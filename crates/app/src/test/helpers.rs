//! Test Helpers

use storefront::{
    membership::{CustomerUuid, MembershipTier},
    products::{ProductSet, ProductUuid, VariantUuid},
    promotions::{
        PromotionDiscount, PromotionUuid,
        code::{PromotionCode, PromotionCodeError},
    },
};

use crate::{
    domain::{
        catalog::{
            CatalogService, CatalogServiceError,
            data::{NewProduct, NewVariant},
            records::{ProductRecord, VariantRecord},
        },
        customers::{
            CustomersService, CustomersServiceError, data::NewCustomer, records::CustomerRecord,
        },
        promotions::{
            PromotionsService, PromotionsServiceError,
            data::{NewPromotion, PromotionDefinition},
            records::PromotionRecord,
        },
    },
    test::TestContext,
};

/// An always-on, unrestricted promotion with the given code and discount.
pub(crate) fn definition(
    code: &str,
    discount: PromotionDiscount,
) -> Result<PromotionDefinition, PromotionCodeError> {
    Ok(PromotionDefinition {
        code: PromotionCode::parse(code)?,
        discount,
        membership: None,
        min_order_value: 0,
        max_uses: 0,
        applicable_products: ProductSet::new(),
        starts_at: None,
        ends_at: None,
        is_active: true,
    })
}

pub(crate) async fn create_promotion(
    ctx: &TestContext,
    definition: PromotionDefinition,
) -> Result<PromotionRecord, PromotionsServiceError> {
    ctx.promotions
        .create_promotion(NewPromotion {
            uuid: PromotionUuid::new(),
            definition,
        })
        .await
}

pub(crate) async fn create_product(
    ctx: &TestContext,
    name: &str,
) -> Result<ProductRecord, CatalogServiceError> {
    ctx.catalog
        .create_product(NewProduct {
            uuid: ProductUuid::new(),
            name: name.to_string(),
        })
        .await
}

pub(crate) async fn create_variant(
    ctx: &TestContext,
    product: ProductUuid,
    sku: &str,
) -> Result<VariantRecord, CatalogServiceError> {
    ctx.catalog
        .create_variant(NewVariant {
            uuid: VariantUuid::new(),
            product,
            sku: sku.to_string(),
        })
        .await
}

pub(crate) async fn create_customer(
    ctx: &TestContext,
    membership_tier: Option<MembershipTier>,
) -> Result<CustomerRecord, CustomersServiceError> {
    ctx.customers
        .create_customer(NewCustomer {
            uuid: CustomerUuid::new(),
            membership_tier,
        })
        .await
}
