//! Test helpers.

use std::sync::Arc;

use jiff::Timestamp;
use salvo::{affix_state::inject, prelude::*};
use storefront::{
    membership::{CustomerUuid, MembershipTier},
    money::StoreCurrency,
    products::{ProductSet, ProductUuid},
    promotions::{Promotion, PromotionDiscount, PromotionUuid, code::PromotionCode},
};
use storefront_app::{
    context::AppContext,
    domain::{
        catalog::{MockCatalogService, records::ProductRecord},
        customers::{MockCustomersService, records::CustomerRecord},
        promotions::{MockPromotionsService, records::PromotionRecord},
    },
};

use crate::state::State;

fn strict_promotions_mock() -> MockPromotionsService {
    let mut promotions = MockPromotionsService::new();

    promotions.expect_create_promotion().never();
    promotions.expect_update_promotion().never();
    promotions.expect_get_promotion().never();
    promotions.expect_get_promotion_by_code().never();
    promotions.expect_list_promotions().never();
    promotions.expect_delete_promotion().never();
    promotions.expect_validate_promotion().never();
    promotions.expect_record_redemption().never();

    promotions
}

fn strict_catalog_mock() -> MockCatalogService {
    let mut catalog = MockCatalogService::new();

    catalog.expect_create_product().never();
    catalog.expect_get_product().never();
    catalog.expect_create_variant().never();

    catalog
}

fn strict_customers_mock() -> MockCustomersService {
    let mut customers = MockCustomersService::new();

    customers.expect_create_customer().never();
    customers.expect_get_customer().never();
    customers.expect_set_membership_tier().never();

    customers
}

pub(crate) fn state(
    promotions: MockPromotionsService,
    catalog: MockCatalogService,
    customers: MockCustomersService,
) -> Arc<State> {
    State::from_app_context(AppContext {
        promotions: Arc::new(promotions),
        catalog: Arc::new(catalog),
        customers: Arc::new(customers),
        currency: StoreCurrency::default(),
    })
}

fn service(state: Arc<State>, route: Router) -> Service {
    Service::new(Router::new().hoop(inject(state)).push(route))
}

pub(crate) fn promotions_service(promotions: MockPromotionsService, route: Router) -> Service {
    service(
        state(promotions, strict_catalog_mock(), strict_customers_mock()),
        route,
    )
}

pub(crate) fn catalog_service(catalog: MockCatalogService, route: Router) -> Service {
    service(
        state(strict_promotions_mock(), catalog, strict_customers_mock()),
        route,
    )
}

pub(crate) fn customers_service(customers: MockCustomersService, route: Router) -> Service {
    service(
        state(strict_promotions_mock(), strict_catalog_mock(), customers),
        route,
    )
}

/// An always-on `WELCOME10` promotion granting 10% off.
#[expect(clippy::expect_used, reason = "the literal code is never blank")]
pub(crate) fn make_promotion_record(uuid: PromotionUuid) -> PromotionRecord {
    PromotionRecord {
        promotion: Promotion {
            uuid,
            code: PromotionCode::parse("WELCOME10").expect("valid promotion code"),
            discount: PromotionDiscount::PercentageOff {
                percentage: 10,
                max_discount: None,
            },
            membership: None,
            min_order_value: 0,
            max_uses: 0,
            used_count: 0,
            applicable_products: ProductSet::new(),
            starts_at: None,
            ends_at: None,
            is_active: true,
        },
        created_at: Timestamp::UNIX_EPOCH,
        updated_at: Timestamp::UNIX_EPOCH,
        deleted_at: None,
    }
}

pub(crate) fn make_product_record(uuid: ProductUuid) -> ProductRecord {
    ProductRecord {
        uuid,
        name: "Canvas Tote".to_string(),
        created_at: Timestamp::UNIX_EPOCH,
        updated_at: Timestamp::UNIX_EPOCH,
        deleted_at: None,
    }
}

pub(crate) fn make_customer_record(
    uuid: CustomerUuid,
    membership_tier: Option<MembershipTier>,
) -> CustomerRecord {
    CustomerRecord {
        uuid,
        membership_tier,
        created_at: Timestamp::UNIX_EPOCH,
        updated_at: Timestamp::UNIX_EPOCH,
        deleted_at: None,
    }
}
