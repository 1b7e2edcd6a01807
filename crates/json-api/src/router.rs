//! App Router

use salvo::Router;

use crate::{customers, healthcheck, observability::metrics_handler, products, promotions};

pub(crate) fn app_router() -> Router {
    Router::new()
        .push(Router::with_path("healthcheck").get(healthcheck::handler))
        .push(Router::with_path("metrics").get(metrics_handler))
        .push(
            Router::with_path("promotions")
                .get(promotions::index::handler)
                .post(promotions::create::handler)
                .push(Router::with_path("validate").post(promotions::validate::handler))
                .push(
                    Router::with_path("{uuid}")
                        .get(promotions::get::handler)
                        .put(promotions::update::handler)
                        .delete(promotions::delete::handler)
                        .push(
                            Router::with_path("redemptions")
                                .post(promotions::redemptions::handler),
                        ),
                ),
        )
        .push(
            Router::with_path("products")
                .post(products::create::handler)
                .push(
                    Router::with_path("{uuid}")
                        .get(products::get::handler)
                        .push(Router::with_path("variants").post(products::variants::handler)),
                ),
        )
        .push(
            Router::with_path("customers")
                .post(customers::create::handler)
                .push(
                    Router::with_path("{uuid}")
                        .get(customers::get::handler)
                        .push(
                            Router::with_path("membership").put(customers::membership::handler),
                        ),
                ),
        )
}

#[cfg(test)]
mod tests {
    use salvo::{
        affix_state::inject,
        prelude::*,
        test::{ResponseExt, TestClient},
    };
    use serde_json::json;
    use storefront::{
        membership::CustomerUuid,
        promotions::{
            PromotionUuid,
            evaluation::{Ineligible, Validation},
        },
    };
    use storefront_app::domain::{
        catalog::MockCatalogService, customers::MockCustomersService,
        promotions::MockPromotionsService,
    };
    use testresult::TestResult;

    use crate::test_helpers::{make_customer_record, make_promotion_record, state};

    use super::*;

    fn make_service(
        promotions: MockPromotionsService,
        customers: MockCustomersService,
    ) -> Service {
        let mut catalog = MockCatalogService::new();

        catalog.expect_create_product().never();
        catalog.expect_get_product().never();
        catalog.expect_create_variant().never();

        Service::new(
            Router::new()
                .hoop(inject(state(promotions, catalog, customers)))
                .push(app_router()),
        )
    }

    #[tokio::test]
    async fn validate_is_not_captured_by_uuid_route() -> TestResult {
        let mut promotions = MockPromotionsService::new();

        promotions.expect_get_promotion().never();
        promotions
            .expect_validate_promotion()
            .once()
            .return_once(|_, _| Ok(Validation::Ineligible(Ineligible::CodeNotFound)));

        let mut res = TestClient::post("http://example.com/promotions/validate")
            .json(&json!({ "code": "NOPE", "order_total": 1000 }))
            .send(&make_service(promotions, MockCustomersService::new()))
            .await;

        let body: serde_json::Value = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));
        assert_eq!(body["reason"], "code_not_found");

        Ok(())
    }

    #[tokio::test]
    async fn nested_routes_are_reachable() -> TestResult {
        let uuid = PromotionUuid::new();
        let customer = CustomerUuid::new();

        let mut promotions = MockPromotionsService::new();

        promotions
            .expect_get_promotion()
            .once()
            .return_once(move |_| Ok(make_promotion_record(uuid)));
        promotions
            .expect_record_redemption()
            .once()
            .return_once(|_| Ok(1));

        let mut customers = MockCustomersService::new();

        customers
            .expect_get_customer()
            .once()
            .return_once(move |_| Ok(make_customer_record(customer, None)));

        let service = make_service(promotions, customers);

        let get = TestClient::get(format!("http://example.com/promotions/{uuid}"))
            .send(&service)
            .await;

        let redeem = TestClient::post(format!(
            "http://example.com/promotions/{uuid}/redemptions"
        ))
        .send(&service)
        .await;

        let customer = TestClient::get(format!("http://example.com/customers/{customer}"))
            .send(&service)
            .await;

        assert_eq!(get.status_code, Some(StatusCode::OK));
        assert_eq!(redeem.status_code, Some(StatusCode::OK));
        assert_eq!(customer.status_code, Some(StatusCode::OK));

        Ok(())
    }
}
