//! Create Promotion Handler

use std::sync::Arc;

use salvo::{http::header::LOCATION, oapi::extract::JsonBody, prelude::*};
use storefront_app::domain::promotions::data::NewPromotion;

use crate::{
    extensions::*,
    promotions::{
        errors::into_status_error, requests::CreatePromotionRequest,
        responses::PromotionCreatedResponse,
    },
    state::State,
};

/// Create Promotion Handler
#[endpoint(
    tags("promotions"),
    summary = "Create Promotion",
    responses(
        (status_code = StatusCode::CREATED, description = "Promotion created"),
        (status_code = StatusCode::CONFLICT, description = "Code already in use"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<CreatePromotionRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<PromotionCreatedResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let promotion = NewPromotion::try_from(json.into_inner()).or_400("invalid promotion")?;

    let uuid = state
        .app
        .promotions
        .create_promotion(promotion)
        .await
        .map_err(into_status_error)?
        .promotion
        .uuid;

    res.add_header(LOCATION, format!("/promotions/{uuid}"), true)
        .or_500("failed to set location header")?
        .status_code(StatusCode::CREATED);

    Ok(Json(PromotionCreatedResponse {
        uuid: uuid.into_uuid(),
    }))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use serde_json::json;
    use storefront::promotions::{PromotionDiscount, PromotionUuid};
    use storefront_app::domain::promotions::{MockPromotionsService, PromotionsServiceError};
    use testresult::TestResult;

    use crate::test_helpers::{make_promotion_record, promotions_service};

    use super::*;

    fn make_service(promotions: MockPromotionsService) -> Service {
        promotions_service(promotions, Router::with_path("promotions").post(handler))
    }

    #[tokio::test]
    async fn test_create_promotion_success() -> TestResult {
        let uuid = PromotionUuid::new();
        let record = make_promotion_record(uuid);

        let mut promotions = MockPromotionsService::new();

        promotions
            .expect_create_promotion()
            .once()
            .withf(move |new| {
                new.uuid == uuid
                    && new.definition.code.as_str() == "FREESHIP"
                    && new.definition.discount == PromotionDiscount::ShippingOff { amount: 30_000 }
                    && new.definition.min_order_value == 200_000
            })
            .return_once(move |_| Ok(record));

        let mut res = TestClient::post("http://example.com/promotions")
            .json(&json!({
                "uuid": uuid.into_uuid(),
                "code": "freeship",
                "discount": { "type": "shipping", "amount": 30000 },
                "min_order_value": 200000
            }))
            .send(&make_service(promotions))
            .await;

        let body: PromotionCreatedResponse = res.take_json().await?;
        let location = res.headers().get("location").and_then(|v| v.to_str().ok());

        assert_eq!(res.status_code, Some(StatusCode::CREATED));
        assert_eq!(location, Some(format!("/promotions/{uuid}").as_str()));
        assert_eq!(body.uuid, uuid.into_uuid());

        Ok(())
    }

    #[tokio::test]
    async fn test_create_duplicate_code_returns_409() {
        let mut promotions = MockPromotionsService::new();

        promotions
            .expect_create_promotion()
            .once()
            .return_once(|_| Err(PromotionsServiceError::AlreadyExists));

        let res = TestClient::post("http://example.com/promotions")
            .json(&json!({
                "uuid": PromotionUuid::new().into_uuid(),
                "code": "WELCOME10",
                "discount": { "type": "percentage", "percentage": 10 }
            }))
            .send(&make_service(promotions))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::CONFLICT));
    }

    #[tokio::test]
    async fn test_create_out_of_range_percentage_returns_400() {
        let mut promotions = MockPromotionsService::new();

        promotions
            .expect_create_promotion()
            .once()
            .return_once(|_| Err(PromotionsServiceError::InvalidData));

        let res = TestClient::post("http://example.com/promotions")
            .json(&json!({
                "uuid": PromotionUuid::new().into_uuid(),
                "code": "TOOMUCH",
                "discount": { "type": "percentage", "percentage": 150 }
            }))
            .send(&make_service(promotions))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));
    }

    #[tokio::test]
    async fn test_create_blank_code_is_rejected_before_the_service() {
        let mut promotions = MockPromotionsService::new();

        promotions.expect_create_promotion().never();

        let res = TestClient::post("http://example.com/promotions")
            .json(&json!({
                "uuid": PromotionUuid::new().into_uuid(),
                "code": "   ",
                "discount": { "type": "fixed", "amount": 50000 }
            }))
            .send(&make_service(promotions))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));
    }
}
