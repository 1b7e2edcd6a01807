//! Get Promotion Handler

use std::sync::Arc;

use salvo::{
    oapi::extract::{PathParam, QueryParam},
    prelude::*,
};
use storefront::promotions::PromotionUuid;
use uuid::Uuid;

use crate::{
    extensions::*,
    promotions::{errors::into_status_error, responses::PromotionResponse},
    state::State,
};

/// Get Promotion Handler
///
/// Returns a promotion with its status at `at` (default: now).
#[endpoint(
    tags("promotions"),
    summary = "Get Promotion",
    responses(
        (status_code = StatusCode::OK, description = "Promotion found"),
        (status_code = StatusCode::NOT_FOUND, description = "Promotion not found"),
    ),
)]
pub(crate) async fn handler(
    uuid: PathParam<Uuid>,
    at: QueryParam<String, false>,
    depot: &mut Depot,
) -> Result<Json<PromotionResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let point_in_time = at.into_point_in_time()?;

    let record = state
        .app
        .promotions
        .get_promotion(PromotionUuid::from_uuid(uuid.into_inner()))
        .await
        .map_err(into_status_error)?;

    Ok(Json(PromotionResponse::from_record(record, point_in_time)))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use storefront_app::domain::promotions::{MockPromotionsService, PromotionsServiceError};
    use testresult::TestResult;

    use crate::test_helpers::{make_promotion_record, promotions_service};

    use super::*;

    fn make_service(promotions: MockPromotionsService) -> Service {
        promotions_service(promotions, Router::with_path("promotions/{uuid}").get(handler))
    }

    #[tokio::test]
    async fn test_get_returns_promotion() -> TestResult {
        let uuid = PromotionUuid::new();
        let record = make_promotion_record(uuid);

        let mut promotions = MockPromotionsService::new();

        promotions
            .expect_get_promotion()
            .once()
            .withf(move |requested| *requested == uuid)
            .return_once(move |_| Ok(record));

        let mut res = TestClient::get(format!("http://example.com/promotions/{uuid}"))
            .send(&make_service(promotions))
            .await;

        let body: PromotionResponse = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert_eq!(body.uuid, uuid.into_uuid());
        assert_eq!(body.code, "WELCOME10");
        assert_eq!(body.status, "active");

        Ok(())
    }

    #[tokio::test]
    async fn test_get_missing_promotion_returns_404() {
        let uuid = PromotionUuid::new();

        let mut promotions = MockPromotionsService::new();

        promotions
            .expect_get_promotion()
            .once()
            .return_once(|_| Err(PromotionsServiceError::NotFound));

        let res = TestClient::get(format!("http://example.com/promotions/{uuid}"))
            .send(&make_service(promotions))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));
    }

    #[tokio::test]
    async fn test_get_malformed_uuid_returns_400() {
        let mut promotions = MockPromotionsService::new();

        promotions.expect_get_promotion().never();

        let res = TestClient::get("http://example.com/promotions/not-a-uuid")
            .send(&make_service(promotions))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));
    }
}
