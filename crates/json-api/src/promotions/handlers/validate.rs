//! Validate Promotion Handler

use std::sync::Arc;

use jiff::Timestamp;
use salvo::{oapi::extract::JsonBody, prelude::*};
use storefront::promotions::{code::PromotionCode, evaluation::Validation};
use storefront_app::domain::promotions::data::ValidatePromotion;

use crate::{
    extensions::*,
    observability::record_promotion_validation,
    promotions::{
        errors::into_status_error,
        requests::ValidatePromotionRequest,
        responses::{AppliedDiscountResponse, IneligibleResponse},
    },
    state::State,
};

/// Validate Promotion Handler
///
/// Checks a code against an order at the server's current time without
/// redeeming it. Answers `200` with the discount when the code applies and
/// `400` with a reason and message when it does not.
#[endpoint(
    tags("promotions"),
    summary = "Validate Promotion Code",
    responses(
        (status_code = StatusCode::OK, description = "Code applies"),
        (status_code = StatusCode::BAD_REQUEST, description = "Code does not apply, or malformed request"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
#[tracing::instrument(
    name = "promotions.validate",
    skip(json, depot, res),
    fields(eligible = tracing::field::Empty, reason = tracing::field::Empty),
    err
)]
pub(crate) async fn handler(
    json: JsonBody<ValidatePromotionRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<StatusCode, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let currency = state.app.currency;
    let promotions = Arc::clone(&state.app.promotions);

    let request = ValidatePromotion::try_from(json.into_inner()).or_400("invalid order")?;
    let code = PromotionCode::parse(&request.code).ok();

    let validation = promotions
        .validate_promotion(request, Timestamp::now())
        .await
        .map_err(into_status_error)?;

    record_promotion_validation(depot, code.as_ref(), &validation);

    let span = tracing::Span::current();

    span.record("eligible", validation.is_eligible());

    match validation {
        Validation::Eligible(applied) => {
            res.render(Json(AppliedDiscountResponse::from(applied)));

            Ok(StatusCode::OK)
        }
        Validation::Ineligible(ineligible) => {
            span.record("reason", ineligible.reason());

            res.render(Json(IneligibleResponse::new(ineligible, &currency)));

            Ok(StatusCode::BAD_REQUEST)
        }
    }
}
