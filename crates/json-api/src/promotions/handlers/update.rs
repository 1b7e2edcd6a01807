//! Update Promotion Handler

use std::sync::Arc;

use jiff::Timestamp;
use salvo::{
    oapi::extract::{JsonBody, PathParam},
    prelude::*,
};
use storefront::promotions::PromotionUuid;
use storefront_app::domain::promotions::data::PromotionDefinition;
use uuid::Uuid;

use crate::{
    extensions::*,
    promotions::{
        errors::into_status_error, requests::PromotionDefinitionRequest,
        responses::PromotionResponse,
    },
    state::State,
};

/// Update Promotion Handler
///
/// Replaces every editable field. The redemption count is kept.
#[endpoint(
    tags("promotions"),
    summary = "Update Promotion",
    responses(
        (status_code = StatusCode::OK, description = "Promotion updated"),
        (status_code = StatusCode::NOT_FOUND, description = "Promotion not found"),
        (status_code = StatusCode::CONFLICT, description = "Code already in use"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
#[tracing::instrument(
    name = "promotions.update",
    skip(uuid, json, depot),
    fields(promotion_uuid = tracing::field::Empty),
    err
)]
pub(crate) async fn handler(
    uuid: PathParam<Uuid>,
    json: JsonBody<PromotionDefinitionRequest>,
    depot: &mut Depot,
) -> Result<Json<PromotionResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let uuid = PromotionUuid::from_uuid(uuid.into_inner());

    tracing::Span::current().record("promotion_uuid", tracing::field::display(uuid));

    let definition =
        PromotionDefinition::try_from(json.into_inner()).or_400("invalid promotion")?;

    let record = state
        .app
        .promotions
        .update_promotion(uuid, definition)
        .await
        .map_err(into_status_error)?;

    Ok(Json(PromotionResponse::from_record(record, Timestamp::now())))
}
