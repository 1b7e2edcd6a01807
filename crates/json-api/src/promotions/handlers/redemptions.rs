//! Record Redemption Handler

use std::sync::Arc;

use salvo::{oapi::extract::PathParam, prelude::*};
use storefront::promotions::PromotionUuid;
use tracing::info;
use uuid::Uuid;

use crate::{
    extensions::*,
    promotions::{errors::into_status_error, responses::RedemptionResponse},
    state::State,
};

/// Record Redemption Handler
///
/// Called once per confirmed order that used the promotion.
#[endpoint(
    tags("promotions"),
    summary = "Record Redemption",
    responses(
        (status_code = StatusCode::OK, description = "Redemption recorded"),
        (status_code = StatusCode::NOT_FOUND, description = "Promotion not found"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    uuid: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<Json<RedemptionResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let uuid = PromotionUuid::from_uuid(uuid.into_inner());

    let used_count = state
        .app
        .promotions
        .record_redemption(uuid)
        .await
        .map_err(into_status_error)?;

    info!(promotion_uuid = %uuid, used_count, "redemption recorded");

    Ok(Json(RedemptionResponse { used_count }))
}
