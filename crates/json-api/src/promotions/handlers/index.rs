//! Promotion Index Handler

use std::sync::Arc;

use salvo::{oapi::extract::QueryParam, prelude::*};

use crate::{
    extensions::*,
    promotions::{
        errors::into_status_error,
        responses::{PromotionResponse, PromotionsResponse},
    },
    state::State,
};

/// Promotion Index Handler
///
/// Returns every live promotion with its status at `at` (default: now).
#[endpoint(tags("promotions"), summary = "List Promotions")]
pub(crate) async fn handler(
    at: QueryParam<String, false>,
    depot: &mut Depot,
) -> Result<Json<PromotionsResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let point_in_time = at.into_point_in_time()?;

    let promotions = state
        .app
        .promotions
        .list_promotions()
        .await
        .map_err(into_status_error)?;

    Ok(Json(PromotionsResponse {
        promotions: promotions
            .into_iter()
            .map(|record| PromotionResponse::from_record(record, point_in_time))
            .collect(),
    }))
}
