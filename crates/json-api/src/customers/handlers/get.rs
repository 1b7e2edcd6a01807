//! Get Customer Handler

use std::sync::Arc;

use salvo::{oapi::extract::PathParam, prelude::*};
use storefront::membership::CustomerUuid;
use uuid::Uuid;

use crate::{
    customers::{errors::into_status_error, handlers::CustomerResponse},
    extensions::*,
    state::State,
};

/// Get Customer Handler
#[endpoint(tags("customers"), summary = "Get Customer")]
pub(crate) async fn handler(
    uuid: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<Json<CustomerResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let customer = state
        .app
        .customers
        .get_customer(CustomerUuid::from_uuid(uuid.into_inner()))
        .await
        .map_err(into_status_error)?;

    Ok(Json(customer.into()))
}
