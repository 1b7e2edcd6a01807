//! Create Variant Handler

use std::sync::Arc;

use salvo::{
    http::header::LOCATION,
    oapi::{
        ToSchema,
        extract::{JsonBody, PathParam},
    },
    prelude::*,
};
use serde::{Deserialize, Serialize};
use storefront::products::{ProductUuid, VariantUuid};
use storefront_app::domain::catalog::data::NewVariant;
use uuid::Uuid;

use crate::{extensions::*, products::errors::into_status_error, state::State};

/// Create Variant Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CreateVariantRequest {
    pub uuid: Uuid,

    /// Stock keeping unit, unique across the catalog
    pub sku: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct VariantResponse {
    pub uuid: Uuid,
    pub product_uuid: Uuid,
    pub sku: String,
}

/// Create Variant Handler
#[endpoint(
    tags("products"),
    summary = "Create Variant",
    responses(
        (status_code = StatusCode::CREATED, description = "Variant created"),
        (status_code = StatusCode::NOT_FOUND, description = "Product not found"),
        (status_code = StatusCode::CONFLICT, description = "Variant or SKU already exists"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    uuid: PathParam<Uuid>,
    json: JsonBody<CreateVariantRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<VariantResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let request = json.into_inner();

    let variant = state
        .app
        .catalog
        .create_variant(NewVariant {
            uuid: VariantUuid::from_uuid(request.uuid),
            product: ProductUuid::from_uuid(uuid.into_inner()),
            sku: request.sku,
        })
        .await
        .map_err(into_status_error)?;

    res.add_header(
        LOCATION,
        format!("/products/{}/variants/{}", variant.product, variant.uuid),
        true,
    )
    .or_500("failed to set location header")?
    .status_code(StatusCode::CREATED);

    Ok(Json(VariantResponse {
        uuid: variant.uuid.into_uuid(),
        product_uuid: variant.product.into_uuid(),
        sku: variant.sku,
    }))
}
