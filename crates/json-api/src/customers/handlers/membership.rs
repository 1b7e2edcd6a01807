//! Set Membership Tier Handler

use std::sync::Arc;

use salvo::{
    oapi::{
        ToSchema,
        extract::{JsonBody, PathParam},
    },
    prelude::*,
};
use serde::{Deserialize, Serialize};
use storefront::membership::CustomerUuid;
use uuid::Uuid;

use crate::{
    customers::{errors::into_status_error, handlers::CustomerResponse},
    extensions::*,
    membership::MembershipTierBody,
    state::State,
};

/// Set Membership Tier Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct SetMembershipTierRequest {
    /// New tier; `null` removes the membership
    pub membership_tier: Option<MembershipTierBody>,
}

/// Set Membership Tier Handler
#[endpoint(
    tags("customers"),
    summary = "Set Membership Tier",
    responses(
        (status_code = StatusCode::OK, description = "Tier updated"),
        (status_code = StatusCode::NOT_FOUND, description = "Customer not found"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    uuid: PathParam<Uuid>,
    json: JsonBody<SetMembershipTierRequest>,
    depot: &mut Depot,
) -> Result<Json<CustomerResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let customer = state
        .app
        .customers
        .set_membership_tier(
            CustomerUuid::from_uuid(uuid.into_inner()),
            json.into_inner().membership_tier.map(Into::into),
        )
        .await
        .map_err(into_status_error)?;

    Ok(Json(customer.into()))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use serde_json::json;
    use storefront::membership::MembershipTier;
    use storefront_app::domain::customers::{CustomersServiceError, MockCustomersService};
    use testresult::TestResult;

    use crate::test_helpers::{customers_service, make_customer_record};

    use super::*;

    fn make_service(customers: MockCustomersService) -> Service {
        customers_service(
            customers,
            Router::with_path("customers/{uuid}/membership").put(handler),
        )
    }

    #[tokio::test]
    async fn test_set_tier_promotes_customer() -> TestResult {
        let uuid = CustomerUuid::new();

        let mut customers = MockCustomersService::new();

        customers
            .expect_set_membership_tier()
            .once()
            .withf(move |requested, tier| *requested == uuid && *tier == Some(MembershipTier::Gold))
            .return_once(move |_, tier| Ok(make_customer_record(uuid, tier)));

        let body: CustomerResponse =
            TestClient::put(format!("http://example.com/customers/{uuid}/membership"))
                .json(&json!({ "membership_tier": "gold" }))
                .send(&make_service(customers))
                .await
                .take_json()
                .await?;

        assert_eq!(body.membership_tier, Some(MembershipTierBody::Gold));

        Ok(())
    }

    #[tokio::test]
    async fn test_null_tier_clears_membership() -> TestResult {
        let uuid = CustomerUuid::new();

        let mut customers = MockCustomersService::new();

        customers
            .expect_set_membership_tier()
            .once()
            .withf(move |requested, tier| *requested == uuid && tier.is_none())
            .return_once(move |_, tier| Ok(make_customer_record(uuid, tier)));

        let body: CustomerResponse =
            TestClient::put(format!("http://example.com/customers/{uuid}/membership"))
                .json(&json!({ "membership_tier": null }))
                .send(&make_service(customers))
                .await
                .take_json()
                .await?;

        assert_eq!(body.membership_tier, None);

        Ok(())
    }

    #[tokio::test]
    async fn test_set_tier_unknown_customer_returns_404() {
        let mut customers = MockCustomersService::new();

        customers
            .expect_set_membership_tier()
            .once()
            .return_once(|_, _| Err(CustomersServiceError::NotFound));

        let res = TestClient::put(format!(
            "http://example.com/customers/{}/membership",
            CustomerUuid::new()
        ))
        .json(&json!({ "membership_tier": "silver" }))
        .send(&make_service(customers))
        .await;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));
    }
}
