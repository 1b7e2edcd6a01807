//! Customer Handlers

use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};
use storefront_app::domain::customers::records::CustomerRecord;
use uuid::Uuid;

use crate::membership::MembershipTierBody;

pub(crate) mod create;
pub(crate) mod get;
pub(crate) mod membership;

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CustomerResponse {
    pub uuid: Uuid,

    /// Current tier; absent for customers without a membership
    pub membership_tier: Option<MembershipTierBody>,

    pub created_at: String,

    pub updated_at: String,
}

impl From<CustomerRecord> for CustomerResponse {
    fn from(customer: CustomerRecord) -> Self {
        Self {
            uuid: customer.uuid.into_uuid(),
            membership_tier: customer.membership_tier.map(Into::into),
            created_at: customer.created_at.to_string(),
            updated_at: customer.updated_at.to_string(),
        }
    }
}
