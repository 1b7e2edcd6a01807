//! Membership tier JSON representation

use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};
use storefront::membership::MembershipTier;

/// Customer membership tier
#[derive(Debug, Clone, Copy, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub(crate) enum MembershipTierBody {
    Silver,
    Gold,
    Diamond,
}

impl From<MembershipTierBody> for MembershipTier {
    fn from(tier: MembershipTierBody) -> Self {
        match tier {
            MembershipTierBody::Silver => Self::Silver,
            MembershipTierBody::Gold => Self::Gold,
            MembershipTierBody::Diamond => Self::Diamond,
        }
    }
}

impl From<MembershipTier> for MembershipTierBody {
    fn from(tier: MembershipTier) -> Self {
        match tier {
            MembershipTier::Silver => Self::Silver,
            MembershipTier::Gold => Self::Gold,
            MembershipTier::Diamond => Self::Diamond,
        }
    }
}
