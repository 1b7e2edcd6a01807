//! Customers Data

use storefront::membership::{CustomerUuid, MembershipTier};

/// New Customer Data
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCustomer {
    pub uuid: CustomerUuid,
    pub membership_tier: Option<MembershipTier>,
}
