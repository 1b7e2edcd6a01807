//! Customer Records

use jiff::Timestamp;
use storefront::membership::{CustomerUuid, MembershipTier};

/// Customer Record
#[derive(Debug, Clone)]
pub struct CustomerRecord {
    pub uuid: CustomerUuid,
    pub membership_tier: Option<MembershipTier>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
    pub deleted_at: Option<Timestamp>,
}
