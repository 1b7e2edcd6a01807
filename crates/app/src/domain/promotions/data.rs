//! Promotions Data

use jiff::Timestamp;
use storefront::{
    membership::{CustomerUuid, MembershipTier},
    products::{LineItem, ProductSet},
    promotions::{PromotionDiscount, PromotionUuid, code::PromotionCode},
};

/// Administrator-editable promotion fields.
#[derive(Debug, Clone, PartialEq)]
pub struct PromotionDefinition {
    pub code: PromotionCode,
    pub discount: PromotionDiscount,
    pub membership: Option<MembershipTier>,
    pub min_order_value: u64,
    pub max_uses: u64,
    pub applicable_products: ProductSet,
    pub starts_at: Option<Timestamp>,
    pub ends_at: Option<Timestamp>,
    pub is_active: bool,
}

/// New Promotion Data
#[derive(Debug, Clone, PartialEq)]
pub struct NewPromotion {
    pub uuid: PromotionUuid,
    pub definition: PromotionDefinition,
}

/// A request to check a code against an order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatePromotion {
    /// Code as typed by the customer.
    pub code: String,

    /// Order total in minor units.
    pub order_total: u64,

    /// Signed-in customer, if any.
    pub customer: Option<CustomerUuid>,

    /// Order lines, in order.
    pub items: Vec<LineItem>,
}
