//! Promotions

use jiff::Timestamp;

use crate::{
    membership::MembershipTier,
    products::ProductSet,
    promotions::code::PromotionCode,
    uuids::TypedUuid,
};

pub mod code;
pub mod evaluation;
pub mod status;

/// Promotion UUID
pub type PromotionUuid = TypedUuid<Promotion>;

/// How a promotion reduces the price of an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromotionDiscount {
    /// A whole-number percentage of the order total, optionally capped.
    PercentageOff {
        /// 10 means 10%.
        percentage: u16,

        /// Upper bound on the computed amount, in minor units.
        max_discount: Option<u64>,
    },

    /// A flat amount off the order, in minor units.
    AmountOff {
        /// Amount in minor units.
        amount: u64,
    },

    /// A flat amount off the shipping fee, in minor units.
    ShippingOff {
        /// Amount in minor units.
        amount: u64,
    },
}

impl PromotionDiscount {
    /// The discount's kind, without its values.
    #[must_use]
    pub const fn kind(&self) -> DiscountKind {
        match self {
            Self::PercentageOff { .. } => DiscountKind::Percentage,
            Self::AmountOff { .. } => DiscountKind::Fixed,
            Self::ShippingOff { .. } => DiscountKind::Shipping,
        }
    }
}

/// Discount kind as stored and reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DiscountKind {
    /// Percentage of the order total.
    Percentage,

    /// Fixed amount off the order.
    Fixed,

    /// Fixed amount off shipping.
    Shipping,
}

impl DiscountKind {
    /// Stored and wire representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Percentage => "percentage",
            Self::Fixed => "fixed",
            Self::Shipping => "shipping",
        }
    }

    /// Parse the stored representation.
    #[must_use]
    pub fn from_str_opt(value: &str) -> Option<Self> {
        match value {
            "percentage" => Some(Self::Percentage),
            "fixed" => Some(Self::Fixed),
            "shipping" => Some(Self::Shipping),
            _ => None,
        }
    }
}

/// A promotion definition.
#[derive(Debug, Clone, PartialEq)]
pub struct Promotion {
    /// Identifier.
    pub uuid: PromotionUuid,

    /// Canonical code customers enter.
    pub code: PromotionCode,

    /// Discount applied when eligible.
    pub discount: PromotionDiscount,

    /// Tier a customer must hold, if any.
    pub membership: Option<MembershipTier>,

    /// Minimum order total, in minor units.
    pub min_order_value: u64,

    /// Redemption cap; `0` means unlimited.
    pub max_uses: u64,

    /// Confirmed redemptions so far.
    pub used_count: u64,

    /// Products the promotion is restricted to; empty means every product.
    pub applicable_products: ProductSet,

    /// Not valid before this instant, when set.
    pub starts_at: Option<Timestamp>,

    /// Not valid after this instant, when set.
    pub ends_at: Option<Timestamp>,

    /// Administrative on/off switch.
    pub is_active: bool,
}

impl Promotion {
    /// Whether the redemption cap has been reached.
    #[must_use]
    pub const fn is_exhausted(&self) -> bool {
        self.max_uses > 0 && self.used_count >= self.max_uses
    }

    /// Whether the promotion is restricted to specific products.
    #[must_use]
    pub fn is_product_restricted(&self) -> bool {
        !self.applicable_products.is_empty()
    }
}
