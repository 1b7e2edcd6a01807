//! Promotions Responses

use std::string::ToString;

use jiff::Timestamp;
use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};
use storefront::{
    money::StoreCurrency,
    promotions::evaluation::{AppliedDiscount, Ineligible},
};
use storefront_app::domain::promotions::records::PromotionRecord;
use uuid::Uuid;

use crate::{membership::MembershipTierBody, promotions::requests::DiscountBody};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct PromotionResponse {
    pub uuid: Uuid,

    /// Canonical upper-case code
    pub code: String,

    pub discount: DiscountBody,

    pub membership: Option<MembershipTierBody>,

    /// Minimum order total, in minor units
    pub min_order_value: u64,

    /// Redemption cap; 0 means unlimited
    pub max_uses: u64,

    /// Confirmed redemptions so far
    pub used_count: u64,

    /// Sorted product UUIDs; empty means all products
    pub applicable_products: Vec<Uuid>,

    pub starts_at: Option<String>,

    pub ends_at: Option<String>,

    pub is_active: bool,

    /// Derived status (`active`, `inactive` or `expired`) at the request's instant
    pub status: String,

    pub created_at: String,

    pub updated_at: String,
}

impl PromotionResponse {
    pub(crate) fn from_record(record: PromotionRecord, now: Timestamp) -> Self {
        let status = record.promotion.status_at(now).as_str().to_string();
        let promotion = record.promotion;

        Self {
            uuid: promotion.uuid.into_uuid(),
            code: promotion.code.into_string(),
            discount: promotion.discount.into(),
            membership: promotion.membership.map(Into::into),
            min_order_value: promotion.min_order_value,
            max_uses: promotion.max_uses,
            used_count: promotion.used_count,
            applicable_products: promotion
                .applicable_products
                .to_sorted_vec()
                .into_iter()
                .map(Into::into)
                .collect(),
            starts_at: promotion.starts_at.as_ref().map(ToString::to_string),
            ends_at: promotion.ends_at.as_ref().map(ToString::to_string),
            is_active: promotion.is_active,
            status,
            created_at: record.created_at.to_string(),
            updated_at: record.updated_at.to_string(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct PromotionsResponse {
    pub promotions: Vec<PromotionResponse>,
}

/// Promotion Created Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct PromotionCreatedResponse {
    /// Created promotion UUID
    pub uuid: Uuid,
}

/// Discount granted by an applicable code
#[derive(Debug, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
pub(crate) struct AppliedDiscountResponse {
    pub promotion_uuid: Uuid,

    /// `percentage`, `fixed` or `shipping`
    pub discount_type: String,

    /// Amount off the order, in minor units
    pub discount_amount: u64,

    /// Amount off shipping, in minor units
    pub shipping_discount: u64,
}

impl From<AppliedDiscount> for AppliedDiscountResponse {
    fn from(applied: AppliedDiscount) -> Self {
        Self {
            promotion_uuid: applied.promotion.into_uuid(),
            discount_type: applied.kind.as_str().to_string(),
            discount_amount: applied.discount_amount,
            shipping_discount: applied.shipping_discount,
        }
    }
}

/// Why a code does not apply
#[derive(Debug, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
pub(crate) struct IneligibleResponse {
    /// Stable snake_case identifier
    pub reason: String,

    /// Customer-facing explanation
    pub message: String,
}

impl IneligibleResponse {
    pub(crate) fn new(ineligible: Ineligible, currency: &StoreCurrency) -> Self {
        Self {
            reason: ineligible.reason().to_string(),
            message: ineligible.message(currency),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct RedemptionResponse {
    /// Redemptions recorded, including this one
    pub used_count: u64,
}
