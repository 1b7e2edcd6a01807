//! Promotions Requests

use jiff::Timestamp;
use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};
use storefront::{
    membership::CustomerUuid,
    products::{ItemRef, LineItem, ProductUuid, VariantUuid},
    promotions::{
        PromotionDiscount, PromotionUuid,
        code::{PromotionCode, PromotionCodeError},
    },
};
use storefront_app::domain::promotions::data::{
    NewPromotion, PromotionDefinition, ValidatePromotion,
};
use thiserror::Error;
use uuid::Uuid;

use crate::membership::MembershipTierBody;

/// Reasons a well-formed JSON body still cannot become a promotion.
#[derive(Debug, Error)]
pub(crate) enum InvalidPromotionRequest {
    #[error(transparent)]
    Code(#[from] PromotionCodeError),

    #[error("could not parse \"{field}\": {source}")]
    Timestamp {
        field: &'static str,
        #[source]
        source: jiff::Error,
    },

    #[error("line item {index} names neither a variant nor a product")]
    EmptyLineItem { index: usize },
}

/// Promotion discount
#[derive(Debug, Clone, Copy, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub(crate) enum DiscountBody {
    /// Whole-number percentage of the order total
    Percentage {
        percentage: u16,
        #[serde(default)]
        max_discount: Option<u64>,
    },

    /// Amount off the order, in minor units
    Fixed { amount: u64 },

    /// Amount off shipping, in minor units
    Shipping { amount: u64 },
}

impl From<DiscountBody> for PromotionDiscount {
    fn from(body: DiscountBody) -> Self {
        match body {
            DiscountBody::Percentage {
                percentage,
                max_discount,
            } => Self::PercentageOff {
                percentage,
                max_discount,
            },
            DiscountBody::Fixed { amount } => Self::AmountOff { amount },
            DiscountBody::Shipping { amount } => Self::ShippingOff { amount },
        }
    }
}

impl From<PromotionDiscount> for DiscountBody {
    fn from(discount: PromotionDiscount) -> Self {
        match discount {
            PromotionDiscount::PercentageOff {
                percentage,
                max_discount,
            } => Self::Percentage {
                percentage,
                max_discount,
            },
            PromotionDiscount::AmountOff { amount } => Self::Fixed { amount },
            PromotionDiscount::ShippingOff { amount } => Self::Shipping { amount },
        }
    }
}

const fn active_by_default() -> bool {
    true
}

/// Editable promotion fields
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
pub(crate) struct PromotionDefinitionRequest {
    /// Code customers type; stored trimmed and upper-cased
    pub code: String,

    pub discount: DiscountBody,

    /// Tier a customer must hold
    #[serde(default)]
    pub membership: Option<MembershipTierBody>,

    /// Minimum order total, in minor units
    #[serde(default)]
    pub min_order_value: u64,

    /// Redemption cap; 0 means unlimited
    #[serde(default)]
    pub max_uses: u64,

    /// Products the promotion is restricted to; empty means all
    #[serde(default)]
    pub applicable_products: Vec<Uuid>,

    /// RFC 3339 instant the promotion starts
    #[serde(default)]
    pub starts_at: Option<String>,

    /// RFC 3339 instant the promotion ends
    #[serde(default)]
    pub ends_at: Option<String>,

    #[serde(default = "active_by_default")]
    pub is_active: bool,
}

fn parse_instant(
    field: &'static str,
    value: Option<String>,
) -> Result<Option<Timestamp>, InvalidPromotionRequest> {
    value
        .map(|value| value.parse::<Timestamp>())
        .transpose()
        .map_err(|source| InvalidPromotionRequest::Timestamp { field, source })
}

impl TryFrom<PromotionDefinitionRequest> for PromotionDefinition {
    type Error = InvalidPromotionRequest;

    fn try_from(request: PromotionDefinitionRequest) -> Result<Self, Self::Error> {
        Ok(Self {
            code: PromotionCode::parse(&request.code)?,
            discount: request.discount.into(),
            membership: request.membership.map(Into::into),
            min_order_value: request.min_order_value,
            max_uses: request.max_uses,
            applicable_products: request
                .applicable_products
                .into_iter()
                .map(ProductUuid::from_uuid)
                .collect(),
            starts_at: parse_instant("starts_at", request.starts_at)?,
            ends_at: parse_instant("ends_at", request.ends_at)?,
            is_active: request.is_active,
        })
    }
}

/// Create Promotion Request
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
pub(crate) struct CreatePromotionRequest {
    pub uuid: Uuid,

    #[serde(flatten)]
    pub definition: PromotionDefinitionRequest,
}

impl TryFrom<CreatePromotionRequest> for NewPromotion {
    type Error = InvalidPromotionRequest;

    fn try_from(request: CreatePromotionRequest) -> Result<Self, Self::Error> {
        Ok(Self {
            uuid: PromotionUuid::from_uuid(request.uuid),
            definition: request.definition.try_into()?,
        })
    }
}

const fn one() -> u32 {
    1
}

/// Order line
///
/// Lines naming a variant are resolved to the variant's product; `product` is
/// only read when `variant` is absent.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
pub(crate) struct LineItemRequest {
    #[serde(default)]
    pub variant: Option<Uuid>,

    #[serde(default)]
    pub product: Option<Uuid>,

    #[serde(default = "one")]
    pub quantity: u32,
}

/// Validate Promotion Request
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
pub(crate) struct ValidatePromotionRequest {
    /// Code as typed by the customer
    pub code: String,

    /// Order total, in minor units
    pub order_total: u64,

    /// Signed-in customer, if any
    #[serde(default)]
    pub customer: Option<Uuid>,

    #[serde(default)]
    pub items: Vec<LineItemRequest>,
}

impl TryFrom<ValidatePromotionRequest> for ValidatePromotion {
    type Error = InvalidPromotionRequest;

    fn try_from(request: ValidatePromotionRequest) -> Result<Self, Self::Error> {
        let items = request
            .items
            .into_iter()
            .enumerate()
            .map(|(index, line)| {
                let item = match (line.variant, line.product) {
                    (Some(variant), _) => ItemRef::Variant(VariantUuid::from_uuid(variant)),
                    (None, Some(product)) => ItemRef::Product(ProductUuid::from_uuid(product)),
                    (None, None) => return Err(InvalidPromotionRequest::EmptyLineItem { index }),
                };

                Ok(LineItem {
                    item,
                    quantity: line.quantity,
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            code: request.code,
            order_total: request.order_total,
            customer: request.customer.map(CustomerUuid::from_uuid),
            items,
        })
    }
}
