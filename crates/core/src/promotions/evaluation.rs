//! Promotion Evaluation
//!
//! Decides whether a promotion code can be applied to an order and, if so, how
//! much it takes off. Eligibility is checked in a fixed order and the first
//! failing check determines the reason reported to the customer:
//!
//! 1. the code exists
//! 2. the promotion is switched on
//! 3. it has started
//! 4. it has not ended
//! 5. it has redemptions left
//! 6. the order meets the minimum total
//! 7. the order contains an applicable product (restricted promotions only)
//! 8. the requester holds the required membership tier (tiered promotions only)
//!
//! Nothing here performs I/O. [`Evaluation`] walks the checks and stops to ask
//! for the products or the requester only when the promotion restricts on
//! them, so callers can fetch those facts on demand. [`evaluate`] drives the
//! same walk with facts that have already been gathered.

use jiff::Timestamp;
use rust_decimal::{Decimal, RoundingStrategy, prelude::ToPrimitive};
use thiserror::Error;

use crate::{
    membership::MembershipTier,
    money::StoreCurrency,
    products::ProductSet,
    promotions::{DiscountKind, Promotion, PromotionDiscount, PromotionUuid},
};

/// Largest percentage a promotion may take off.
pub const MAX_PERCENTAGE: u16 = 100;

/// Malformed promotion data discovered while computing a discount.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum EvaluationError {
    /// A percentage discount above [`MAX_PERCENTAGE`].
    #[error("percentage discount of {0}% is out of range")]
    PercentageOutOfRange(u16),

    /// The computed amount cannot be represented.
    #[error("discount amount overflowed")]
    Overflow,
}

/// Who is asking to use the promotion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Requester {
    /// Not signed in.
    Anonymous,

    /// A signed-in customer and their stored tier, if they have one.
    ///
    /// A customer whose record could not be found is represented with no tier.
    Customer {
        /// Stored membership tier.
        tier: Option<MembershipTier>,
    },
}

/// Everything about an order the evaluator needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderFacts {
    /// Order total in minor units.
    pub order_total: u64,

    /// Products the order's items resolved to.
    pub products: ProductSet,

    /// Who is placing the order.
    pub requester: Requester,
}

/// Why a promotion cannot be applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ineligible {
    /// No promotion has this code.
    CodeNotFound,

    /// Switched off by an administrator.
    PromotionInactive,

    /// Start date is in the future.
    NotStartedYet,

    /// End date has passed.
    Expired,

    /// Redemption cap reached.
    UsageLimitReached,

    /// Order total is below the promotion's minimum.
    BelowMinimumOrder {
        /// Required minimum, in minor units.
        minimum: u64,
    },

    /// None of the ordered products are covered by the promotion.
    ProductNotApplicable,

    /// A membership tier is required but the requester is not signed in.
    MembershipRequired {
        /// Tier the promotion is reserved for.
        tier: MembershipTier,
    },

    /// The signed-in customer does not hold the required tier.
    WrongMembershipTier {
        /// Tier the promotion is reserved for.
        required: MembershipTier,
    },
}

impl Ineligible {
    /// Stable machine-readable reason.
    #[must_use]
    pub const fn reason(&self) -> &'static str {
        match self {
            Self::CodeNotFound => "code_not_found",
            Self::PromotionInactive => "promotion_inactive",
            Self::NotStartedYet => "not_started_yet",
            Self::Expired => "expired",
            Self::UsageLimitReached => "usage_limit_reached",
            Self::BelowMinimumOrder { .. } => "below_minimum_order",
            Self::ProductNotApplicable => "product_not_applicable",
            Self::MembershipRequired { .. } => "membership_required",
            Self::WrongMembershipTier { .. } => "wrong_membership_tier",
        }
    }

    /// Customer-facing message, with amounts formatted in `currency`.
    #[must_use]
    pub fn message(&self, currency: &StoreCurrency) -> String {
        match self {
            Self::CodeNotFound => "Promotion code does not exist".to_string(),
            Self::PromotionInactive => "Promotion is not active".to_string(),
            Self::NotStartedYet => "Promotion has not started yet".to_string(),
            Self::Expired => "Promotion has expired".to_string(),
            Self::UsageLimitReached => "Promotion has reached its usage limit".to_string(),
            Self::BelowMinimumOrder { minimum } => format!(
                "Order total must be at least {} to use this promotion",
                currency.format(*minimum)
            ),
            Self::ProductNotApplicable => {
                "Promotion does not apply to any product in this order".to_string()
            }
            Self::MembershipRequired { tier } => {
                format!("Please sign in to use this promotion for {tier} members")
            }
            Self::WrongMembershipTier { required } => {
                format!("This promotion is only available to {required} members")
            }
        }
    }
}

/// The discount granted by an eligible promotion.
///
/// At most one of `discount_amount` and `shipping_discount` is non-zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AppliedDiscount {
    /// Promotion that granted it.
    pub promotion: PromotionUuid,

    /// Kind of discount.
    pub kind: DiscountKind,

    /// Amount off the order, in minor units.
    pub discount_amount: u64,

    /// Amount off shipping, in minor units.
    pub shipping_discount: u64,
}

/// Outcome of validating a promotion code against an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Validation {
    /// The promotion applies.
    Eligible(AppliedDiscount),

    /// The promotion does not apply, and why.
    Ineligible(Ineligible),
}

impl Validation {
    /// Whether the promotion applies.
    #[must_use]
    pub const fn is_eligible(&self) -> bool {
        matches!(self, Self::Eligible(_))
    }
}

/// Checks 2 to 6: activation, validity window, usage cap and minimum total.
///
/// # Errors
///
/// Returns the first [`Ineligible`] reason that applies.
pub(crate) fn check_availability(
    promotion: &Promotion,
    order_total: u64,
    now: Timestamp,
) -> Result<(), Ineligible> {
    if !promotion.is_active {
        return Err(Ineligible::PromotionInactive);
    }

    if promotion.is_pending_at(now) {
        return Err(Ineligible::NotStartedYet);
    }

    if promotion.has_ended_at(now) {
        return Err(Ineligible::Expired);
    }

    if promotion.is_exhausted() {
        return Err(Ineligible::UsageLimitReached);
    }

    if order_total < promotion.min_order_value {
        return Err(Ineligible::BelowMinimumOrder {
            minimum: promotion.min_order_value,
        });
    }

    Ok(())
}

/// Check 7: a restricted promotion needs at least one applicable product.
///
/// Items whose product could not be resolved are simply absent from
/// `products`; they neither match nor fail the check on their own.
///
/// # Errors
///
/// Returns [`Ineligible::ProductNotApplicable`] when the sets are disjoint.
pub(crate) fn check_products(promotion: &Promotion, products: &ProductSet) -> Result<(), Ineligible> {
    if !promotion.is_product_restricted() {
        return Ok(());
    }

    if promotion.applicable_products.intersects(products) {
        Ok(())
    } else {
        Err(Ineligible::ProductNotApplicable)
    }
}

/// Check 8: a tiered promotion needs a signed-in customer holding that tier.
///
/// # Errors
///
/// Returns [`Ineligible::MembershipRequired`] for anonymous requesters and
/// [`Ineligible::WrongMembershipTier`] for customers with any other tier.
pub(crate) fn check_membership(promotion: &Promotion, requester: &Requester) -> Result<(), Ineligible> {
    let Some(required) = promotion.membership else {
        return Ok(());
    };

    match requester {
        Requester::Anonymous => Err(Ineligible::MembershipRequired { tier: required }),
        Requester::Customer { tier } if *tier == Some(required) => Ok(()),
        Requester::Customer { .. } => Err(Ineligible::WrongMembershipTier { required }),
    }
}

/// Compute the discount an eligible promotion grants on `order_total`.
///
/// Percentage discounts are rounded half away from zero to the minor unit and
/// capped at `max_discount`. Fixed discounts are returned as configured, even
/// when they exceed the order total; callers settling the order decide how to
/// treat the excess.
///
/// # Errors
///
/// Returns an [`EvaluationError`] for percentages above [`MAX_PERCENTAGE`].
pub(crate) fn compute_discount(
    promotion: &Promotion,
    order_total: u64,
) -> Result<AppliedDiscount, EvaluationError> {
    let (discount_amount, shipping_discount) = match promotion.discount {
        PromotionDiscount::PercentageOff {
            percentage,
            max_discount,
        } => {
            let amount = percentage_of(order_total, percentage)?;

            let capped = max_discount.map_or(amount, |max_discount| amount.min(max_discount));

            (capped, 0)
        }
        PromotionDiscount::AmountOff { amount } => (amount, 0),
        PromotionDiscount::ShippingOff { amount } => (0, amount),
    };

    Ok(AppliedDiscount {
        promotion: promotion.uuid,
        kind: promotion.discount.kind(),
        discount_amount,
        shipping_discount,
    })
}

/// A fact the evaluator needs before it can run the next check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Needed {
    /// Products the order's items resolve to.
    Products,

    /// Who is placing the order.
    Requester,
}

/// Result of advancing an [`Evaluation`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// Provide this fact and step again.
    Needs(Needed),

    /// Evaluation finished.
    Done(Validation),
}

/// Check sequence for one promotion against one order.
///
/// Each call to [`Evaluation::step`] reruns the checks from the top using the
/// facts provided so far and stops at the first one that is missing. A check
/// that fails before a fact is needed finishes the evaluation without asking
/// for it.
#[derive(Debug, Clone)]
pub struct Evaluation<'a> {
    promotion: Option<&'a Promotion>,
    order_total: u64,
    now: Timestamp,
    products: Option<ProductSet>,
    requester: Option<Requester>,
}

impl<'a> Evaluation<'a> {
    /// Start evaluating `promotion` (`None` when no promotion matched the
    /// submitted code) against an order of `order_total` at `now`.
    #[must_use]
    pub const fn new(promotion: Option<&'a Promotion>, order_total: u64, now: Timestamp) -> Self {
        Self {
            promotion,
            order_total,
            now,
            products: None,
            requester: None,
        }
    }

    /// Supply the products the order's items resolved to.
    pub fn provide_products(&mut self, products: ProductSet) {
        self.products = Some(products);
    }

    /// Supply who is placing the order.
    pub fn provide_requester(&mut self, requester: Requester) {
        self.requester = Some(requester);
    }

    /// Run the checks as far as the provided facts allow.
    ///
    /// # Errors
    ///
    /// Returns an [`EvaluationError`] only for malformed promotion data.
    pub fn step(&self) -> Result<Step, EvaluationError> {
        let Some(promotion) = self.promotion else {
            return Ok(Step::Done(Validation::Ineligible(Ineligible::CodeNotFound)));
        };

        if let Err(reason) = check_availability(promotion, self.order_total, self.now) {
            return Ok(Step::Done(Validation::Ineligible(reason)));
        }

        if promotion.is_product_restricted() {
            let Some(products) = &self.products else {
                return Ok(Step::Needs(Needed::Products));
            };

            if let Err(reason) = check_products(promotion, products) {
                return Ok(Step::Done(Validation::Ineligible(reason)));
            }
        }

        if promotion.membership.is_some() {
            let Some(requester) = &self.requester else {
                return Ok(Step::Needs(Needed::Requester));
            };

            if let Err(reason) = check_membership(promotion, requester) {
                return Ok(Step::Done(Validation::Ineligible(reason)));
            }
        }

        let applied = compute_discount(promotion, self.order_total)?;

        Ok(Step::Done(Validation::Eligible(applied)))
    }
}

/// Run every check in order against facts gathered up front.
///
/// `promotion` is `None` when no promotion matched the submitted code.
///
/// # Errors
///
/// Returns an [`EvaluationError`] only for malformed promotion data; every
/// eligibility failure is reported as [`Validation::Ineligible`].
pub fn evaluate(
    promotion: Option<&Promotion>,
    facts: &OrderFacts,
    now: Timestamp,
) -> Result<Validation, EvaluationError> {
    let mut evaluation = Evaluation::new(promotion, facts.order_total, now);

    loop {
        match evaluation.step()? {
            Step::Done(validation) => return Ok(validation),
            Step::Needs(Needed::Products) => evaluation.provide_products(facts.products.clone()),
            Step::Needs(Needed::Requester) => evaluation.provide_requester(facts.requester),
        }
    }
}

fn percentage_of(total: u64, percentage: u16) -> Result<u64, EvaluationError> {
    if percentage > MAX_PERCENTAGE {
        return Err(EvaluationError::PercentageOutOfRange(percentage));
    }

    Decimal::from(total)
        .checked_mul(Decimal::from(percentage))
        .and_then(|scaled| scaled.checked_div(Decimal::ONE_HUNDRED))
        .map(|amount| amount.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero))
        .and_then(|amount| amount.to_u64())
        .ok_or(EvaluationError::Overflow)
}
