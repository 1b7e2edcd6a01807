//! Promotion validation outcome carried from the handler to the request span.

use salvo::prelude::Depot;
use storefront::promotions::{code::PromotionCode, evaluation::Validation};
use tracing::Span;

use crate::observability::metrics;

/// What a validate request decided, kept in the depot until the request
/// span closes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct PromotionValidationOutcome {
    code: Option<String>,
    reason: Option<&'static str>,
}

impl PromotionValidationOutcome {
    fn new(code: Option<&PromotionCode>, validation: &Validation) -> Self {
        let reason = match validation {
            Validation::Eligible(_) => None,
            Validation::Ineligible(ineligible) => Some(ineligible.reason()),
        };

        Self {
            code: code.map(ToString::to_string),
            reason,
        }
    }

    fn outcome(&self) -> &'static str {
        if self.reason.is_some() {
            "ineligible"
        } else {
            "eligible"
        }
    }

    pub(super) fn record_on(&self, span: &Span) {
        span.record("promotion.outcome", self.outcome());

        if let Some(code) = &self.code {
            span.record("promotion.code", code.as_str());
        }

        if let Some(reason) = self.reason {
            span.record("promotion.reason", reason);
        }
    }
}

/// Count a validation and attach its outcome to the surrounding request span.
///
/// `code` is `None` when the submitted code was blank.
pub(crate) fn record_promotion_validation(
    depot: &mut Depot,
    code: Option<&PromotionCode>,
    validation: &Validation,
) {
    let outcome = PromotionValidationOutcome::new(code, validation);

    metrics::observe_promotion_validation(outcome.reason);

    depot.inject(outcome);
}

pub(super) fn recorded_outcome(depot: &Depot) -> Option<&PromotionValidationOutcome> {
    depot.obtain::<PromotionValidationOutcome>().ok()
}
