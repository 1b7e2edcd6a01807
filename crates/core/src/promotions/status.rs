//! Promotion Status
//!
//! Status is never stored; it is derived from the activation flag, the
//! validity window and the redemption counters at the moment it is asked for.

use std::fmt;

use jiff::Timestamp;

use crate::promotions::Promotion;

/// Derived promotion status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PromotionStatus {
    /// Switched on, started, not ended and not exhausted.
    Active,

    /// Switched off, or not started yet.
    Inactive,

    /// Ended, or redemption cap reached.
    Expired,
}

impl PromotionStatus {
    /// Wire representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Inactive => "inactive",
            Self::Expired => "expired",
        }
    }
}

impl fmt::Display for PromotionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Promotion {
    /// Whether the promotion has not reached its start date at `now`.
    #[must_use]
    pub fn is_pending_at(&self, now: Timestamp) -> bool {
        self.starts_at.is_some_and(|starts_at| starts_at > now)
    }

    /// Whether the promotion's end date has passed at `now`.
    #[must_use]
    pub fn has_ended_at(&self, now: Timestamp) -> bool {
        self.ends_at.is_some_and(|ends_at| ends_at < now)
    }

    /// Status of the promotion at `now`.
    ///
    /// Inactivity wins over expiry: a switched-off promotion whose end date has
    /// also passed reports [`PromotionStatus::Inactive`].
    #[must_use]
    pub fn status_at(&self, now: Timestamp) -> PromotionStatus {
        if !self.is_active || self.is_pending_at(now) {
            return PromotionStatus::Inactive;
        }

        if self.has_ended_at(now) || self.is_exhausted() {
            return PromotionStatus::Expired;
        }

        PromotionStatus::Active
    }
}
