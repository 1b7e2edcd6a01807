//! Membership Tiers

use std::{fmt, str::FromStr};

use thiserror::Error;

use crate::uuids::TypedUuid;

/// Marker for customer identifiers.
#[derive(Debug)]
pub enum Customer {}

/// Customer UUID
pub type CustomerUuid = TypedUuid<Customer>;

/// Customer loyalty level, assigned from accumulated points elsewhere in the
/// storefront.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MembershipTier {
    /// Entry tier.
    Silver,

    /// Middle tier.
    Gold,

    /// Top tier.
    Diamond,
}

impl MembershipTier {
    /// Stored and wire representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Silver => "silver",
            Self::Gold => "gold",
            Self::Diamond => "diamond",
        }
    }
}

impl fmt::Display for MembershipTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Unrecognised membership tier name.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown membership tier: {0}")]
pub struct UnknownMembershipTier(pub String);

impl FromStr for MembershipTier {
    type Err = UnknownMembershipTier;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "silver" => Ok(Self::Silver),
            "gold" => Ok(Self::Gold),
            "diamond" => Ok(Self::Diamond),
            _ => Err(UnknownMembershipTier(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    #[test]
    fn parses_case_insensitively() -> TestResult {
        assert_eq!("Gold".parse::<MembershipTier>()?, MembershipTier::Gold);
        assert_eq!(" diamond ".parse::<MembershipTier>()?, MembershipTier::Diamond);

        Ok(())
    }

    #[test]
    fn rejects_unknown_tiers() {
        assert_eq!(
            "platinum".parse::<MembershipTier>(),
            Err(UnknownMembershipTier("platinum".to_string()))
        );
    }
}
