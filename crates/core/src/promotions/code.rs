//! Promotion Codes

use std::fmt;

use thiserror::Error;

/// Longest code accepted, in characters.
pub const MAX_CODE_LENGTH: usize = 64;

/// Reasons a code cannot be used.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PromotionCodeError {
    /// Nothing but whitespace.
    #[error("promotion code is empty")]
    Empty,

    /// Longer than [`MAX_CODE_LENGTH`].
    #[error("promotion code exceeds {MAX_CODE_LENGTH} characters")]
    TooLong,

    /// Contains whitespace or control characters.
    #[error("promotion code contains invalid characters")]
    InvalidCharacters,
}

/// A promotion code in canonical (trimmed, upper-case) form.
///
/// Codes are matched case-insensitively, so two codes that differ only by case
/// normalise to the same value.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PromotionCode(String);

impl PromotionCode {
    /// Normalise raw input into a code.
    ///
    /// # Errors
    ///
    /// Returns a [`PromotionCodeError`] if the trimmed input is empty, too long,
    /// or contains whitespace/control characters.
    pub fn parse(raw: &str) -> Result<Self, PromotionCodeError> {
        let trimmed = raw.trim();

        if trimmed.is_empty() {
            return Err(PromotionCodeError::Empty);
        }

        if trimmed.chars().count() > MAX_CODE_LENGTH {
            return Err(PromotionCodeError::TooLong);
        }

        if trimmed
            .chars()
            .any(|c| c.is_whitespace() || c.is_control())
        {
            return Err(PromotionCodeError::InvalidCharacters);
        }

        Ok(Self(trimmed.to_uppercase()))
    }

    /// Canonical text.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Take the canonical text.
    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for PromotionCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
