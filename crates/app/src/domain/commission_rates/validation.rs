//! Commission rate input validation.
//!
//! Pure normalizers applied to untrusted input before it reaches the
//! service. Each returns the cleaned value or the first rule it breaks.

use std::str::FromStr;

use rust_decimal::Decimal;
use thiserror::Error;

use crate::domain::commission_rates::data::NewCommissionRate;

/// Maximum length of a name, in characters.
pub const NAME_MAX_CHARS: usize = 32;

/// Maximum length of a description, in characters.
pub const DESCRIPTION_MAX_CHARS: usize = 3000;

/// Punctuation allowed in names besides letters, digits and spaces.
const NAME_PUNCTUATION: &[char] = &['-', '_', '.', ',', '&', '\'', '(', ')', '/', '%'];

/// Marketing phrases names may not contain, matched as whole words.
const BLOCKED_NAME_PHRASES: &[&str] = &[
    "free",
    "best",
    "cheapest",
    "lowest",
    "guaranteed",
    "no fee",
    "no fees",
    "zero fee",
    "limited time",
];

/// First rule a commission rate field breaks.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// Name is empty after trimming.
    #[error("name is required")]
    NameRequired,

    /// Name exceeds [`NAME_MAX_CHARS`].
    #[error("name must be at most {} characters", NAME_MAX_CHARS)]
    NameTooLong,

    /// Name uses a character outside the allowed set.
    #[error("name contains unsupported character {0:?}")]
    NameInvalidCharacter(char),

    /// Name contains a blocked marketing phrase.
    #[error("name must not contain promotional phrasing ({0:?})")]
    NamePromotional(&'static str),

    /// Fee is empty after trimming.
    #[error("fee is required")]
    FeeRequired,

    /// Fee does not parse as a decimal.
    #[error("fee must be a decimal number")]
    FeeNotDecimal,

    /// Fee is below zero.
    #[error("fee must not be negative")]
    FeeNegative,

    /// Description is empty after trimming.
    #[error("description is required")]
    DescriptionRequired,

    /// Description exceeds [`DESCRIPTION_MAX_CHARS`].
    #[error("description must be at most {} characters", DESCRIPTION_MAX_CHARS)]
    DescriptionTooLong,

    /// Description contains a control character other than a line break or tab.
    #[error("description contains unsupported character {0:?}")]
    DescriptionInvalidCharacter(char),
}

impl ValidationError {
    /// Name of the input field the error refers to.
    #[must_use]
    pub fn field(&self) -> &'static str {
        match self {
            Self::NameRequired
            | Self::NameTooLong
            | Self::NameInvalidCharacter(_)
            | Self::NamePromotional(_) => "name",
            Self::FeeRequired | Self::FeeNotDecimal | Self::FeeNegative => "fee",
            Self::DescriptionRequired
            | Self::DescriptionTooLong
            | Self::DescriptionInvalidCharacter(_) => "description",
        }
    }
}

/// Raw, unvalidated commission rate fields.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommissionRateInput {
    /// Display name, checked by [`normalize_name`].
    pub name: String,

    /// Decimal fee as text, checked by [`parse_fee`].
    pub fee: String,

    /// Description, checked by [`normalize_description`].
    pub description: String,
}

impl CommissionRateInput {
    /// Validate every field, reporting the first failure in field order.
    ///
    /// # Errors
    ///
    /// Returns a [`ValidationError`] naming the offending field.
    pub fn validate(self) -> Result<NewCommissionRate, ValidationError> {
        Ok(NewCommissionRate {
            name: normalize_name(&self.name)?,
            fee: parse_fee(&self.fee)?,
            description: normalize_description(&self.description)?,
        })
    }
}

/// Trim and check a commission rate name.
///
/// # Errors
///
/// Returns an error when the name is empty, too long, uses characters outside
/// the allowed set or contains a blocked marketing phrase.
pub fn normalize_name(raw: &str) -> Result<String, ValidationError> {
    let name = raw.trim();

    if name.is_empty() {
        return Err(ValidationError::NameRequired);
    }

    if name.chars().count() > NAME_MAX_CHARS {
        return Err(ValidationError::NameTooLong);
    }

    if let Some(invalid) = name.chars().find(|c| !is_name_char(*c)) {
        return Err(ValidationError::NameInvalidCharacter(invalid));
    }

    if let Some(phrase) = find_blocked_phrase(name) {
        return Err(ValidationError::NamePromotional(phrase));
    }

    Ok(name.to_string())
}

/// Parse a non-negative decimal fee.
///
/// # Errors
///
/// Returns an error when the fee is empty, not a decimal, or negative.
pub fn parse_fee(raw: &str) -> Result<Decimal, ValidationError> {
    let raw = raw.trim();

    if raw.is_empty() {
        return Err(ValidationError::FeeRequired);
    }

    let fee = Decimal::from_str(raw).map_err(|_source| ValidationError::FeeNotDecimal)?;

    if fee.is_sign_negative() && !fee.is_zero() {
        return Err(ValidationError::FeeNegative);
    }

    // "-0" parses with a negative sign.
    Ok(fee.abs())
}

/// Trim and check a description.
///
/// # Errors
///
/// Returns an error when the description is empty, too long, or contains
/// control characters other than line breaks and tabs.
pub fn normalize_description(raw: &str) -> Result<String, ValidationError> {
    let description = raw.trim();

    if description.is_empty() {
        return Err(ValidationError::DescriptionRequired);
    }

    if description.chars().count() > DESCRIPTION_MAX_CHARS {
        return Err(ValidationError::DescriptionTooLong);
    }

    if let Some(invalid) = description.chars().find(|c| !is_description_char(*c)) {
        return Err(ValidationError::DescriptionInvalidCharacter(invalid));
    }

    Ok(description.to_string())
}

fn is_name_char(c: char) -> bool {
    c.is_alphanumeric() || c == ' ' || NAME_PUNCTUATION.contains(&c)
}

fn is_description_char(c: char) -> bool {
    !c.is_control() || matches!(c, '\n' | '\r' | '\t')
}

fn find_blocked_phrase(name: &str) -> Option<&'static str> {
    let lowered = name.to_lowercase();
    let words: Vec<&str> = lowered
        .split(|c: char| !c.is_alphanumeric())
        .filter(|word| !word.is_empty())
        .collect();

    BLOCKED_NAME_PHRASES.iter().copied().find(|phrase| {
        let phrase_words: Vec<&str> = phrase.split(' ').collect();

        words
            .windows(phrase_words.len())
            .any(|window| window == phrase_words.as_slice())
    })
}
