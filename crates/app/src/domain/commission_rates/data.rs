//! Commission Rates Data

use rust_decimal::Decimal;

/// New Commission Rate Data
///
/// Built by [`CommissionRateInput::validate`](super::validation::CommissionRateInput::validate),
/// so every field already satisfies the shape rules.
#[derive(Debug, Clone, PartialEq)]
pub struct NewCommissionRate {
    /// Trimmed display name.
    pub name: String,

    /// Non-negative fee.
    pub fee: Decimal,

    /// Trimmed description.
    pub description: String,
}

/// Commission Rate Update Data
///
/// Updates replace all three editable fields at once.
pub type CommissionRateUpdate = NewCommissionRate;
