//! Commission Rate Records

use jiff::Timestamp;
use rust_decimal::Decimal;

use crate::uuids::TypedUuid;

/// Commission Rate UUID
pub type CommissionRateUuid = TypedUuid<CommissionRateRecord>;

/// Commission Rate Record
#[derive(Debug, Clone, PartialEq)]
pub struct CommissionRateRecord {
    /// Unique, creation-ordered identifier.
    pub uuid: CommissionRateUuid,

    /// Display name, unique across every record including soft-deleted ones.
    pub name: String,

    /// Non-negative fee.
    pub fee: Decimal,

    /// Free-form description.
    pub description: String,

    /// Visibility flag; `true` once soft-deleted.
    pub is_deleted: bool,

    /// Creation timestamp.
    pub created_at: Timestamp,

    /// Last modification timestamp.
    pub updated_at: Timestamp,
}

impl CommissionRateRecord {
    /// Whether the record appears in the active listing.
    #[cfg(test)]
    #[must_use]
    pub(crate) fn is_active(&self) -> bool {
        !self.is_deleted
    }
}

/// Active Commission Rate Record
///
/// Projection served by the active listing. The visibility flag is not part
/// of it, every row is active by construction.
#[derive(Debug, Clone, PartialEq)]
pub struct ActiveCommissionRateRecord {
    /// Unique, creation-ordered identifier.
    pub uuid: CommissionRateUuid,

    /// Display name.
    pub name: String,

    /// Non-negative fee.
    pub fee: Decimal,

    /// Free-form description.
    pub description: String,

    /// Creation timestamp.
    pub created_at: Timestamp,

    /// Last modification timestamp.
    pub updated_at: Timestamp,
}

impl From<CommissionRateRecord> for ActiveCommissionRateRecord {
    fn from(record: CommissionRateRecord) -> Self {
        Self {
            uuid: record.uuid,
            name: record.name,
            fee: record.fee,
            description: record.description,
            created_at: record.created_at,
            updated_at: record.updated_at,
        }
    }
}
