//! Commission Rate Models

use salvo::oapi::ToSchema;
use serde::{Deserialize, Deserializer, Serialize};
use uuid::Uuid;

use commissions_app::domain::commission_rates::{
    query::{CommissionRatesPage, ListingMeta},
    records::{ActiveCommissionRateRecord, CommissionRateRecord},
    validation::CommissionRateInput,
};

/// Commission Rate Request
///
/// Shared by create and update. Missing fields arrive empty and are reported
/// by validation.
#[derive(Debug, Default, Serialize, Deserialize, ToSchema)]
#[serde(default)]
pub(crate) struct CommissionRateRequest {
    /// Display name, unique across all rates
    pub name: String,

    /// Non-negative decimal fee, as a string or a number
    #[serde(deserialize_with = "deserialize_fee")]
    pub fee: String,

    /// Free-form description
    pub description: String,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum FeeValue {
    Text(String),
    Number(serde_json::Number),
}

/// Accepts `"12.50"` or `12.5`; `null` reads as empty.
fn deserialize_fee<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(match Option::<FeeValue>::deserialize(deserializer)? {
        Some(FeeValue::Text(text)) => text,
        Some(FeeValue::Number(number)) => number.to_string(),
        None => String::new(),
    })
}

impl From<CommissionRateRequest> for CommissionRateInput {
    fn from(request: CommissionRateRequest) -> Self {
        CommissionRateInput {
            name: request.name,
            fee: request.fee,
            description: request.description,
        }
    }
}

/// Commission Rate Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct CommissionRateResponse {
    /// The unique identifier of the commission rate
    pub uuid: Uuid,

    pub name: String,

    /// Decimal fee, as a string
    pub fee: String,

    pub description: String,

    /// Whether the rate has been soft-deleted
    pub is_deleted: bool,

    /// The date and time the rate was created
    pub created_at: String,

    /// The date and time the rate was last updated
    pub updated_at: String,
}

impl From<CommissionRateRecord> for CommissionRateResponse {
    fn from(rate: CommissionRateRecord) -> Self {
        CommissionRateResponse {
            uuid: rate.uuid.into(),
            name: rate.name,
            fee: rate.fee.to_string(),
            description: rate.description,
            is_deleted: rate.is_deleted,
            created_at: rate.created_at.to_string(),
            updated_at: rate.updated_at.to_string(),
        }
    }
}

/// Active Commission Rate Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ActiveCommissionRateResponse {
    pub uuid: Uuid,
    pub name: String,
    pub fee: String,
    pub description: String,
    pub created_at: String,
    pub updated_at: String,
}

impl From<ActiveCommissionRateRecord> for ActiveCommissionRateResponse {
    fn from(rate: ActiveCommissionRateRecord) -> Self {
        ActiveCommissionRateResponse {
            uuid: rate.uuid.into(),
            name: rate.name,
            fee: rate.fee.to_string(),
            description: rate.description,
            created_at: rate.created_at.to_string(),
            updated_at: rate.updated_at.to_string(),
        }
    }
}

/// Paging metadata echoed back with a listing.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct MetaResponse {
    pub search: String,
    pub sort_by: String,
    pub order: String,
    pub limit: u32,

    /// The requested page, even when a later page was clamped to the last one
    pub page_current: u32,

    pub page_count: u64,
    pub created_at_from: Option<String>,
    pub created_at_to: Option<String>,
}

impl From<ListingMeta> for MetaResponse {
    fn from(meta: ListingMeta) -> Self {
        MetaResponse {
            search: meta.search,
            sort_by: meta.sort_by.as_str().to_string(),
            order: meta.order.as_str().to_string(),
            limit: meta.limit,
            page_current: meta.page_current,
            page_count: meta.page_count,
            created_at_from: meta.created_at_from,
            created_at_to: meta.created_at_to,
        }
    }
}

/// Commission Rates Listing Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CommissionRatesResponse {
    pub items: Vec<CommissionRateResponse>,
    pub meta: MetaResponse,
}

impl From<CommissionRatesPage> for CommissionRatesResponse {
    fn from(page: CommissionRatesPage) -> Self {
        CommissionRatesResponse {
            items: page.items.into_iter().map(Into::into).collect(),
            meta: page.meta.into(),
        }
    }
}

/// Active Commission Rates Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ActiveCommissionRatesResponse {
    pub items: Vec<ActiveCommissionRateResponse>,
}

/// Commission Rate Created Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CommissionRateCreatedResponse {
    /// Created commission rate UUID
    pub uuid: Uuid,
}
