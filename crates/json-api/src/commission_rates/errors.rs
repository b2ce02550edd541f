//! Commission Rate Errors

use salvo::http::StatusError;
use tracing::error;

use commissions_app::domain::commission_rates::{
    CommissionRatesServiceError, records::CommissionRateUuid, validation::ValidationError,
};

pub(crate) fn into_status_error(error: CommissionRatesServiceError) -> StatusError {
    match error {
        CommissionRatesServiceError::AlreadyExists => {
            StatusError::conflict().brief("Commission rate name already exists")
        }
        CommissionRatesServiceError::MissingRequiredData
        | CommissionRatesServiceError::InvalidData => {
            StatusError::bad_request().brief("Invalid commission rate payload")
        }
        CommissionRatesServiceError::Sql(source) => {
            error!("commission rate storage failure: {source}");

            StatusError::internal_server_error()
        }
        CommissionRatesServiceError::NotFound => {
            StatusError::not_found().brief("Commission rate not found")
        }
    }
}

/// Like [`into_status_error`], naming the rate in the not-found brief.
pub(crate) fn into_status_error_for(
    rate: CommissionRateUuid,
) -> impl FnOnce(CommissionRatesServiceError) -> StatusError {
    move |error| match error {
        CommissionRatesServiceError::NotFound => {
            StatusError::not_found().brief(format!("Commission rate {rate} not found"))
        }
        other => into_status_error(other),
    }
}

pub(crate) fn validation_status_error(error: ValidationError) -> StatusError {
    StatusError::bad_request().brief(format!("Invalid {}: {error}", error.field()))
}
