//! Update Commission Rate Handler

use std::sync::Arc;

use salvo::{
    oapi::extract::{JsonBody, PathParam},
    prelude::*,
};
use uuid::Uuid;

use commissions_app::domain::commission_rates::validation::CommissionRateInput;

use crate::{
    commission_rates::{
        errors::{into_status_error_for, validation_status_error},
        models::{CommissionRateRequest, CommissionRateResponse},
    },
    extensions::*,
    state::State,
};

/// Commission Rate Update Handler
///
/// Replaces the name, fee and description. Soft-deleted rates can be edited
/// and stay deleted.
#[endpoint(
    tags("commission-rates"),
    summary = "Update Commission Rate",
    responses(
        (status_code = StatusCode::OK, description = "Commission rate updated"),
        (status_code = StatusCode::NOT_FOUND, description = "Commission rate not found"),
        (status_code = StatusCode::CONFLICT, description = "Commission rate name already exists"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    uuid: PathParam<Uuid>,
    json: JsonBody<CommissionRateRequest>,
    depot: &mut Depot,
) -> Result<Json<CommissionRateResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let rate = uuid.into_inner().into();

    let update = CommissionRateInput::from(json.into_inner())
        .validate()
        .map_err(validation_status_error)?;

    let updated = state
        .app
        .commission_rates
        .update_commission_rate(rate, update)
        .await
        .map_err(into_status_error_for(rate))?;

    Ok(Json(updated.into()))
}
