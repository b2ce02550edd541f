//! Create Commission Rate Handler

use std::sync::Arc;

use salvo::{http::header::LOCATION, oapi::extract::JsonBody, prelude::*};

use commissions_app::domain::commission_rates::validation::CommissionRateInput;

use crate::{
    commission_rates::{
        errors::{into_status_error, validation_status_error},
        models::{CommissionRateCreatedResponse, CommissionRateRequest},
    },
    extensions::*,
    state::State,
};

/// Create Commission Rate Handler
#[endpoint(
    tags("commission-rates"),
    summary = "Create Commission Rate",
    responses(
        (status_code = StatusCode::CREATED, description = "Commission rate created"),
        (status_code = StatusCode::CONFLICT, description = "Commission rate name already exists"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<CommissionRateRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<CommissionRateCreatedResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let rate = CommissionRateInput::from(json.into_inner())
        .validate()
        .map_err(validation_status_error)?;

    let uuid = state
        .app
        .commission_rates
        .create_commission_rate(rate)
        .await
        .map_err(into_status_error)?
        .uuid;

    res.add_header(LOCATION, format!("/commission-rates/{uuid}"), true)
        .or_500("failed to set location header")?
        .status_code(StatusCode::CREATED);

    Ok(Json(CommissionRateCreatedResponse { uuid: uuid.into() }))
}
