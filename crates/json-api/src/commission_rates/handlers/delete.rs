//! Delete Commission Rate Handler

use std::sync::Arc;

use salvo::{oapi::extract::PathParam, prelude::*};
use uuid::Uuid;

use crate::{commission_rates::errors::into_status_error_for, extensions::*, state::State};

/// Delete Commission Rate Handler
///
/// Soft-deletes the rate. Deleting an already deleted rate succeeds.
#[endpoint(
    tags("commission-rates"),
    summary = "Delete Commission Rate",
    responses(
        (status_code = StatusCode::OK, description = "Commission rate deleted"),
        (status_code = StatusCode::NOT_FOUND, description = "Commission rate not found"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    uuid: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<StatusCode, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let rate = uuid.into_inner().into();

    state
        .app
        .commission_rates
        .delete_commission_rate(rate)
        .await
        .map_err(into_status_error_for(rate))?;

    Ok(StatusCode::OK)
}
