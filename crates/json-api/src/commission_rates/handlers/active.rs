//! Active Commission Rates Handler

use std::sync::Arc;

use salvo::prelude::*;

use crate::{
    commission_rates::{errors::into_status_error, models::ActiveCommissionRatesResponse},
    extensions::*,
    state::State,
};

/// Active Commission Rates Handler
///
/// Returns every commission rate that has not been soft-deleted.
#[endpoint(
    tags("commission-rates"),
    summary = "List Active Commission Rates",
    responses(
        (status_code = StatusCode::OK, description = "Active commission rates"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    depot: &mut Depot,
) -> Result<Json<ActiveCommissionRatesResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let rates = state
        .app
        .commission_rates
        .list_active_commission_rates()
        .await
        .map_err(into_status_error)?;

    Ok(Json(ActiveCommissionRatesResponse {
        items: rates.into_iter().map(Into::into).collect(),
    }))
}
