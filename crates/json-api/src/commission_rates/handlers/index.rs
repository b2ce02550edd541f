//! Commission Rate Index Handler

use std::sync::Arc;

use salvo::prelude::*;

use commissions_app::domain::commission_rates::query::ListingQuery;

use crate::{
    commission_rates::{errors::into_status_error, models::CommissionRatesResponse},
    extensions::*,
    state::State,
};

/// Commission Rate Index Handler
///
/// Returns one page of commission rates. Accepts `search`, `sortBy`, `order`,
/// `limit`, `page`, `createdAtFrom`, `createdAtTo` and `status` query
/// parameters; unrecognised values fall back to their defaults.
#[endpoint(
    tags("commission-rates"),
    summary = "List Commission Rates",
    responses(
        (status_code = StatusCode::OK, description = "Page of commission rates"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    req: &mut Request,
    depot: &mut Depot,
) -> Result<Json<CommissionRatesResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let listing = ListingQuery::compile(req.listing_params());

    let page = state
        .app
        .commission_rates
        .list_commission_rates(listing)
        .await
        .map_err(into_status_error)?;

    Ok(Json(page.into()))
}
