//! Listing query string extraction.

use salvo::Request;

use commissions_app::domain::commission_rates::query::ListingParams;

/// Collect the raw listing parameters from the query string.
///
/// Values stay untyped so malformed numbers and dates fall back to their
/// defaults instead of rejecting the request.
pub(crate) trait ListingParamsExt {
    fn listing_params(&self) -> ListingParams;
}

impl ListingParamsExt for Request {
    fn listing_params(&self) -> ListingParams {
        ListingParams {
            search: self.query::<String>("search"),
            sort_by: self.query::<String>("sortBy"),
            order: self.query::<String>("order"),
            limit: self.query::<String>("limit"),
            page: self.query::<String>("page"),
            created_at_from: self.query::<String>("createdAtFrom"),
            created_at_to: self.query::<String>("createdAtTo"),
            status: self.query::<String>("status"),
        }
    }
}
