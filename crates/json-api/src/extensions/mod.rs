//! Extension traits

mod depot;
mod listing_params;
mod result;

pub(crate) use depot::DepotExt as _;
pub(crate) use listing_params::ListingParamsExt as _;
pub(crate) use result::ResultExt as _;
