//! Commission Rates

pub mod data;
pub mod errors;
pub mod query;
pub mod records;
mod repository;
pub mod service;
pub mod validation;

pub use errors::CommissionRatesServiceError;
pub use service::*;
