//! Commissions Domain Concerns

pub mod commission_rates;
