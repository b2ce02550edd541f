//! Test Helpers

use std::str::FromStr;

use rust_decimal::Decimal;

use crate::domain::commission_rates::data::NewCommissionRate;

/// Build a commission rate payload with a generated description.
pub(crate) fn new_rate(name: &str, fee: &str) -> NewCommissionRate {
    NewCommissionRate {
        name: name.to_string(),
        fee: Decimal::from_str(fee).expect("test fee should be a decimal"),
        description: format!("{name} commission rate"),
    }
}
