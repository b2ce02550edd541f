//! Test helpers.

use std::sync::Arc;

use jiff::Timestamp;
use rust_decimal::Decimal;
use salvo::{affix_state::inject, prelude::*};

use commissions_app::{
    context::AppContext,
    domain::commission_rates::{
        MockCommissionRatesService,
        records::{CommissionRateRecord, CommissionRateUuid},
    },
};

use crate::state::State;

pub(crate) fn make_rate(uuid: CommissionRateUuid, name: &str) -> CommissionRateRecord {
    CommissionRateRecord {
        uuid,
        name: name.to_string(),
        fee: Decimal::new(1250, 2),
        description: format!("{name} partner rate"),
        is_deleted: false,
        created_at: Timestamp::UNIX_EPOCH,
        updated_at: Timestamp::UNIX_EPOCH,
    }
}

pub(crate) fn state_with_commission_rates(
    commission_rates: MockCommissionRatesService,
) -> Arc<State> {
    State::from_app_context(AppContext {
        commission_rates: Arc::new(commission_rates),
    })
}

pub(crate) fn commission_rates_service(
    commission_rates: MockCommissionRatesService,
    route: Router,
) -> Service {
    Service::new(
        Router::new()
            .hoop(inject(state_with_commission_rates(commission_rates)))
            .push(route),
    )
}
