//! App Router

use salvo::Router;

use crate::commission_rates;

pub(crate) fn app_router() -> Router {
    Router::with_path("commission-rates")
        .get(commission_rates::index::handler)
        .post(commission_rates::create::handler)
        .push(Router::with_path("active").get(commission_rates::active::handler))
        .push(
            Router::with_path("{uuid}")
                .put(commission_rates::update::handler)
                .delete(commission_rates::delete::handler)
                .push(Router::with_path("restore").post(commission_rates::restore::handler)),
        )
}

#[cfg(test)]
mod tests {
    use salvo::{
        prelude::*,
        test::{ResponseExt, TestClient},
    };
    use testresult::TestResult;

    use commissions_app::domain::commission_rates::{
        MockCommissionRatesService, records::CommissionRateUuid,
    };

    use crate::test_helpers::commission_rates_service;

    use super::*;

    #[tokio::test]
    async fn active_path_is_not_treated_as_uuid() -> TestResult {
        let mut commission_rates = MockCommissionRatesService::new();

        commission_rates
            .expect_list_active_commission_rates()
            .once()
            .return_once(|| Ok(vec![]));

        let body: serde_json::Value = TestClient::get("http://example.com/commission-rates/active")
            .send(&commission_rates_service(commission_rates, app_router()))
            .await
            .take_json()
            .await?;

        assert_eq!(body, serde_json::json!({ "items": [] }));

        Ok(())
    }

    #[tokio::test]
    async fn restore_routes_to_restore_handler() -> TestResult {
        let uuid = CommissionRateUuid::new();

        let mut commission_rates = MockCommissionRatesService::new();

        commission_rates
            .expect_restore_commission_rate()
            .once()
            .withf(move |u| *u == uuid)
            .return_once(|_| Ok(()));

        commission_rates.expect_delete_commission_rate().never();

        let res = TestClient::post(format!("http://example.com/commission-rates/{uuid}/restore"))
            .send(&commission_rates_service(commission_rates, app_router()))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));

        Ok(())
    }
}
