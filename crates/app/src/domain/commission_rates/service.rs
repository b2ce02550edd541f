//! Commission rates service.

use async_trait::async_trait;
use mockall::automock;
use tracing::{debug, info};

use crate::{
    database::Db,
    domain::commission_rates::{
        data::{CommissionRateUpdate, NewCommissionRate},
        errors::CommissionRatesServiceError,
        query::{CommissionRatesPage, ListingQuery},
        records::{ActiveCommissionRateRecord, CommissionRateRecord, CommissionRateUuid},
        repository::PgCommissionRatesRepository,
    },
};

/// `PostgreSQL`-backed [`CommissionRatesService`].
#[derive(Debug, Clone)]
pub struct PgCommissionRatesService {
    db: Db,
    repository: PgCommissionRatesRepository,
}

impl PgCommissionRatesService {
    /// Build the service on top of a connection pool.
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: PgCommissionRatesRepository::new(),
        }
    }

    async fn set_deleted(
        &self,
        rate: CommissionRateUuid,
        is_deleted: bool,
    ) -> Result<(), CommissionRatesServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let rows_affected = self
            .repository
            .set_commission_rate_deleted(&mut tx, rate, is_deleted)
            .await?;

        if rows_affected == 0 {
            return Err(CommissionRatesServiceError::NotFound);
        }

        tx.commit().await?;

        info!(commission_rate_uuid = %rate, is_deleted, "changed commission rate visibility");

        Ok(())
    }
}

#[async_trait]
impl CommissionRatesService for PgCommissionRatesService {
    #[tracing::instrument(
        name = "commission_rates.service.list",
        skip(self, listing),
        fields(page = listing.page, limit = listing.limit),
        err
    )]
    async fn list_commission_rates(
        &self,
        listing: ListingQuery,
    ) -> Result<CommissionRatesPage, CommissionRatesServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let count = self
            .repository
            .count_commission_rates(&mut tx, &listing)
            .await?;

        let paging = listing.paging(count);

        let items = if paging.is_empty() {
            Vec::new()
        } else {
            self.repository
                .list_commission_rates(&mut tx, &listing, paging.offset)
                .await?
        };

        tx.commit().await?;

        debug!(
            count,
            page_count = paging.page_count,
            offset = paging.offset,
            "resolved commission rates page"
        );

        Ok(CommissionRatesPage {
            items,
            meta: listing.meta(paging.page_count),
        })
    }

    #[tracing::instrument(name = "commission_rates.service.list_active", skip(self), err)]
    async fn list_active_commission_rates(
        &self,
    ) -> Result<Vec<ActiveCommissionRateRecord>, CommissionRatesServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let rates = self
            .repository
            .list_active_commission_rates(&mut tx)
            .await?;

        tx.commit().await?;

        Ok(rates)
    }

    #[tracing::instrument(name = "commission_rates.service.create", skip(self, rate), err)]
    async fn create_commission_rate(
        &self,
        rate: NewCommissionRate,
    ) -> Result<CommissionRateRecord, CommissionRatesServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let created = self
            .repository
            .create_commission_rate(&mut tx, CommissionRateUuid::new(), rate)
            .await?;

        tx.commit().await?;

        info!(commission_rate_uuid = %created.uuid, "created commission rate");

        Ok(created)
    }

    #[tracing::instrument(
        name = "commission_rates.service.update",
        skip(self, update),
        fields(commission_rate_uuid = %rate),
        err
    )]
    async fn update_commission_rate(
        &self,
        rate: CommissionRateUuid,
        update: CommissionRateUpdate,
    ) -> Result<CommissionRateRecord, CommissionRatesServiceError> {
        let mut tx = self.db.begin_transaction().await?;

        let updated = self
            .repository
            .update_commission_rate(&mut tx, rate, update)
            .await?;

        tx.commit().await?;

        info!(commission_rate_uuid = %rate, "updated commission rate");

        Ok(updated)
    }

    #[tracing::instrument(
        name = "commission_rates.service.delete",
        skip(self),
        fields(commission_rate_uuid = %rate),
        err
    )]
    async fn delete_commission_rate(
        &self,
        rate: CommissionRateUuid,
    ) -> Result<(), CommissionRatesServiceError> {
        self.set_deleted(rate, true).await
    }

    #[tracing::instrument(
        name = "commission_rates.service.restore",
        skip(self),
        fields(commission_rate_uuid = %rate),
        err
    )]
    async fn restore_commission_rate(
        &self,
        rate: CommissionRateUuid,
    ) -> Result<(), CommissionRatesServiceError> {
        self.set_deleted(rate, false).await
    }
}

#[automock]
#[async_trait]
pub trait CommissionRatesService: Send + Sync {
    /// Retrieves one page of commission rates matching a compiled listing query.
    ///
    /// Pages past the end are served the last page while the metadata still
    /// reports the requested page number.
    async fn list_commission_rates(
        &self,
        listing: ListingQuery,
    ) -> Result<CommissionRatesPage, CommissionRatesServiceError>;

    /// Retrieves every commission rate that is not soft-deleted.
    async fn list_active_commission_rates(
        &self,
    ) -> Result<Vec<ActiveCommissionRateRecord>, CommissionRatesServiceError>;

    /// Creates a new, active commission rate.
    ///
    /// Names are unique across all records, soft-deleted ones included.
    async fn create_commission_rate(
        &self,
        rate: NewCommissionRate,
    ) -> Result<CommissionRateRecord, CommissionRatesServiceError>;

    /// Overwrites the editable fields of a commission rate.
    ///
    /// Soft-deleted rates stay editable and keep their visibility.
    async fn update_commission_rate(
        &self,
        rate: CommissionRateUuid,
        update: CommissionRateUpdate,
    ) -> Result<CommissionRateRecord, CommissionRatesServiceError>;

    /// Soft-deletes a commission rate. Deleting twice succeeds.
    async fn delete_commission_rate(
        &self,
        rate: CommissionRateUuid,
    ) -> Result<(), CommissionRatesServiceError>;

    /// Restores a soft-deleted commission rate. Restoring an active rate succeeds.
    async fn restore_commission_rate(
        &self,
        rate: CommissionRateUuid,
    ) -> Result<(), CommissionRatesServiceError>;
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;
    use testresult::TestResult;

    use crate::{
        domain::commission_rates::query::{ListingParams, SortField, SortOrder},
        test::{TestContext, helpers::new_rate},
    };

    use super::*;

    fn listing(params: ListingParams) -> ListingQuery {
        ListingQuery::compile(params)
    }

    fn names(page: &CommissionRatesPage) -> Vec<&str> {
        page.items.iter().map(|rate| rate.name.as_str()).collect()
    }

    #[tokio::test]
    async fn create_commission_rate_returns_active_record() -> TestResult {
        let ctx = TestContext::new().await;

        let created = ctx
            .commission_rates
            .create_commission_rate(new_rate("Standard", "2.50"))
            .await?;

        assert_eq!(created.name, "Standard");
        assert_eq!(created.fee, Decimal::new(250, 2));
        assert!(created.is_active(), "new rates start active");
        assert_eq!(created.created_at, created.updated_at);

        Ok(())
    }

    #[tokio::test]
    async fn create_commission_rate_duplicate_name_returns_already_exists() -> TestResult {
        let ctx = TestContext::new().await;

        ctx.commission_rates
            .create_commission_rate(new_rate("Standard", "1"))
            .await?;

        let result = ctx
            .commission_rates
            .create_commission_rate(new_rate("Standard", "2"))
            .await;

        assert!(
            matches!(result, Err(CommissionRatesServiceError::AlreadyExists)),
            "expected AlreadyExists, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn soft_deleted_name_stays_reserved() -> TestResult {
        let ctx = TestContext::new().await;

        let deleted = ctx
            .commission_rates
            .create_commission_rate(new_rate("Legacy", "1"))
            .await?;

        ctx.commission_rates
            .delete_commission_rate(deleted.uuid)
            .await?;

        let result = ctx
            .commission_rates
            .create_commission_rate(new_rate("Legacy", "3"))
            .await;

        assert!(
            matches!(result, Err(CommissionRatesServiceError::AlreadyExists)),
            "expected AlreadyExists, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn update_commission_rate_overwrites_fields() -> TestResult {
        let ctx = TestContext::new().await;

        let created = ctx
            .commission_rates
            .create_commission_rate(new_rate("Standard", "1"))
            .await?;

        let updated = ctx
            .commission_rates
            .update_commission_rate(created.uuid, new_rate("Premium", "4.75"))
            .await?;

        assert_eq!(updated.uuid, created.uuid);
        assert_eq!(updated.name, "Premium");
        assert_eq!(updated.fee, Decimal::new(475, 2));
        assert_eq!(updated.created_at, created.created_at);
        assert!(updated.updated_at >= created.updated_at);

        Ok(())
    }

    #[tokio::test]
    async fn update_commission_rate_unknown_uuid_returns_not_found() {
        let ctx = TestContext::new().await;

        let result = ctx
            .commission_rates
            .update_commission_rate(CommissionRateUuid::new(), new_rate("Ghost", "1"))
            .await;

        assert!(
            matches!(result, Err(CommissionRatesServiceError::NotFound)),
            "expected NotFound, got {result:?}"
        );
    }

    #[tokio::test]
    async fn update_commission_rate_onto_taken_name_returns_already_exists() -> TestResult {
        let ctx = TestContext::new().await;

        ctx.commission_rates
            .create_commission_rate(new_rate("Standard", "1"))
            .await?;

        let other = ctx
            .commission_rates
            .create_commission_rate(new_rate("Premium", "2"))
            .await?;

        let result = ctx
            .commission_rates
            .update_commission_rate(other.uuid, new_rate("Standard", "2"))
            .await;

        assert!(
            matches!(result, Err(CommissionRatesServiceError::AlreadyExists)),
            "expected AlreadyExists, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn update_soft_deleted_rate_keeps_it_out_of_active_listing() -> TestResult {
        let ctx = TestContext::new().await;

        let created = ctx
            .commission_rates
            .create_commission_rate(new_rate("Legacy", "1"))
            .await?;

        ctx.commission_rates
            .delete_commission_rate(created.uuid)
            .await?;

        let updated = ctx
            .commission_rates
            .update_commission_rate(created.uuid, new_rate("Legacy Revised", "1.5"))
            .await?;

        assert_eq!(updated.name, "Legacy Revised");
        assert!(updated.is_deleted, "update must not change visibility");

        let active = ctx.commission_rates.list_active_commission_rates().await?;

        assert!(
            !active.iter().any(|rate| rate.uuid == created.uuid),
            "deleted rate should not appear in the active listing"
        );

        let deleted = ctx
            .commission_rates
            .list_commission_rates(listing(ListingParams {
                status: Some("deleted".to_string()),
                ..ListingParams::default()
            }))
            .await?;

        assert_eq!(names(&deleted), ["Legacy Revised"]);

        Ok(())
    }

    #[tokio::test]
    async fn delete_and_restore_unknown_uuid_return_not_found() {
        let ctx = TestContext::new().await;

        let deleted = ctx
            .commission_rates
            .delete_commission_rate(CommissionRateUuid::new())
            .await;

        let restored = ctx
            .commission_rates
            .restore_commission_rate(CommissionRateUuid::new())
            .await;

        assert!(
            matches!(deleted, Err(CommissionRatesServiceError::NotFound)),
            "expected NotFound, got {deleted:?}"
        );
        assert!(
            matches!(restored, Err(CommissionRatesServiceError::NotFound)),
            "expected NotFound, got {restored:?}"
        );
    }

    #[tokio::test]
    async fn delete_and_restore_are_idempotent() -> TestResult {
        let ctx = TestContext::new().await;

        let created = ctx
            .commission_rates
            .create_commission_rate(new_rate("Standard", "1"))
            .await?;

        ctx.commission_rates
            .delete_commission_rate(created.uuid)
            .await?;
        ctx.commission_rates
            .delete_commission_rate(created.uuid)
            .await?;

        ctx.commission_rates
            .restore_commission_rate(created.uuid)
            .await?;
        ctx.commission_rates
            .restore_commission_rate(created.uuid)
            .await?;

        let active = ctx.commission_rates.list_active_commission_rates().await?;

        assert_eq!(active.len(), 1, "restored rate should be active again");

        Ok(())
    }

    #[tokio::test]
    async fn delete_then_restore_preserves_data() -> TestResult {
        let ctx = TestContext::new().await;

        let created = ctx
            .commission_rates
            .create_commission_rate(new_rate("Standard", "3.125"))
            .await?;

        ctx.commission_rates
            .delete_commission_rate(created.uuid)
            .await?;
        ctx.commission_rates
            .restore_commission_rate(created.uuid)
            .await?;

        let active = ctx.commission_rates.list_active_commission_rates().await?;

        let expected = ActiveCommissionRateRecord {
            updated_at: active.first().map_or(created.updated_at, |rate| rate.updated_at),
            ..ActiveCommissionRateRecord::from(created)
        };

        assert_eq!(active, [expected]);

        Ok(())
    }

    #[tokio::test]
    async fn soft_delete_keeps_the_row() -> TestResult {
        let ctx = TestContext::new().await;

        let created = ctx
            .commission_rates
            .create_commission_rate(new_rate("Standard", "1"))
            .await?;

        ctx.commission_rates
            .delete_commission_rate(created.uuid)
            .await?;

        let (rows, is_deleted): (i64, bool) = sqlx::query_as(
            "SELECT COUNT(*) OVER (), is_deleted FROM commission_rates WHERE uuid = $1",
        )
        .bind(created.uuid.into_uuid())
        .fetch_one(ctx.db.pool())
        .await?;

        assert_eq!(rows, 1);
        assert!(is_deleted, "row should be flagged, not removed");

        Ok(())
    }

    #[tokio::test]
    async fn list_active_excludes_deleted_rates() -> TestResult {
        let ctx = TestContext::new().await;

        let kept = ctx
            .commission_rates
            .create_commission_rate(new_rate("Kept", "1"))
            .await?;

        let removed = ctx
            .commission_rates
            .create_commission_rate(new_rate("Removed", "1"))
            .await?;

        ctx.commission_rates
            .delete_commission_rate(removed.uuid)
            .await?;

        let active = ctx.commission_rates.list_active_commission_rates().await?;
        let uuids: Vec<CommissionRateUuid> = active.iter().map(|rate| rate.uuid).collect();

        assert_eq!(uuids, [kept.uuid]);

        Ok(())
    }

    #[tokio::test]
    async fn list_commission_rates_empty_collection_has_no_pages() -> TestResult {
        let ctx = TestContext::new().await;

        let page = ctx
            .commission_rates
            .list_commission_rates(listing(ListingParams {
                page: Some("3".to_string()),
                ..ListingParams::default()
            }))
            .await?;

        assert!(page.items.is_empty());
        assert_eq!(page.meta.page_count, 0);
        assert_eq!(page.meta.page_current, 3);

        Ok(())
    }

    #[tokio::test]
    async fn list_commission_rates_clamps_overflowing_pages() -> TestResult {
        let ctx = TestContext::new().await;

        for name in ["A", "B", "C", "D", "E", "F", "G"] {
            ctx.commission_rates
                .create_commission_rate(new_rate(name, "1"))
                .await?;
        }

        let second = ctx
            .commission_rates
            .list_commission_rates(listing(ListingParams {
                limit: Some("6".to_string()),
                page: Some("2".to_string()),
                ..ListingParams::default()
            }))
            .await?;

        assert_eq!(names(&second), ["G"]);
        assert_eq!(second.meta.page_count, 2);
        assert_eq!(second.meta.page_current, 2);

        let fifth = ctx
            .commission_rates
            .list_commission_rates(listing(ListingParams {
                limit: Some("6".to_string()),
                page: Some("5".to_string()),
                ..ListingParams::default()
            }))
            .await?;

        assert_eq!(names(&fifth), ["G"]);
        assert_eq!(fifth.meta.page_count, 2);
        assert_eq!(fifth.meta.page_current, 5);

        Ok(())
    }

    #[tokio::test]
    async fn list_commission_rates_defaults_to_six_per_page() -> TestResult {
        let ctx = TestContext::new().await;

        for name in ["A", "B", "C", "D", "E", "F", "G"] {
            ctx.commission_rates
                .create_commission_rate(new_rate(name, "1"))
                .await?;
        }

        let page = ctx
            .commission_rates
            .list_commission_rates(listing(ListingParams {
                limit: Some("zero".to_string()),
                page: Some("-1".to_string()),
                ..ListingParams::default()
            }))
            .await?;

        assert_eq!(names(&page), ["A", "B", "C", "D", "E", "F"]);
        assert_eq!(page.meta.limit, 6);
        assert_eq!(page.meta.page_current, 1);

        Ok(())
    }

    #[tokio::test]
    async fn equal_sort_keys_fall_back_to_uuid_order() -> TestResult {
        let ctx = TestContext::new().await;

        for (name, fee) in [("A", "5"), ("B", "1"), ("C", "5"), ("D", "1"), ("E", "5")] {
            ctx.commission_rates
                .create_commission_rate(new_rate(name, fee))
                .await?;
        }

        let descending = ctx
            .commission_rates
            .list_commission_rates(listing(ListingParams {
                sort_by: Some("fee".to_string()),
                order: Some("desc".to_string()),
                ..ListingParams::default()
            }))
            .await?;

        assert_eq!(descending.meta.sort_by, SortField::Fee);
        assert_eq!(descending.meta.order, SortOrder::Desc);
        assert_eq!(names(&descending), ["A", "C", "E", "B", "D"]);

        Ok(())
    }

    #[tokio::test]
    async fn search_is_case_insensitive_and_literal() -> TestResult {
        let ctx = TestContext::new().await;

        for name in ["Partner Gold", "gold tier", "Silver", "Gold_Plus", "Gold%"] {
            ctx.commission_rates
                .create_commission_rate(new_rate(name, "1"))
                .await?;
        }

        let gold = ctx
            .commission_rates
            .list_commission_rates(listing(ListingParams {
                search: Some("GOLD".to_string()),
                ..ListingParams::default()
            }))
            .await?;

        assert_eq!(names(&gold), ["Partner Gold", "gold tier", "Gold_Plus", "Gold%"]);

        let literal = ctx
            .commission_rates
            .list_commission_rates(listing(ListingParams {
                search: Some("d_".to_string()),
                ..ListingParams::default()
            }))
            .await?;

        assert_eq!(names(&literal), ["Gold_Plus"]);

        Ok(())
    }

    #[tokio::test]
    async fn search_with_nul_character_still_lists() -> TestResult {
        let ctx = TestContext::new().await;

        for name in ["Alpha", "Beta"] {
            ctx.commission_rates
                .create_commission_rate(new_rate(name, "1"))
                .await?;
        }

        let page = ctx
            .commission_rates
            .list_commission_rates(listing(ListingParams {
                search: Some("a\0".to_string()),
                ..ListingParams::default()
            }))
            .await?;

        assert_eq!(names(&page), ["Alpha", "Beta"]);
        assert_eq!(page.meta.search, "a");

        Ok(())
    }

    #[tokio::test]
    async fn status_filter_partitions_the_collection() -> TestResult {
        let ctx = TestContext::new().await;
        let mut created = Vec::new();

        for name in ["A", "B", "X", "C"] {
            created.push(
                ctx.commission_rates
                    .create_commission_rate(new_rate(name, "1"))
                    .await?,
            );
        }

        if let Some(x) = created.iter().find(|rate| rate.name == "X") {
            ctx.commission_rates.delete_commission_rate(x.uuid).await?;
        }

        let all = ctx
            .commission_rates
            .list_commission_rates(ListingQuery::default())
            .await?;

        let active = ctx
            .commission_rates
            .list_commission_rates(listing(ListingParams {
                status: Some("active".to_string()),
                ..ListingParams::default()
            }))
            .await?;

        let deleted = ctx
            .commission_rates
            .list_commission_rates(listing(ListingParams {
                status: Some("deleted".to_string()),
                ..ListingParams::default()
            }))
            .await?;

        assert_eq!(names(&all), ["A", "B", "X", "C"]);
        assert_eq!(names(&active), ["A", "B", "C"]);
        assert_eq!(names(&deleted), ["X"]);

        Ok(())
    }

    #[tokio::test]
    async fn listing_agrees_with_in_memory_filters() -> TestResult {
        let ctx = TestContext::new().await;
        let mut created = Vec::new();

        for (name, fee) in [
            ("North Gold", "3"),
            ("South Gold", "1"),
            ("East Silver", "2"),
            ("West Gold", "2"),
        ] {
            created.push(
                ctx.commission_rates
                    .create_commission_rate(new_rate(name, fee))
                    .await?,
            );
        }

        if let Some(south) = created.iter_mut().find(|rate| rate.name == "South Gold") {
            ctx.commission_rates
                .delete_commission_rate(south.uuid)
                .await?;
            south.is_deleted = true;
        }

        let query = listing(ListingParams {
            search: Some("gold".to_string()),
            status: Some("active".to_string()),
            created_at_from: created.first().map(|rate| rate.created_at.to_string()),
            ..ListingParams::default()
        });

        let page = ctx
            .commission_rates
            .list_commission_rates(query.clone())
            .await?;

        let expected: Vec<&str> = created
            .iter()
            .filter(|rate| query.matches(rate))
            .map(|rate| rate.name.as_str())
            .collect();

        assert_eq!(names(&page), expected);
        assert_eq!(expected, ["North Gold", "West Gold"]);

        Ok(())
    }

    #[tokio::test]
    async fn created_at_bounds_are_inclusive() -> TestResult {
        let ctx = TestContext::new().await;

        let first = ctx
            .commission_rates
            .create_commission_rate(new_rate("First", "1"))
            .await?;

        let second = ctx
            .commission_rates
            .create_commission_rate(new_rate("Second", "1"))
            .await?;

        let exact = ctx
            .commission_rates
            .list_commission_rates(listing(ListingParams {
                created_at_from: Some(first.created_at.to_string()),
                created_at_to: Some(first.created_at.to_string()),
                ..ListingParams::default()
            }))
            .await?;

        let from_second = ctx
            .commission_rates
            .list_commission_rates(listing(ListingParams {
                created_at_from: Some(second.created_at.to_string()),
                ..ListingParams::default()
            }))
            .await?;

        assert!(names(&exact).contains(&"First"), "lower and upper bound include the edge");
        assert!(names(&from_second).contains(&"Second"));
        assert_eq!(
            exact.meta.created_at_from,
            Some(first.created_at.to_string())
        );

        Ok(())
    }
}
