//! Commission Rates Repository

use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{FromRow, Postgres, QueryBuilder, Row, Transaction, postgres::PgRow, query, query_as};
use tracing::debug;

use crate::domain::commission_rates::{
    data::{CommissionRateUpdate, NewCommissionRate},
    query::ListingQuery,
    records::{ActiveCommissionRateRecord, CommissionRateRecord, CommissionRateUuid},
};

const COUNT_COMMISSION_RATES_SQL: &str = include_str!("sql/count_commission_rates.sql");
const LIST_COMMISSION_RATES_SQL: &str = include_str!("sql/list_commission_rates.sql");
const LIST_ACTIVE_COMMISSION_RATES_SQL: &str = include_str!("sql/list_active_commission_rates.sql");
const CREATE_COMMISSION_RATE_SQL: &str = include_str!("sql/create_commission_rate.sql");
const UPDATE_COMMISSION_RATE_SQL: &str = include_str!("sql/update_commission_rate.sql");
const SET_COMMISSION_RATE_DELETED_SQL: &str = include_str!("sql/set_commission_rate_deleted.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgCommissionRatesRepository;

impl PgCommissionRatesRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    #[tracing::instrument(
        name = "commission_rates.repository.count",
        skip(self, tx, listing),
        fields(count = tracing::field::Empty),
        err
    )]
    pub(crate) async fn count_commission_rates(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        listing: &ListingQuery,
    ) -> Result<u64, sqlx::Error> {
        let mut builder = QueryBuilder::<Postgres>::new(COUNT_COMMISSION_RATES_SQL.trim_end());

        push_filters(&mut builder, listing);

        let count = builder
            .build_query_scalar::<i64>()
            .fetch_one(&mut **tx)
            .await?;

        // COUNT(*) is never negative.
        let count = u64::try_from(count).unwrap_or_default();

        tracing::Span::current().record("count", count);

        Ok(count)
    }

    #[tracing::instrument(
        name = "commission_rates.repository.list",
        skip(self, tx, listing),
        fields(
            sort_by = listing.sort_by.as_str(),
            order = listing.order.as_str(),
            limit = listing.limit
        ),
        err
    )]
    pub(crate) async fn list_commission_rates(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        listing: &ListingQuery,
        offset: u64,
    ) -> Result<Vec<CommissionRateRecord>, sqlx::Error> {
        let mut builder = QueryBuilder::<Postgres>::new(LIST_COMMISSION_RATES_SQL.trim_end());

        push_filters(&mut builder, listing);

        // Sort columns come from a closed enum; the uuid tiebreak keeps pages stable.
        builder.push(format!(
            " ORDER BY {} {}, uuid ASC",
            listing.sort_by.column(),
            listing.order.keyword()
        ));

        builder
            .push(" LIMIT ")
            .push_bind(i64::from(listing.limit))
            .push(" OFFSET ")
            .push_bind(i64::try_from(offset).unwrap_or(i64::MAX));

        let rates = builder
            .build_query_as::<CommissionRateRecord>()
            .fetch_all(&mut **tx)
            .await?;

        debug!(fetched = rates.len(), "listed commission rates");

        Ok(rates)
    }

    #[tracing::instrument(name = "commission_rates.repository.list_active", skip(self, tx), err)]
    pub(crate) async fn list_active_commission_rates(
        &self,
        tx: &mut Transaction<'_, Postgres>,
    ) -> Result<Vec<ActiveCommissionRateRecord>, sqlx::Error> {
        query_as::<Postgres, ActiveCommissionRateRecord>(LIST_ACTIVE_COMMISSION_RATES_SQL)
            .fetch_all(&mut **tx)
            .await
    }

    #[tracing::instrument(
        name = "commission_rates.repository.create",
        skip(self, tx, rate),
        fields(commission_rate_uuid = %uuid),
        err
    )]
    pub(crate) async fn create_commission_rate(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        uuid: CommissionRateUuid,
        rate: NewCommissionRate,
    ) -> Result<CommissionRateRecord, sqlx::Error> {
        query_as::<Postgres, CommissionRateRecord>(CREATE_COMMISSION_RATE_SQL)
            .bind(uuid.into_uuid())
            .bind(rate.name)
            .bind(rate.fee)
            .bind(rate.description)
            .fetch_one(&mut **tx)
            .await
    }

    #[tracing::instrument(
        name = "commission_rates.repository.update",
        skip(self, tx, update),
        fields(commission_rate_uuid = %uuid),
        err
    )]
    pub(crate) async fn update_commission_rate(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        uuid: CommissionRateUuid,
        update: CommissionRateUpdate,
    ) -> Result<CommissionRateRecord, sqlx::Error> {
        query_as::<Postgres, CommissionRateRecord>(UPDATE_COMMISSION_RATE_SQL)
            .bind(uuid.into_uuid())
            .bind(update.name)
            .bind(update.fee)
            .bind(update.description)
            .fetch_one(&mut **tx)
            .await
    }

    #[tracing::instrument(
        name = "commission_rates.repository.set_deleted",
        skip(self, tx),
        fields(commission_rate_uuid = %uuid),
        err
    )]
    pub(crate) async fn set_commission_rate_deleted(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        uuid: CommissionRateUuid,
        is_deleted: bool,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(SET_COMMISSION_RATE_DELETED_SQL)
            .bind(uuid.into_uuid())
            .bind(is_deleted)
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }
}

fn push_filters(builder: &mut QueryBuilder<'_, Postgres>, listing: &ListingQuery) {
    builder.push(" WHERE TRUE");

    if let Some(pattern) = listing.search_pattern() {
        builder.push(" AND name ILIKE ").push_bind(pattern);
    }

    if let Some(from) = listing.created_at.from {
        builder
            .push(" AND created_at >= ")
            .push_bind(SqlxTimestamp::from(from));
    }

    if let Some(to) = listing.created_at.to {
        builder
            .push(" AND created_at <= ")
            .push_bind(SqlxTimestamp::from(to));
    }

    if let Some(is_deleted) = listing.status.is_deleted() {
        builder.push(" AND is_deleted = ").push_bind(is_deleted);
    }
}

impl<'r> FromRow<'r, PgRow> for CommissionRateRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: CommissionRateUuid::from_uuid(row.try_get("uuid")?),
            name: row.try_get("name")?,
            fee: row.try_get("fee")?,
            description: row.try_get("description")?,
            is_deleted: row.try_get("is_deleted")?,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            updated_at: row.try_get::<SqlxTimestamp, _>("updated_at")?.to_jiff(),
        })
    }
}

impl<'r> FromRow<'r, PgRow> for ActiveCommissionRateRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: CommissionRateUuid::from_uuid(row.try_get("uuid")?),
            name: row.try_get("name")?,
            fee: row.try_get("fee")?,
            description: row.try_get("description")?,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            updated_at: row.try_get::<SqlxTimestamp, _>("updated_at")?.to_jiff(),
        })
    }
}
