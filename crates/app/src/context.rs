//! App Context

use std::sync::Arc;

use thiserror::Error;

use crate::{
    database::{self, Db},
    domain::commission_rates::{CommissionRatesService, PgCommissionRatesService},
};

/// Failures while building the [`AppContext`].
#[derive(Debug, Error)]
pub enum AppInitError {
    /// The database could not be reached.
    #[error("failed to connect to database")]
    Database(#[source] sqlx::Error),
}

/// Services shared by every request handler.
#[derive(Clone)]
pub struct AppContext {
    /// Commission rates catalog.
    pub commission_rates: Arc<dyn CommissionRatesService>,
}

impl AppContext {
    /// Build application context from a database URL.
    ///
    /// # Errors
    ///
    /// Returns an error when establishing a database connection fails.
    pub async fn from_database_url(url: &str, max_connections: u32) -> Result<Self, AppInitError> {
        let pool = database::connect(url, max_connections)
            .await
            .map_err(AppInitError::Database)?;

        Ok(Self::from_db(Db::new(pool)))
    }

    /// Build application context from an existing pool.
    #[must_use]
    pub fn from_db(db: Db) -> Self {
        Self {
            commission_rates: Arc::new(PgCommissionRatesService::new(db)),
        }
    }
}
