//! Health service
//!
//! Liveness and readiness probes.

use std::time::Duration;

use tracing::{instrument, warn};

use crate::dto::{HealthResponse, ReadinessResponse};

use super::context::ServiceContext;

const DATABASE_PROBE_TIMEOUT: Duration = Duration::from_secs(2);

/// Health service
pub struct HealthService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> HealthService<'a> {
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    pub fn liveness(&self) -> HealthResponse {
        HealthResponse::healthy()
    }

    /// Ready when the database answers `SELECT 1` in time
    #[instrument(skip(self))]
    pub async fn readiness(&self) -> ReadinessResponse {
        let probe = sqlx::query("SELECT 1").execute(self.ctx.pool());
        let database_healthy = match tokio::time::timeout(DATABASE_PROBE_TIMEOUT, probe).await {
            Ok(Ok(_)) => true,
            Ok(Err(e)) => {
                warn!(error = %e, "Database probe failed");
                false
            }
            Err(_) => {
                warn!("Database probe timed out");
                false
            }
        };

        ReadinessResponse::ready(database_healthy)
    }
}
