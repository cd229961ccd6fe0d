use async_trait::async_trait;
use sqlx::PgPool;

use super::RecordStore;
use crate::core::error::{AppError, Result};
use crate::features::hazards::models::{Hazard, HazardQuery};
use crate::features::repairs::models::{RepairTracker, TrackerUpdate, UpdateOutcome};
use crate::features::workers::models::Worker;

const HAZARD_COLUMNS: &str = r#"
    id, reported_at, latitude, longitude, hazard_type, state,
    risk_level, risk_reasoning, repair_material, material_reasoning,
    volume_material_required, volume_calculation, manpower_required,
    task_breakdown, repair_guide, image_url
"#;

const TRACKER_COLUMNS: &str = r#"
    id, reported_at, team_assigned_at, on_the_way_at, in_progress_at,
    completed_at, worker_id, photo_url
"#;

/// PostgreSQL-backed record store
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Builds the guarded UPDATE for a stage transition. Column names come
    /// from the fixed `Stage::column` table, never from request input.
    fn update_sql(update: &TrackerUpdate) -> Result<String> {
        let column = update.stage.column().ok_or_else(|| {
            AppError::Internal(format!("Stage '{}' has no timestamp column", update.stage))
        })?;

        let mut conditions = vec!["id = $1".to_string()];
        conditions.extend(
            update
                .guard
                .unset
                .iter()
                .filter_map(|stage| stage.column())
                .map(|c| format!("{} IS NULL", c)),
        );
        if let Some(c) = update.guard.set.and_then(|stage| stage.column()) {
            conditions.push(format!("{} IS NOT NULL", c));
        }

        Ok(format!(
            r#"
            UPDATE repair_trackers
            SET {column} = $2,
                worker_id = COALESCE($3, worker_id),
                photo_url = COALESCE($4, photo_url)
            WHERE {conditions}
            RETURNING {columns}
            "#,
            column = column,
            conditions = conditions.join(" AND "),
            columns = TRACKER_COLUMNS,
        ))
    }
}

#[async_trait]
impl RecordStore for PgStore {
    async fn list_hazards(&self, query: HazardQuery) -> Result<Vec<Hazard>> {
        let sql = format!(
            "SELECT {} FROM hazards ORDER BY {} LIMIT $1",
            HAZARD_COLUMNS,
            query.order.as_sql()
        );

        sqlx::query_as::<_, Hazard>(&sql)
            .bind(query.limit)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to list hazards: {:?}", e);
                AppError::Database(e)
            })
    }

    async fn find_hazard(&self, id: i64) -> Result<Option<Hazard>> {
        let sql = format!("SELECT {} FROM hazards WHERE id = $1", HAZARD_COLUMNS);

        sqlx::query_as::<_, Hazard>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to get hazard {}: {:?}", id, e);
                AppError::Database(e)
            })
    }

    async fn find_tracker(&self, id: i64) -> Result<Option<RepairTracker>> {
        let sql = format!(
            "SELECT {} FROM repair_trackers WHERE id = $1",
            TRACKER_COLUMNS
        );

        sqlx::query_as::<_, RepairTracker>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to get repair tracker {}: {:?}", id, e);
                AppError::Database(e)
            })
    }

    async fn list_trackers(&self, ids: &[i64]) -> Result<Vec<RepairTracker>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let sql = format!(
            "SELECT {} FROM repair_trackers WHERE id = ANY($1)",
            TRACKER_COLUMNS
        );

        sqlx::query_as::<_, RepairTracker>(&sql)
            .bind(ids)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to list repair trackers: {:?}", e);
                AppError::Database(e)
            })
    }

    async fn list_workers(&self) -> Result<Vec<Worker>> {
        sqlx::query_as::<_, Worker>("SELECT id, name FROM workers ORDER BY name, id")
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to list workers: {:?}", e);
                AppError::Database(e)
            })
    }

    async fn update_tracker(&self, id: i64, update: &TrackerUpdate) -> Result<UpdateOutcome> {
        let sql = Self::update_sql(update)?;

        let updated = sqlx::query_as::<_, RepairTracker>(&sql)
            .bind(id)
            .bind(update.at)
            .bind(update.worker_id)
            .bind(update.photo_url.as_deref())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to update repair tracker {}: {:?}", id, e);
                AppError::Database(e)
            })?;

        if let Some(tracker) = updated {
            return Ok(UpdateOutcome::Updated(tracker));
        }

        // Nothing matched: tell a vanished row apart from a lost race
        let exists: bool =
            sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM repair_trackers WHERE id = $1)")
                .bind(id)
                .fetch_one(&self.pool)
                .await
                .map_err(AppError::Database)?;

        Ok(if exists {
            UpdateOutcome::Conflict
        } else {
            UpdateOutcome::Missing
        })
    }
}
