use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;
use sqlx::sqlite::{SqlitePool, SqlitePoolOptions};
use sqlx::Row;

use crate::error::PlanError;
use crate::models::Plan;
use crate::populate::WorkoutPopulator;

pub type DbPool = SqlitePool;

/// Application state shared by the desktop commands
pub struct AppState {
  pub db: DbPool,
  pub populator: WorkoutPopulator,
}

/// Open the plan store and run migrations
pub async fn connect(database_url: &str) -> Result<DbPool, PlanError> {
  tracing::info!("Initializing database at: {}", database_url);

  let pool = SqlitePoolOptions::new()
    .max_connections(5)
    .connect(database_url)
    .await?;

  sqlx::migrate!("./migrations").run(&pool).await?;

  tracing::info!("Database initialized successfully");

  Ok(pool)
}

/// Stored in the app data dir: workout-planner.db
#[cfg(feature = "desktop")]
pub async fn initialize_db<R: tauri::Runtime>(
  app: &tauri::AppHandle<R>,
  database_url: Option<&str>,
) -> Result<DbPool, PlanError> {
  use tauri::Manager;

  if let Some(url) = database_url {
    return connect(url).await;
  }

  let data_dir = app
    .path()
    .app_data_dir()
    .map_err(|e| PlanError::Database(format!("Failed to get app data dir: {}", e)))?;

  std::fs::create_dir_all(&data_dir)
    .map_err(|e| PlanError::Database(format!("Failed to create {}: {}", data_dir.display(), e)))?;

  let db_path = data_dir.join("workout-planner.db");
  connect(&format!("sqlite://{}?mode=rwc", db_path.display())).await
}

/// ---------------------------------------------------------------------------
/// Plan Store
/// ---------------------------------------------------------------------------

/// Listing row, without the session payload
#[derive(Debug, Clone, PartialEq, Serialize, sqlx::FromRow)]
pub struct PlanSummary {
  pub id: String,
  pub name: String,
  pub start_date: NaiveDate,
  pub end_date: NaiveDate,
  pub is_active: bool,
  pub created_at: DateTime<Utc>,
  pub updated_at: DateTime<Utc>,
}

/// Insert or replace a plan. Saving an active plan deactivates all others.
pub async fn save_plan(pool: &DbPool, plan: &Plan) -> Result<(), PlanError> {
  let plan_json = serde_json::to_string(plan)?;
  let mut tx = pool.begin().await?;

  if plan.is_active {
    sqlx::query("UPDATE workout_plans SET is_active = 0 WHERE id != ?1")
      .bind(&plan.id)
      .execute(&mut *tx)
      .await?;
  }

  sqlx::query(
    r#"
    INSERT INTO workout_plans (
      id, name, start_date, end_date, is_active, plan_json, created_at, updated_at
    )
    VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
    ON CONFLICT(id) DO UPDATE SET
      name = excluded.name,
      start_date = excluded.start_date,
      end_date = excluded.end_date,
      is_active = excluded.is_active,
      plan_json = excluded.plan_json,
      updated_at = excluded.updated_at
    "#,
  )
  .bind(&plan.id)
  .bind(&plan.name)
  .bind(plan.start_date)
  .bind(plan.end_date)
  .bind(plan.is_active)
  .bind(&plan_json)
  .bind(plan.created_at)
  .bind(plan.updated_at)
  .execute(&mut *tx)
  .await?;

  tx.commit().await?;

  tracing::debug!("Saved plan {} ({} sessions)", plan.id, plan.sessions.len());
  Ok(())
}

/// The active flag lives in its own column; it wins over the document copy
fn decode_plan(row: &sqlx::sqlite::SqliteRow) -> Result<Plan, PlanError> {
  let plan_json: String = row.get("plan_json");
  let mut plan: Plan = serde_json::from_str(&plan_json)?;
  plan.is_active = row.get("is_active");
  Ok(plan)
}

pub async fn load_plan(pool: &DbPool, plan_id: &str) -> Result<Option<Plan>, PlanError> {
  let row = sqlx::query("SELECT plan_json, is_active FROM workout_plans WHERE id = ?1")
    .bind(plan_id)
    .fetch_optional(pool)
    .await?;

  row.as_ref().map(decode_plan).transpose()
}

/// Like `load_plan` but a missing plan is an error
pub async fn require_plan(pool: &DbPool, plan_id: &str) -> Result<Plan, PlanError> {
  if plan_id.trim().is_empty() {
    return Err(PlanError::MissingPlanId);
  }
  load_plan(pool, plan_id)
    .await?
    .ok_or_else(|| PlanError::PlanNotFound(plan_id.to_string()))
}

pub async fn load_active_plan(pool: &DbPool) -> Result<Option<Plan>, PlanError> {
  let row = sqlx::query(
    "SELECT plan_json, is_active FROM workout_plans WHERE is_active = 1 ORDER BY updated_at DESC LIMIT 1",
  )
  .fetch_optional(pool)
  .await?;

  row.as_ref().map(decode_plan).transpose()
}

pub async fn list_plans(pool: &DbPool) -> Result<Vec<PlanSummary>, PlanError> {
  let plans = sqlx::query_as::<_, PlanSummary>(
    r#"
    SELECT id, name, start_date, end_date, is_active, created_at, updated_at
    FROM workout_plans
    ORDER BY created_at DESC
    "#,
  )
  .fetch_all(pool)
  .await?;

  Ok(plans)
}

/// Returns false when nothing was deleted
pub async fn delete_plan(pool: &DbPool, plan_id: &str) -> Result<bool, PlanError> {
  let result = sqlx::query("DELETE FROM workout_plans WHERE id = ?1")
    .bind(plan_id)
    .execute(pool)
    .await?;

  Ok(result.rows_affected() > 0)
}

/// Make one plan the only active plan
pub async fn set_active_plan(pool: &DbPool, plan_id: &str) -> Result<(), PlanError> {
  let mut tx = pool.begin().await?;

  let exists: Option<i64> = sqlx::query_scalar("SELECT 1 FROM workout_plans WHERE id = ?1")
    .bind(plan_id)
    .fetch_optional(&mut *tx)
    .await?;

  if exists.is_none() {
    return Err(PlanError::PlanNotFound(plan_id.to_string()));
  }

  sqlx::query("UPDATE workout_plans SET is_active = CASE WHEN id = ?1 THEN 1 ELSE 0 END")
    .bind(plan_id)
    .execute(&mut *tx)
    .await?;

  tx.commit().await?;
  Ok(())
}

/// ---------------------------------------------------------------------------
/// Tests
/// ---------------------------------------------------------------------------
