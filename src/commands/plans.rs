//! Tauri commands for generating and managing whole plans

use std::sync::Arc;
use tauri::State;

use crate::db::{self, AppState, PlanSummary};
use crate::error::PlanError;
use crate::generator::{generate_workout_plan, GeneratedPlan};
use crate::models::{Plan, PlanPreferences};
use crate::stats::PlanStatistics;

/// ---------------------------------------------------------------------------
/// Generation
/// ---------------------------------------------------------------------------

/// Generate and store a new plan. It becomes the active plan unless
/// `activate` is false; the frontend can inspect `warnings` first.
#[tauri::command]
pub async fn generate_plan(
  state: State<'_, Arc<AppState>>,
  preferences: PlanPreferences,
  activate: Option<bool>,
) -> Result<GeneratedPlan, PlanError> {
  let mut generated = generate_workout_plan(&preferences, &state.populator).await?;
  generated.plan.is_active = activate.unwrap_or(true);

  db::save_plan(&state.db, &generated.plan).await?;

  tracing::info!(
    "Stored plan {} ({} warnings, active: {})",
    generated.plan.id,
    generated.warnings.len(),
    generated.plan.is_active
  );
  Ok(generated)
}

/// ---------------------------------------------------------------------------
/// Lookup
/// ---------------------------------------------------------------------------

/// Get a stored plan by id
#[tauri::command]
pub async fn get_plan(state: State<'_, Arc<AppState>>, plan_id: String) -> Result<Plan, PlanError> {
  db::require_plan(&state.db, &plan_id).await
}

/// Get the active plan, if any
#[tauri::command]
pub async fn get_active_plan(state: State<'_, Arc<AppState>>) -> Result<Option<Plan>, PlanError> {
  db::load_active_plan(&state.db).await
}

/// List summaries of all stored plans
#[tauri::command]
pub async fn list_plans(state: State<'_, Arc<AppState>>) -> Result<Vec<PlanSummary>, PlanError> {
  db::list_plans(&state.db).await
}

/// Get completion statistics for a plan
#[tauri::command]
pub async fn get_plan_statistics(
  state: State<'_, Arc<AppState>>,
  plan_id: String,
) -> Result<PlanStatistics, PlanError> {
  Ok(db::require_plan(&state.db, &plan_id).await?.statistics())
}

/// ---------------------------------------------------------------------------
/// Lifecycle
/// ---------------------------------------------------------------------------

/// Delete a plan
#[tauri::command]
pub async fn delete_plan(state: State<'_, Arc<AppState>>, plan_id: String) -> Result<(), PlanError> {
  if db::delete_plan(&state.db, &plan_id).await? {
    Ok(())
  } else {
    Err(PlanError::PlanNotFound(plan_id))
  }
}

/// Make a plan the active one, deactivating the rest
#[tauri::command]
pub async fn activate_plan(state: State<'_, Arc<AppState>>, plan_id: String) -> Result<Plan, PlanError> {
  db::set_active_plan(&state.db, &plan_id).await?;
  db::require_plan(&state.db, &plan_id).await
}

/// ---------------------------------------------------------------------------
/// Tests
/// ---------------------------------------------------------------------------
