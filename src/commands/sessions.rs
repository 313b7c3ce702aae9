//! Tauri commands for editing sessions inside a stored plan
//!
//! Each command loads the plan, applies one edit, persists the result and
//! returns the updated plan.

use chrono::NaiveDate;
use std::sync::Arc;
use tauri::State;

use crate::db::{self, AppState};
use crate::error::PlanError;
use crate::models::{CompletionData, ExerciseEntry, Plan, Session, SessionStatus, SessionType};
use crate::mutations;

async fn edit_plan<F>(state: &AppState, plan_id: &str, edit: F) -> Result<Plan, PlanError>
where
  F: FnOnce(&Plan) -> Result<Plan, PlanError>,
{
  let plan = db::require_plan(&state.db, plan_id).await?;
  let next = edit(&plan)?;
  if next != plan {
    db::save_plan(&state.db, &next).await?;
  }
  Ok(next)
}

/// Move a session to another date
#[tauri::command]
pub async fn move_plan_session(
  state: State<'_, Arc<AppState>>,
  plan_id: String,
  session_id: String,
  new_date: NaiveDate,
) -> Result<Plan, PlanError> {
  edit_plan(&state, &plan_id, |plan| {
    Ok(mutations::move_session(plan, &session_id, new_date))
  })
  .await
}

/// Set a session's status, with optional completion data
#[tauri::command]
pub async fn update_plan_session_status(
  state: State<'_, Arc<AppState>>,
  plan_id: String,
  session_id: String,
  status: SessionStatus,
  completion: Option<CompletionData>,
) -> Result<Plan, PlanError> {
  edit_plan(&state, &plan_id, |plan| {
    Ok(mutations::update_session_status(plan, &session_id, status, completion))
  })
  .await
}

/// Add a session after the last one
#[tauri::command]
pub async fn add_plan_session(
  state: State<'_, Arc<AppState>>,
  plan_id: String,
  session_type: SessionType,
) -> Result<Plan, PlanError> {
  edit_plan(&state, &plan_id, |plan| Ok(mutations::add_session(plan, session_type))).await
}

/// Remove a session
#[tauri::command]
pub async fn remove_plan_session(
  state: State<'_, Arc<AppState>>,
  plan_id: String,
  session_id: String,
) -> Result<Plan, PlanError> {
  edit_plan(&state, &plan_id, |plan| Ok(mutations::remove_session(plan, &session_id))).await
}

/// ---------------------------------------------------------------------------
/// Recurring Sessions
/// ---------------------------------------------------------------------------

/// Get the same-type sessions in a session's training block
#[tauri::command]
pub async fn get_recurring_sessions(
  state: State<'_, Arc<AppState>>,
  plan_id: String,
  session_id: String,
) -> Result<Vec<Session>, PlanError> {
  let plan = db::require_plan(&state.db, &plan_id).await?;
  Ok(
    mutations::get_recurring_sessions_in_block(&plan, &session_id)
      .into_iter()
      .cloned()
      .collect(),
  )
}

/// Apply one exercise list to every recurring instance of a session
#[tauri::command]
pub async fn update_recurring_exercises(
  state: State<'_, Arc<AppState>>,
  plan_id: String,
  session_id: String,
  exercises: Vec<ExerciseEntry>,
) -> Result<Plan, PlanError> {
  edit_plan(&state, &plan_id, |plan| {
    mutations::update_recurring_session_exercises(plan, &session_id, &exercises)
  })
  .await
}

/// Result of re-running population for one session
#[derive(Debug, serde::Serialize)]
pub struct RepopulatedPlan {
  pub plan: Plan,
  pub warning: Option<String>,
}

/// Re-run exercise population for one session
#[tauri::command]
pub async fn repopulate_plan_session(
  state: State<'_, Arc<AppState>>,
  plan_id: String,
  session_id: String,
) -> Result<RepopulatedPlan, PlanError> {
  let plan = db::require_plan(&state.db, &plan_id).await?;
  let (plan, warning) = state.populator.repopulate_session(&plan, &session_id).await?;
  db::save_plan(&state.db, &plan).await?;
  Ok(RepopulatedPlan { plan, warning })
}

/// ---------------------------------------------------------------------------
/// Tests
/// ---------------------------------------------------------------------------
