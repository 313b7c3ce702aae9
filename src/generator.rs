//! Plan generation entry point
//!
//! validate -> split -> schedule -> deloads -> populate -> assemble.
//! Bad preferences are rejected before any work happens. Catalog trouble
//! never fails generation; it shows up as per-session markers and in the
//! returned warnings so the caller can decide whether to activate.

use chrono::{Days, NaiveDate, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::error::PlanError;
use crate::models::{Plan, PlanPreferences, Goal, SplitType};
use crate::populate::WorkoutPopulator;
use crate::schedule::{build_schedule, calculate_deload_weeks, select_split, ScheduleRequest};

pub const MIN_DAYS_PER_WEEK: u32 = 2;
pub const MAX_DAYS_PER_WEEK: u32 = 7;
pub const MIN_DURATION_DAYS: u32 = 1;
pub const MAX_DURATION_DAYS: u32 = 90;

#[derive(Debug, Clone, Serialize)]
pub struct GeneratedPlan {
  pub plan: Plan,
  /// One entry per session that could not be populated
  pub warnings: Vec<String>,
}

pub fn validate_preferences(prefs: &PlanPreferences) -> Result<(), PlanError> {
  if !(MIN_DAYS_PER_WEEK..=MAX_DAYS_PER_WEEK).contains(&prefs.days_per_week) {
    return Err(PlanError::InvalidDaysPerWeek(prefs.days_per_week));
  }
  if !(MIN_DURATION_DAYS..=MAX_DURATION_DAYS).contains(&prefs.duration_days) {
    return Err(PlanError::InvalidDuration(prefs.duration_days));
  }
  if let Some(day) = prefs
    .preferred_days
    .iter()
    .flatten()
    .find(|&&d| d > 6)
  {
    return Err(PlanError::InvalidPreferredDay(*day));
  }
  plan_end_date(prefs)?;
  Ok(())
}

fn plan_end_date(prefs: &PlanPreferences) -> Result<NaiveDate, PlanError> {
  prefs
    .start_date
    .checked_add_days(Days::new(prefs.duration_days as u64))
    .ok_or(PlanError::InvalidStartDate(prefs.start_date, prefs.duration_days))
}

pub fn default_plan_name(goal: Goal, days_per_week: u32, split: SplitType) -> String {
  format!("{} {}-Day {}", goal.label(), days_per_week, split.label())
}

/// Validated, scheduled plan with every session still a skeleton
pub fn build_plan_skeleton(prefs: &PlanPreferences) -> Result<Plan, PlanError> {
  validate_preferences(prefs)?;
  let end_date = plan_end_date(prefs)?;

  let split = select_split(prefs.days_per_week, prefs.experience_level);
  let sessions = build_schedule(&ScheduleRequest {
    start_date: prefs.start_date,
    duration_days: prefs.duration_days,
    days_per_week: prefs.days_per_week,
    split,
    categories: &prefs.session_types,
    preferred_days: prefs.preferred_days.as_deref(),
    experience: prefs.experience_level,
  });
  let now = Utc::now();

  let name = prefs
    .name
    .as_deref()
    .map(str::trim)
    .filter(|n| !n.is_empty())
    .map(String::from)
    .unwrap_or_else(|| default_plan_name(prefs.goal, prefs.days_per_week, split));

  Ok(Plan {
    id: Uuid::new_v4().to_string(),
    name,
    start_date: prefs.start_date,
    end_date,
    duration_days: prefs.duration_days,
    goal: prefs.goal,
    experience_level: prefs.experience_level,
    days_per_week: prefs.days_per_week,
    split_type: split,
    session_types: prefs.session_types.clone(),
    equipment: prefs.equipment.clone(),
    sessions,
    deload_weeks: calculate_deload_weeks(prefs.duration_days),
    periodization: prefs.periodization.unwrap_or_default(),
    created_at: now,
    updated_at: now,
    is_active: false,
  })
}

pub async fn generate_workout_plan(
  prefs: &PlanPreferences,
  populator: &WorkoutPopulator,
) -> Result<GeneratedPlan, PlanError> {
  let skeleton = build_plan_skeleton(prefs)?;

  tracing::info!(
    "Generating plan {}: {} sessions, split {:?}, deload weeks {:?}",
    skeleton.id,
    skeleton.sessions.len(),
    skeleton.split_type,
    skeleton.deload_weeks
  );

  let (plan, warnings) = populator.populate_plan(skeleton).await?;

  for warning in &warnings {
    tracing::warn!("{}", warning);
  }

  Ok(GeneratedPlan { plan, warnings })
}
