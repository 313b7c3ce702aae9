//! Test utilities and helpers for unit testing
//!
//! This module provides common test infrastructure including:
//! - Database setup/teardown
//! - Mock catalog and preference factories
//! - Plan fixtures
//! - Helper assertions

use crate::models::{
  CatalogExercise, EquipmentFilter, ExerciseEntry, ExperienceLevel, Goal, PeriodizationStyle,
  Plan, PlanPreferences, SessionCategory,
};
use crate::schedule::{build_schedule, calculate_deload_weeks, select_split, ScheduleRequest};
use chrono::{Duration, NaiveDate, Utc};
use sqlx::SqlitePool;

/// ---------------------------------------------------------------------------
/// Database Test Utilities
/// ---------------------------------------------------------------------------

/// Create an in-memory SQLite database for testing
/// Runs all migrations and returns a ready-to-use pool
///
/// Uses max_connections(1) to prevent multiple pool connections from creating
/// isolated in-memory databases, which would cause intermittent test failures
pub async fn setup_test_db() -> SqlitePool {
  let pool = sqlx::sqlite::SqlitePoolOptions::new()
    .max_connections(1)
    .connect("sqlite::memory:")
    .await
    .expect("Failed to create in-memory database");

  sqlx::migrate!("./migrations")
    .run(&pool)
    .await
    .expect("Failed to run migrations");

  pool
}

/// Close a test database pool
pub async fn teardown_test_db(pool: SqlitePool) {
  pool.close().await;
}

/// ---------------------------------------------------------------------------
/// Mock Data Factories
/// ---------------------------------------------------------------------------

/// 2024-01-01, a Monday
pub fn monday() -> NaiveDate {
  NaiveDate::from_ymd_opt(2024, 1, 1).expect("valid date")
}

pub fn catalog_exercise(name: &str, workout_type: &str, equipment: &str) -> CatalogExercise {
  CatalogExercise {
    name: name.to_string(),
    workout_type: workout_type.to_string(),
    equipment: equipment.to_string(),
    mechanic: None,
    primary_muscle: None,
  }
}

fn compound(name: &str, workout_type: &str, equipment: &str) -> CatalogExercise {
  CatalogExercise {
    mechanic: Some("compound".to_string()),
    ..catalog_exercise(name, workout_type, equipment)
  }
}

fn isolation(name: &str, workout_type: &str, equipment: &str) -> CatalogExercise {
  CatalogExercise {
    mechanic: Some("isolation".to_string()),
    ..catalog_exercise(name, workout_type, equipment)
  }
}

/// Small catalog covering every category tag the planner understands
pub fn mock_catalog() -> Vec<CatalogExercise> {
  vec![
    compound("Barbell Back Squat", "Lower Body", "Barbell"),
    compound("Bench Press", "Upper Body", "Barbell"),
    compound("Bent-Over Row", "Upper Body", "Barbell"),
    compound("Overhead Press", "Upper Body", "Barbell"),
    compound("Romanian Deadlift", "Lower Body", "Barbell"),
    compound("Dumbbell Lunge", "Lower Body", "Dumbbell"),
    compound("Goblet Squat", "Lower Body", "Dumbbell"),
    isolation("Leg Curl", "Lower Body", "Machine"),
    isolation("Calf Raise", "Lower Body", "Dumbbell"),
    isolation("Lateral Raise", "Upper Body", "Dumbbell"),
    isolation("Bicep Curl", "Upper Body", "Dumbbell"),
    isolation("Triceps Pushdown", "Upper Body", "Cable"),
    compound("Deadlift", "Full Body", "Barbell"),
    compound("Kettlebell Swing", "Full Body", "Kettlebell"),
    compound("Burpee", "Full Body, HIIT", "Bodyweight"),
    compound("Thruster", "Full Body", "Dumbbell"),
    compound("Farmer Carry", "Full Body", "Dumbbell"),
    compound("Incline Dumbbell Press", "Upper Body, Push/Pull/Legs", "Dumbbell"),
    compound("Pull-Up", "Push/Pull/Legs", "Bodyweight"),
    compound("Leg Press", "Push/Pull/Legs", "Machine"),
    isolation("Cable Fly", "Push/Pull/Legs", "Cable"),
    isolation("Face Pull", "PPL", "Cable"),
    catalog_exercise("Mountain Climber", "HIIT, Cardio", "Bodyweight"),
    catalog_exercise("Jump Rope", "Cardio", "Other"),
    catalog_exercise("Downward Dog", "Yoga", "Bodyweight"),
    catalog_exercise("Child's Pose", "Yoga, Stretch", "Bodyweight"),
    catalog_exercise("Hamstring Stretch", "Stretch, Flexibility", "Bodyweight"),
  ]
}

pub fn mock_exercise(name: &str) -> ExerciseEntry {
  ExerciseEntry {
    name: name.to_string(),
    sets: 3,
    reps: "10".to_string(),
    weight: None,
    rest_seconds: 60,
    superset_group: None,
    notes: String::new(),
  }
}

/// Intermediate hypertrophy preferences starting on `monday()`
pub fn mock_preferences(days_per_week: u32, duration_days: u32) -> PlanPreferences {
  PlanPreferences {
    name: None,
    goal: Goal::Hypertrophy,
    experience_level: ExperienceLevel::Intermediate,
    days_per_week,
    duration_days,
    start_date: monday(),
    session_types: vec![SessionCategory::Strength],
    equipment: EquipmentFilter::All,
    preferred_days: None,
    periodization: None,
  }
}

/// Unpopulated intermediate plan built straight from the scheduler
pub fn mock_plan_skeleton(days_per_week: u32, duration_days: u32, categories: &[SessionCategory]) -> Plan {
  let experience = ExperienceLevel::Intermediate;
  let split = select_split(days_per_week, experience);
  let sessions = build_schedule(&ScheduleRequest {
    start_date: monday(),
    duration_days,
    days_per_week,
    split,
    categories,
    preferred_days: None,
    experience,
  });
  let now = Utc::now();

  Plan {
    id: "plan-test".to_string(),
    name: "Test Plan".to_string(),
    start_date: monday(),
    end_date: monday() + Duration::days(duration_days as i64),
    duration_days,
    goal: Goal::Hypertrophy,
    experience_level: experience,
    days_per_week,
    split_type: split,
    session_types: categories.to_vec(),
    equipment: EquipmentFilter::All,
    sessions,
    deload_weeks: calculate_deload_weeks(duration_days),
    periodization: PeriodizationStyle::Linear,
    created_at: now,
    updated_at: now,
    is_active: false,
  }
}

/// Skeleton plan whose standard sessions all carry `exercises`
pub fn mock_populated_plan(days_per_week: u32, duration_days: u32, exercises: &[ExerciseEntry]) -> Plan {
  let mut plan = mock_plan_skeleton(days_per_week, duration_days, &[SessionCategory::Strength]);
  for session in &mut plan.sessions {
    session.set_exercises(exercises.to_vec());
  }
  plan
}

/// ---------------------------------------------------------------------------
/// Time Helpers
/// ---------------------------------------------------------------------------

/// Date N days after `monday()`
pub fn day(offset: i64) -> NaiveDate {
  monday() + Duration::days(offset)
}

/// ---------------------------------------------------------------------------
/// Test Macros
/// ---------------------------------------------------------------------------

/// Assert two floats are approximately equal within a tolerance
#[macro_export]
macro_rules! assert_approx_eq {
  ($left:expr, $right:expr, $tolerance:expr) => {
    let diff = ($left - $right).abs();
    assert!(
      diff < $tolerance,
      "Values not approximately equal: {} vs {} (diff: {}, tolerance: {})",
      $left,
      $right,
      diff,
      $tolerance
    );
  };
}

/// ---------------------------------------------------------------------------
/// Tests for Test Utilities
/// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
  use super::*;
  use chrono::Datelike;

  #[tokio::test]
  async fn test_setup_db_creates_schema() {
    let pool = setup_test_db().await;

    let tables: Vec<(String,)> =
      sqlx::query_as("SELECT name FROM sqlite_master WHERE type='table' AND name = 'workout_plans'")
        .fetch_all(&pool)
        .await
        .expect("Failed to query tables");

    assert_eq!(tables.len(), 1);

    teardown_test_db(pool).await;
  }

  #[test]
  fn test_fixtures_are_consistent() {
    assert_eq!(monday().weekday(), chrono::Weekday::Mon);
    assert_eq!(day(7).weekday(), chrono::Weekday::Mon);

    let plan = mock_plan_skeleton(3, 14, &[SessionCategory::Strength]);
    assert_eq!(plan.sessions.len(), 6);
    assert!(plan.deload_weeks.is_empty());

    let names: Vec<String> = mock_catalog().into_iter().map(|e| e.name.to_lowercase()).collect();
    let mut unique = names.clone();
    unique.sort();
    unique.dedup();
    assert_eq!(unique.len(), names.len());
  }
}
