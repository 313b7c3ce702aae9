//! Error types for plan generation, editing and storage
//!
//! Caller mistakes (bad preferences, bulk edits without a target) surface as
//! `PlanError`. Catalog outages are `CatalogError`s, which the populator turns
//! into per-session markers instead of failing the whole plan.

use serde::Serialize;

/// ---------------------------------------------------------------------------
/// Plan Errors
/// ---------------------------------------------------------------------------

#[derive(Debug, thiserror::Error)]
pub enum PlanError {
  #[error("Training days per week must be between 2 and 7, got {0}")]
  InvalidDaysPerWeek(u32),

  #[error("Plan duration must be between 1 and 90 days, got {0}")]
  InvalidDuration(u32),

  #[error("Preferred training day must be 0 (Sunday) to 6 (Saturday), got {0}")]
  InvalidPreferredDay(u8),

  #[error("A {1}-day plan starting {0} runs past the last representable date")]
  InvalidStartDate(chrono::NaiveDate, u32),

  #[error("Exercise list must contain at least one exercise")]
  EmptyExerciseList,

  #[error("Plan id is required")]
  MissingPlanId,

  #[error("Session id is required")]
  MissingSessionId,

  #[error("Session not found: {0}")]
  SessionNotFound(String),

  #[error("Plan not found: {0}")]
  PlanNotFound(String),

  #[error("Sessions must be in chronological order before population")]
  UnsortedSessions,

  #[error("Missing configuration: {0}")]
  MissingConfig(String),

  #[error("Catalog error: {0}")]
  Catalog(#[from] CatalogError),

  #[error("Database error: {0}")]
  Database(String),

  #[error("Serialization error: {0}")]
  Serialization(#[from] serde_json::Error),
}

impl From<sqlx::Error> for PlanError {
  fn from(e: sqlx::Error) -> Self {
    Self::Database(e.to_string())
  }
}

impl From<sqlx::migrate::MigrateError> for PlanError {
  fn from(e: sqlx::migrate::MigrateError) -> Self {
    Self::Database(e.to_string())
  }
}

impl Serialize for PlanError {
  fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
  where
    S: serde::Serializer,
  {
    serializer.serialize_str(&self.to_string())
  }
}

/// ---------------------------------------------------------------------------
/// Catalog Errors
/// ---------------------------------------------------------------------------

#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
  #[error("HTTP request failed: {0}")]
  Request(#[from] reqwest::Error),

  #[error("Catalog responded with status {0}")]
  Status(u16),

  #[error("Failed to parse catalog: {0}")]
  Parse(String),

  #[error("Failed to read catalog file: {0}")]
  Io(String),

  #[error("Exercise catalog unavailable")]
  Unavailable,
}

impl Serialize for CatalogError {
  fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
  where
    S: serde::Serializer,
  {
    serializer.serialize_str(&self.to_string())
  }
}
