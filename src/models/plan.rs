use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::exercise::EquipmentFilter;
use super::session::{Session, SessionCategory};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Goal {
  Strength,
  Hypertrophy,
  FatLoss,
  GeneralFitness,
}

impl Goal {
  pub fn label(&self) -> &'static str {
    match self {
      Self::Strength => "Strength",
      Self::Hypertrophy => "Hypertrophy",
      Self::FatLoss => "Fat Loss",
      Self::GeneralFitness => "General Fitness",
    }
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExperienceLevel {
  Beginner,
  Intermediate,
  Advanced,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SplitType {
  FullBody,
  UpperLower,
  Ppl,
}

impl SplitType {
  pub fn label(&self) -> &'static str {
    match self {
      Self::FullBody => "Full Body",
      Self::UpperLower => "Upper/Lower",
      Self::Ppl => "Push/Pull/Legs",
    }
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PeriodizationStyle {
  #[default]
  Linear,
  Undulating,
  Block,
}

fn default_duration_days() -> u32 {
  28
}

fn default_session_types() -> Vec<SessionCategory> {
  vec![SessionCategory::Strength]
}

fn today() -> NaiveDate {
  Utc::now().date_naive()
}

/// What the user asked for. Validated before any scheduling happens.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanPreferences {
  #[serde(default)]
  pub name: Option<String>,
  pub goal: Goal,
  pub experience_level: ExperienceLevel,
  pub days_per_week: u32,
  #[serde(default = "default_duration_days")]
  pub duration_days: u32,
  #[serde(default = "today")]
  pub start_date: NaiveDate,
  #[serde(default = "default_session_types")]
  pub session_types: Vec<SessionCategory>,
  #[serde(default)]
  pub equipment: EquipmentFilter,
  /// Explicit weekdays, 0 = Sunday .. 6 = Saturday
  #[serde(default)]
  pub preferred_days: Option<Vec<u8>>,
  #[serde(default)]
  pub periodization: Option<PeriodizationStyle>,
}

/// A multi-week training program
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Plan {
  pub id: String,
  pub name: String,
  pub start_date: NaiveDate,
  pub end_date: NaiveDate,
  pub duration_days: u32,
  pub goal: Goal,
  pub experience_level: ExperienceLevel,
  pub days_per_week: u32,
  pub split_type: SplitType,
  pub session_types: Vec<SessionCategory>,
  pub equipment: EquipmentFilter,
  /// Chronological order
  pub sessions: Vec<Session>,
  /// 1-based week numbers
  pub deload_weeks: Vec<u32>,
  pub periodization: PeriodizationStyle,
  pub created_at: DateTime<Utc>,
  pub updated_at: DateTime<Utc>,
  pub is_active: bool,
}

impl Plan {
  pub fn session(&self, session_id: &str) -> Option<&Session> {
    self.sessions.iter().find(|s| s.id == session_id)
  }

  pub fn session_index(&self, session_id: &str) -> Option<usize> {
    self.sessions.iter().position(|s| s.id == session_id)
  }

  /// Sessions whose population failed, with their error markers
  pub fn population_errors(&self) -> Vec<(&str, &str)> {
    self
      .sessions
      .iter()
      .filter_map(|s| s.population_error.as_deref().map(|e| (s.id.as_str(), e)))
      .collect()
  }
}
