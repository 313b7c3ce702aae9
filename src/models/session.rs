use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::exercise::ExerciseEntry;

// ---------------------------------------------------------------------------
/// Session Type: what kind of training happens on the day
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum SessionType {
  Upper,
  Lower,
  Full,
  Push,
  Pull,
  Legs,
  /// High-intensity interval conditioning
  Hiit,
  Yoga,
  Stretch,
  /// Kinds owned by other generators, carried through untouched
  Other(String),
}

impl SessionType {
  /// Standard resistance sessions get their content from the exercise catalog
  pub fn is_standard(&self) -> bool {
    matches!(
      self,
      Self::Upper | Self::Lower | Self::Full | Self::Push | Self::Pull | Self::Legs
    )
  }

  pub fn as_str(&self) -> &str {
    match self {
      Self::Upper => "upper",
      Self::Lower => "lower",
      Self::Full => "full",
      Self::Push => "push",
      Self::Pull => "pull",
      Self::Legs => "legs",
      Self::Hiit => "hiit",
      Self::Yoga => "yoga",
      Self::Stretch => "stretch",
      Self::Other(s) => s,
    }
  }
}

impl From<String> for SessionType {
  fn from(s: String) -> Self {
    match s.as_str() {
      "upper" => Self::Upper,
      "lower" => Self::Lower,
      "full" => Self::Full,
      "push" => Self::Push,
      "pull" => Self::Pull,
      "legs" => Self::Legs,
      "hiit" => Self::Hiit,
      "yoga" => Self::Yoga,
      "stretch" => Self::Stretch,
      _ => Self::Other(s),
    }
  }
}

impl From<SessionType> for String {
  fn from(t: SessionType) -> Self {
    match t {
      SessionType::Other(s) => s,
      other => other.as_str().to_string(),
    }
  }
}

impl std::fmt::Display for SessionType {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    write!(f, "{}", self.as_str())
  }
}

/// Session categories a user can ask for when building a plan
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionCategory {
  /// Standard resistance training (split-driven)
  #[serde(alias = "weights")]
  Strength,
  /// Conditioning
  #[serde(alias = "cardio")]
  Hiit,
  Yoga,
  #[serde(alias = "mobility")]
  Stretch,
}

// ---------------------------------------------------------------------------
/// Session Status: stored lifecycle state ("missed" is derived in stats)
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionStatus {
  #[default]
  Planned,
  InProgress,
  Completed,
  Skipped,
}

impl std::fmt::Display for SessionStatus {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    match self {
      Self::Planned => write!(f, "planned"),
      Self::InProgress => write!(f, "in_progress"),
      Self::Completed => write!(f, "completed"),
      Self::Skipped => write!(f, "skipped"),
    }
  }
}

impl std::str::FromStr for SessionStatus {
  type Err = String;
  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s {
      "planned" => Ok(Self::Planned),
      "in_progress" => Ok(Self::InProgress),
      "completed" => Ok(Self::Completed),
      "skipped" => Ok(Self::Skipped),
      _ => Err(format!("Unknown session status: {}", s)),
    }
  }
}

// ---------------------------------------------------------------------------
/// Session Content: exercise list XOR generator payload
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(tag = "kind", content = "data", rename_all = "snake_case")]
pub enum SessionContent {
  /// Skeleton, nothing populated yet
  #[default]
  Pending,
  /// Standard resistance sessions
  Exercises(Vec<ExerciseEntry>),
  /// Opaque payload from a non-standard session generator
  Generated(serde_json::Value),
}

/// What the athlete actually did, attached when a session is completed
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CompletionData {
  #[serde(default)]
  pub duration_minutes: Option<u32>,
  #[serde(default)]
  pub perceived_exertion: Option<f32>,
  #[serde(default)]
  pub notes: Option<String>,
  #[serde(default)]
  pub performed: Vec<PerformedExercise>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PerformedExercise {
  pub name: String,
  pub sets: Vec<PerformedSet>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PerformedSet {
  pub weight: Option<f32>,
  pub reps: u32,
  #[serde(default)]
  pub rpe: Option<f32>,
  #[serde(default)]
  pub notes: Option<String>,
}

// ---------------------------------------------------------------------------
/// Session: one scheduled training day inside a plan
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
  pub id: String,
  pub date: NaiveDate,
  pub session_type: SessionType,
  #[serde(default)]
  pub status: SessionStatus,
  #[serde(default)]
  pub content: SessionContent,
  #[serde(default)]
  pub completed_at: Option<DateTime<Utc>>,
  #[serde(default)]
  pub completion: Option<CompletionData>,
  /// Set when population failed; the session can be repopulated on its own
  #[serde(default)]
  pub population_error: Option<String>,
}

impl Session {
  pub fn skeleton(id: impl Into<String>, date: NaiveDate, session_type: SessionType) -> Self {
    Self {
      id: id.into(),
      date,
      session_type,
      status: SessionStatus::Planned,
      content: SessionContent::Pending,
      completed_at: None,
      completion: None,
      population_error: None,
    }
  }

  pub fn exercises(&self) -> Option<&[ExerciseEntry]> {
    match &self.content {
      SessionContent::Exercises(list) => Some(list),
      _ => None,
    }
  }

  pub fn session_data(&self) -> Option<&serde_json::Value> {
    match &self.content {
      SessionContent::Generated(value) => Some(value),
      _ => None,
    }
  }

  pub fn set_exercises(&mut self, exercises: Vec<ExerciseEntry>) {
    self.content = SessionContent::Exercises(exercises);
    self.population_error = None;
  }

  pub fn set_session_data(&mut self, data: serde_json::Value) {
    self.content = SessionContent::Generated(data);
    self.population_error = None;
  }

  /// Standard sessions fall back to an empty list, others stay unpopulated
  pub fn mark_population_error(&mut self, message: impl Into<String>) {
    self.content = if self.session_type.is_standard() {
      SessionContent::Exercises(Vec::new())
    } else {
      SessionContent::Pending
    };
    self.population_error = Some(message.into());
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn day() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()
  }

  #[test]
  fn test_session_type_string_mapping() {
    assert_eq!(SessionType::from("push".to_string()), SessionType::Push);
    assert_eq!(
      SessionType::from("pilates".to_string()),
      SessionType::Other("pilates".to_string())
    );
    assert_eq!(String::from(SessionType::Legs), "legs");

    let json = serde_json::to_string(&SessionType::Other("pilates".into())).unwrap();
    assert_eq!(json, r#""pilates""#);
  }

  #[test]
  fn test_standard_types() {
    assert!(SessionType::Upper.is_standard());
    assert!(SessionType::Legs.is_standard());
    assert!(!SessionType::Hiit.is_standard());
    assert!(!SessionType::Other("upper body".into()).is_standard());
  }

  #[test]
  fn test_status_roundtrip_through_strings() {
    for status in [
      SessionStatus::Planned,
      SessionStatus::InProgress,
      SessionStatus::Completed,
      SessionStatus::Skipped,
    ] {
      assert_eq!(status.to_string().parse::<SessionStatus>().unwrap(), status);
    }
    assert!("missed".parse::<SessionStatus>().is_err());
  }

  #[test]
  fn test_content_switch_clears_the_other_side() {
    let mut session = Session::skeleton("s1", day(), SessionType::Hiit);
    session.set_session_data(serde_json::json!({"rounds": 8}));
    assert!(session.session_data().is_some());
    assert!(session.exercises().is_none());

    session.set_exercises(vec![]);
    assert!(session.session_data().is_none());
    assert_eq!(session.exercises(), Some(&[][..]));
  }

  #[test]
  fn test_population_error_marker() {
    let mut upper = Session::skeleton("s1", day(), SessionType::Upper);
    upper.mark_population_error("catalog offline");
    assert_eq!(upper.exercises(), Some(&[][..]));
    assert_eq!(upper.population_error.as_deref(), Some("catalog offline"));

    let mut yoga = Session::skeleton("s2", day(), SessionType::Yoga);
    yoga.mark_population_error("no poses");
    assert_eq!(yoga.content, SessionContent::Pending);
  }

  #[test]
  fn test_category_aliases() {
    let cats: Vec<SessionCategory> =
      serde_json::from_str(r#"["strength", "cardio", "mobility", "yoga"]"#).unwrap();
    assert_eq!(
      cats,
      vec![
        SessionCategory::Strength,
        SessionCategory::Hiit,
        SessionCategory::Stretch,
        SessionCategory::Yoga
      ]
    );
  }
}
