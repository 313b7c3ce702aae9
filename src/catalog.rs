//! Exercise catalog providers and category matching
//!
//! The catalog is an external, loosely tagged lookup table. Each record's
//! `workout_type` is free text expected to contain known category phrases
//! ("Upper Body", "Full Body", "Push/Pull/Legs"). All matching against that
//! text lives in `matches_session_type` so the tagging scheme can change
//! without touching scheduling code.

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::path::Path;
use url::Url;

use crate::error::CatalogError;
use crate::models::{CatalogExercise, EquipmentFilter, SessionType};

/// ---------------------------------------------------------------------------
/// Category Tags
/// ---------------------------------------------------------------------------

pub const UPPER_BODY_TAG: &str = "Upper Body";
pub const LOWER_BODY_TAG: &str = "Lower Body";
pub const FULL_BODY_TAG: &str = "Full Body";
pub const PPL_TAG: &str = "Push/Pull/Legs";
/// Short form, matched case-sensitively so words like "supplemental" don't hit
const PPL_SHORT_TAG: &str = "PPL";

/// Case-insensitive substring test against a catalog tag field
pub fn has_tag(tag_field: &str, tag: &str) -> bool {
  tag_field.to_lowercase().contains(&tag.to_lowercase())
}

pub fn has_any_tag(tag_field: &str, tags: &[&str]) -> bool {
  tags.iter().any(|t| has_tag(tag_field, t))
}

fn is_ppl_tagged(tag_field: &str) -> bool {
  has_tag(tag_field, PPL_TAG) || tag_field.contains(PPL_SHORT_TAG)
}

/// Whether a catalog record with this workout-type tag can appear in a
/// session of the given type. Non-standard types never match.
pub fn matches_session_type(session_type: &SessionType, workout_type: &str) -> bool {
  match session_type {
    SessionType::Upper => {
      has_any_tag(workout_type, &[UPPER_BODY_TAG, FULL_BODY_TAG]) || is_ppl_tagged(workout_type)
    }
    SessionType::Lower => {
      has_any_tag(workout_type, &[LOWER_BODY_TAG, FULL_BODY_TAG]) || is_ppl_tagged(workout_type)
    }
    SessionType::Full => has_tag(workout_type, FULL_BODY_TAG),
    SessionType::Push | SessionType::Pull | SessionType::Legs => is_ppl_tagged(workout_type),
    _ => false,
  }
}

/// How closely a record fits a session type, lower is better.
/// The session's own category first, then full body, then PPL-tagged work.
pub fn category_rank(session_type: &SessionType, workout_type: &str) -> u8 {
  let primary = match session_type {
    SessionType::Upper => Some(UPPER_BODY_TAG),
    SessionType::Lower => Some(LOWER_BODY_TAG),
    SessionType::Full => Some(FULL_BODY_TAG),
    _ => None,
  };

  match primary {
    Some(tag) if has_tag(workout_type, tag) => 0,
    _ if has_tag(workout_type, FULL_BODY_TAG) => 1,
    _ => 2,
  }
}

/// Catalog records usable for a session, in catalog order
pub fn filter_candidates<'a>(
  catalog: &'a [CatalogExercise],
  session_type: &SessionType,
  equipment: &EquipmentFilter,
) -> Vec<&'a CatalogExercise> {
  catalog
    .iter()
    .filter(|e| matches_session_type(session_type, &e.workout_type))
    .filter(|e| equipment.allows(&e.equipment))
    .collect()
}

/// ---------------------------------------------------------------------------
/// Catalog Providers
/// ---------------------------------------------------------------------------

#[async_trait]
pub trait ExerciseCatalog: Send + Sync {
  async fn fetch_exercises(&self) -> Result<Vec<CatalogExercise>, CatalogError>;
}

/// Catalog documents come either as a bare array or wrapped in an object
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum CatalogDocument {
  List(Vec<CatalogExercise>),
  Wrapped { exercises: Vec<CatalogExercise> },
}

impl CatalogDocument {
  fn into_exercises(self) -> Vec<CatalogExercise> {
    match self {
      Self::List(exercises) | Self::Wrapped { exercises } => exercises,
    }
  }
}

pub fn parse_catalog(json: &str) -> Result<Vec<CatalogExercise>, CatalogError> {
  serde_json::from_str::<CatalogDocument>(json)
    .map(CatalogDocument::into_exercises)
    .map_err(|e| CatalogError::Parse(e.to_string()))
}

/// Catalog served as JSON over HTTP
#[derive(Debug, Clone)]
pub struct HttpExerciseCatalog {
  client: Client,
  url: Url,
}

impl HttpExerciseCatalog {
  pub fn new(url: &str) -> Result<Self, CatalogError> {
    let url = Url::parse(url).map_err(|e| CatalogError::Parse(format!("Invalid catalog URL: {}", e)))?;
    Ok(Self {
      client: Client::new(),
      url,
    })
  }
}

#[async_trait]
impl ExerciseCatalog for HttpExerciseCatalog {
  async fn fetch_exercises(&self) -> Result<Vec<CatalogExercise>, CatalogError> {
    tracing::debug!("Fetching exercise catalog from {}", self.url);

    let response = self.client.get(self.url.clone()).send().await?;

    if !response.status().is_success() {
      return Err(CatalogError::Status(response.status().as_u16()));
    }

    let body = response.text().await?;
    parse_catalog(&body).inspect_err(|e| {
      tracing::warn!(
        "Failed to parse catalog response: {} (first 200 chars: {})",
        e,
        body.chars().take(200).collect::<String>()
      );
    })
  }
}

/// Catalog held in memory, loaded from a bundled JSON table or built in code
#[derive(Debug, Clone, Default)]
pub struct StaticExerciseCatalog {
  /// None simulates an unreachable provider
  exercises: Option<Vec<CatalogExercise>>,
}

impl StaticExerciseCatalog {
  pub fn new(exercises: Vec<CatalogExercise>) -> Self {
    Self {
      exercises: Some(exercises),
    }
  }

  pub fn unavailable() -> Self {
    Self { exercises: None }
  }

  pub fn from_json_str(json: &str) -> Result<Self, CatalogError> {
    parse_catalog(json).map(Self::new)
  }

  pub fn from_path(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path)
      .map_err(|e| CatalogError::Io(format!("{}: {}", path.display(), e)))?;
    Self::from_json_str(&content)
  }
}

#[async_trait]
impl ExerciseCatalog for StaticExerciseCatalog {
  async fn fetch_exercises(&self) -> Result<Vec<CatalogExercise>, CatalogError> {
    self.exercises.clone().ok_or(CatalogError::Unavailable)
  }
}

/// ---------------------------------------------------------------------------
/// Tests
/// ---------------------------------------------------------------------------
