use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// One exercise prescribed inside a session.
/// Owned by its session; sibling sessions hold value copies.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExerciseEntry {
  pub name: String,
  pub sets: u32,
  /// Rep target, either a count ("5") or a range ("8-12")
  pub reps: String,
  #[serde(default)]
  pub weight: Option<f32>,
  pub rest_seconds: u32,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub superset_group: Option<String>,
  #[serde(default)]
  pub notes: String,
}

/// Record supplied by the exercise catalog provider.
/// `workout_type` is free text and may carry several categories
/// ("Upper Body, Push/Pull/Legs").
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogExercise {
  pub name: String,
  #[serde(alias = "workoutType")]
  pub workout_type: String,
  #[serde(default)]
  pub equipment: String,
  #[serde(default)]
  pub mechanic: Option<String>,
  #[serde(default, alias = "primaryMuscle")]
  pub primary_muscle: Option<String>,
}

impl CatalogExercise {
  pub fn is_compound(&self) -> bool {
    self
      .mechanic
      .as_deref()
      .is_some_and(|m| m.eq_ignore_ascii_case("compound"))
  }
}

/// Equipment restriction applied on top of category matching
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum EquipmentFilter {
  /// Sentinel "all": no restriction
  #[default]
  All,
  /// Explicit allow-list, compared case-insensitively
  Only(Vec<String>),
}

impl EquipmentFilter {
  pub fn allows(&self, equipment: &str) -> bool {
    match self {
      Self::All => true,
      Self::Only(items) => {
        let equipment = equipment.trim();
        items.iter().any(|i| i.trim().eq_ignore_ascii_case(equipment))
      }
    }
  }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum EquipmentRepr {
  Sentinel(String),
  List(Vec<String>),
}

impl Serialize for EquipmentFilter {
  fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
  where
    S: Serializer,
  {
    match self {
      Self::All => serializer.serialize_str("all"),
      Self::Only(items) => items.serialize(serializer),
    }
  }
}

impl<'de> Deserialize<'de> for EquipmentFilter {
  fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
  where
    D: Deserializer<'de>,
  {
    match EquipmentRepr::deserialize(deserializer)? {
      EquipmentRepr::Sentinel(s) if s.eq_ignore_ascii_case("all") => Ok(Self::All),
      EquipmentRepr::Sentinel(s) => Err(D::Error::custom(format!(
        "Unknown equipment filter: {}",
        s
      ))),
      // ["all"] is how older clients spell the sentinel
      EquipmentRepr::List(items) if items.iter().any(|i| i.eq_ignore_ascii_case("all")) => {
        Ok(Self::All)
      }
      EquipmentRepr::List(items) => Ok(Self::Only(items)),
    }
  }
}
