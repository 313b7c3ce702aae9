//! Built-in generators for conditioning and recovery sessions
//!
//! These fill the opaque `session_data` of `hiit`, `yoga` and `stretch`
//! sessions. They draw movements from the exercise catalog when it has
//! suitably tagged records and fall back to a bodyweight list otherwise, so
//! a catalog outage never blocks a conditioning or recovery day.

use std::collections::HashSet;
use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::catalog::has_any_tag;
use crate::models::{CatalogExercise, ExperienceLevel, SessionType};
use crate::populate::{PopulationRequest, PopulatorRegistry, SessionPopulator};

// ---------------------------------------------------------------------------
/// Intervals (hiit)
// ---------------------------------------------------------------------------

const CONDITIONING_TAGS: &[&str] = &["HIIT", "Cardio", "Conditioning"];
const FALLBACK_CONDITIONING: &[&str] = &["Jumping Jacks", "Burpees", "Mountain Climbers", "High Knees"];

/// Movements rotated through each round
const INTERVAL_MOVEMENTS: usize = 4;
/// Work interval grows by this much per week
const WORK_STEP_SECONDS: u32 = 5;
const MAX_WORK_SECONDS: u32 = 60;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IntervalMovement {
    pub name: String,
    pub work_seconds: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IntervalWorkout {
    pub format: String,
    pub rounds: u32,
    pub work_seconds: u32,
    pub rest_seconds: u32,
    pub movements: Vec<IntervalMovement>,
    pub total_minutes: u32,
}

/// (rounds, work, rest) before weekly progression
fn interval_base(experience: ExperienceLevel) -> (u32, u32, u32) {
    match experience {
        ExperienceLevel::Beginner => (6, 20, 40),
        ExperienceLevel::Intermediate => (8, 30, 30),
        ExperienceLevel::Advanced => (10, 40, 20),
    }
}

pub fn build_interval_workout(
    experience: ExperienceLevel,
    week_number: u32,
    catalog: &[CatalogExercise],
) -> IntervalWorkout {
    let (rounds, base_work, rest_seconds) = interval_base(experience);
    let work_seconds =
        (base_work + WORK_STEP_SECONDS * week_number.saturating_sub(1)).min(MAX_WORK_SECONDS);

    let movements: Vec<IntervalMovement> = pick_movements(
        catalog,
        CONDITIONING_TAGS,
        FALLBACK_CONDITIONING,
        INTERVAL_MOVEMENTS,
    )
    .into_iter()
    .map(|name| IntervalMovement { name, work_seconds })
    .collect();

    let per_round = (work_seconds + rest_seconds) * movements.len() as u32;
    let total_minutes = (rounds * per_round).div_ceil(60);

    IntervalWorkout {
        format: "intervals".to_string(),
        rounds,
        work_seconds,
        rest_seconds,
        movements,
        total_minutes,
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct IntervalSessionPopulator;

#[async_trait]
impl SessionPopulator for IntervalSessionPopulator {
    async fn populate(&self, request: &PopulationRequest<'_>) -> Result<serde_json::Value, String> {
        let workout = build_interval_workout(request.experience, request.week_number, request.catalog);
        serde_json::to_value(workout).map_err(|e| e.to_string())
    }
}

// ---------------------------------------------------------------------------
/// Recovery flows (yoga / stretch)
// ---------------------------------------------------------------------------

const YOGA_TAGS: &[&str] = &["Yoga"];
const STRETCH_TAGS: &[&str] = &["Stretch", "Flexibility", "Mobility"];
const FALLBACK_YOGA: &[&str] = &[
    "Mountain Pose",
    "Downward Dog",
    "Low Lunge",
    "Warrior II",
    "Pigeon Pose",
    "Child's Pose",
];
const FALLBACK_STRETCH: &[&str] = &[
    "Hamstring Stretch",
    "Hip Flexor Stretch",
    "Quad Stretch",
    "Chest Opener",
    "Thoracic Rotation",
    "Calf Stretch",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecoveryStyle {
    Yoga,
    Stretch,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecoveryHold {
    pub name: String,
    pub hold_seconds: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecoveryFlow {
    pub format: String,
    pub style: RecoveryStyle,
    pub holds: Vec<RecoveryHold>,
    pub total_minutes: u32,
}

/// (hold count, seconds per hold)
fn recovery_base(experience: ExperienceLevel) -> (usize, u32) {
    match experience {
        ExperienceLevel::Beginner => (6, 30),
        ExperienceLevel::Intermediate => (8, 45),
        ExperienceLevel::Advanced => (10, 60),
    }
}

pub fn build_recovery_flow(
    style: RecoveryStyle,
    experience: ExperienceLevel,
    catalog: &[CatalogExercise],
) -> RecoveryFlow {
    let (count, hold_seconds) = recovery_base(experience);
    let (tags, fallback) = match style {
        RecoveryStyle::Yoga => (YOGA_TAGS, FALLBACK_YOGA),
        RecoveryStyle::Stretch => (STRETCH_TAGS, FALLBACK_STRETCH),
    };

    let holds: Vec<RecoveryHold> = pick_movements(catalog, tags, fallback, count)
        .into_iter()
        .map(|name| RecoveryHold { name, hold_seconds })
        .collect();
    let total_minutes = (hold_seconds * holds.len() as u32).div_ceil(60);

    RecoveryFlow {
        format: "flow".to_string(),
        style,
        holds,
        total_minutes,
    }
}

#[derive(Debug, Clone, Copy)]
pub struct RecoverySessionPopulator {
    style: RecoveryStyle,
}

impl RecoverySessionPopulator {
    pub fn new(style: RecoveryStyle) -> Self {
        Self { style }
    }
}

#[async_trait]
impl SessionPopulator for RecoverySessionPopulator {
    async fn populate(&self, request: &PopulationRequest<'_>) -> Result<serde_json::Value, String> {
        let flow = build_recovery_flow(self.style, request.experience, request.catalog);
        serde_json::to_value(flow).map_err(|e| e.to_string())
    }
}

// ---------------------------------------------------------------------------
/// Shared
// ---------------------------------------------------------------------------

/// Tagged catalog names first (catalog order, deduplicated), topped up
/// from the fallback list until `count` is reached
fn pick_movements(
    catalog: &[CatalogExercise],
    tags: &[&str],
    fallback: &[&str],
    count: usize,
) -> Vec<String> {
    let mut seen = HashSet::new();
    catalog
        .iter()
        .filter(|e| has_any_tag(&e.workout_type, tags))
        .map(|e| e.name.clone())
        .chain(fallback.iter().map(|name| name.to_string()))
        .filter(|name| seen.insert(name.to_lowercase()))
        .take(count)
        .collect()
}

impl PopulatorRegistry {
    /// Registry with the built-in interval and recovery generators bound
    pub fn with_defaults() -> Self {
        Self::new()
            .register(SessionType::Hiit, Arc::new(IntervalSessionPopulator))
            .register(
                SessionType::Yoga,
                Arc::new(RecoverySessionPopulator::new(RecoveryStyle::Yoga)),
            )
            .register(
                SessionType::Stretch,
                Arc::new(RecoverySessionPopulator::new(RecoveryStyle::Stretch)),
            )
    }
}
