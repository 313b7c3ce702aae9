//! Exercise count and ordering policy for standard sessions
//!
//! Given the catalog records that passed category and equipment filtering,
//! decide how many exercises a session gets, which ones, in what order, and
//! with what sets/reps/rest prescription.

use std::collections::HashSet;

use crate::catalog::category_rank;
use crate::models::{CatalogExercise, ExerciseEntry, ExperienceLevel, Goal, SessionType};

/// Inputs for one selection. `candidates` is already filtered, in catalog order.
#[derive(Debug, Clone, Copy)]
pub struct SelectionRequest<'a> {
    pub session_type: &'a SessionType,
    pub experience: ExperienceLevel,
    pub goal: Goal,
    pub candidates: &'a [&'a CatalogExercise],
}

pub trait SelectionPolicy: Send + Sync {
    /// Bounded, ordered exercise list. Must be deterministic for equal inputs.
    fn select(&self, request: &SelectionRequest<'_>) -> Vec<ExerciseEntry>;
}

// ---------------------------------------------------------------------------
/// Prescription: sets / reps / rest by goal
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Prescription {
    pub sets: u32,
    pub reps: &'static str,
    pub rest_seconds: u32,
}

pub fn prescription(goal: Goal, experience: ExperienceLevel) -> Prescription {
    let base = match goal {
        Goal::Strength => Prescription {
            sets: 5,
            reps: "3-5",
            rest_seconds: 180,
        },
        Goal::Hypertrophy => Prescription {
            sets: 4,
            reps: "8-12",
            rest_seconds: 90,
        },
        Goal::FatLoss => Prescription {
            sets: 3,
            reps: "12-15",
            rest_seconds: 45,
        },
        Goal::GeneralFitness => Prescription {
            sets: 3,
            reps: "10-12",
            rest_seconds: 60,
        },
    };

    if experience == ExperienceLevel::Beginner {
        Prescription {
            sets: base.sets.saturating_sub(1).max(2),
            ..base
        }
    } else {
        base
    }
}

/// Exercises per session
pub fn exercise_count(session_type: &SessionType, experience: ExperienceLevel) -> usize {
    let (beginner, intermediate, advanced) = match session_type {
        SessionType::Push | SessionType::Pull | SessionType::Legs => (4, 5, 6),
        _ => (5, 6, 7),
    };
    match experience {
        ExperienceLevel::Beginner => beginner,
        ExperienceLevel::Intermediate => intermediate,
        ExperienceLevel::Advanced => advanced,
    }
}

/// Leading compound lifts that are never superset
const MAIN_LIFT_SLOTS: usize = 2;

fn superset_group(index: usize, total: usize) -> Option<String> {
    if index < MAIN_LIFT_SLOTS {
        return None;
    }
    let offset = index - MAIN_LIFT_SLOTS;
    let pair = offset / 2;
    let has_partner = if offset % 2 == 0 { index + 1 < total } else { true };
    has_partner.then(|| ((b'A' + (pair % 26) as u8) as char).to_string())
}

// ---------------------------------------------------------------------------
/// Default Policy
// ---------------------------------------------------------------------------

/// Primary-category matches first, compounds before isolation, then catalog order
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultSelectionPolicy;

impl SelectionPolicy for DefaultSelectionPolicy {
    fn select(&self, request: &SelectionRequest<'_>) -> Vec<ExerciseEntry> {
        let count = exercise_count(request.session_type, request.experience);
        let rx = prescription(request.goal, request.experience);

        let mut ranked: Vec<(usize, &CatalogExercise)> =
            request.candidates.iter().copied().enumerate().collect();
        ranked.sort_by_key(|(idx, e)| {
            (
                category_rank(request.session_type, &e.workout_type),
                !e.is_compound(),
                *idx,
            )
        });

        let mut seen = HashSet::new();
        let picked: Vec<&CatalogExercise> = ranked
            .into_iter()
            .map(|(_, e)| e)
            .filter(|e| seen.insert(e.name.to_lowercase()))
            .take(count)
            .collect();

        let supersets = request.goal == Goal::FatLoss;
        let total = picked.len();

        picked
            .into_iter()
            .enumerate()
            .map(|(i, e)| ExerciseEntry {
                name: e.name.clone(),
                sets: rx.sets,
                reps: rx.reps.to_string(),
                weight: None,
                rest_seconds: rx.rest_seconds,
                superset_group: if supersets { superset_group(i, total) } else { None },
                notes: String::new(),
            })
            .collect()
    }
}
