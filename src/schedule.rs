//! Calendar scheduling for training plans
//!
//! Turns preferences into a day-by-day list of session skeletons:
//! - split selection (full body / upper-lower / push-pull-legs)
//! - training weekday set
//! - repeating session-type pattern
//! - deload weeks and the training blocks between them
//!
//! Everything here is pure and deterministic. Week numbers are derived from
//! a session's position in the schedule, not from the calendar.

use chrono::{Datelike, NaiveDate};

use crate::models::{ExperienceLevel, Session, SessionCategory, SessionType, SplitType};

/// Deloads land on every 4th week
pub const DELOAD_CADENCE_WEEKS: u32 = 4;

/// Where a conditioning session is spliced into a pattern of 4+ entries
const CONDITIONING_SPLICE_INDEX: usize = 3;

/// Patterns shorter than this never receive add-on sessions
const MIN_PATTERN_FOR_ADD_ONS: usize = 3;

/// Even-spread weekday defaults (0 = Sunday .. 6 = Saturday)
const DEFAULT_TRAINING_DAYS: [(u32, &[u8]); 6] = [
    (2, &[1, 4]),
    (3, &[1, 3, 5]),
    (4, &[1, 2, 4, 5]),
    (5, &[1, 2, 3, 4, 5]),
    (6, &[1, 2, 3, 4, 5, 6]),
    (7, &[0, 1, 2, 3, 4, 5, 6]),
];

const FALLBACK_TRAINING_DAYS: &[u8] = &[1, 3, 5];

// ---------------------------------------------------------------------------
/// Split Selection
// ---------------------------------------------------------------------------

pub fn select_split(days_per_week: u32, experience: ExperienceLevel) -> SplitType {
    if days_per_week <= 3 || experience == ExperienceLevel::Beginner {
        SplitType::FullBody
    } else if days_per_week <= 5 {
        SplitType::UpperLower
    } else {
        SplitType::Ppl
    }
}

// ---------------------------------------------------------------------------
/// Training Days
// ---------------------------------------------------------------------------

/// Weekdays to train on. An explicit preference of the right size always wins.
pub fn training_days(days_per_week: u32, preferred: Option<&[u8]>) -> Vec<u8> {
    if let Some(preferred) = preferred {
        let mut days = preferred.to_vec();
        days.sort_unstable();
        days.dedup();
        if days.len() == days_per_week as usize {
            return days;
        }
    }

    DEFAULT_TRAINING_DAYS
        .iter()
        .find(|(count, _)| *count == days_per_week)
        .map(|(_, days)| days.to_vec())
        .unwrap_or_else(|| FALLBACK_TRAINING_DAYS.to_vec())
}

// ---------------------------------------------------------------------------
/// Session Pattern
// ---------------------------------------------------------------------------

/// Recovery token used when a recovery-type category is requested
fn recovery_type(categories: &[SessionCategory]) -> Option<SessionType> {
    if categories.contains(&SessionCategory::Yoga) {
        Some(SessionType::Yoga)
    } else if categories.contains(&SessionCategory::Stretch) {
        Some(SessionType::Stretch)
    } else {
        None
    }
}

/// Repeating list of session types, cycled over the training days.
/// Splice positions are fixed so a given type recurs at a fixed cadence.
pub fn session_pattern(
    split: SplitType,
    categories: &[SessionCategory],
    experience: ExperienceLevel,
) -> Vec<SessionType> {
    let wants = |c: SessionCategory| categories.contains(&c);
    let mut pattern: Vec<SessionType> = Vec::new();

    if wants(SessionCategory::Strength) {
        pattern = match split {
            SplitType::FullBody => vec![SessionType::Full; 3],
            SplitType::UpperLower => vec![
                SessionType::Upper,
                SessionType::Lower,
                SessionType::Upper,
                SessionType::Lower,
            ],
            SplitType::Ppl => vec![
                SessionType::Push,
                SessionType::Pull,
                SessionType::Legs,
                SessionType::Push,
                SessionType::Pull,
                SessionType::Legs,
            ],
        };

        if wants(SessionCategory::Hiit) && experience != ExperienceLevel::Beginner {
            if pattern.len() > CONDITIONING_SPLICE_INDEX {
                pattern.insert(CONDITIONING_SPLICE_INDEX, SessionType::Hiit);
            } else if pattern.len() >= MIN_PATTERN_FOR_ADD_ONS {
                pattern.push(SessionType::Hiit);
            }
        }

        if let Some(recovery) = recovery_type(categories) {
            if pattern.len() >= MIN_PATTERN_FOR_ADD_ONS {
                pattern.push(recovery);
            }
        }
    } else {
        if wants(SessionCategory::Hiit) {
            pattern.push(SessionType::Hiit);
        }
        if wants(SessionCategory::Yoga) {
            pattern.push(SessionType::Yoga);
        }
        if wants(SessionCategory::Stretch) {
            pattern.push(SessionType::Stretch);
        }
    }

    if pattern.is_empty() {
        pattern = vec![SessionType::Full; 3];
    }

    pattern
}

// ---------------------------------------------------------------------------
/// Deloads and Training Blocks
// ---------------------------------------------------------------------------

/// Every 4th week, counting only complete weeks of the plan
pub fn calculate_deload_weeks(duration_days: u32) -> Vec<u32> {
    let full_weeks = duration_days / 7;
    (1..=full_weeks)
        .filter(|week| week % DELOAD_CADENCE_WEEKS == 0)
        .collect()
}

/// 1-based week of the session at `index` in the schedule
pub fn week_number(index: usize, days_per_week: u32) -> u32 {
    (index as u32 / days_per_week.max(1)) + 1
}

/// Exercise-cache block: 1 + deload weeks strictly before `week`
pub fn block_number(week: u32, deload_weeks: &[u32]) -> u32 {
    1 + deload_weeks.iter().filter(|&&d| d < week).count() as u32
}

/// Inclusive week range of a training block
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlockBounds {
    pub first_week: u32,
    /// None when the block runs to the end of the plan
    pub last_week: Option<u32>,
}

impl BlockBounds {
    pub fn contains(&self, week: u32) -> bool {
        week >= self.first_week && self.last_week.is_none_or(|last| week <= last)
    }
}

/// The block `week` belongs to. Deload weeks are excluded from the
/// surrounding blocks and form a single-week block of their own.
pub fn block_bounds(week: u32, deload_weeks: &[u32]) -> BlockBounds {
    if deload_weeks.contains(&week) {
        return BlockBounds {
            first_week: week,
            last_week: Some(week),
        };
    }

    let first_week = deload_weeks
        .iter()
        .filter(|&&d| d < week)
        .max()
        .map(|d| d + 1)
        .unwrap_or(1);
    let last_week = deload_weeks
        .iter()
        .filter(|&&d| d > week)
        .min()
        .map(|d| d - 1);

    BlockBounds {
        first_week,
        last_week,
    }
}

// ---------------------------------------------------------------------------
/// Schedule Builder
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct ScheduleRequest<'a> {
    pub start_date: NaiveDate,
    pub duration_days: u32,
    pub days_per_week: u32,
    pub split: SplitType,
    pub categories: &'a [SessionCategory],
    pub preferred_days: Option<&'a [u8]>,
    pub experience: ExperienceLevel,
}

pub fn weekday_index(date: NaiveDate) -> u8 {
    date.weekday().num_days_from_sunday() as u8
}

/// Walk the calendar forward from the start date, emitting one skeleton per
/// training weekday. Output is in date order.
pub fn build_schedule(request: &ScheduleRequest<'_>) -> Vec<Session> {
    let days = training_days(request.days_per_week, request.preferred_days);
    let pattern = session_pattern(request.split, request.categories, request.experience);

    let mut sessions = Vec::new();
    let mut cursor = 0usize;

    for date in request
        .start_date
        .iter_days()
        .take(request.duration_days as usize)
    {
        if !days.contains(&weekday_index(date)) {
            continue;
        }
        let session_type = pattern[cursor % pattern.len()].clone();
        sessions.push(Session::skeleton(
            format!("session-{}", sessions.len() + 1),
            date,
            session_type,
        ));
        cursor += 1;
    }

    sessions
}

// ---------------------------------------------------------------------------
/// Tests
// ---------------------------------------------------------------------------
