pub mod exercise;
pub mod plan;
pub mod session;

pub use exercise::{CatalogExercise, EquipmentFilter, ExerciseEntry};
pub use plan::{ExperienceLevel, Goal, PeriodizationStyle, Plan, PlanPreferences, SplitType};
pub use session::{
  CompletionData, PerformedExercise, PerformedSet, Session, SessionCategory, SessionContent,
  SessionStatus, SessionType,
};
