//! Session population with training-block reuse
//!
//! Standard sessions get an exercise list from the catalog. Non-standard
//! sessions are handed to whichever `SessionPopulator` is bound to their
//! kind; kinds with nothing bound are left as skeletons.
//!
//! Sessions of the same type inside one training block receive identical
//! content, computed once. Population therefore walks the schedule strictly
//! in date order: the first session of a (type, block) pair primes the
//! cache and every later one copies from it. Input that is not sorted by
//! date is rejected rather than silently producing mismatched blocks.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;

use crate::catalog::{filter_candidates, ExerciseCatalog};
use crate::error::{CatalogError, PlanError};
use crate::models::{
  CatalogExercise, ExperienceLevel, Goal, Plan, Session, SessionContent, SessionType,
};
use crate::schedule::{block_number, week_number};
use crate::selection::{DefaultSelectionPolicy, SelectionPolicy, SelectionRequest};

/// ---------------------------------------------------------------------------
/// Populator Capability
/// ---------------------------------------------------------------------------

/// Everything a non-standard generator gets to work with
#[derive(Debug, Clone, Copy)]
pub struct PopulationRequest<'a> {
  pub session_type: &'a SessionType,
  pub experience: ExperienceLevel,
  pub goal: Goal,
  pub week_number: u32,
  pub catalog: &'a [CatalogExercise],
}

/// Produces the opaque payload for one kind of non-standard session
#[async_trait]
pub trait SessionPopulator: Send + Sync {
  async fn populate(&self, request: &PopulationRequest<'_>) -> Result<serde_json::Value, String>;
}

/// Session kind -> populator bindings
#[derive(Clone, Default)]
pub struct PopulatorRegistry {
  populators: HashMap<SessionType, Arc<dyn SessionPopulator>>,
}

impl PopulatorRegistry {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn register(mut self, session_type: SessionType, populator: Arc<dyn SessionPopulator>) -> Self {
    self.populators.insert(session_type, populator);
    self
  }

  pub fn get(&self, session_type: &SessionType) -> Option<&Arc<dyn SessionPopulator>> {
    self.populators.get(session_type)
  }

  pub fn is_bound(&self, session_type: &SessionType) -> bool {
    self.populators.contains_key(session_type)
  }
}

impl std::fmt::Debug for PopulatorRegistry {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("PopulatorRegistry")
      .field("kinds", &self.populators.keys().collect::<Vec<_>>())
      .finish()
  }
}

/// ---------------------------------------------------------------------------
/// Workout Populator
/// ---------------------------------------------------------------------------

enum Populated {
  Content(SessionContent),
  /// No populator bound, session stays a skeleton
  PassThrough,
  Failed(String),
}

pub struct WorkoutPopulator {
  catalog: Arc<dyn ExerciseCatalog>,
  policy: Arc<dyn SelectionPolicy>,
  registry: PopulatorRegistry,
}

impl WorkoutPopulator {
  pub fn new(catalog: Arc<dyn ExerciseCatalog>) -> Self {
    Self {
      catalog,
      policy: Arc::new(DefaultSelectionPolicy),
      registry: PopulatorRegistry::default(),
    }
  }

  pub fn with_policy(mut self, policy: Arc<dyn SelectionPolicy>) -> Self {
    self.policy = policy;
    self
  }

  pub fn with_registry(mut self, registry: PopulatorRegistry) -> Self {
    self.registry = registry;
    self
  }

  async fn load_catalog(&self) -> Result<Vec<CatalogExercise>, CatalogError> {
    self.catalog.fetch_exercises().await.inspect_err(|e| {
      tracing::warn!("Exercise catalog fetch failed, sessions will be flagged: {}", e);
    })
  }

  /// Fill every session of `plan`. Precondition: sessions sorted by date.
  /// Returns the populated plan and one warning per session that failed.
  pub async fn populate_plan(&self, mut plan: Plan) -> Result<(Plan, Vec<String>), PlanError> {
    ensure_chronological(&plan.sessions)?;

    let catalog = self.load_catalog().await;
    let mut cache: HashMap<(SessionType, u32), SessionContent> = HashMap::new();
    let mut warnings = Vec::new();

    for index in 0..plan.sessions.len() {
      let week = week_number(index, plan.days_per_week);
      let block = block_number(week, &plan.deload_weeks);
      let session_type = plan.sessions[index].session_type.clone();
      let key = (session_type.clone(), block);

      if let Some(content) = cache.get(&key) {
        tracing::debug!("Reusing {} selection for block {} (week {})", session_type, block, week);
        let session = &mut plan.sessions[index];
        session.content = content.clone();
        session.population_error = None;
        continue;
      }

      let outcome = self
        .populate_session(&plan, &session_type, week, catalog.as_deref())
        .await;

      match outcome {
        Populated::Content(content) => {
          let session = &mut plan.sessions[index];
          session.content = content.clone();
          session.population_error = None;
          cache.insert(key, content);
        }
        Populated::PassThrough => {}
        Populated::Failed(message) => {
          let session = &mut plan.sessions[index];
          warnings.push(population_warning(session, &message));
          session.mark_population_error(message);
        }
      }
    }

    tracing::info!(
      "Populated {} sessions for plan {} ({} warnings)",
      plan.sessions.len(),
      plan.id,
      warnings.len()
    );

    Ok((plan, warnings))
  }

  /// Redo population for a single session, e.g. one that carries an error
  /// marker. A healthy sibling of the same type in the same block is copied
  /// so the block stays uniform; otherwise the catalog is consulted again.
  pub async fn repopulate_session(
    &self,
    plan: &Plan,
    session_id: &str,
  ) -> Result<(Plan, Option<String>), PlanError> {
    let index = plan
      .session_index(session_id)
      .ok_or_else(|| PlanError::SessionNotFound(session_id.to_string()))?;

    let week = week_number(index, plan.days_per_week);
    let block = block_number(week, &plan.deload_weeks);
    let session_type = plan.sessions[index].session_type.clone();

    let sibling = plan.sessions.iter().enumerate().find(|(i, s)| {
      *i != index
        && s.session_type == session_type
        && s.population_error.is_none()
        && has_content(s)
        && block_number(week_number(*i, plan.days_per_week), &plan.deload_weeks) == block
    });

    let mut next = plan.clone();
    let mut warning = None;

    if let Some((_, sibling)) = sibling {
      let session = &mut next.sessions[index];
      session.content = sibling.content.clone();
      session.population_error = None;
    } else {
      let catalog = self.load_catalog().await;
      let outcome = self
        .populate_session(plan, &session_type, week, catalog.as_deref())
        .await;

      match outcome {
        Populated::Content(content) => {
          let session = &mut next.sessions[index];
          session.content = content;
          session.population_error = None;
        }
        Populated::PassThrough => {}
        Populated::Failed(message) => {
          let session = &mut next.sessions[index];
          warning = Some(population_warning(session, &message));
          session.mark_population_error(message);
        }
      }
    }

    next.updated_at = Utc::now();
    Ok((next, warning))
  }

  async fn populate_session(
    &self,
    plan: &Plan,
    session_type: &SessionType,
    week: u32,
    catalog: Result<&[CatalogExercise], &CatalogError>,
  ) -> Populated {
    if session_type.is_standard() {
      let catalog = match catalog {
        Ok(catalog) => catalog,
        Err(e) => return Populated::Failed(format!("Exercise catalog unavailable: {}", e)),
      };

      let candidates = filter_candidates(catalog, session_type, &plan.equipment);
      if candidates.is_empty() {
        return Populated::Failed(format!(
          "No {} exercises match the available equipment",
          session_type
        ));
      }

      let exercises = self.policy.select(&SelectionRequest {
        session_type,
        experience: plan.experience_level,
        goal: plan.goal,
        candidates: &candidates,
      });
      if exercises.is_empty() {
        return Populated::Failed(format!("No {} exercises could be selected", session_type));
      }

      return Populated::Content(SessionContent::Exercises(exercises));
    }

    let Some(populator) = self.registry.get(session_type) else {
      return Populated::PassThrough;
    };

    let request = PopulationRequest {
      session_type,
      experience: plan.experience_level,
      goal: plan.goal,
      week_number: week,
      catalog: catalog.unwrap_or(&[]),
    };

    match populator.populate(&request).await {
      Ok(data) => Populated::Content(SessionContent::Generated(data)),
      Err(e) => Populated::Failed(e),
    }
  }
}

fn has_content(session: &Session) -> bool {
  match &session.content {
    SessionContent::Pending => false,
    SessionContent::Exercises(list) => !list.is_empty(),
    SessionContent::Generated(_) => true,
  }
}

fn population_warning(session: &Session, message: &str) -> String {
  format!(
    "Session {} ({} on {}): {}",
    session.id, session.session_type, session.date, message
  )
}

pub fn ensure_chronological(sessions: &[Session]) -> Result<(), PlanError> {
  if sessions.windows(2).all(|w| w[0].date <= w[1].date) {
    Ok(())
  } else {
    Err(PlanError::UnsortedSessions)
  }
}

/// ---------------------------------------------------------------------------
/// Tests
/// ---------------------------------------------------------------------------
