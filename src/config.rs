use std::env;
use std::path::PathBuf;
use std::sync::Arc;

use crate::catalog::{ExerciseCatalog, HttpExerciseCatalog, StaticExerciseCatalog};
use crate::error::PlanError;

pub const DATABASE_URL_VAR: &str = "PLANNER_DATABASE_URL";
pub const CATALOG_URL_VAR: &str = "PLANNER_CATALOG_URL";
pub const CATALOG_PATH_VAR: &str = "PLANNER_CATALOG_PATH";
pub const LOG_FILTER_VAR: &str = "PLANNER_LOG";

pub const DEFAULT_DATABASE_URL: &str = "sqlite://workout-planner.db?mode=rwc";
pub const DEFAULT_LOG_FILTER: &str = "info";

/// Where exercises come from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogSource {
  Http(String),
  File(PathBuf),
}

/// Planner configuration loaded from the environment (and `.env`)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannerConfig {
  /// None means the caller picks a location (app data dir on desktop)
  pub database_url: Option<String>,
  pub catalog: CatalogSource,
  pub log_filter: String,
}

fn non_empty_var(name: &str) -> Option<String> {
  env::var(name).ok().map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
}

impl PlannerConfig {
  /// Read configuration from the process environment.
  /// A catalog URL takes precedence over a catalog file.
  pub fn from_env() -> Result<Self, PlanError> {
    let catalog = match (non_empty_var(CATALOG_URL_VAR), non_empty_var(CATALOG_PATH_VAR)) {
      (Some(url), _) => CatalogSource::Http(url),
      (None, Some(path)) => CatalogSource::File(PathBuf::from(path)),
      (None, None) => {
        return Err(PlanError::MissingConfig(format!(
          "{} or {}",
          CATALOG_URL_VAR, CATALOG_PATH_VAR
        )))
      }
    };

    Ok(Self {
      database_url: non_empty_var(DATABASE_URL_VAR),
      catalog,
      log_filter: non_empty_var(LOG_FILTER_VAR).unwrap_or_else(|| DEFAULT_LOG_FILTER.to_string()),
    })
  }

  /// Load `.env` first, then read the environment
  pub fn load() -> Result<Self, PlanError> {
    dotenvy::dotenv().ok();
    Self::from_env()
  }

  pub fn database_url_or_default(&self) -> &str {
    self.database_url.as_deref().unwrap_or(DEFAULT_DATABASE_URL)
  }

  /// Build the configured catalog provider
  pub fn exercise_catalog(&self) -> Result<Arc<dyn ExerciseCatalog>, PlanError> {
    let catalog: Arc<dyn ExerciseCatalog> = match &self.catalog {
      CatalogSource::Http(url) => Arc::new(HttpExerciseCatalog::new(url)?),
      CatalogSource::File(path) => Arc::new(StaticExerciseCatalog::from_path(path)?),
    };
    Ok(catalog)
  }
}

/// ---------------------------------------------------------------------------
/// Tests
/// ---------------------------------------------------------------------------
