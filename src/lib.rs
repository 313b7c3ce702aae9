pub mod catalog;
pub mod config;
pub mod db;
pub mod error;
pub mod generator;
pub mod generators;
pub mod logging;
pub mod models;
pub mod mutations;
pub mod populate;
pub mod schedule;
pub mod selection;
pub mod stats;

#[cfg(feature = "desktop")]
mod commands;

#[cfg(test)]
mod test_utils;

pub use catalog::{ExerciseCatalog, HttpExerciseCatalog, StaticExerciseCatalog};
pub use config::PlannerConfig;
pub use error::{CatalogError, PlanError};
pub use generator::{generate_workout_plan, validate_preferences, GeneratedPlan};
pub use populate::{PopulationRequest, PopulatorRegistry, SessionPopulator, WorkoutPopulator};
pub use stats::{plan_statistics, PlanStatistics};

#[cfg(feature = "desktop")]
#[cfg_attr(mobile, tauri::mobile_entry_point)]
pub fn run() {
  use db::AppState;
  use std::sync::Arc;
  use tauri::Manager;

  // Load environment variables from .env file
  let config = PlannerConfig::load();
  logging::init_logging(
    config
      .as_ref()
      .map(|c| c.log_filter.as_str())
      .unwrap_or(config::DEFAULT_LOG_FILTER),
  );

  let result = tauri::Builder::default()
    .plugin(tauri_plugin_opener::init())
    .setup(move |app| {
      let config = config?;
      let catalog = config.exercise_catalog()?;
      let populator = WorkoutPopulator::new(catalog).with_registry(PopulatorRegistry::with_defaults());

      let app_handle = app.handle().clone();
      let pool = tauri::async_runtime::block_on(async {
        db::initialize_db(&app_handle, config.database_url.as_deref()).await
      })?;

      app_handle.manage(Arc::new(AppState { db: pool, populator }));
      tracing::info!("Database ready");
      Ok(())
    })
    .invoke_handler(tauri::generate_handler![
      // Plans
      commands::plans::generate_plan,
      commands::plans::get_plan,
      commands::plans::get_active_plan,
      commands::plans::list_plans,
      commands::plans::delete_plan,
      commands::plans::activate_plan,
      commands::plans::get_plan_statistics,
      // Sessions
      commands::sessions::move_plan_session,
      commands::sessions::update_plan_session_status,
      commands::sessions::add_plan_session,
      commands::sessions::remove_plan_session,
      commands::sessions::get_recurring_sessions,
      commands::sessions::update_recurring_exercises,
      commands::sessions::repopulate_plan_session,
    ])
    .run(tauri::generate_context!());

  if let Err(e) = result {
    tracing::error!("Error while running tauri application: {}", e);
  }
}
