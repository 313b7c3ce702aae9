pub mod plans;
pub mod sessions;

/// ---------------------------------------------------------------------------
/// Test Helpers
/// ---------------------------------------------------------------------------
