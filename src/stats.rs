//! Plan progress statistics

use chrono::{NaiveDate, Utc};
use serde::Serialize;

use crate::models::{Plan, SessionStatus};

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PlanStatistics {
  pub total_sessions: usize,
  pub completed_sessions: usize,
  pub skipped_sessions: usize,
  pub in_progress_sessions: usize,
  /// Planned and dated before today
  pub missed_sessions: usize,
  /// Planned and dated today or later
  pub upcoming_sessions: usize,
  /// completed / total * 100, 0 for an empty plan
  pub completion_rate: f64,
}

pub fn plan_statistics(plan: &Plan, today: NaiveDate) -> PlanStatistics {
  let mut stats = PlanStatistics {
    total_sessions: plan.sessions.len(),
    ..Default::default()
  };

  for session in &plan.sessions {
    match session.status {
      SessionStatus::Completed => stats.completed_sessions += 1,
      SessionStatus::Skipped => stats.skipped_sessions += 1,
      SessionStatus::InProgress => stats.in_progress_sessions += 1,
      SessionStatus::Planned if session.date < today => stats.missed_sessions += 1,
      SessionStatus::Planned => stats.upcoming_sessions += 1,
    }
  }

  if stats.total_sessions > 0 {
    stats.completion_rate = stats.completed_sessions as f64 / stats.total_sessions as f64 * 100.0;
  }

  stats
}

impl Plan {
  /// Statistics as of today's UTC date
  pub fn statistics(&self) -> PlanStatistics {
    plan_statistics(self, Utc::now().date_naive())
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::assert_approx_eq;
  use crate::models::SessionCategory;
  use crate::test_utils::{day, mock_plan_skeleton};

  fn with_statuses(statuses: &[SessionStatus]) -> Plan {
    // 5 days/week over 4 weeks gives 20 sessions, weekdays only
    let mut plan = mock_plan_skeleton(5, 28, &[SessionCategory::Strength]);
    for (session, status) in plan.sessions.iter_mut().zip(statuses) {
      session.status = *status;
    }
    plan
  }

  #[test]
  fn test_counts_and_rate() {
    use SessionStatus::*;
    let mut statuses = vec![Completed; 5];
    statuses.extend([Skipped, Skipped]);
    statuses.extend([Planned; 13]);
    let plan = with_statuses(&statuses);

    // Sessions 8..10 (indices 7..=9) fall in week 2 before day 14
    let stats = plan_statistics(&plan, day(14));

    assert_eq!(stats.total_sessions, 20);
    assert_eq!(stats.completed_sessions, 5);
    assert_eq!(stats.skipped_sessions, 2);
    assert_eq!(stats.missed_sessions, 3);
    assert_eq!(stats.upcoming_sessions, 10);
    assert_approx_eq!(stats.completion_rate, 25.0, 1e-9);
  }

  #[test]
  fn test_session_today_is_upcoming() {
    let plan = with_statuses(&[]);
    let stats = plan_statistics(&plan, plan.sessions[0].date);
    assert_eq!(stats.missed_sessions, 0);
    assert_eq!(stats.upcoming_sessions, 20);
  }

  #[test]
  fn test_in_progress_is_tracked_separately() {
    let plan = with_statuses(&[SessionStatus::InProgress]);
    let stats = plan_statistics(&plan, day(100));
    assert_eq!(stats.in_progress_sessions, 1);
    assert_eq!(stats.missed_sessions, 19);
    assert_eq!(stats.upcoming_sessions, 0);
  }

  #[test]
  fn test_empty_plan_has_zero_rate() {
    let mut plan = with_statuses(&[]);
    plan.sessions.clear();
    let stats = plan_statistics(&plan, day(0));
    assert_eq!(stats, PlanStatistics::default());
  }
}
