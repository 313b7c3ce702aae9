//! Plan editing after generation
//!
//! Every operation takes the plan by reference and returns a new one; the
//! input is never touched. `updated_at` moves only when something actually
//! changed, so repeating an edit is a no-op.

use chrono::{NaiveDate, Utc};
use uuid::Uuid;

use crate::error::PlanError;
use crate::models::{
    CompletionData, ExerciseEntry, Plan, Session, SessionContent, SessionStatus, SessionType,
};
use crate::schedule::{block_bounds, week_number};

fn touch(mut plan: Plan) -> Plan {
    plan.updated_at = Utc::now();
    plan
}

// ---------------------------------------------------------------------------
/// Single-session edits
// ---------------------------------------------------------------------------

/// Reschedule a session. Ordering of the collection is left as-is.
pub fn move_session(plan: &Plan, session_id: &str, new_date: NaiveDate) -> Plan {
    match plan.session_index(session_id) {
        Some(i) if plan.sessions[i].date != new_date => {
            let mut next = plan.clone();
            next.sessions[i].date = new_date;
            touch(next)
        }
        _ => plan.clone(),
    }
}

/// Set a session's status. Completing with data also stamps `completed_at`;
/// any other status clears the completion record.
pub fn update_session_status(
    plan: &Plan,
    session_id: &str,
    status: SessionStatus,
    completion: Option<CompletionData>,
) -> Plan {
    let Some(i) = plan.session_index(session_id) else {
        return plan.clone();
    };

    let mut session = plan.sessions[i].clone();
    session.status = status;

    match (status, completion) {
        (SessionStatus::Completed, Some(data)) => {
            session.completed_at = Some(Utc::now());
            session.completion = Some(data);
        }
        (SessionStatus::Completed, None) => {}
        _ => {
            session.completed_at = None;
            session.completion = None;
        }
    }

    if session == plan.sessions[i] {
        return plan.clone();
    }

    let mut next = plan.clone();
    next.sessions[i] = session;
    touch(next)
}

/// Append a session one day after the latest one, or today for an empty plan
pub fn add_session(plan: &Plan, session_type: SessionType) -> Plan {
    add_session_on(plan, session_type, Utc::now().date_naive())
}

pub fn add_session_on(plan: &Plan, session_type: SessionType, today: NaiveDate) -> Plan {
    let date = plan
        .sessions
        .iter()
        .map(|s| s.date)
        .max()
        .and_then(|d| d.succ_opt())
        .unwrap_or(today);

    let mut session = Session::skeleton(
        format!("session-{}", Uuid::new_v4().simple()),
        date,
        session_type,
    );
    if session.session_type.is_standard() {
        session.content = SessionContent::Exercises(Vec::new());
    }

    let mut next = plan.clone();
    next.sessions.push(session);
    next.sessions.sort_by_key(|s| s.date);
    touch(next)
}

pub fn remove_session(plan: &Plan, session_id: &str) -> Plan {
    if plan.session_index(session_id).is_none() {
        return plan.clone();
    }
    let mut next = plan.clone();
    next.sessions.retain(|s| s.id != session_id);
    touch(next)
}

/// Replace the exercises of one standard session. Other kinds are left alone.
pub fn update_session_exercises(plan: &Plan, session_id: &str, exercises: &[ExerciseEntry]) -> Plan {
    match plan.session_index(session_id) {
        Some(i) if plan.sessions[i].session_type.is_standard() => {
            let mut next = plan.clone();
            next.sessions[i].set_exercises(exercises.to_vec());
            touch(next)
        }
        _ => plan.clone(),
    }
}

// ---------------------------------------------------------------------------
/// Recurring (same type, same training block) edits
// ---------------------------------------------------------------------------

/// Sessions of the same type as `session_id` inside its training block,
/// including the session itself. Unknown ids give an empty list.
pub fn get_recurring_sessions_in_block<'a>(plan: &'a Plan, session_id: &str) -> Vec<&'a Session> {
    let Some(index) = plan.session_index(session_id) else {
        return Vec::new();
    };

    let target = &plan.sessions[index];
    let bounds = block_bounds(week_number(index, plan.days_per_week), &plan.deload_weeks);

    plan.sessions
        .iter()
        .enumerate()
        .filter(|(i, s)| {
            s.session_type == target.session_type
                && bounds.contains(week_number(*i, plan.days_per_week))
        })
        .map(|(_, s)| s)
        .collect()
}

/// Apply one exercise list to every recurring instance of a session
pub fn update_recurring_session_exercises(
    plan: &Plan,
    session_id: &str,
    exercises: &[ExerciseEntry],
) -> Result<Plan, PlanError> {
    if plan.id.trim().is_empty() {
        return Err(PlanError::MissingPlanId);
    }
    if session_id.trim().is_empty() {
        return Err(PlanError::MissingSessionId);
    }
    if exercises.is_empty() {
        return Err(PlanError::EmptyExerciseList);
    }

    if plan.session_index(session_id).is_none() {
        return Err(PlanError::SessionNotFound(session_id.to_string()));
    }

    let ids: Vec<String> = get_recurring_sessions_in_block(plan, session_id)
        .into_iter()
        .filter(|s| s.session_type.is_standard())
        .map(|s| s.id.clone())
        .collect();

    let mut next = plan.clone();
    for session in next.sessions.iter_mut().filter(|s| ids.contains(&s.id)) {
        session.set_exercises(exercises.to_vec());
    }

    tracing::debug!(
        "Updated exercises on {} recurring sessions of plan {}",
        ids.len(),
        plan.id
    );

    Ok(touch(next))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{PerformedExercise, PerformedSet, SessionCategory};
    use crate::test_utils::{day, mock_exercise, mock_plan_skeleton, mock_populated_plan};

    fn plan() -> Plan {
        mock_populated_plan(4, 35, &[mock_exercise("Bench Press"), mock_exercise("Row")])
    }

    #[test]
    fn test_move_session_is_idempotent() {
        let original = plan();
        let moved = move_session(&original, "session-2", day(30));

        assert_eq!(moved.session("session-2").unwrap().date, day(30));
        assert!(moved.updated_at >= original.updated_at);
        // Input untouched
        assert_eq!(original.session("session-2").unwrap().date, day(1));
        // Ordering is not repaired
        assert_eq!(moved.sessions[1].id, "session-2");

        let twice = move_session(&moved, "session-2", day(30));
        assert_eq!(twice, moved);

        let missing = move_session(&original, "nope", day(3));
        assert_eq!(missing, original);
    }

    #[test]
    fn test_completion_stamps_time_and_data() {
        let original = plan();
        let data = CompletionData {
            duration_minutes: Some(55),
            perceived_exertion: Some(7.5),
            notes: Some("felt strong".into()),
            performed: vec![PerformedExercise {
                name: "Bench Press".into(),
                sets: vec![PerformedSet {
                    weight: Some(80.0),
                    reps: 8,
                    rpe: Some(8.0),
                    notes: None,
                }],
            }],
        };

        let done = update_session_status(
            &original,
            "session-1",
            SessionStatus::Completed,
            Some(data.clone()),
        );
        let session = done.session("session-1").unwrap();
        assert_eq!(session.status, SessionStatus::Completed);
        assert!(session.completed_at.is_some());
        assert_eq!(session.completion.as_ref(), Some(&data));

        let skipped = update_session_status(&original, "session-1", SessionStatus::Skipped, None);
        let session = skipped.session("session-1").unwrap();
        assert_eq!(session.status, SessionStatus::Skipped);
        assert!(session.completed_at.is_none());

        // Completed without data: status only
        let bare = update_session_status(&original, "session-1", SessionStatus::Completed, None);
        assert!(bare.session("session-1").unwrap().completed_at.is_none());
    }

    #[test]
    fn test_leaving_completed_clears_completion_record() {
        let original = plan();
        let done = update_session_status(
            &original,
            "session-1",
            SessionStatus::Completed,
            Some(CompletionData::default()),
        );

        for status in [SessionStatus::Skipped, SessionStatus::Planned, SessionStatus::InProgress] {
            let next = update_session_status(&done, "session-1", status, None);
            let session = next.session("session-1").unwrap();
            assert_eq!(session.status, status);
            assert!(session.completed_at.is_none(), "{}", status);
            assert!(session.completion.is_none(), "{}", status);
        }

        // Completed again without data keeps the existing record
        let again = update_session_status(&done, "session-1", SessionStatus::Completed, None);
        assert_eq!(again, done);
    }

    #[test]
    fn test_completion_data_on_unchanged_status_is_a_no_op() {
        let original = plan();
        assert_eq!(original.session("session-1").unwrap().status, SessionStatus::Planned);

        let next = update_session_status(
            &original,
            "session-1",
            SessionStatus::Planned,
            Some(CompletionData::default()),
        );
        assert_eq!(next, original);
        assert_eq!(next.updated_at, original.updated_at);
    }

    #[test]
    fn test_add_session_after_last() {
        let original = plan();
        let last = original.sessions.last().unwrap().date;
        let next = add_session_on(&original, SessionType::Hiit, day(0));

        assert_eq!(next.sessions.len(), original.sessions.len() + 1);
        let added = next.sessions.last().unwrap();
        assert_eq!(added.date, last.succ_opt().unwrap());
        assert_eq!(added.content, SessionContent::Pending);
        assert!(added.id.starts_with("session-"));
        assert!(original.session(&added.id).is_none());

        let standard = add_session_on(&original, SessionType::Legs, day(0));
        assert_eq!(standard.sessions.last().unwrap().exercises(), Some(&[][..]));
    }

    #[test]
    fn test_add_session_to_empty_plan_uses_today() {
        let mut empty = plan();
        empty.sessions.clear();
        let next = add_session_on(&empty, SessionType::Yoga, day(12));
        assert_eq!(next.sessions.len(), 1);
        assert_eq!(next.sessions[0].date, day(12));
    }

    #[test]
    fn test_remove_session() {
        let original = plan();
        let removed = remove_session(&original, "session-3");
        assert_eq!(removed.sessions.len(), original.sessions.len() - 1);
        assert!(removed.session("session-3").is_none());

        let untouched = remove_session(&original, "nope");
        assert_eq!(untouched, original);
    }

    #[test]
    fn test_update_single_session_exercises() {
        let original = plan();
        let squat = vec![mock_exercise("Squat")];
        let next = update_session_exercises(&original, "session-1", &squat);
        assert_eq!(next.session("session-1").unwrap().exercises(), Some(&squat[..]));
        // Siblings keep their list
        assert_ne!(next.session("session-5").unwrap().exercises(), Some(&squat[..]));
    }

    #[test]
    fn test_recurring_sessions_stay_inside_block() {
        let original = plan();
        // 4 days/week upper-lower: upper at 0, 2, 4, 6, ... ; deload week 4
        let recurring = get_recurring_sessions_in_block(&original, "session-1");
        let ids: Vec<&str> = recurring.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, vec!["session-1", "session-3", "session-5", "session-7", "session-9", "session-11"]);

        // Deload week is its own block
        let deload = get_recurring_sessions_in_block(&original, "session-13");
        let ids: Vec<&str> = deload.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, vec!["session-13", "session-15"]);

        // Week 5 runs to the end of the plan
        let last = get_recurring_sessions_in_block(&original, "session-17");
        let ids: Vec<&str> = last.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, vec!["session-17", "session-19"]);

        assert!(get_recurring_sessions_in_block(&original, "nope").is_empty());
    }

    #[test]
    fn test_recurring_update_hits_every_instance() {
        let original = plan();
        let squat = vec![mock_exercise("Front Squat")];
        let next = update_recurring_session_exercises(&original, "session-3", &squat).unwrap();

        for id in ["session-1", "session-3", "session-5", "session-7", "session-9", "session-11"] {
            assert_eq!(next.session(id).unwrap().exercises(), Some(&squat[..]), "{}", id);
        }
        for id in ["session-2", "session-13", "session-17"] {
            assert_ne!(next.session(id).unwrap().exercises(), Some(&squat[..]), "{}", id);
        }
    }

    #[test]
    fn test_recurring_update_rejects_bad_input() {
        let original = plan();
        let list = vec![mock_exercise("Dip")];

        assert!(matches!(
            update_recurring_session_exercises(&original, "session-1", &[]),
            Err(PlanError::EmptyExerciseList)
        ));
        assert!(matches!(
            update_recurring_session_exercises(&original, "", &list),
            Err(PlanError::MissingSessionId)
        ));
        assert!(matches!(
            update_recurring_session_exercises(&original, "nope", &list),
            Err(PlanError::SessionNotFound(_))
        ));

        let mut anonymous = original.clone();
        anonymous.id = String::new();
        assert!(matches!(
            update_recurring_session_exercises(&anonymous, "session-1", &list),
            Err(PlanError::MissingPlanId)
        ));
    }

    #[test]
    fn test_recurring_update_skips_non_standard_sessions() {
        let categories = [SessionCategory::Strength, SessionCategory::Hiit];
        let original = mock_plan_skeleton(4, 14, &categories);
        let hiit = original
            .sessions
            .iter()
            .find(|s| s.session_type == SessionType::Hiit)
            .unwrap()
            .id
            .clone();

        let next = update_recurring_session_exercises(&original, &hiit, &[mock_exercise("Sprint")]).unwrap();
        assert_eq!(next.session(&hiit).unwrap().content, SessionContent::Pending);
    }
}
