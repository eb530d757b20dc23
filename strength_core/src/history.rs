//! History and feedback readers.
//!
//! Leaf queries over the store: the most recent completed session's sets
//! for a slot, and the recent feedback entries for a muscle group. Both are
//! read-only; everything downstream (trend analysis, scheduling,
//! prescription) consumes their output.

use crate::store::WorkoutStore;
use crate::types::{Feedback, LoggedSet, MuscleGroup, SessionId, WorkoutExerciseId};
use crate::Result;
use std::collections::HashMap;

/// Logged sets of the most recent completed session for one slot
///
/// Groups the slot's sets by session, keeps only completed sessions, and
/// returns the group belonging to the highest `session_number`, ordered by
/// `set_number` ascending. `None` when no completed session has sets for
/// this slot.
pub fn last_session_sets(
    store: &dyn WorkoutStore,
    workout_exercise_id: WorkoutExerciseId,
) -> Result<Option<(SessionId, Vec<LoggedSet>)>> {
    let session_numbers: HashMap<SessionId, i32> = store
        .completed_sessions()?
        .into_iter()
        .map(|s| (s.id, s.session_number))
        .collect();

    let mut by_session: HashMap<SessionId, Vec<LoggedSet>> = HashMap::new();
    for set in store.sets_for_slot(workout_exercise_id)? {
        if session_numbers.contains_key(&set.session_id) {
            by_session.entry(set.session_id).or_default().push(set);
        }
    }

    let last_sid = by_session
        .keys()
        .copied()
        .max_by_key(|sid| session_numbers[sid]);

    match last_sid {
        Some(sid) => {
            let mut sets = by_session.remove(&sid).unwrap_or_default();
            sets.sort_by_key(|s| s.set_number);
            tracing::debug!(
                "Slot {} last completed session {} has {} sets",
                workout_exercise_id,
                sid,
                sets.len()
            );
            Ok(Some((sid, sets)))
        }
        None => {
            tracing::debug!("Slot {} has no completed history", workout_exercise_id);
            Ok(None)
        }
    }
}

/// Recent feedback for a muscle group, most recent first
///
/// An unset muscle group yields an empty list; feedback is keyed to muscle
/// groups, so an ungrouped exercise has nothing to read.
pub fn recent_muscle_feedback(
    store: &dyn WorkoutStore,
    muscle_group: Option<MuscleGroup>,
    limit: usize,
) -> Result<Vec<Feedback>> {
    match muscle_group {
        Some(mg) => store.find_feedback(mg, limit),
        None => Ok(Vec::new()),
    }
}
