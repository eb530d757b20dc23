//! Feedback-driven set-count adjustment.
//!
//! Volume moves by at most one set per call, bounded by per-class caps.
//! Finishers are pinned at their current count: extra stimulus has to come
//! from the core lifts, not from inflating a one-set auxiliary movement.

use crate::config::Config;
use crate::feedback::analyze_feedback_trend;
use crate::history::recent_muscle_feedback;
use crate::store::WorkoutStore;
use crate::types::WorkoutExercise;
use crate::Result;

/// New target set count for a slot, persisted when it changes
///
/// Returns the (possibly unchanged) set count. The write-back through
/// [`WorkoutStore::update_target_sets`] is an idempotent optimization; the
/// same value is recomputed on the next call either way.
pub fn adjust_sets(
    store: &mut dyn WorkoutStore,
    we: &WorkoutExercise,
    config: &Config,
) -> Result<i32> {
    let current = we.target_sets;

    // Feedback never moves finisher volume
    if we.exercise.class.is_finisher() {
        return Ok(current);
    }

    let Some(mg) = we.exercise.muscle_group else {
        tracing::debug!("'{}' has no muscle group, volume unchanged", we.exercise.name);
        return Ok(current);
    };

    let feedback = recent_muscle_feedback(store, Some(mg), config.feedback.lookback)?;
    if feedback.is_empty() {
        return Ok(current);
    }

    let analysis = analyze_feedback_trend(&feedback);
    let cap = we.exercise.class.max_sets();
    let floor = config.volume.min_sets;

    let recovering_easily = analysis.avg_soreness <= 2.0
        && analysis.avg_pump <= 2.0
        && analysis.avg_workload <= 2.0;
    let overreached = analysis.avg_soreness >= 4.0 || analysis.avg_workload >= 4.0;

    let adjusted = if recovering_easily && current < cap {
        current + 1
    } else if overreached && current > floor {
        current - 1
    } else {
        current
    };

    if adjusted != current {
        tracing::info!(
            "'{}' volume {} -> {} (soreness {:.1}, pump {:.1}, workload {:.1})",
            we.exercise.name,
            current,
            adjusted,
            analysis.avg_soreness,
            analysis.avg_pump,
            analysis.avg_workload
        );
        store.update_target_sets(we.id, adjusted)?;
    }

    Ok(adjusted)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::get_default_catalog;
    use crate::store::MemoryStore;
    use crate::types::{Feedback, MuscleGroup};
    use chrono::{Duration, Utc};

    fn slot(name: &str, target_sets: i32) -> WorkoutExercise {
        WorkoutExercise {
            id: 1,
            exercise: get_default_catalog().resolve(name),
            target_sets,
            target_reps: 10,
        }
    }

    fn store_with(we: &WorkoutExercise) -> MemoryStore {
        let mut store = MemoryStore::new();
        store.add_workout_exercise(we.clone());
        store
    }

    fn add_feedback(
        store: &mut MemoryStore,
        mg: MuscleGroup,
        soreness: i32,
        pump: i32,
        workload: i32,
        days: i64,
    ) {
        store.add_feedback(Feedback {
            session_id: days,
            muscle_group: mg,
            soreness: Some(soreness),
            pump: Some(pump),
            workload: Some(workload),
            created_at: Utc::now() - Duration::days(days),
        });
    }

    #[test]
    fn test_finisher_is_identity() {
        let we = slot("Sissy Squat", 1);
        let mut store = store_with(&we);
        // even screaming-easy feedback must not move a finisher
        for days in 0..3 {
            add_feedback(&mut store, MuscleGroup::Quads, 1, 1, 1, days);
        }

        let sets = adjust_sets(&mut store, &we, &Config::default()).unwrap();
        assert_eq!(sets, 1);
        let stored = store.find_workout_exercise(1).unwrap().unwrap();
        assert_eq!(stored.target_sets, 1);
    }

    #[test]
    fn test_no_feedback_is_unchanged() {
        let we = slot("Leg Extension", 4);
        let mut store = store_with(&we);
        let sets = adjust_sets(&mut store, &we, &Config::default()).unwrap();
        assert_eq!(sets, 4);
    }

    #[test]
    fn test_easy_recovery_adds_a_set() {
        let we = slot("Leg Extension", 4);
        let mut store = store_with(&we);
        for days in 0..3 {
            add_feedback(&mut store, MuscleGroup::Quads, 2, 2, 2, days);
        }

        let sets = adjust_sets(&mut store, &we, &Config::default()).unwrap();
        assert_eq!(sets, 5);
        // persisted as a side effect
        let stored = store.find_workout_exercise(1).unwrap().unwrap();
        assert_eq!(stored.target_sets, 5);
    }

    #[test]
    fn test_overreached_drops_a_set() {
        let we = slot("Leg Extension", 4);
        let mut store = store_with(&we);
        for days in 0..3 {
            add_feedback(&mut store, MuscleGroup::Quads, 5, 3, 3, days);
        }

        let sets = adjust_sets(&mut store, &we, &Config::default()).unwrap();
        assert_eq!(sets, 3);
    }

    #[test]
    fn test_cap_prevents_increment() {
        let we = slot("Leg Extension", 10);
        let mut store = store_with(&we);
        for days in 0..3 {
            add_feedback(&mut store, MuscleGroup::Quads, 1, 1, 1, days);
        }

        let sets = adjust_sets(&mut store, &we, &Config::default()).unwrap();
        assert_eq!(sets, 10);
    }

    #[test]
    fn test_floor_prevents_decrement() {
        let we = slot("Leg Extension", 1);
        let mut store = store_with(&we);
        for days in 0..3 {
            add_feedback(&mut store, MuscleGroup::Quads, 5, 3, 5, days);
        }

        let sets = adjust_sets(&mut store, &we, &Config::default()).unwrap();
        assert_eq!(sets, 1);
    }

    #[test]
    fn test_moderate_feedback_is_unchanged() {
        let we = slot("Leg Extension", 4);
        let mut store = store_with(&we);
        for days in 0..3 {
            add_feedback(&mut store, MuscleGroup::Quads, 3, 3, 3, days);
        }

        let sets = adjust_sets(&mut store, &we, &Config::default()).unwrap();
        assert_eq!(sets, 4);
    }
}
