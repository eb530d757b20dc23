//! Prescription engine: next-session weights and reps for one slot.
//!
//! Wires the readers, intensity scheduler, and volume adjuster together:
//! - Rep target follows a progressive-overload rule keyed to RIR change
//! - Weight carries forward unchanged (the athlete raises load manually),
//!   except for the flat deload multiplier
//! - A fatigue model expands the rep target into a declining per-set
//!   sequence

use crate::config::Config;
use crate::feedback::feedback_summary;
use crate::history::{last_session_sets, recent_muscle_feedback};
use crate::intensity::{rir_for_muscle_group, RIR_DELOAD};
use crate::store::WorkoutStore;
use crate::types::{
    LoggedSet, Prescription, PrescribedSet, SessionId, WorkoutExercise, WorkoutExerciseId,
};
use crate::volume::adjust_sets;
use crate::{Error, Result};

type LastSession = (SessionId, Vec<LoggedSet>);

/// Recommend next-session sets for a workout-exercise slot
///
/// Flow: feedback/history readers -> RIR scheduler and volume adjuster ->
/// rep/weight prescriber -> fatigue model. The adjusted set count and a
/// changed rep target are written back through the store; both writes are
/// idempotent and recomputed on the next call regardless.
pub fn recommend_weights_and_reps(
    store: &mut dyn WorkoutStore,
    workout_exercise_id: WorkoutExerciseId,
    config: &Config,
) -> Result<Prescription> {
    let we = store
        .find_workout_exercise(workout_exercise_id)?
        .ok_or_else(|| {
            Error::Prescription(format!("Unknown workout exercise {}", workout_exercise_id))
        })?;

    let rir_target = rir_for_muscle_group(store, we.exercise.muscle_group, config)?;
    let deload_active = rir_target.rir >= RIR_DELOAD;

    let target_sets = adjust_sets(store, &we, config)?;

    let history = last_session_sets(store, we.id)?;
    let target_reps = calculate_reps_with_rir_progression(&we, history.as_ref(), rir_target.rir, config);

    if target_reps != we.target_reps {
        store.update_target_reps(we.id, target_reps)?;
    }

    let weight = derive_weight(history.as_ref(), deload_active, config);
    let suggest_weight_increase =
        weight_increase_ready(&we, history.as_ref(), target_reps, target_sets, config);

    // Finishers during a deload hold reps flat: light stimulus, not rep chasing
    let hold_flat = we.exercise.class.is_finisher() && deload_active;
    let sets = expand_sets(target_sets, target_reps, weight, hold_flat, config);

    let summary = match we.exercise.muscle_group {
        Some(mg) => {
            let feedback = recent_muscle_feedback(store, Some(mg), config.feedback.lookback)?;
            feedback_summary(&feedback)
        }
        None => "No feedback data".to_string(),
    };

    tracing::info!(
        "'{}': {} sets x {} reps @ {} (RIR {}, {})",
        we.exercise.name,
        target_sets,
        target_reps,
        weight,
        rir_target.rir,
        rir_target.phase
    );

    Ok(Prescription {
        sets,
        target_rir: rir_target.rir,
        phase: rir_target.phase,
        feedback_summary: summary,
        suggest_weight_increase,
    })
}

/// Next-session rep target from last performance and the RIR schedule
///
/// The first set of the last completed session is the fatigue-free
/// reference. Reps move by one baseline step per session, plus the change
/// in target intensity: `last_reps + 1 + (last_rir - current_rir)`,
/// clamped to the configured bounds. No history falls back to the stored
/// target (or the global default).
pub fn calculate_reps_with_rir_progression(
    we: &WorkoutExercise,
    history: Option<&LastSession>,
    current_rir: i32,
    config: &Config,
) -> i32 {
    let first_set = match history {
        Some((_, sets)) => match sets.first() {
            Some(set) => set,
            None => return stored_or_default_reps(we, config),
        },
        None => return stored_or_default_reps(we, config),
    };

    let last_reps = first_set.reps;
    // An unlogged RIR reads as "on target", yielding a plain +1 step
    let last_rir = first_set.rir.unwrap_or(current_rir);
    let rir_change = last_rir - current_rir;

    let target = last_reps + 1 + rir_change;
    let clamped = target.clamp(config.progression.min_target_reps, config.progression.max_target_reps);

    tracing::debug!(
        "'{}': reps {} + 1 + {} -> {} (clamped {})",
        we.exercise.name,
        last_reps,
        rir_change,
        target,
        clamped
    );
    clamped
}

fn stored_or_default_reps(we: &WorkoutExercise, config: &Config) -> i32 {
    if we.target_reps > 0 {
        we.target_reps
    } else {
        config.progression.default_target_reps
    }
}

/// Working weight for the upcoming session
///
/// Copied unchanged from the first set of the last session (manual
/// progression; the engine never auto-increments load). No history seeds
/// at the base weight. An active deload multiplies the weight down,
/// floored at the configured minimum.
fn derive_weight(history: Option<&LastSession>, deload_active: bool, config: &Config) -> f64 {
    let carried = history
        .and_then(|(_, sets)| sets.first())
        .map(|s| s.weight)
        .unwrap_or(config.progression.base_weight);

    if deload_active {
        let dropped = carried * config.progression.deload_weight_multiplier;
        let floored = dropped.max(config.progression.min_weight);
        // one decimal, plates don't come finer
        (floored * 10.0).round() / 10.0
    } else {
        carried
    }
}

/// Whether the athlete looks ready to add load manually
///
/// Informational only, never applied to the returned weight: the first set
/// of the last session met the then-target reps, the rep target sits at
/// the configured maximum, and the prescribed volume is high.
fn weight_increase_ready(
    we: &WorkoutExercise,
    history: Option<&LastSession>,
    target_reps: i32,
    target_sets: i32,
    config: &Config,
) -> bool {
    let Some(first_set) = history.and_then(|(_, sets)| sets.first()) else {
        return false;
    };

    first_set.reps >= we.target_reps
        && target_reps >= config.progression.max_target_reps
        && target_sets >= 4
}

/// Expand a rep target into per-set rows with within-session fatigue decline
///
/// Set `i` (1-based) gets `target_reps - (i-1) * drop`, floored at the
/// configured minimum. `hold_flat` disables the decline (finishers during
/// a deload).
pub fn expand_sets(
    target_sets: i32,
    target_reps: i32,
    weight: f64,
    hold_flat: bool,
    config: &Config,
) -> Vec<PrescribedSet> {
    (1..=target_sets.max(0))
        .map(|set_number| {
            let reps = if hold_flat {
                target_reps
            } else {
                (target_reps - (set_number - 1) * config.progression.rep_drop_per_set)
                    .max(config.progression.min_set_reps)
            };
            PrescribedSet {
                set_number,
                weight,
                reps,
                logged: false,
            }
        })
        .collect()
}
