//! Intensity scheduling: target RIR (reps in reserve) per muscle group.
//!
//! RIR runs 0 (failure) to 4 (deload); lower is harder. The mesocycle
//! position is never stored: it is reconstructed on every call by scanning
//! the muscle group's logged history for the most recent deload marker
//! (a set logged at RIR >= 4). That keeps the scheduler idempotent and
//! immune to drift when history is edited.
//!
//! A fixed linear schedule drives the base target; feedback trends can
//! force an early deload or nudge the target by one level.

use crate::config::Config;
use crate::feedback::analyze_feedback_trend;
use crate::history::recent_muscle_feedback;
use crate::store::WorkoutStore;
use crate::types::{FeedbackAnalysis, MuscleGroup, RirTarget, SessionId, TrendStatus};
use crate::Result;
use std::collections::HashMap;

// RIR levels (Reps in Reserve)
pub const RIR_FAILURE: i32 = 0;
pub const RIR_VERY_HARD: i32 = 1;
pub const RIR_HARD: i32 = 2;
pub const RIR_MODERATE: i32 = 3;
pub const RIR_DELOAD: i32 = 4;

/// Sessions elapsed since the muscle group's last deload
///
/// Scans the muscle group's sets in completed sessions for the most recent
/// set logged at RIR >= 4 (the deload marker) and counts distinct completed
/// sessions strictly after it. With no marker, the muscle group's total
/// completed-session count is returned (fresh mesocycle assumption).
pub fn sessions_since_last_deload(
    store: &dyn WorkoutStore,
    muscle_group: MuscleGroup,
) -> Result<u32> {
    let session_numbers: HashMap<SessionId, i32> = store
        .completed_sessions()?
        .into_iter()
        .map(|s| (s.id, s.session_number))
        .collect();

    let sets = store.sets_for_muscle_group(muscle_group)?;

    let marker_number = sets
        .iter()
        .filter(|s| s.rir.map_or(false, |rir| rir >= RIR_DELOAD))
        .filter_map(|s| session_numbers.get(&s.session_id).copied())
        .max();

    let mut counted: Vec<SessionId> = Vec::new();
    for set in &sets {
        let Some(&number) = session_numbers.get(&set.session_id) else {
            continue;
        };
        if let Some(marker) = marker_number {
            if number <= marker {
                continue;
            }
        }
        if !counted.contains(&set.session_id) {
            counted.push(set.session_id);
        }
    }

    let n = counted.len() as u32;
    tracing::debug!(
        "{}: {} sessions since last deload (marker session number: {:?})",
        muscle_group,
        n,
        marker_number
    );
    Ok(n)
}

/// Base RIR and phase label from sessions-since-deload
pub fn base_schedule(sessions_since_deload: u32) -> (i32, String) {
    match sessions_since_deload {
        0 => (RIR_HARD, "Post-Deload - Starting Fresh".to_string()),
        n @ 1..=4 => (RIR_HARD, format!("Building Intensity - Session {}/4", n)),
        n @ 5..=8 => (
            RIR_VERY_HARD,
            format!("High Intensity - Session {}/4", n - 4),
        ),
        n => (RIR_FAILURE, format!("Peak Intensity - Session {} at RIR 0", n)),
    }
}

/// Target RIR for a muscle group's upcoming session
///
/// The base target follows the session-count schedule; the feedback trend
/// can override it:
/// - `Deload` forces RIR 4 regardless of base. Logging sets at RIR 4 is
///   what resets the mesocycle for the next call.
/// - `PushHarder` early in a fresh block (base RIR 2, N <= 2) advances one
///   level to RIR 1.
/// - `SlightDeload` at base RIR 1 backs off one level to RIR 2.
///
/// No muscle group yields a fixed moderate default.
pub fn rir_for_muscle_group(
    store: &dyn WorkoutStore,
    muscle_group: Option<MuscleGroup>,
    config: &Config,
) -> Result<RirTarget> {
    let Some(mg) = muscle_group else {
        return Ok(RirTarget {
            rir: RIR_HARD,
            phase: "Moderate Intensity".to_string(),
            analysis: FeedbackAnalysis::default(),
        });
    };

    let feedback = recent_muscle_feedback(store, Some(mg), config.feedback.lookback)?;
    let analysis = analyze_feedback_trend(&feedback);

    let n = sessions_since_last_deload(store, mg)?;
    let (base_rir, base_phase) = base_schedule(n);

    let (rir, phase) = match analysis.status {
        TrendStatus::Deload => {
            tracing::info!("{}: feedback forcing deload (base was RIR {})", mg, base_rir);
            (
                RIR_DELOAD,
                "Recovery Phase - Deload (feedback override)".to_string(),
            )
        }
        TrendStatus::PushHarder if base_rir == RIR_HARD && n <= 2 => {
            tracing::info!("{}: feedback advancing intensity early to RIR 1", mg);
            (
                RIR_VERY_HARD,
                "Early Advancement - Pushing to RIR 1".to_string(),
            )
        }
        TrendStatus::SlightDeload if base_rir == RIR_VERY_HARD => {
            tracing::info!("{}: fatigue backoff from RIR 1 to RIR 2", mg);
            (RIR_HARD, "Fatigue Backoff - Easing to RIR 2".to_string())
        }
        _ => (base_rir, base_phase),
    };

    Ok(RirTarget {
        rir,
        phase,
        analysis,
    })
}

/// Human-readable description of an RIR level
pub fn rir_description(rir: i32) -> &'static str {
    match rir {
        0 => "Train to failure - Max effort",
        1 => "1 rep in reserve - Very hard",
        2 => "2 reps in reserve - Moderate-hard intensity",
        3 => "3 reps in reserve - Moderate intensity",
        4 => "4 reps in reserve - Deload/recovery",
        _ => "Unknown RIR level",
    }
}
