//! Core domain types for the strength progression engine.
//!
//! This module defines the fundamental types used throughout the system:
//! - Muscle groups and exercise classification
//! - Exercises and their workout-slot bindings
//! - Sessions, logged sets, and subjective feedback
//! - Feedback trend analysis and intensity targets
//! - Prescription output rows

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Database identifier for a training session
pub type SessionId = i64;

/// Database identifier for a workout-exercise slot
pub type WorkoutExerciseId = i64;

// ============================================================================
// Muscle Groups and Exercise Classification
// ============================================================================

/// Muscle group trained by an exercise and reported on by feedback.
///
/// The original data model joined exercises and feedback on a free-form
/// string label. Promoted to an enum so exercise labels and feedback labels
/// cannot silently diverge; parsing stays strict (exact labels) to preserve
/// the observed matching semantics.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum MuscleGroup {
    Quads,
    Hamstrings,
    Glutes,
    Chest,
    Triceps,
    Lats,
    MidBack,
    Biceps,
    Shoulders,
}

impl MuscleGroup {
    /// Display label as used in the workout program and feedback forms
    pub fn label(&self) -> &'static str {
        match self {
            MuscleGroup::Quads => "Quads",
            MuscleGroup::Hamstrings => "Hamstrings",
            MuscleGroup::Glutes => "Glutes",
            MuscleGroup::Chest => "Chest",
            MuscleGroup::Triceps => "Triceps",
            MuscleGroup::Lats => "Lats",
            MuscleGroup::MidBack => "Mid-Back",
            MuscleGroup::Biceps => "Biceps",
            MuscleGroup::Shoulders => "Shoulders",
        }
    }

    /// Parse an exact display label back into a muscle group
    ///
    /// Matching is case-sensitive on purpose: feedback rows written with a
    /// mismatched label should surface as `None` rather than silently join.
    pub fn parse(label: &str) -> Option<Self> {
        match label {
            "Quads" => Some(MuscleGroup::Quads),
            "Hamstrings" => Some(MuscleGroup::Hamstrings),
            "Glutes" => Some(MuscleGroup::Glutes),
            "Chest" => Some(MuscleGroup::Chest),
            "Triceps" => Some(MuscleGroup::Triceps),
            "Lats" => Some(MuscleGroup::Lats),
            "Mid-Back" => Some(MuscleGroup::MidBack),
            "Biceps" => Some(MuscleGroup::Biceps),
            "Shoulders" => Some(MuscleGroup::Shoulders),
            _ => None,
        }
    }
}

impl std::fmt::Display for MuscleGroup {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Classification of an exercise, driving rep ranges and volume caps
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ExerciseClass {
    /// Multi-joint or near-multi-joint lift (rows, presses, hip thrusts)
    CompoundLike,
    /// Single-joint lift (curls, extensions, raises)
    Isolation,
    /// Low-volume auxiliary movement pinned at minimum sets
    Finisher,
}

impl ExerciseClass {
    /// Finishers are excluded from feedback-driven volume changes
    pub fn is_finisher(&self) -> bool {
        matches!(self, ExerciseClass::Finisher)
    }

    /// Maximum prescribed set count for this class
    pub fn max_sets(&self) -> i32 {
        match self {
            ExerciseClass::CompoundLike | ExerciseClass::Isolation => 10,
            ExerciseClass::Finisher => 3,
        }
    }
}

/// Preferred working rep range for an exercise
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct RepRange {
    pub low: i32,
    pub high: i32,
}

impl RepRange {
    pub fn new(low: i32, high: i32) -> Self {
        Self { low, high }
    }
}

// ============================================================================
// Exercise and Workout-Slot Types
// ============================================================================

/// An exercise with its resolved metadata
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Exercise {
    pub name: String,
    pub muscle_group: Option<MuscleGroup>,
    pub class: ExerciseClass,
    pub rep_range: RepRange,
}

/// An exercise bound to a recurring workout slot, with its current targets
///
/// `target_sets` and `target_reps` are the only fields the engine ever
/// writes back (through [`crate::store::WorkoutStore`]); everything else is
/// read-only input.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct WorkoutExercise {
    pub id: WorkoutExerciseId,
    pub exercise: Exercise,
    pub target_sets: i32,
    pub target_reps: i32,
}

// ============================================================================
// Session, Set, and Feedback Types
// ============================================================================

/// One training occasion
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Session {
    pub id: SessionId,
    /// Sequential session counter; ordering source for history lookups
    pub session_number: i32,
    /// Only completed sessions count toward history and scheduling
    pub completed: bool,
}

/// One performed set, immutable once its session is completed
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct LoggedSet {
    pub session_id: SessionId,
    pub workout_exercise_id: WorkoutExerciseId,
    /// 1-based; ordering within the session is significant
    pub set_number: i32,
    pub weight: f64,
    pub reps: i32,
    /// Reps in reserve recorded at log time, if the athlete entered one
    pub rir: Option<i32>,
    pub logged_at: DateTime<Utc>,
}

/// Subjective post-workout report for a muscle group
///
/// Scores are on a 1-5 ordinal scale; missing fields are treated as 0 by
/// the trend analysis.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Feedback {
    pub session_id: SessionId,
    pub muscle_group: MuscleGroup,
    pub soreness: Option<i32>,
    pub pump: Option<i32>,
    pub workload: Option<i32>,
    pub created_at: DateTime<Utc>,
}

impl Feedback {
    pub fn soreness_score(&self) -> i32 {
        self.soreness.unwrap_or(0)
    }

    pub fn pump_score(&self) -> i32 {
        self.pump.unwrap_or(0)
    }

    pub fn workload_score(&self) -> i32 {
        self.workload.unwrap_or(0)
    }
}

// ============================================================================
// Trend Analysis and Intensity Types
// ============================================================================

/// Verdict of the feedback trend analysis
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum TrendStatus {
    Deload,
    SlightDeload,
    Maintain,
    SlightPush,
    PushHarder,
}

/// Aggregated view over a muscle group's recent feedback
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct FeedbackAnalysis {
    pub status: TrendStatus,
    pub avg_soreness: f64,
    pub avg_pump: f64,
    pub avg_workload: f64,
    pub consecutive_high: u32,
    pub consecutive_low: u32,
}

impl Default for FeedbackAnalysis {
    fn default() -> Self {
        Self {
            status: TrendStatus::Maintain,
            avg_soreness: 0.0,
            avg_pump: 0.0,
            avg_workload: 0.0,
            consecutive_high: 0,
            consecutive_low: 0,
        }
    }
}

/// Target intensity for a muscle group's upcoming session
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RirTarget {
    /// Reps in reserve, 0 (failure) to 4 (deload); lower is harder
    pub rir: i32,
    /// Human-readable phase label for the UI
    pub phase: String,
    pub analysis: FeedbackAnalysis,
}

// ============================================================================
// Prescription Output Types
// ============================================================================

/// One prescribed set row for the upcoming session
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct PrescribedSet {
    pub set_number: i32,
    pub weight: f64,
    pub reps: i32,
    /// Always false on output; the caller marks sets logged as performed
    pub logged: bool,
}

/// Complete prescription for one workout-exercise slot
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Prescription {
    pub sets: Vec<PrescribedSet>,
    pub target_rir: i32,
    pub phase: String,
    /// Text summary of recent feedback for UI display
    pub feedback_summary: String,
    /// Informational: first set hit target reps at the rep ceiling with
    /// high volume, so the athlete is likely ready to add load manually
    pub suggest_weight_increase: bool,
}
