//! Data-access boundary consumed by the engine.
//!
//! The engine never owns persistence. [`WorkoutStore`] is the read/query
//! interface over persisted workout history plus the two idempotent
//! write-back points (target sets/reps). [`MemoryStore`] is the in-memory
//! reference implementation used by tests and by embedders that load a
//! JSON snapshot instead of wrapping a relational client.

use crate::types::{
    Feedback, LoggedSet, MuscleGroup, Session, WorkoutExercise, WorkoutExerciseId,
};
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

/// Read/query interface over persisted workout history
pub trait WorkoutStore {
    /// All completed sessions, in any order
    fn completed_sessions(&self) -> Result<Vec<Session>>;

    /// The workout-exercise slot with its resolved exercise, if present
    fn find_workout_exercise(&self, id: WorkoutExerciseId) -> Result<Option<WorkoutExercise>>;

    /// Every logged set for one workout-exercise slot, in any order
    fn sets_for_slot(&self, id: WorkoutExerciseId) -> Result<Vec<LoggedSet>>;

    /// Every logged set for exercises belonging to a muscle group
    fn sets_for_muscle_group(&self, muscle_group: MuscleGroup) -> Result<Vec<LoggedSet>>;

    /// Recent feedback for a muscle group, most recent first
    fn find_feedback(&self, muscle_group: MuscleGroup, limit: usize) -> Result<Vec<Feedback>>;

    /// Persist an adjusted set count for a slot
    fn update_target_sets(&mut self, id: WorkoutExerciseId, target_sets: i32) -> Result<()>;

    /// Persist an adjusted rep target for a slot
    fn update_target_reps(&mut self, id: WorkoutExerciseId, target_reps: i32) -> Result<()>;
}

/// In-memory store backed by hash maps, JSON-snapshottable
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct MemoryStore {
    sessions: HashMap<i64, Session>,
    workout_exercises: HashMap<WorkoutExerciseId, WorkoutExercise>,
    sets: Vec<LoggedSet>,
    feedback: Vec<Feedback>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_session(&mut self, session: Session) {
        self.sessions.insert(session.id, session);
    }

    pub fn add_workout_exercise(&mut self, we: WorkoutExercise) {
        self.workout_exercises.insert(we.id, we);
    }

    pub fn add_set(&mut self, set: LoggedSet) {
        self.sets.push(set);
    }

    pub fn add_feedback(&mut self, feedback: Feedback) {
        self.feedback.push(feedback);
    }

    /// Load a store snapshot from a JSON file
    ///
    /// Returns an empty store if the file doesn't exist (fresh install).
    pub fn load_snapshot(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::debug!("No snapshot found at {:?}, starting empty", path);
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(path)?;
        let store: MemoryStore = serde_json::from_str(&contents)?;
        tracing::info!(
            "Loaded snapshot from {:?} ({} sessions, {} sets)",
            path,
            store.sessions.len(),
            store.sets.len()
        );
        Ok(store)
    }

    /// Save the store to a JSON snapshot file
    pub fn save_snapshot(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let contents = serde_json::to_string_pretty(self)?;
        std::fs::write(path, contents)?;
        tracing::info!("Saved snapshot to {:?}", path);
        Ok(())
    }

    fn muscle_group_of_slot(&self, id: WorkoutExerciseId) -> Option<MuscleGroup> {
        self.workout_exercises
            .get(&id)
            .and_then(|we| we.exercise.muscle_group)
    }
}

impl WorkoutStore for MemoryStore {
    fn completed_sessions(&self) -> Result<Vec<Session>> {
        Ok(self
            .sessions
            .values()
            .filter(|s| s.completed)
            .cloned()
            .collect())
    }

    fn find_workout_exercise(&self, id: WorkoutExerciseId) -> Result<Option<WorkoutExercise>> {
        Ok(self.workout_exercises.get(&id).cloned())
    }

    fn sets_for_slot(&self, id: WorkoutExerciseId) -> Result<Vec<LoggedSet>> {
        Ok(self
            .sets
            .iter()
            .filter(|s| s.workout_exercise_id == id)
            .cloned()
            .collect())
    }

    fn sets_for_muscle_group(&self, muscle_group: MuscleGroup) -> Result<Vec<LoggedSet>> {
        Ok(self
            .sets
            .iter()
            .filter(|s| self.muscle_group_of_slot(s.workout_exercise_id) == Some(muscle_group))
            .cloned()
            .collect())
    }

    fn find_feedback(&self, muscle_group: MuscleGroup, limit: usize) -> Result<Vec<Feedback>> {
        let mut entries: Vec<Feedback> = self
            .feedback
            .iter()
            .filter(|f| f.muscle_group == muscle_group)
            .cloned()
            .collect();
        entries.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        entries.truncate(limit);
        Ok(entries)
    }

    fn update_target_sets(&mut self, id: WorkoutExerciseId, target_sets: i32) -> Result<()> {
        let we = self
            .workout_exercises
            .get_mut(&id)
            .ok_or_else(|| Error::Store(format!("Unknown workout exercise {}", id)))?;
        we.target_sets = target_sets;
        tracing::debug!("Persisted target_sets={} for slot {}", target_sets, id);
        Ok(())
    }

    fn update_target_reps(&mut self, id: WorkoutExerciseId, target_reps: i32) -> Result<()> {
        let we = self
            .workout_exercises
            .get_mut(&id)
            .ok_or_else(|| Error::Store(format!("Unknown workout exercise {}", id)))?;
        we.target_reps = target_reps;
        tracing::debug!("Persisted target_reps={} for slot {}", target_reps, id);
        Ok(())
    }
}
