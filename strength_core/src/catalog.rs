//! Built-in catalog of exercises and their progression metadata.
//!
//! Every exercise the engine prescribes for resolves to exactly one
//! classification and one rep range. Unknown names fall back to a
//! conservative isolation profile instead of failing.

use crate::types::{Exercise, ExerciseClass, MuscleGroup, RepRange};
use once_cell::sync::Lazy;
use std::collections::HashMap;

/// Catalog entry: classification plus program defaults for one exercise
#[derive(Clone, Debug)]
pub struct ExerciseEntry {
    pub name: String,
    pub class: ExerciseClass,
    pub muscle_group: Option<MuscleGroup>,
    pub rep_range: RepRange,
    /// Starting set count when the slot is first created
    pub default_sets: i32,
    /// Starting rep target when the slot is first created
    pub default_reps: i32,
}

/// The complete catalog of known exercises, keyed by lowercased name
#[derive(Clone, Debug)]
pub struct Catalog {
    pub exercises: HashMap<String, ExerciseEntry>,
}

/// Cached default catalog - built once and reused across all operations
static DEFAULT_CATALOG: Lazy<Catalog> = Lazy::new(build_default_catalog);

/// Get a reference to the cached default catalog
pub fn get_default_catalog() -> &'static Catalog {
    &DEFAULT_CATALOG
}

/// Builds the default catalog with the built-in workout program
pub fn build_default_catalog() -> Catalog {
    let mut exercises = HashMap::new();

    let mut add = |name: &str,
                   class: ExerciseClass,
                   muscle_group: MuscleGroup,
                   rep_range: RepRange,
                   default_sets: i32,
                   default_reps: i32| {
        exercises.insert(
            name.to_lowercase(),
            ExerciseEntry {
                name: name.to_string(),
                class,
                muscle_group: Some(muscle_group),
                rep_range,
                default_sets,
                default_reps,
            },
        );
    };

    // Legs
    add(
        "Leg Extension",
        ExerciseClass::Isolation,
        MuscleGroup::Quads,
        RepRange::new(10, 15),
        4,
        10,
    );
    add(
        "Leg Curl",
        ExerciseClass::Isolation,
        MuscleGroup::Hamstrings,
        RepRange::new(10, 15),
        4,
        10,
    );
    add(
        "Hip Thrust + Glute Lunges",
        ExerciseClass::CompoundLike,
        MuscleGroup::Glutes,
        RepRange::new(8, 12),
        4,
        10,
    );
    // quad finisher
    add(
        "Sissy Squat",
        ExerciseClass::Finisher,
        MuscleGroup::Quads,
        RepRange::new(12, 20),
        1,
        10,
    );

    // Push
    add(
        "Incline DB Bench Press",
        ExerciseClass::CompoundLike,
        MuscleGroup::Chest,
        RepRange::new(8, 12),
        4,
        10,
    );
    // chest finisher
    add(
        "Single-arm Chest Fly",
        ExerciseClass::Finisher,
        MuscleGroup::Chest,
        RepRange::new(10, 15),
        1,
        10,
    );
    add(
        "Cable Tricep Pushdown",
        ExerciseClass::Isolation,
        MuscleGroup::Triceps,
        RepRange::new(10, 15),
        4,
        10,
    );
    // triceps finisher
    add(
        "Overhead Cable Extension",
        ExerciseClass::Finisher,
        MuscleGroup::Triceps,
        RepRange::new(12, 18),
        1,
        10,
    );

    // Pull
    add(
        "Lat Pulldown",
        ExerciseClass::CompoundLike,
        MuscleGroup::Lats,
        RepRange::new(8, 12),
        4,
        10,
    );
    add(
        "Cable Row",
        ExerciseClass::CompoundLike,
        MuscleGroup::MidBack,
        RepRange::new(8, 12),
        4,
        10,
    );
    // lat finisher
    add(
        "Straight-arm Pulldown",
        ExerciseClass::Finisher,
        MuscleGroup::Lats,
        RepRange::new(12, 18),
        1,
        10,
    );

    // Biceps
    add(
        "Cable Curl",
        ExerciseClass::Isolation,
        MuscleGroup::Biceps,
        RepRange::new(10, 15),
        4,
        12,
    );
    // biceps finisher
    add(
        "Incline DB Curl",
        ExerciseClass::Finisher,
        MuscleGroup::Biceps,
        RepRange::new(12, 20),
        1,
        12,
    );

    // Delts (no dedicated finisher)
    add(
        "Dumbbell Lateral Raise",
        ExerciseClass::Isolation,
        MuscleGroup::Shoulders,
        RepRange::new(12, 20),
        4,
        12,
    );

    Catalog { exercises }
}

impl Catalog {
    /// Look up a catalog entry by name (case-insensitive)
    pub fn entry(&self, name: &str) -> Option<&ExerciseEntry> {
        self.exercises.get(&name.to_lowercase())
    }

    /// Resolve a name into an [`Exercise`], falling back for unknown names
    ///
    /// Unknown exercises get an isolation classification with an 8-12 rep
    /// range and no muscle group, so the engine degrades instead of failing.
    pub fn resolve(&self, name: &str) -> Exercise {
        match self.entry(name) {
            Some(entry) => Exercise {
                name: entry.name.clone(),
                muscle_group: entry.muscle_group,
                class: entry.class,
                rep_range: entry.rep_range,
            },
            None => {
                tracing::warn!(
                    "Exercise '{}' not in catalog, using fallback metadata",
                    name
                );
                Exercise {
                    name: name.to_string(),
                    muscle_group: None,
                    class: ExerciseClass::Isolation,
                    rep_range: RepRange::new(8, 12),
                }
            }
        }
    }

    /// Validate the catalog for consistency and completeness
    ///
    /// Returns a list of validation errors, or empty Vec if valid.
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();

        for (key, entry) in &self.exercises {
            if entry.name.is_empty() {
                errors.push("Exercise has empty name".to_string());
            }
            if key != &entry.name.to_lowercase() {
                errors.push(format!(
                    "Exercise key '{}' doesn't match lowercased name '{}'",
                    key, entry.name
                ));
            }
            if entry.rep_range.low > entry.rep_range.high {
                errors.push(format!(
                    "Exercise '{}': rep range low {} > high {}",
                    entry.name, entry.rep_range.low, entry.rep_range.high
                ));
            }
            if entry.default_sets < 1 {
                errors.push(format!(
                    "Exercise '{}': default sets {} below 1",
                    entry.name, entry.default_sets
                ));
            }
            if entry.default_sets > entry.class.max_sets() {
                errors.push(format!(
                    "Exercise '{}': default sets {} above class cap {}",
                    entry.name,
                    entry.default_sets,
                    entry.class.max_sets()
                ));
            }
            if entry.class.is_finisher() && entry.default_sets != 1 {
                errors.push(format!(
                    "Finisher '{}' should start at 1 set, has {}",
                    entry.name, entry.default_sets
                ));
            }
        }

        errors
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_loads() {
        let catalog = build_default_catalog();
        assert_eq!(catalog.exercises.len(), 14);
    }

    #[test]
    fn test_default_catalog_validates() {
        let catalog = build_default_catalog();
        let errors = catalog.validate();
        assert!(
            errors.is_empty(),
            "Default catalog has validation errors: {:?}",
            errors
        );
    }

    #[test]
    fn test_name_lookup_is_case_insensitive() {
        let catalog = get_default_catalog();
        let entry = catalog.entry("leg extension").unwrap();
        assert_eq!(entry.name, "Leg Extension");
        assert_eq!(entry.muscle_group, Some(MuscleGroup::Quads));
    }

    #[test]
    fn test_finishers_start_at_one_set() {
        let catalog = get_default_catalog();
        for entry in catalog.exercises.values() {
            if entry.class.is_finisher() {
                assert_eq!(entry.default_sets, 1, "{}", entry.name);
            }
        }
    }

    #[test]
    fn test_resolve_unknown_uses_fallback() {
        let catalog = get_default_catalog();
        let exercise = catalog.resolve("Zercher Squat");
        assert_eq!(exercise.class, ExerciseClass::Isolation);
        assert_eq!(exercise.rep_range, RepRange::new(8, 12));
        assert!(exercise.muscle_group.is_none());
    }

    #[test]
    fn test_every_muscle_group_has_an_exercise() {
        let catalog = get_default_catalog();
        for mg in [
            MuscleGroup::Quads,
            MuscleGroup::Chest,
            MuscleGroup::Triceps,
            MuscleGroup::Lats,
            MuscleGroup::Biceps,
            MuscleGroup::Shoulders,
        ] {
            assert!(
                catalog
                    .exercises
                    .values()
                    .any(|e| e.muscle_group == Some(mg)),
                "no exercise for {:?}",
                mg
            );
        }
    }
}
