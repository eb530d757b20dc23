#![forbid(unsafe_code)]

//! Core domain model and progression logic for a strength-training tracker.
//!
//! This crate provides:
//! - Domain types (exercises, sessions, logged sets, feedback)
//! - Built-in exercise catalog
//! - Feedback trend analysis
//! - RIR-based intensity scheduling with automatic deload detection
//! - Feedback-driven volume adjustment
//! - Rep/weight prescription with a within-session fatigue model
//!
//! Persistence is the embedding application's concern: the engine reads
//! and writes through the [`store::WorkoutStore`] trait and is otherwise
//! pure and synchronous.

pub mod types;
pub mod error;
pub mod catalog;
pub mod config;
pub mod logging;
pub mod store;
pub mod history;
pub mod feedback;
pub mod intensity;
pub mod volume;
pub mod engine;

// Re-export commonly used types
pub use error::{Error, Result};
pub use types::*;
pub use catalog::{build_default_catalog, get_default_catalog};
pub use config::Config;
pub use store::{MemoryStore, WorkoutStore};
pub use history::{last_session_sets, recent_muscle_feedback};
pub use feedback::{analyze_feedback_trend, feedback_summary};
pub use intensity::{rir_for_muscle_group, sessions_since_last_deload};
pub use volume::adjust_sets;
pub use engine::{calculate_reps_with_rir_progression, recommend_weights_and_reps};
