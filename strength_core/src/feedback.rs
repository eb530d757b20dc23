//! Feedback trend analysis.
//!
//! Pure aggregation over a muscle group's recent subjective reports
//! (soreness, pump, workload on a 1-5 scale). Produces a [`TrendStatus`]
//! that the intensity scheduler and volume adjuster act on.

use crate::types::{Feedback, FeedbackAnalysis, TrendStatus};

// Feedback thresholds
pub const SORENESS_LOW: f64 = 2.0;
pub const SORENESS_HIGH: f64 = 4.2;

pub const PUMP_LOW: f64 = 2.0;
pub const PUMP_GOOD: f64 = 3.0;

pub const WORKLOAD_LOW: f64 = 2.2;
pub const WORKLOAD_HIGH: f64 = 3.8;

// Streak thresholds
pub const CONSECUTIVE_HIGH_THRESHOLD: u32 = 2;
pub const CONSECUTIVE_LOW_THRESHOLD: u32 = 3;

/// Analyze feedback to determine if a muscle is overworked, underworked,
/// or in a productive range
///
/// The list must be ordered most recent first. Streaks are counted from
/// the most recent entry backward: a high-stress entry resets the low
/// streak and vice versa, and the walk stops at the first entry that is
/// neither high nor low. Missing scores count as 0.
pub fn analyze_feedback_trend(feedback_list: &[Feedback]) -> FeedbackAnalysis {
    if feedback_list.is_empty() {
        return FeedbackAnalysis::default();
    }

    let count = feedback_list.len() as f64;
    let avg_soreness =
        feedback_list.iter().map(|f| f.soreness_score() as f64).sum::<f64>() / count;
    let avg_pump = feedback_list.iter().map(|f| f.pump_score() as f64).sum::<f64>() / count;
    let avg_workload =
        feedback_list.iter().map(|f| f.workload_score() as f64).sum::<f64>() / count;

    let mut consecutive_high = 0u32;
    let mut consecutive_low = 0u32;

    for f in feedback_list {
        // High stress: high workload (4+) or (high soreness + elevated workload)
        let is_high_stress =
            f.workload_score() >= 4 || (f.soreness_score() >= 4 && f.workload_score() >= 3);

        // Low stress: everything at or below 2
        let is_low_stress =
            f.workload_score() <= 2 && f.soreness_score() <= 2 && f.pump_score() <= 2;

        if is_high_stress {
            consecutive_high += 1;
            consecutive_low = 0;
        } else if is_low_stress {
            consecutive_low += 1;
            consecutive_high = 0;
        } else {
            // Moderate session, streak over
            break;
        }
    }

    let status = if consecutive_high >= CONSECUTIVE_HIGH_THRESHOLD {
        TrendStatus::Deload
    } else if avg_soreness >= SORENESS_HIGH && avg_pump <= PUMP_LOW {
        // Overtraining signal: very sore but no pump
        TrendStatus::Deload
    } else if consecutive_low >= CONSECUTIVE_LOW_THRESHOLD {
        TrendStatus::PushHarder
    } else if avg_workload < WORKLOAD_LOW && avg_soreness < SORENESS_LOW {
        TrendStatus::SlightPush
    } else if avg_workload > WORKLOAD_HIGH || avg_soreness > SORENESS_HIGH {
        TrendStatus::SlightDeload
    } else {
        TrendStatus::Maintain
    };

    tracing::debug!(
        "Trend: {:?} (soreness {:.1}, pump {:.1}, workload {:.1}, high {}, low {})",
        status,
        avg_soreness,
        avg_pump,
        avg_workload,
        consecutive_high,
        consecutive_low
    );

    FeedbackAnalysis {
        status,
        avg_soreness,
        avg_pump,
        avg_workload,
        consecutive_high,
        consecutive_low,
    }
}

/// Text summary of recent feedback for UI display
pub fn feedback_summary(feedback_list: &[Feedback]) -> String {
    if feedback_list.is_empty() {
        return "No recent feedback".to_string();
    }

    let analysis = analyze_feedback_trend(feedback_list);
    let mut parts: Vec<&str> = Vec::new();

    if analysis.avg_soreness >= SORENESS_HIGH {
        parts.push("High soreness");
    } else if analysis.avg_soreness <= SORENESS_LOW {
        parts.push("Low soreness");
    }

    if analysis.avg_pump >= PUMP_GOOD {
        parts.push("Good pump");
    } else if analysis.avg_pump <= PUMP_LOW {
        parts.push("Low pump");
    }

    if analysis.avg_workload >= WORKLOAD_HIGH {
        parts.push("High workload");
    } else if analysis.avg_workload <= WORKLOAD_LOW {
        parts.push("Low workload");
    }

    if parts.is_empty() {
        parts.push("Moderate levels");
    }

    parts.join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::MuscleGroup;
    use chrono::{Duration, Utc};

    fn entry(soreness: i32, pump: i32, workload: i32, days_ago: i64) -> Feedback {
        Feedback {
            session_id: days_ago,
            muscle_group: MuscleGroup::Quads,
            soreness: Some(soreness),
            pump: Some(pump),
            workload: Some(workload),
            created_at: Utc::now() - Duration::days(days_ago),
        }
    }

    #[test]
    fn test_empty_input_maintains() {
        let analysis = analyze_feedback_trend(&[]);
        assert_eq!(analysis.status, TrendStatus::Maintain);
        assert_eq!(analysis.avg_soreness, 0.0);
        assert_eq!(analysis.consecutive_high, 0);
    }

    #[test]
    fn test_two_consecutive_high_forces_deload() {
        // most recent first
        let list = vec![entry(5, 3, 5, 0), entry(5, 3, 5, 1), entry(2, 3, 3, 2)];
        let analysis = analyze_feedback_trend(&list);
        assert_eq!(analysis.consecutive_high, 2);
        assert_eq!(analysis.status, TrendStatus::Deload);
    }

    #[test]
    fn test_high_soreness_low_pump_averages_force_deload() {
        // no streak (workload stays low) but averages scream overtraining
        let list = vec![entry(5, 1, 2, 0), entry(4, 2, 2, 1), entry(4, 2, 2, 2)];
        let analysis = analyze_feedback_trend(&list);
        assert!(analysis.consecutive_high < CONSECUTIVE_HIGH_THRESHOLD);
        assert_eq!(analysis.status, TrendStatus::Deload);
    }

    #[test]
    fn test_three_consecutive_low_pushes_harder() {
        let list = vec![entry(1, 2, 2, 0), entry(2, 1, 1, 1), entry(1, 1, 2, 2)];
        let analysis = analyze_feedback_trend(&list);
        assert_eq!(analysis.consecutive_low, 3);
        assert_eq!(analysis.status, TrendStatus::PushHarder);
    }

    #[test]
    fn test_neutral_entry_stops_the_walk() {
        // newest is neutral, so streaks never start even with old high entries
        let list = vec![entry(3, 3, 3, 0), entry(5, 3, 5, 1), entry(5, 3, 5, 2)];
        let analysis = analyze_feedback_trend(&list);
        assert_eq!(analysis.consecutive_high, 0);
        assert_eq!(analysis.consecutive_low, 0);
    }

    #[test]
    fn test_low_entry_resets_high_streak() {
        // high, low, high from most recent: the low entry resets the count
        let list = vec![entry(5, 3, 5, 0), entry(1, 1, 1, 1), entry(5, 3, 5, 2)];
        let analysis = analyze_feedback_trend(&list);
        assert_eq!(analysis.consecutive_high, 1);
        assert_ne!(analysis.status, TrendStatus::Deload);
    }

    #[test]
    fn test_slight_push_on_low_averages() {
        let list = vec![entry(1, 3, 2, 0), entry(2, 3, 2, 1), entry(2, 3, 2, 2)];
        let analysis = analyze_feedback_trend(&list);
        assert_eq!(analysis.status, TrendStatus::SlightPush);
    }

    #[test]
    fn test_slight_deload_on_high_soreness_average() {
        // sore but pumped: not the overtraining pattern, just fatigue
        let list = vec![entry(5, 3, 2, 0), entry(5, 3, 2, 1), entry(4, 3, 2, 2)];
        let analysis = analyze_feedback_trend(&list);
        assert_eq!(analysis.status, TrendStatus::SlightDeload);
    }

    #[test]
    fn test_missing_scores_count_as_zero() {
        let mut f = entry(0, 0, 0, 0);
        f.soreness = None;
        f.pump = None;
        f.workload = None;
        let analysis = analyze_feedback_trend(&[f]);
        assert_eq!(analysis.avg_soreness, 0.0);
        // all zeros reads as a low-stress session
        assert_eq!(analysis.consecutive_low, 1);
    }

    #[test]
    fn test_summary_strings() {
        assert_eq!(feedback_summary(&[]), "No recent feedback");

        let sore = vec![entry(5, 1, 3, 0), entry(5, 1, 3, 1)];
        let summary = feedback_summary(&sore);
        assert!(summary.contains("High soreness"));
        assert!(summary.contains("Low pump"));

        let moderate = vec![entry(3, 2, 3, 0), entry(3, 3, 3, 1)];
        assert_eq!(feedback_summary(&moderate), "Moderate levels");
    }
}
