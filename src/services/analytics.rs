use serde::Serialize;
use uuid::Uuid;

use crate::models::habit::Habit;

#[derive(Debug, Serialize)]
pub struct HabitAnalytics {
    pub stats: HabitStats,
    pub habits: Vec<HabitConsistency>,
    pub insights: HabitInsights,
}

#[derive(Debug, Serialize, PartialEq)]
pub struct HabitStats {
    pub total_habits: usize,
    pub total_completions: i64,
    pub average_streak: f64,
    pub longest_streak: i32,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct HabitConsistency {
    pub id: Uuid,
    pub name: String,
    pub current_streak: i32,
    pub longest_streak: i32,
    pub total_completions: i64,
    pub consistency: f64,
}

#[derive(Debug, Serialize)]
pub struct HabitInsights {
    pub strongest_habit: Option<HabitConsistency>,
    pub needs_attention: Vec<HabitConsistency>,
}

fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}

/// Current streak as a percentage of the best streak, 0 when never completed.
pub fn consistency(habit: &Habit) -> f64 {
    if habit.longest_streak > 0 {
        round_to(
            habit.current_streak as f64 / habit.longest_streak as f64 * 100.0,
            2,
        )
    } else {
        0.0
    }
}

/// Aggregates streak statistics over a user's habits. Read-only.
pub fn summarize(habits: &[Habit]) -> HabitAnalytics {
    let total_habits = habits.len();
    let average_streak = if total_habits > 0 {
        let sum: i64 = habits.iter().map(|h| h.current_streak as i64).sum();
        round_to(sum as f64 / total_habits as f64, 1)
    } else {
        0.0
    };

    let stats = HabitStats {
        total_habits,
        total_completions: habits.iter().map(|h| h.total_completions).sum(),
        average_streak,
        longest_streak: habits.iter().map(|h| h.longest_streak).max().unwrap_or(0).max(0),
    };

    let scores: Vec<HabitConsistency> = habits
        .iter()
        .map(|h| HabitConsistency {
            id: h.id,
            name: h.name.clone(),
            current_streak: h.current_streak,
            longest_streak: h.longest_streak,
            total_completions: h.total_completions,
            consistency: consistency(h),
        })
        .collect();

    // Strictly greater, so the first of equally long streaks wins.
    let mut strongest: Option<&HabitConsistency> = None;
    for score in &scores {
        let best = strongest.map(|s| s.current_streak).unwrap_or(0);
        if score.current_streak > best {
            strongest = Some(score);
        }
    }
    let strongest_habit = strongest.cloned();

    let needs_attention = scores
        .iter()
        .filter(|s| s.current_streak == 0)
        .cloned()
        .collect();

    HabitAnalytics {
        stats,
        habits: scores,
        insights: HabitInsights {
            strongest_habit,
            needs_attention,
        },
    }
}
