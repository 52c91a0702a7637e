use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;
use validator::Validate;

use crate::auth::ownership::Owned;

pub const DEFAULT_COLOR: &str = "#3B82F6";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Habit {
    pub id: Uuid,
    pub user_id: Uuid,
    pub name: String,
    pub description: String,
    pub frequency: HabitFrequency,
    pub target_days: i32,
    pub color: String,
    pub current_streak: i32,
    pub longest_streak: i32,
    pub total_completions: i64,
    pub last_completed_date: Option<NaiveDate>,
    #[sqlx(json)]
    pub completion_history: Vec<CompletionEntry>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Habit {
    /// A freshly created habit: progress fields zeroed, history empty.
    pub fn new(user_id: Uuid, fields: NewHabit, now: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id,
            name: fields.name,
            description: fields.description,
            frequency: fields.frequency,
            target_days: fields.target_days,
            color: fields.color,
            current_streak: 0,
            longest_streak: 0,
            total_completions: 0,
            last_completed_date: None,
            completion_history: Vec::new(),
            is_active: true,
            created_at: now,
            updated_at: now,
        }
    }

    /// Applies descriptive edits. Progress fields are never touched here.
    pub fn apply_changes(&mut self, changes: &HabitChanges, now: DateTime<Utc>) {
        if let Some(name) = &changes.name {
            self.name = name.clone();
        }
        if let Some(description) = &changes.description {
            self.description = description.clone();
        }
        if let Some(frequency) = &changes.frequency {
            self.frequency = frequency.clone();
        }
        if let Some(target_days) = changes.target_days {
            self.target_days = target_days;
        }
        if let Some(color) = &changes.color {
            self.color = color.clone();
        }
        if let Some(is_active) = changes.is_active {
            self.is_active = is_active;
        }
        self.updated_at = now;
    }

    pub fn snapshot(&self) -> HabitSnapshot {
        HabitSnapshot {
            name: self.name.clone(),
            current_streak: self.current_streak,
            longest_streak: self.longest_streak,
            frequency: self.frequency.clone(),
            total_completions: self.total_completions,
        }
    }
}

impl Owned for Habit {
    fn owner_id(&self) -> Uuid {
        self.user_id
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompletionEntry {
    pub date: NaiveDate,
    pub completed: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::Type, PartialEq, Eq, Default)]
#[sqlx(type_name = "habit_frequency", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum HabitFrequency {
    #[default]
    Daily,
    Weekly,
    Monthly,
}

impl std::fmt::Display for HabitFrequency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            HabitFrequency::Daily => "daily",
            HabitFrequency::Weekly => "weekly",
            HabitFrequency::Monthly => "monthly",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Deserialize, Validate)]
pub struct CreateHabitRequest {
    #[validate(length(min = 1, max = 200, message = "Habit name is required"))]
    pub name: String,
    #[validate(length(max = 2000, message = "Description too long"))]
    pub description: Option<String>,
    pub frequency: Option<HabitFrequency>,
    #[validate(range(min = 1, message = "target_days must be a positive integer"))]
    pub target_days: Option<i32>,
    #[validate(length(min = 1, max = 32, message = "Color must be 1-32 characters"))]
    pub color: Option<String>,
}

impl CreateHabitRequest {
    pub fn into_new_habit(self) -> NewHabit {
        NewHabit {
            name: self.name.trim().to_string(),
            description: self
                .description
                .map(|d| d.trim().to_string())
                .unwrap_or_default(),
            frequency: self.frequency.unwrap_or_default(),
            target_days: self.target_days.unwrap_or(1),
            color: self.color.unwrap_or_else(|| DEFAULT_COLOR.into()),
        }
    }
}

#[derive(Debug, Deserialize, Validate)]
pub struct UpdateHabitRequest {
    #[validate(length(min = 1, max = 200, message = "Habit name cannot be empty"))]
    pub name: Option<String>,
    #[validate(length(max = 2000, message = "Description too long"))]
    pub description: Option<String>,
    pub frequency: Option<HabitFrequency>,
    #[validate(range(min = 1, message = "target_days must be a positive integer"))]
    pub target_days: Option<i32>,
    #[validate(length(min = 1, max = 32, message = "Color must be 1-32 characters"))]
    pub color: Option<String>,
    pub is_active: Option<bool>,
}

impl UpdateHabitRequest {
    pub fn into_changes(self) -> HabitChanges {
        HabitChanges {
            name: self.name.map(|n| n.trim().to_string()),
            description: self.description.map(|d| d.trim().to_string()),
            frequency: self.frequency,
            target_days: self.target_days,
            color: self.color,
            is_active: self.is_active,
        }
    }
}

/// Validated fields for a habit about to be created.
#[derive(Debug, Clone)]
pub struct NewHabit {
    pub name: String,
    pub description: String,
    pub frequency: HabitFrequency,
    pub target_days: i32,
    pub color: String,
}

/// Descriptive edits; `None` leaves the field as is.
#[derive(Debug, Clone, Default)]
pub struct HabitChanges {
    pub name: Option<String>,
    pub description: Option<String>,
    pub frequency: Option<HabitFrequency>,
    pub target_days: Option<i32>,
    pub color: Option<String>,
    pub is_active: Option<bool>,
}

#[derive(Debug, Deserialize)]
pub struct HabitListQuery {
    pub is_active: Option<bool>,
}

#[derive(Debug, Serialize)]
pub struct HabitList {
    pub habits: Vec<Habit>,
    pub count: usize,
}

/// Result of a successful daily completion.
#[derive(Debug, Serialize)]
pub struct MarkDoneResponse {
    pub message: String,
    pub habit: Habit,
}

/// Read-only view of a habit's progress handed to the advice coach.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HabitSnapshot {
    pub name: String,
    #[serde(default)]
    pub current_streak: i32,
    #[serde(default)]
    pub longest_streak: i32,
    #[serde(default)]
    pub frequency: HabitFrequency,
    #[serde(default)]
    pub total_completions: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_request(json: &str) -> CreateHabitRequest {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_create_request_applies_defaults() {
        let fields = create_request(r#"{"name":"  Read 20 pages "}"#).into_new_habit();
        assert_eq!(fields.name, "Read 20 pages");
        assert_eq!(fields.description, "");
        assert_eq!(fields.frequency, HabitFrequency::Daily);
        assert_eq!(fields.target_days, 1);
        assert_eq!(fields.color, DEFAULT_COLOR);
    }

    #[test]
    fn test_create_request_rejects_empty_name_and_zero_target() {
        assert!(create_request(r#"{"name":""}"#).validate().is_err());
        assert!(create_request(r#"{"name":"Run","target_days":0}"#).validate().is_err());
        assert!(create_request(r#"{"name":"Run","target_days":3}"#).validate().is_ok());
    }

    #[test]
    fn test_unknown_frequency_fails_to_deserialize() {
        let result = serde_json::from_str::<CreateHabitRequest>(r#"{"name":"Run","frequency":"hourly"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_new_habit_starts_fresh() {
        let habit = Habit::new(
            Uuid::new_v4(),
            create_request(r#"{"name":"Meditate","frequency":"weekly"}"#).into_new_habit(),
            Utc::now(),
        );
        assert_eq!(habit.current_streak, 0);
        assert_eq!(habit.longest_streak, 0);
        assert_eq!(habit.total_completions, 0);
        assert!(habit.completion_history.is_empty());
        assert!(habit.last_completed_date.is_none());
        assert!(habit.is_active);
    }

    #[test]
    fn test_apply_changes_leaves_progress_alone() {
        let mut habit = Habit::new(
            Uuid::new_v4(),
            create_request(r#"{"name":"Meditate"}"#).into_new_habit(),
            Utc::now(),
        );
        habit.current_streak = 4;
        habit.longest_streak = 6;
        habit.total_completions = 9;

        let changes = HabitChanges {
            name: Some("Meditate 10 min".into()),
            is_active: Some(false),
            ..Default::default()
        };
        habit.apply_changes(&changes, Utc::now());

        assert_eq!(habit.name, "Meditate 10 min");
        assert!(!habit.is_active);
        assert_eq!(habit.current_streak, 4);
        assert_eq!(habit.longest_streak, 6);
        assert_eq!(habit.total_completions, 9);
    }

    #[test]
    fn test_snapshot_defaults_when_deserialized_sparse() {
        let snap: HabitSnapshot = serde_json::from_str(r#"{"name":"Stretch"}"#).unwrap();
        assert_eq!(snap.current_streak, 0);
        assert_eq!(snap.frequency, HabitFrequency::Daily);
    }
}
