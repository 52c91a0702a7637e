use std::{collections::HashMap, sync::Arc};

use chrono::{NaiveDate, Utc};
use tokio::sync::Mutex;
use uuid::Uuid;

use crate::auth::ownership::ensure_owner;
use crate::db::store::HabitStore;
use crate::error::{AppError, AppResult};
use crate::models::habit::{Habit, HabitChanges, NewHabit};
use crate::services::streak;

/// In-process habit store for local development and tests.
/// Data lives only as long as the process.
#[derive(Clone, Default)]
pub struct MemoryHabitStore {
    habits: Arc<Mutex<HashMap<Uuid, Habit>>>,
}

impl MemoryHabitStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait::async_trait]
impl HabitStore for MemoryHabitStore {
    async fn ping(&self) -> bool {
        true
    }

    async fn create(&self, user_id: Uuid, fields: NewHabit) -> AppResult<Habit> {
        let habit = Habit::new(user_id, fields, Utc::now());
        self.habits.lock().await.insert(habit.id, habit.clone());
        Ok(habit)
    }

    async fn list(&self, user_id: Uuid, is_active: Option<bool>) -> AppResult<Vec<Habit>> {
        let habits = self.habits.lock().await;
        let mut result: Vec<Habit> = habits
            .values()
            .filter(|h| h.user_id == user_id)
            .filter(|h| is_active.map_or(true, |active| h.is_active == active))
            .cloned()
            .collect();
        result.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(a.id.cmp(&b.id)));
        Ok(result)
    }

    async fn find(&self, id: Uuid) -> AppResult<Option<Habit>> {
        Ok(self.habits.lock().await.get(&id).cloned())
    }

    async fn update_details(&self, id: Uuid, changes: &HabitChanges) -> AppResult<Option<Habit>> {
        let mut habits = self.habits.lock().await;
        Ok(habits.get_mut(&id).map(|habit| {
            habit.apply_changes(changes, Utc::now());
            habit.clone()
        }))
    }

    async fn delete(&self, id: Uuid) -> AppResult<bool> {
        Ok(self.habits.lock().await.remove(&id).is_some())
    }

    async fn mark_done(&self, id: Uuid, requester: Uuid, today: NaiveDate) -> AppResult<Habit> {
        // Held for the whole check-and-update.
        let mut habits = self.habits.lock().await;
        let stored = habits
            .get_mut(&id)
            .ok_or_else(|| AppError::NotFound("Habit not found".into()))?;
        ensure_owner(&*stored, requester)?;

        let mut updated = stored.clone();
        streak::mark_done(&mut updated, today)?;
        *stored = updated.clone();
        Ok(updated)
    }
}
