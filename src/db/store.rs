//! Persistence interface for habits.
//!
//! Each habit is a single record holding its completion history, so a
//! store only needs per-record atomicity. `mark_done` is the one
//! read-modify-write operation and every implementation must run it as a
//! unit: two concurrent calls for the same habit and day must not both
//! append an entry.

use chrono::NaiveDate;
use uuid::Uuid;

use crate::error::AppResult;
use crate::models::habit::{Habit, HabitChanges, NewHabit};

#[async_trait::async_trait]
pub trait HabitStore: Send + Sync {
    /// Whether the backing store is reachable.
    async fn ping(&self) -> bool;

    async fn create(&self, user_id: Uuid, fields: NewHabit) -> AppResult<Habit>;

    /// Habits owned by `user_id`, newest first.
    async fn list(&self, user_id: Uuid, is_active: Option<bool>) -> AppResult<Vec<Habit>>;

    async fn find(&self, id: Uuid) -> AppResult<Option<Habit>>;

    /// Applies descriptive edits. Returns `None` if the habit is gone.
    async fn update_details(&self, id: Uuid, changes: &HabitChanges) -> AppResult<Option<Habit>>;

    /// Removes the habit and its history. Returns whether anything was removed.
    async fn delete(&self, id: Uuid) -> AppResult<bool>;

    /// Records today's completion for `requester`'s habit.
    ///
    /// Fails with `NotFound`, `Forbidden` or `AlreadyCompletedToday` without
    /// changing the stored record.
    async fn mark_done(&self, id: Uuid, requester: Uuid, today: NaiveDate) -> AppResult<Habit>;
}
