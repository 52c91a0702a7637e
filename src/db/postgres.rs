use chrono::NaiveDate;
use sqlx::{types::Json, PgPool};
use uuid::Uuid;

use crate::auth::ownership::ensure_owner;
use crate::db::store::HabitStore;
use crate::error::{AppError, AppResult};
use crate::models::habit::{Habit, HabitChanges, NewHabit};
use crate::services::streak;

#[derive(Clone)]
pub struct PgHabitStore {
    pool: PgPool,
}

impl PgHabitStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn migrate(&self) -> Result<(), sqlx::migrate::MigrateError> {
        sqlx::migrate!("./migrations").run(&self.pool).await
    }
}

#[async_trait::async_trait]
impl HabitStore for PgHabitStore {
    async fn ping(&self) -> bool {
        sqlx::query_scalar::<_, i32>("SELECT 1")
            .fetch_one(&self.pool)
            .await
            .is_ok()
    }

    async fn create(&self, user_id: Uuid, fields: NewHabit) -> AppResult<Habit> {
        let habit = sqlx::query_as::<_, Habit>(
            r#"
            INSERT INTO habits (id, user_id, name, description, frequency, target_days, color)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(user_id)
        .bind(&fields.name)
        .bind(&fields.description)
        .bind(&fields.frequency)
        .bind(fields.target_days)
        .bind(&fields.color)
        .fetch_one(&self.pool)
        .await?;

        Ok(habit)
    }

    async fn list(&self, user_id: Uuid, is_active: Option<bool>) -> AppResult<Vec<Habit>> {
        let habits = sqlx::query_as::<_, Habit>(
            r#"
            SELECT * FROM habits
            WHERE user_id = $1 AND ($2::BOOLEAN IS NULL OR is_active = $2)
            ORDER BY created_at DESC, id ASC
            "#,
        )
        .bind(user_id)
        .bind(is_active)
        .fetch_all(&self.pool)
        .await?;

        Ok(habits)
    }

    async fn find(&self, id: Uuid) -> AppResult<Option<Habit>> {
        let habit = sqlx::query_as::<_, Habit>("SELECT * FROM habits WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(habit)
    }

    async fn update_details(&self, id: Uuid, changes: &HabitChanges) -> AppResult<Option<Habit>> {
        let habit = sqlx::query_as::<_, Habit>(
            r#"
            UPDATE habits SET
                name = COALESCE($2, name),
                description = COALESCE($3, description),
                frequency = COALESCE($4, frequency),
                target_days = COALESCE($5, target_days),
                color = COALESCE($6, color),
                is_active = COALESCE($7, is_active),
                updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(&changes.name)
        .bind(&changes.description)
        .bind(&changes.frequency)
        .bind(changes.target_days)
        .bind(&changes.color)
        .bind(changes.is_active)
        .fetch_optional(&self.pool)
        .await?;

        Ok(habit)
    }

    async fn delete(&self, id: Uuid) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM habits WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn mark_done(&self, id: Uuid, requester: Uuid, today: NaiveDate) -> AppResult<Habit> {
        let mut tx = self.pool.begin().await?;

        // Row lock serializes concurrent completions of the same habit.
        let mut habit = sqlx::query_as::<_, Habit>("SELECT * FROM habits WHERE id = $1 FOR UPDATE")
            .bind(id)
            .fetch_optional(&mut *tx)
            .await?
            .ok_or_else(|| AppError::NotFound("Habit not found".into()))?;
        ensure_owner(&habit, requester)?;

        streak::mark_done(&mut habit, today)?;

        let habit = sqlx::query_as::<_, Habit>(
            r#"
            UPDATE habits SET
                completion_history = $2,
                current_streak = $3,
                longest_streak = $4,
                total_completions = $5,
                last_completed_date = $6,
                updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(Json(&habit.completion_history))
        .bind(habit.current_streak)
        .bind(habit.longest_streak)
        .bind(habit.total_completions)
        .bind(habit.last_completed_date)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(habit)
    }
}
