use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Extension, Json,
};
use axum_extra::extract::WithRejection;
use uuid::Uuid;
use validator::Validate;

use crate::auth::middleware::AuthUser;
use crate::auth::ownership::owned_or_not_found;
use crate::error::{AppError, AppResult};
use crate::models::habit::{
    CreateHabitRequest, Habit, HabitList, HabitListQuery, MarkDoneResponse, UpdateHabitRequest,
};
use crate::services::streak;
use crate::AppState;

type HabitId = WithRejection<Path<Uuid>, AppError>;

pub async fn list_habits(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    WithRejection(Query(query), _): WithRejection<Query<HabitListQuery>, AppError>,
) -> AppResult<Json<HabitList>> {
    let habits = state.habits.list(auth_user.id, query.is_active).await?;

    Ok(Json(HabitList {
        count: habits.len(),
        habits,
    }))
}

pub async fn get_habit(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    WithRejection(Path(habit_id), _): HabitId,
) -> AppResult<Json<Habit>> {
    let habit = owned_or_not_found(state.habits.find(habit_id).await?, &auth_user, "Habit")?;
    Ok(Json(habit))
}

pub async fn create_habit(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    WithRejection(Json(body), _): WithRejection<Json<CreateHabitRequest>, AppError>,
) -> AppResult<(StatusCode, Json<Habit>)> {
    if body.name.trim().is_empty() {
        return Err(AppError::Validation("Habit name is required".into()));
    }
    body.validate()?;

    let habit = state.habits.create(auth_user.id, body.into_new_habit()).await?;
    tracing::info!(habit_id = %habit.id, user_id = %auth_user.id, "Habit created");

    Ok((StatusCode::CREATED, Json(habit)))
}

pub async fn update_habit(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    WithRejection(Path(habit_id), _): HabitId,
    WithRejection(Json(body), _): WithRejection<Json<UpdateHabitRequest>, AppError>,
) -> AppResult<Json<Habit>> {
    if body.name.as_deref().is_some_and(|n| n.trim().is_empty()) {
        return Err(AppError::Validation("Habit name cannot be empty".into()));
    }
    body.validate()?;

    owned_or_not_found(state.habits.find(habit_id).await?, &auth_user, "Habit")?;

    let habit = state
        .habits
        .update_details(habit_id, &body.into_changes())
        .await?
        .ok_or(AppError::NotFound("Habit not found".into()))?;

    Ok(Json(habit))
}

pub async fn mark_habit_done(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    WithRejection(Path(habit_id), _): HabitId,
) -> AppResult<Json<MarkDoneResponse>> {
    let today = state.clock.today();
    let habit = state.habits.mark_done(habit_id, auth_user.id, today).await?;

    tracing::info!(
        habit_id = %habit.id,
        user_id = %auth_user.id,
        current_streak = habit.current_streak,
        longest_streak = habit.longest_streak,
        %today,
        "Habit marked as done"
    );

    Ok(Json(MarkDoneResponse {
        message: streak::confirmation_message(&habit),
        habit,
    }))
}

pub async fn delete_habit(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    WithRejection(Path(habit_id), _): HabitId,
) -> AppResult<Json<serde_json::Value>> {
    owned_or_not_found(state.habits.find(habit_id).await?, &auth_user, "Habit")?;

    if !state.habits.delete(habit_id).await? {
        return Err(AppError::NotFound("Habit not found".into()));
    }

    tracing::info!(habit_id = %habit_id, user_id = %auth_user.id, "Habit deleted");
    Ok(Json(serde_json::json!({ "deleted": true, "id": habit_id })))
}
