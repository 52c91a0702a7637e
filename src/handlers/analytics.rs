use axum::{extract::State, Extension, Json};

use crate::auth::middleware::AuthUser;
use crate::error::AppResult;
use crate::services::analytics::{self, HabitAnalytics};
use crate::AppState;

pub async fn get_habit_analytics(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
) -> AppResult<Json<HabitAnalytics>> {
    let habits = state.habits.list(auth_user.id, Some(true)).await?;
    Ok(Json(analytics::summarize(&habits)))
}
