use axum::{extract::State, Extension, Json};
use axum_extra::extract::WithRejection;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::auth::middleware::AuthUser;
use crate::auth::ownership::owned_or_not_found;
use crate::error::{AppError, AppResult};
use crate::models::habit::HabitSnapshot;
use crate::services::coach::{self, AdviceSource};
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct HabitTipRequest {
    pub habit_data: Option<HabitSnapshot>,
    pub habit_id: Option<Uuid>,
}

#[derive(Debug, Serialize)]
pub struct HabitTipResponse {
    pub advice: String,
    pub habit_data: HabitSnapshot,
    pub source: AdviceSource,
}

/// Coaching tips for a habit, from an inline snapshot or a stored habit.
pub async fn get_habit_tip(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    WithRejection(Json(body), _): WithRejection<Json<HabitTipRequest>, AppError>,
) -> AppResult<Json<HabitTipResponse>> {
    let habit_data = match (body.habit_data, body.habit_id) {
        (Some(data), _) => Some(data),
        (None, Some(habit_id)) => {
            let habit = owned_or_not_found(state.habits.find(habit_id).await?, &auth_user, "Habit")?;
            Some(habit.snapshot())
        }
        (None, None) => None,
    };

    let habit_data = habit_data
        .filter(|data| !data.name.trim().is_empty())
        .ok_or_else(|| AppError::Validation("Please provide habit_data or habit_id".into()))?;

    let advice = coach::generate_habit_advice(&state.config, &habit_data).await;

    Ok(Json(HabitTipResponse {
        advice: advice.text,
        habit_data,
        source: advice.source,
    }))
}
