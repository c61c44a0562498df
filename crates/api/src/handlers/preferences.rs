//! Handlers for the `/users/{user_id}/preferences` resource.

use axum::extract::{Path, State};
use axum::Json;
use hudur_core::types::UserId;
use hudur_db::models::preferences::{NotificationPreferences, UpdatePreferences};
use hudur_db::repositories::PreferenceRepo;

use crate::error::AppResult;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/users/{user_id}/preferences
///
/// Fetch the user's notification preferences. A user with no stored row
/// gets the in-memory defaults; nothing is written.
pub async fn get_preferences(
    State(state): State<AppState>,
    Path(user_id): Path<UserId>,
) -> AppResult<Json<DataResponse<NotificationPreferences>>> {
    let prefs = PreferenceRepo::get(&state.pool, user_id)
        .await?
        .unwrap_or_else(|| NotificationPreferences::default_for(user_id));

    Ok(Json(DataResponse { data: prefs }))
}

/// PUT /api/v1/users/{user_id}/preferences
///
/// Create or fully replace the user's notification preferences.
pub async fn update_preferences(
    State(state): State<AppState>,
    Path(user_id): Path<UserId>,
    Json(input): Json<UpdatePreferences>,
) -> AppResult<Json<DataResponse<NotificationPreferences>>> {
    let prefs = PreferenceRepo::upsert(&state.pool, user_id, &input).await?;

    Ok(Json(DataResponse { data: prefs }))
}
