//! Handlers for the `/users/{user_id}/devices` resource.
//!
//! Device tokens are the fan-out targets of push delivery. Unregistering
//! deactivates a token rather than deleting it, so re-registering the same
//! token is a cheap reactivation.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use hudur_core::types::UserId;
use hudur_core::{CoreError, Platform};
use hudur_db::models::device_token::DeviceToken;
use hudur_db::repositories::DeviceTokenRepo;
use serde::Deserialize;
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

/// Body for `POST /users/{user_id}/devices`.
#[derive(Debug, Deserialize, Validate)]
pub struct RegisterDevice {
    #[validate(length(min = 1, message = "token must not be empty"))]
    pub token: String,
    pub platform: Platform,
}

/// Body for `DELETE /users/{user_id}/devices`.
#[derive(Debug, Deserialize)]
pub struct UnregisterDevice {
    pub token: String,
}

/// POST /api/v1/users/{user_id}/devices
///
/// Register (or reactivate) a device token for push delivery.
pub async fn register_device(
    State(state): State<AppState>,
    Path(user_id): Path<UserId>,
    Json(input): Json<RegisterDevice>,
) -> AppResult<(StatusCode, Json<DataResponse<DeviceToken>>)> {
    input
        .validate()
        .map_err(|e| AppError::Core(CoreError::Validation(e.to_string())))?;

    let token =
        DeviceTokenRepo::register(&state.pool, user_id, &input.token, input.platform).await?;

    Ok((StatusCode::CREATED, Json(DataResponse { data: token })))
}

/// DELETE /api/v1/users/{user_id}/devices
///
/// Deactivate a device token. Returns 204 on success, 404 when the token
/// is not registered for the user.
pub async fn unregister_device(
    State(state): State<AppState>,
    Path(user_id): Path<UserId>,
    Json(input): Json<UnregisterDevice>,
) -> AppResult<impl IntoResponse> {
    let found = DeviceTokenRepo::deactivate(&state.pool, user_id, &input.token).await?;

    if !found {
        return Err(AppError::NotFound(format!(
            "Device token {} is not registered for this user",
            input.token
        )));
    }

    Ok(StatusCode::NO_CONTENT)
}
