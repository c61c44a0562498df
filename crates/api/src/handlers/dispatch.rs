//! Handlers for the `/notifications` dispatch endpoints.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use hudur_dispatch::{SendBulkNotification, SendNotification};

use crate::error::AppResult;
use crate::response::DataResponse;
use crate::state::AppState;

/// POST /api/v1/notifications
///
/// Persist and dispatch a single notification. Responds 201 with the stored
/// notification; channel outcomes never affect the response.
pub async fn send_notification(
    State(state): State<AppState>,
    Json(input): Json<SendNotification>,
) -> AppResult<(StatusCode, Json<DataResponse<hudur_db::models::notification::Notification>>)> {
    let notification = state.dispatcher.send(input).await?;

    Ok((
        StatusCode::CREATED,
        Json(DataResponse { data: notification }),
    ))
}

/// POST /api/v1/notifications/bulk
///
/// Persist and dispatch one notification per resolved target. An empty
/// resolved target set is a successful no-op.
pub async fn send_bulk(
    State(state): State<AppState>,
    Json(input): Json<SendBulkNotification>,
) -> AppResult<Json<serde_json::Value>> {
    let queued = state.dispatcher.send_bulk(input).await?;

    Ok(Json(serde_json::json!({
        "data": { "queued": queued }
    })))
}
