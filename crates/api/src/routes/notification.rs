//! Route definitions for the dispatch endpoints.

use axum::routing::post;
use axum::Router;

use crate::handlers::dispatch;
use crate::state::AppState;

/// Routes mounted at `/notifications`.
///
/// ```text
/// POST   /       -> send_notification
/// POST   /bulk   -> send_bulk
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(dispatch::send_notification))
        .route("/bulk", post(dispatch::send_bulk))
}
