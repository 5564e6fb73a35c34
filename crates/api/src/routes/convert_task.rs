//! Route definitions for the `/convert-tasks` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::convert_task;
use crate::state::AppState;

/// Routes mounted at `/convert-tasks`.
///
/// ```text
/// POST   /        -> create
/// GET    /{id}    -> get_by_id
/// PUT    /{id}    -> update
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(convert_task::create))
        .route(
            "/{id}",
            get(convert_task::get_by_id).put(convert_task::update),
        )
}
