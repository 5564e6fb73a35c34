pub mod convert_task;
pub mod health;
pub mod image;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /images                                  list, upload
///     /{id}                                get, update, delete
///     /{id}/content                        raw bytes
///     /{id}/convert-tasks                  tasks using the image as input
///
/// /convert-tasks                           create
///     /{id}                                get, update
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/images", image::router())
        .nest("/convert-tasks", convert_task::router())
}
