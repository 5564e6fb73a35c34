//! Route definitions for the `/images` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::{convert_task, image};
use crate::state::AppState;

/// Routes mounted at `/images`.
///
/// ```text
/// GET    /                     -> list
/// POST   /                     -> create (multipart)
/// GET    /{id}                 -> get_by_id
/// PUT    /{id}                 -> update
/// DELETE /{id}                 -> delete
/// GET    /{id}/content         -> get_content
/// GET    /{id}/convert-tasks   -> convert_task::list_for_image
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(image::list).post(image::create))
        .route(
            "/{id}",
            get(image::get_by_id)
                .put(image::update)
                .delete(image::delete),
        )
        .route("/{id}/content", get(image::get_content))
        .route("/{id}/convert-tasks", get(convert_task::list_for_image))
}
