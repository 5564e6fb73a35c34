//! Shared response envelope types for API handlers.
//!
//! Single-item responses use a `{ "data": ... }` envelope. List endpoints
//! return [`greyimage_core::pagination::PaginatedResult`], which adds the
//! pagination block next to `data`.

use serde::Serialize;

/// Standard `{ "data": T }` response envelope.
///
/// # Example
///
/// ```ignore
/// Ok(Json(DataResponse { data: image }))
/// ```
#[derive(Debug, Serialize)]
pub struct DataResponse<T: Serialize> {
    pub data: T,
}
