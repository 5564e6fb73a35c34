//! Caller identity extractor for Axum handlers.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use greyimage_core::types::{DbId, SYSTEM_ACTOR};

use crate::error::AppError;

/// Header carrying the caller's user id.
pub const ACTOR_HEADER: &str = "x-user-id";

/// Identity written to `created_by` / `updated_by`.
///
/// Read from the `X-User-Id` header. Requests without the header act as
/// [`SYSTEM_ACTOR`]; a header that is not a UUID is rejected with 400.
///
/// ```ignore
/// async fn my_handler(actor: Actor) -> AppResult<Json<()>> {
///     tracing::info!(actor = %actor.0, "handling request");
///     Ok(Json(()))
/// }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Actor(pub DbId);

impl<S> FromRequestParts<S> for Actor
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let Some(value) = parts.headers.get(ACTOR_HEADER) else {
            return Ok(Actor(SYSTEM_ACTOR));
        };

        value
            .to_str()
            .ok()
            .and_then(|v| v.trim().parse::<DbId>().ok())
            .map(Actor)
            .ok_or_else(|| AppError::BadRequest(format!("{ACTOR_HEADER} must be a UUID")))
    }
}
