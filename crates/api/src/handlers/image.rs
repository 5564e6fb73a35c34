//! Handlers for the `/images` resource.

use axum::extract::State;
use axum::http::header::CONTENT_TYPE;
use axum::http::{HeaderValue, StatusCode};
use axum::response::IntoResponse;
use axum::Json;
use greyimage_core::pagination::PaginatedResult;
use greyimage_core::types::DbId;
use greyimage_db::models::image::{ImageDto, UpdateImage};

use crate::error::{AppError, AppResult};
use crate::extract::{ApiJson, ApiMultipart, ApiPath, ApiQuery};
use crate::middleware::actor::Actor;
use crate::query::ListImagesParams;
use crate::response::DataResponse;
use crate::services::UploadedFile;
use crate::state::AppState;

/// Multipart field holding the image bytes.
const FILE_FIELD: &str = "file";

/// GET /api/v1/images
///
/// Paginated, searchable, sortable listing.
pub async fn list(
    State(state): State<AppState>,
    ApiQuery(params): ApiQuery<ListImagesParams>,
) -> AppResult<Json<PaginatedResult<Vec<ImageDto>>>> {
    let page = state.images.get_paginated_list(&params).await?;
    Ok(Json(page))
}

/// POST /api/v1/images
///
/// Multipart upload. The `file` field is required; other fields are ignored.
/// A body over `MAX_UPLOAD_BYTES` is rejected with 413.
pub async fn create(
    State(state): State<AppState>,
    Actor(actor): Actor,
    ApiMultipart(mut multipart): ApiMultipart,
) -> AppResult<(StatusCode, Json<DataResponse<ImageDto>>)> {
    let mut upload: Option<UploadedFile> = None;

    while let Some(field) = multipart
        .next_field()
        .await?
    {
        if field.name() != Some(FILE_FIELD) {
            continue;
        }
        let file_name = field.file_name().map(str::to_string);
        let content_type = field.content_type().map(str::to_string);
        let bytes = field.bytes().await?;
        upload = Some(UploadedFile {
            file_name,
            content_type,
            bytes: bytes.to_vec(),
        });
    }

    let upload = upload
        .ok_or_else(|| AppError::BadRequest(format!("Missing required '{FILE_FIELD}' field")))?;
    let image = state.images.create(upload, actor).await?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: image })))
}

/// GET /api/v1/images/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<DbId>,
) -> AppResult<Json<DataResponse<ImageDto>>> {
    let image = state.images.get_by_id(id).await?;
    Ok(Json(DataResponse { data: image }))
}

/// PUT /api/v1/images/{id}
///
/// Partial update of `name` and/or `content_type`.
pub async fn update(
    State(state): State<AppState>,
    Actor(actor): Actor,
    ApiPath(id): ApiPath<DbId>,
    ApiJson(input): ApiJson<UpdateImage>,
) -> AppResult<Json<DataResponse<ImageDto>>> {
    let image = state.images.update(input, id, actor).await?;
    Ok(Json(DataResponse { data: image }))
}

/// DELETE /api/v1/images/{id}
pub async fn delete(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<DbId>,
) -> AppResult<StatusCode> {
    state.images.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/v1/images/{id}/content
///
/// Raw bytes served under the stored content type.
pub async fn get_content(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<DbId>,
) -> AppResult<impl IntoResponse> {
    let content = state.images.get_image_bytes(id).await?;
    let content_type = HeaderValue::from_str(&content.content_type)
        .unwrap_or_else(|_| HeaderValue::from_static("application/octet-stream"));
    Ok(([(CONTENT_TYPE, content_type)], content.bytes))
}
