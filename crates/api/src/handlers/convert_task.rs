//! Handlers for grey-conversion task records.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use greyimage_core::types::DbId;
use greyimage_db::models::convert_task::{ConvertTaskDto, CreateConvertTask, UpdateConvertTask};

use crate::error::AppResult;
use crate::extract::{ApiJson, ApiPath};
use crate::middleware::actor::Actor;
use crate::response::DataResponse;
use crate::state::AppState;

/// POST /api/v1/convert-tasks
pub async fn create(
    State(state): State<AppState>,
    Actor(actor): Actor,
    ApiJson(input): ApiJson<CreateConvertTask>,
) -> AppResult<(StatusCode, Json<DataResponse<ConvertTaskDto>>)> {
    let task = state.convert_tasks.create(input, actor).await?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: task })))
}

/// GET /api/v1/convert-tasks/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<DbId>,
) -> AppResult<Json<DataResponse<ConvertTaskDto>>> {
    let task = state.convert_tasks.get_by_id(id).await?;
    Ok(Json(DataResponse { data: task }))
}

/// PUT /api/v1/convert-tasks/{id}
///
/// Used by the converter to report `status` and the `out_image_id`.
pub async fn update(
    State(state): State<AppState>,
    Actor(actor): Actor,
    ApiPath(id): ApiPath<DbId>,
    ApiJson(input): ApiJson<UpdateConvertTask>,
) -> AppResult<Json<DataResponse<ConvertTaskDto>>> {
    let task = state.convert_tasks.update(input, id, actor).await?;
    Ok(Json(DataResponse { data: task }))
}

/// GET /api/v1/images/{id}/convert-tasks
pub async fn list_for_image(
    State(state): State<AppState>,
    ApiPath(image_id): ApiPath<DbId>,
) -> AppResult<Json<DataResponse<Vec<ConvertTaskDto>>>> {
    let tasks = state.convert_tasks.list_for_image(image_id).await?;
    Ok(Json(DataResponse { data: tasks }))
}
