//! Repository for the `convert_tasks` table.

use greyimage_core::types::DbId;
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::convert_task::{ConvertTask, CreateConvertTask};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, in_image_id, out_image_id, parameters, status, \
                       created_at, updated_at, created_by, updated_by";

/// Provides CRUD operations for conversion tasks.
pub struct ConvertTaskRepo;

impl ConvertTaskRepo {
    /// Insert a new task with an empty status and no output image.
    ///
    /// Missing `parameters` default to `{}`.
    pub async fn create(
        pool: &PgPool,
        input: &CreateConvertTask,
        created_by: DbId,
    ) -> Result<ConvertTask, sqlx::Error> {
        let query = format!(
            "INSERT INTO convert_tasks (id, in_image_id, parameters, created_by)
             VALUES ($1, $2, COALESCE($3, '{{}}'::jsonb), $4)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ConvertTask>(&query)
            .bind(Uuid::now_v7())
            .bind(input.in_image_id)
            .bind(&input.parameters)
            .bind(created_by)
            .fetch_one(pool)
            .await
    }

    /// Find a task by its ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<ConvertTask>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM convert_tasks WHERE id = $1");
        sqlx::query_as::<_, ConvertTask>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List tasks whose input is `image_id`, oldest first.
    pub async fn list_by_in_image(
        pool: &PgPool,
        image_id: DbId,
    ) -> Result<Vec<ConvertTask>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM convert_tasks
             WHERE in_image_id = $1
             ORDER BY created_at ASC, id ASC"
        );
        sqlx::query_as::<_, ConvertTask>(&query)
            .bind(image_id)
            .fetch_all(pool)
            .await
    }

    /// Overwrite the mutable columns of the row matching `task.id`.
    ///
    /// Returns `None` if no row with that id exists.
    pub async fn update(
        pool: &PgPool,
        task: &ConvertTask,
    ) -> Result<Option<ConvertTask>, sqlx::Error> {
        let query = format!(
            "UPDATE convert_tasks SET
                out_image_id = $2,
                parameters = $3,
                status = $4,
                updated_at = $5,
                updated_by = $6
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ConvertTask>(&query)
            .bind(task.id)
            .bind(task.out_image_id)
            .bind(&task.parameters)
            .bind(&task.status)
            .bind(task.updated_at)
            .bind(task.updated_by)
            .fetch_optional(pool)
            .await
    }
}
