//! Repository for the `images` table.

use greyimage_core::types::DbId;
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::image::{CreateImage, Image, ImageQuery};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, name, content_type, content, width, height, \
                       created_at, updated_at, created_by, updated_by";

/// Search predicate; `$1` is an `ILIKE` pattern or `NULL` for "match all".
const SEARCH_FILTER: &str = "($1::text IS NULL \
                             OR name ILIKE $1 ESCAPE '\\' \
                             OR content_type ILIKE $1 ESCAPE '\\')";

/// Provides CRUD and listing operations for images.
pub struct ImageRepo;

impl ImageRepo {
    /// Insert a new image, returning the created row.
    ///
    /// The id is generated here (UUIDv7); `created_at` comes from the
    /// column default.
    pub async fn create(pool: &PgPool, input: &CreateImage) -> Result<Image, sqlx::Error> {
        let query = format!(
            "INSERT INTO images (id, name, content_type, content, width, height, created_by)
             VALUES ($1, $2, $3, $4, $5, $6, $7)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Image>(&query)
            .bind(Uuid::now_v7())
            .bind(&input.name)
            .bind(&input.content_type)
            .bind(&input.content)
            .bind(input.width)
            .bind(input.height)
            .bind(input.created_by)
            .fetch_one(pool)
            .await
    }

    /// Find an image by its ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Image>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM images WHERE id = $1");
        sqlx::query_as::<_, Image>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Overwrite every mutable column of the row matching `image.id`.
    ///
    /// Returns `None` if no row with that id exists.
    pub async fn update(pool: &PgPool, image: &Image) -> Result<Option<Image>, sqlx::Error> {
        let query = format!(
            "UPDATE images SET
                name = $2,
                content_type = $3,
                content = $4,
                width = $5,
                height = $6,
                updated_at = $7,
                updated_by = $8
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Image>(&query)
            .bind(image.id)
            .bind(&image.name)
            .bind(&image.content_type)
            .bind(&image.content)
            .bind(image.width)
            .bind(image.height)
            .bind(image.updated_at)
            .bind(image.updated_by)
            .fetch_optional(pool)
            .await
    }

    /// Delete an image by ID. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM images WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Count images whose name or content type matches `pattern`.
    ///
    /// `pattern` is an `ILIKE` pattern from
    /// [`greyimage_core::search::like_pattern`]; `None` counts every row.
    pub async fn count(pool: &PgPool, pattern: Option<&str>) -> Result<i64, sqlx::Error> {
        let query = format!("SELECT COUNT(*) FROM images WHERE {SEARCH_FILTER}");
        let (count,): (i64,) = sqlx::query_as(&query)
            .bind(pattern)
            .fetch_one(pool)
            .await?;
        Ok(count)
    }

    /// Fetch one page of images.
    ///
    /// The sort column comes from a closed enum, so interpolating it is safe.
    /// `NULLS LAST` applies in both directions and `id` breaks ties.
    pub async fn list_page(
        pool: &PgPool,
        pattern: Option<&str>,
        query: &ImageQuery,
    ) -> Result<Vec<Image>, sqlx::Error> {
        let direction = query.direction.as_sql();
        let sql = format!(
            "SELECT {COLUMNS} FROM images
             WHERE {SEARCH_FILTER}
             ORDER BY {column} {direction} NULLS LAST, id {direction}
             LIMIT $2 OFFSET $3",
            column = query.sort.column(),
        );
        sqlx::query_as::<_, Image>(&sql)
            .bind(pattern)
            .bind(query.page_size)
            .bind(query.offset())
            .fetch_all(pool)
            .await
    }
}
