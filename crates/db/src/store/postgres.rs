use async_trait::async_trait;
use greyimage_core::search::like_pattern;
use greyimage_core::types::DbId;

use super::{ConvertTaskStore, ImageStore};
use crate::models::convert_task::{ConvertTask, CreateConvertTask};
use crate::models::image::{CreateImage, Image, ImageQuery};
use crate::repositories::{ConvertTaskRepo, ImageRepo};
use crate::DbPool;

/// PostgreSQL-backed store; a thin adapter over the repositories.
#[derive(Debug, Clone)]
pub struct PgStore {
    pool: DbPool,
}

impl PgStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ImageStore for PgStore {
    async fn get_by_id(&self, id: DbId) -> Result<Option<Image>, sqlx::Error> {
        ImageRepo::find_by_id(&self.pool, id).await
    }

    async fn insert(&self, input: &CreateImage) -> Result<Image, sqlx::Error> {
        ImageRepo::create(&self.pool, input).await
    }

    async fn update(&self, image: &Image) -> Result<(), sqlx::Error> {
        ImageRepo::update(&self.pool, image)
            .await?
            .map(|_| ())
            .ok_or(sqlx::Error::RowNotFound)
    }

    async fn delete(&self, id: DbId) -> Result<(), sqlx::Error> {
        if ImageRepo::delete(&self.pool, id).await? {
            Ok(())
        } else {
            Err(sqlx::Error::RowNotFound)
        }
    }

    async fn count(&self, search: Option<&str>) -> Result<i64, sqlx::Error> {
        let pattern = like_pattern(search);
        ImageRepo::count(&self.pool, pattern.as_deref()).await
    }

    async fn list_page(&self, query: &ImageQuery) -> Result<Vec<Image>, sqlx::Error> {
        let pattern = like_pattern(query.search.as_deref());
        ImageRepo::list_page(&self.pool, pattern.as_deref(), query).await
    }

    async fn ping(&self) -> Result<(), sqlx::Error> {
        crate::health_check(&self.pool).await
    }
}

#[async_trait]
impl ConvertTaskStore for PgStore {
    async fn get_by_id(&self, id: DbId) -> Result<Option<ConvertTask>, sqlx::Error> {
        ConvertTaskRepo::find_by_id(&self.pool, id).await
    }

    async fn insert(
        &self,
        input: &CreateConvertTask,
        created_by: DbId,
    ) -> Result<ConvertTask, sqlx::Error> {
        ConvertTaskRepo::create(&self.pool, input, created_by).await
    }

    async fn update(&self, task: &ConvertTask) -> Result<(), sqlx::Error> {
        ConvertTaskRepo::update(&self.pool, task)
            .await?
            .map(|_| ())
            .ok_or(sqlx::Error::RowNotFound)
    }

    async fn list_for_image(&self, image_id: DbId) -> Result<Vec<ConvertTask>, sqlx::Error> {
        ConvertTaskRepo::list_by_in_image(&self.pool, image_id).await
    }
}
