//! Entity store traits consumed by the API services.
//!
//! One narrow trait per entity type. Absent rows are `Ok(None)` from
//! lookups; `update` and `delete` on an id that does not exist report
//! [`sqlx::Error::RowNotFound`]. Callers are expected to look the entity up
//! first and raise their own not-found error.
//!
//! Two implementations ship with the crate: [`PgStore`] over a connection
//! pool and [`MemoryStore`] for running without a database and for tests.

use async_trait::async_trait;
use greyimage_core::types::DbId;

use crate::models::convert_task::{ConvertTask, CreateConvertTask};
use crate::models::image::{CreateImage, Image, ImageQuery};

mod memory;
mod postgres;

pub use memory::MemoryStore;
pub use postgres::PgStore;

#[async_trait]
pub trait ImageStore: Send + Sync {
    async fn get_by_id(&self, id: DbId) -> Result<Option<Image>, sqlx::Error>;

    /// Persist a new image and return it with its assigned id and timestamp.
    async fn insert(&self, input: &CreateImage) -> Result<Image, sqlx::Error>;

    async fn update(&self, image: &Image) -> Result<(), sqlx::Error>;

    async fn delete(&self, id: DbId) -> Result<(), sqlx::Error>;

    /// Number of images matching `search` (`None` counts everything).
    async fn count(&self, search: Option<&str>) -> Result<i64, sqlx::Error>;

    async fn list_page(&self, query: &ImageQuery) -> Result<Vec<Image>, sqlx::Error>;

    /// Cheap reachability probe for health checks.
    async fn ping(&self) -> Result<(), sqlx::Error>;
}

#[async_trait]
pub trait ConvertTaskStore: Send + Sync {
    async fn get_by_id(&self, id: DbId) -> Result<Option<ConvertTask>, sqlx::Error>;

    async fn insert(
        &self,
        input: &CreateConvertTask,
        created_by: DbId,
    ) -> Result<ConvertTask, sqlx::Error>;

    async fn update(&self, task: &ConvertTask) -> Result<(), sqlx::Error>;

    /// Tasks whose input image is `image_id`, oldest first.
    async fn list_for_image(&self, image_id: DbId) -> Result<Vec<ConvertTask>, sqlx::Error>;
}
