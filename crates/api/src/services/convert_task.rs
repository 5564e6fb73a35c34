//! Grey-conversion task records.
//!
//! Tasks are created against an existing input image and later updated by
//! the external converter with a status and an output image.

use std::sync::Arc;

use chrono::Utc;
use greyimage_core::error::CoreError;
use greyimage_core::types::DbId;
use greyimage_db::models::convert_task::{
    ConvertTask, ConvertTaskDto, CreateConvertTask, UpdateConvertTask,
};
use greyimage_db::store::{ConvertTaskStore, ImageStore};
use validator::Validate;

use crate::error::{AppError, AppResult};

#[derive(Clone)]
pub struct ConvertTaskService {
    tasks: Arc<dyn ConvertTaskStore>,
    images: Arc<dyn ImageStore>,
}

impl ConvertTaskService {
    pub fn new(tasks: Arc<dyn ConvertTaskStore>, images: Arc<dyn ImageStore>) -> Self {
        Self { tasks, images }
    }

    pub async fn create(
        &self,
        input: CreateConvertTask,
        actor: DbId,
    ) -> AppResult<ConvertTaskDto> {
        if let Some(parameters) = &input.parameters {
            ensure_object(parameters)?;
        }
        self.require_image(input.in_image_id).await?;

        let task = self.tasks.insert(&input, actor).await?;
        tracing::info!(task_id = %task.id, in_image_id = %task.in_image_id, "Convert task created");
        Ok(ConvertTaskDto::from(&task))
    }

    pub async fn get_by_id(&self, id: DbId) -> AppResult<ConvertTaskDto> {
        let task = self.find(id).await?;
        Ok(ConvertTaskDto::from(&task))
    }

    /// Merge a partial update. A referenced output image must exist.
    pub async fn update(
        &self,
        input: UpdateConvertTask,
        id: DbId,
        actor: DbId,
    ) -> AppResult<ConvertTaskDto> {
        input
            .validate()
            .map_err(|e| CoreError::Validation(e.to_string()))?;
        if let Some(parameters) = &input.parameters {
            ensure_object(parameters)?;
        }

        let mut task = self.find(id).await?;
        if let Some(out_image_id) = input.out_image_id {
            self.require_image(out_image_id).await?;
        }

        input.apply_to(&mut task);
        task.updated_at = Some(Utc::now());
        task.updated_by = Some(actor);
        self.tasks.update(&task).await?;

        tracing::info!(task_id = %id, status = %task.status, "Convert task updated");
        Ok(ConvertTaskDto::from(&task))
    }

    /// Tasks using `image_id` as input, oldest first.
    pub async fn list_for_image(&self, image_id: DbId) -> AppResult<Vec<ConvertTaskDto>> {
        self.require_image(image_id).await?;
        let tasks = self.tasks.list_for_image(image_id).await?;
        Ok(tasks.iter().map(ConvertTaskDto::from).collect())
    }

    async fn find(&self, id: DbId) -> AppResult<ConvertTask> {
        self.tasks.get_by_id(id).await?.ok_or(AppError::Core(CoreError::NotFound {
            entity: "ConvertTask",
            id,
        }))
    }

    async fn require_image(&self, id: DbId) -> AppResult<()> {
        match self.images.get_by_id(id).await? {
            Some(_) => Ok(()),
            None => Err(CoreError::NotFound { entity: "Image", id }.into()),
        }
    }
}

fn ensure_object(parameters: &serde_json::Value) -> Result<(), CoreError> {
    if parameters.is_object() {
        Ok(())
    } else {
        Err(CoreError::Validation(
            "parameters must be a JSON object".into(),
        ))
    }
}
