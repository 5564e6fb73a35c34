use std::sync::Arc;

use greyimage_db::store::{ConvertTaskStore, ImageStore};

use crate::config::ServerConfig;
use crate::services::{ConvertTaskService, ImageService};

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc`).
#[derive(Clone)]
pub struct AppState {
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Image CRUD, listing and byte retrieval.
    pub images: ImageService,
    /// Grey-conversion task records.
    pub convert_tasks: ConvertTaskService,
}

impl AppState {
    /// Wire both services onto one store implementation.
    pub fn new<S>(config: ServerConfig, store: Arc<S>) -> Self
    where
        S: ImageStore + ConvertTaskStore + 'static,
    {
        let image_store: Arc<dyn ImageStore> = store.clone();
        let task_store: Arc<dyn ConvertTaskStore> = store;

        Self {
            config: Arc::new(config),
            images: ImageService::new(Arc::clone(&image_store)),
            convert_tasks: ConvertTaskService::new(task_store, image_store),
        }
    }
}
