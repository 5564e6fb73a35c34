//! Business logic between the HTTP handlers and the entity stores.

pub mod convert_task;
pub mod image;

pub use convert_task::ConvertTaskService;
pub use image::{ImageContent, ImageService, UploadedFile};
