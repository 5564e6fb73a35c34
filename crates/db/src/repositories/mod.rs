//! Query functions grouped per table.
//!
//! Each repo is a unit struct with associated async functions taking the
//! pool explicitly; the [`crate::store`] implementations delegate here.

pub mod convert_task_repo;
pub mod image_repo;

pub use convert_task_repo::ConvertTaskRepo;
pub use image_repo::ImageRepo;
