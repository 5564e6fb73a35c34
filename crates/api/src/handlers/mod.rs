pub mod convert_task;
pub mod image;
