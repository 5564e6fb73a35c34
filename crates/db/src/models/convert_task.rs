//! Grey-conversion task records.
//!
//! A task references an input image and, once an external converter has
//! finished, an output image. `status` is a free-form label; no transition
//! rules are enforced here.

use greyimage_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// A row from the `convert_tasks` table.
#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct ConvertTask {
    pub id: DbId,
    pub in_image_id: DbId,
    pub out_image_id: Option<DbId>,
    /// Opaque converter parameters (a JSON object).
    pub parameters: serde_json::Value,
    pub status: String,
    pub created_at: Timestamp,
    pub updated_at: Option<Timestamp>,
    pub created_by: DbId,
    pub updated_by: Option<DbId>,
}

/// DTO for creating a task. Status starts empty and there is no output yet.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateConvertTask {
    pub in_image_id: DbId,
    pub parameters: Option<serde_json::Value>,
}

/// Partial update for a task. Only `Some` fields are applied.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateConvertTask {
    pub out_image_id: Option<DbId>,
    /// Free-form label, at most 64 characters.
    #[validate(length(max = 64))]
    pub status: Option<String>,
    pub parameters: Option<serde_json::Value>,
}

impl UpdateConvertTask {
    /// Merge the present fields onto `task`, leaving the rest untouched.
    pub fn apply_to(&self, task: &mut ConvertTask) {
        if let Some(out_image_id) = self.out_image_id {
            task.out_image_id = Some(out_image_id);
        }
        if let Some(status) = &self.status {
            task.status.clone_from(status);
        }
        if let Some(parameters) = &self.parameters {
            task.parameters.clone_from(parameters);
        }
    }
}

/// Task as exposed over the API.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConvertTaskDto {
    pub id: DbId,
    pub in_image_id: DbId,
    pub out_image_id: Option<DbId>,
    pub parameters: serde_json::Value,
    pub status: String,
    pub created_at: Timestamp,
    pub updated_at: Option<Timestamp>,
    pub created_by: DbId,
    pub updated_by: Option<DbId>,
}

impl From<&ConvertTask> for ConvertTaskDto {
    fn from(task: &ConvertTask) -> Self {
        Self {
            id: task.id,
            in_image_id: task.in_image_id,
            out_image_id: task.out_image_id,
            parameters: task.parameters.clone(),
            status: task.status.clone(),
            created_at: task.created_at,
            updated_at: task.updated_at,
            created_by: task.created_by,
            updated_by: task.updated_by,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use serde_json::json;
    use uuid::Uuid;

    fn pending() -> ConvertTask {
        ConvertTask {
            id: Uuid::now_v7(),
            in_image_id: Uuid::now_v7(),
            out_image_id: None,
            parameters: json!({"mode": "luma"}),
            status: String::new(),
            created_at: Utc::now(),
            updated_at: None,
            created_by: Uuid::nil(),
            updated_by: None,
        }
    }

    #[test]
    fn completion_sets_status_and_output_only() {
        let original = pending();
        let out = Uuid::now_v7();
        let mut task = original.clone();
        UpdateConvertTask {
            out_image_id: Some(out),
            status: Some("done".into()),
            parameters: None,
        }
        .apply_to(&mut task);

        assert_eq!(task.out_image_id, Some(out));
        assert_eq!(task.status, "done");
        assert_eq!(task.parameters, original.parameters);
        assert_eq!(task.in_image_id, original.in_image_id);
    }

    #[test]
    fn status_length_is_bounded() {
        let update = UpdateConvertTask {
            status: Some("s".repeat(65)),
            ..Default::default()
        };
        assert!(update.validate().is_err());

        let update = UpdateConvertTask {
            status: Some("s".repeat(64)),
            ..Default::default()
        };
        assert!(update.validate().is_ok());
    }

    #[test]
    fn dto_copies_every_field() {
        let task = pending();
        let dto = ConvertTaskDto::from(&task);
        assert_eq!(dto.id, task.id);
        assert_eq!(dto.in_image_id, task.in_image_id);
        assert_eq!(dto.out_image_id, None);
        assert_eq!(dto.parameters, task.parameters);
        assert_eq!(dto.status, "");
    }
}
