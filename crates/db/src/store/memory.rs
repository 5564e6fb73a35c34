use std::borrow::Cow;
use std::cmp::Ordering;
use std::collections::HashMap;
use std::error::Error as StdError;

use async_trait::async_trait;
use chrono::Utc;
use greyimage_core::search::{contains_term, normalize_term, SortDirection};
use greyimage_core::types::DbId;
use sqlx::error::{DatabaseError, ErrorKind};
use tokio::sync::RwLock;
use uuid::Uuid;

use super::{ConvertTaskStore, ImageStore};
use crate::models::convert_task::{ConvertTask, CreateConvertTask};
use crate::models::image::{CreateImage, Image, ImageQuery, ImageSortField};

/// In-process store holding both images and conversion tasks.
///
/// Follows the same search, ordering and referential rules as the
/// PostgreSQL schema: deleting an image removes the tasks that use it as
/// input and clears it as an output, and a task may only reference images
/// that exist. Contents are lost on restart.
#[derive(Debug, Default)]
pub struct MemoryStore {
    state: RwLock<State>,
}

#[derive(Debug, Default)]
struct State {
    images: HashMap<DbId, Image>,
    tasks: HashMap<DbId, ConvertTask>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

/// Constraint names from the `convert_tasks` migration.
const FK_IN_IMAGE: &str = "fk_convert_tasks_in_image";
const FK_OUT_IMAGE: &str = "fk_convert_tasks_out_image";

/// Foreign-key failure shaped like PostgreSQL's (SQLSTATE `23503`), so the
/// API classifies it the same way for both stores.
#[derive(Debug, thiserror::Error)]
#[error("insert or update on table \"convert_tasks\" violates foreign key constraint \"{constraint}\"")]
struct ForeignKeyViolation {
    constraint: &'static str,
}

impl DatabaseError for ForeignKeyViolation {
    fn message(&self) -> &str {
        "foreign key violation"
    }

    fn code(&self) -> Option<Cow<'_, str>> {
        Some(Cow::Borrowed("23503"))
    }

    fn as_error(&self) -> &(dyn StdError + Send + Sync + 'static) {
        self
    }

    fn as_error_mut(&mut self) -> &mut (dyn StdError + Send + Sync + 'static) {
        self
    }

    fn into_error(self: Box<Self>) -> Box<dyn StdError + Send + Sync + 'static> {
        self
    }

    fn constraint(&self) -> Option<&str> {
        Some(self.constraint)
    }

    fn table(&self) -> Option<&str> {
        Some("convert_tasks")
    }

    fn kind(&self) -> ErrorKind {
        ErrorKind::ForeignKeyViolation
    }
}

impl State {
    fn check_references(&self, task: &ConvertTask) -> Result<(), sqlx::Error> {
        if !self.images.contains_key(&task.in_image_id) {
            return Err(sqlx::Error::database(ForeignKeyViolation {
                constraint: FK_IN_IMAGE,
            }));
        }
        match task.out_image_id {
            Some(out) if !self.images.contains_key(&out) => {
                Err(sqlx::Error::database(ForeignKeyViolation {
                    constraint: FK_OUT_IMAGE,
                }))
            }
            _ => Ok(()),
        }
    }
}

fn matches_search(image: &Image, term: Option<&str>) -> bool {
    match term {
        None => true,
        Some(term) => {
            contains_term(&image.name, term) || contains_term(&image.content_type, term)
        }
    }
}

fn directed(ordering: Ordering, direction: SortDirection) -> Ordering {
    match direction {
        SortDirection::Asc => ordering,
        SortDirection::Desc => ordering.reverse(),
    }
}

/// Same ordering as `ORDER BY <col> <dir> NULLS LAST, id <dir>`.
fn compare(a: &Image, b: &Image, sort: ImageSortField, direction: SortDirection) -> Ordering {
    let primary = match sort {
        ImageSortField::Name => directed(a.name.cmp(&b.name), direction),
        ImageSortField::ContentType => directed(a.content_type.cmp(&b.content_type), direction),
        ImageSortField::Width => directed(a.width.cmp(&b.width), direction),
        ImageSortField::Height => directed(a.height.cmp(&b.height), direction),
        ImageSortField::CreatedAt => directed(a.created_at.cmp(&b.created_at), direction),
        ImageSortField::UpdatedAt => match (a.updated_at, b.updated_at) {
            (Some(x), Some(y)) => directed(x.cmp(&y), direction),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        },
    };
    primary.then_with(|| directed(a.id.cmp(&b.id), direction))
}

#[async_trait]
impl ImageStore for MemoryStore {
    async fn get_by_id(&self, id: DbId) -> Result<Option<Image>, sqlx::Error> {
        Ok(self.state.read().await.images.get(&id).cloned())
    }

    async fn insert(&self, input: &CreateImage) -> Result<Image, sqlx::Error> {
        let image = Image {
            id: Uuid::now_v7(),
            name: input.name.clone(),
            content_type: input.content_type.clone(),
            content: input.content.clone(),
            width: input.width,
            height: input.height,
            created_at: Utc::now(),
            updated_at: None,
            created_by: input.created_by,
            updated_by: None,
        };
        self.state
            .write()
            .await
            .images
            .insert(image.id, image.clone());
        Ok(image)
    }

    async fn update(&self, image: &Image) -> Result<(), sqlx::Error> {
        let mut state = self.state.write().await;
        let stored = state
            .images
            .get_mut(&image.id)
            .ok_or(sqlx::Error::RowNotFound)?;
        // created_at / created_by are immutable, as in the SQL update.
        let (created_at, created_by) = (stored.created_at, stored.created_by);
        *stored = Image {
            created_at,
            created_by,
            ..image.clone()
        };
        Ok(())
    }

    async fn delete(&self, id: DbId) -> Result<(), sqlx::Error> {
        let mut state = self.state.write().await;
        state.images.remove(&id).ok_or(sqlx::Error::RowNotFound)?;
        let before = state.tasks.len();
        state.tasks.retain(|_, task| task.in_image_id != id);
        let removed_tasks = before - state.tasks.len();
        for task in state.tasks.values_mut() {
            if task.out_image_id == Some(id) {
                task.out_image_id = None;
            }
        }
        tracing::debug!(image_id = %id, removed_tasks, "Removed image from memory store");
        Ok(())
    }

    async fn count(&self, search: Option<&str>) -> Result<i64, sqlx::Error> {
        let term = normalize_term(search);
        let state = self.state.read().await;
        let count = state
            .images
            .values()
            .filter(|image| matches_search(image, term.as_deref()))
            .count();
        Ok(i64::try_from(count).unwrap_or(i64::MAX))
    }

    async fn list_page(&self, query: &ImageQuery) -> Result<Vec<Image>, sqlx::Error> {
        let term = normalize_term(query.search.as_deref());
        let state = self.state.read().await;
        let mut images: Vec<&Image> = state
            .images
            .values()
            .filter(|image| matches_search(image, term.as_deref()))
            .collect();
        images.sort_by(|a, b| compare(a, b, query.sort, query.direction));

        let offset = usize::try_from(query.offset()).unwrap_or(usize::MAX);
        let limit = usize::try_from(query.page_size).unwrap_or(0);
        Ok(images
            .into_iter()
            .skip(offset)
            .take(limit)
            .cloned()
            .collect())
    }

    async fn ping(&self) -> Result<(), sqlx::Error> {
        Ok(())
    }
}

#[async_trait]
impl ConvertTaskStore for MemoryStore {
    async fn get_by_id(&self, id: DbId) -> Result<Option<ConvertTask>, sqlx::Error> {
        Ok(self.state.read().await.tasks.get(&id).cloned())
    }

    async fn insert(
        &self,
        input: &CreateConvertTask,
        created_by: DbId,
    ) -> Result<ConvertTask, sqlx::Error> {
        let task = ConvertTask {
            id: Uuid::now_v7(),
            in_image_id: input.in_image_id,
            out_image_id: None,
            parameters: input
                .parameters
                .clone()
                .unwrap_or_else(|| serde_json::json!({})),
            status: String::new(),
            created_at: Utc::now(),
            updated_at: None,
            created_by,
            updated_by: None,
        };
        let mut state = self.state.write().await;
        state.check_references(&task)?;
        state.tasks.insert(task.id, task.clone());
        Ok(task)
    }

    async fn update(&self, task: &ConvertTask) -> Result<(), sqlx::Error> {
        let mut state = self.state.write().await;
        if !state.tasks.contains_key(&task.id) {
            return Err(sqlx::Error::RowNotFound);
        }
        state.check_references(task)?;
        let stored = state
            .tasks
            .get_mut(&task.id)
            .ok_or(sqlx::Error::RowNotFound)?;
        stored.out_image_id = task.out_image_id;
        stored.parameters.clone_from(&task.parameters);
        stored.status.clone_from(&task.status);
        stored.updated_at = task.updated_at;
        stored.updated_by = task.updated_by;
        Ok(())
    }

    async fn list_for_image(&self, image_id: DbId) -> Result<Vec<ConvertTask>, sqlx::Error> {
        let state = self.state.read().await;
        let mut tasks: Vec<ConvertTask> = state
            .tasks
            .values()
            .filter(|task| task.in_image_id == image_id)
            .cloned()
            .collect();
        tasks.sort_by(|a, b| a.created_at.cmp(&b.created_at).then_with(|| a.id.cmp(&b.id)));
        Ok(tasks)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
