//! Image service: upload decoding, CRUD against the [`ImageStore`], and
//! entity-to-DTO mapping.
//!
//! Every lookup of an identifier that does not exist fails with
//! [`CoreError::NotFound`], including byte retrieval and updates. An empty
//! upload is a [`CoreError::Validation`] failure and stores nothing.

use std::sync::Arc;

use chrono::Utc;
use greyimage_core::error::CoreError;
use greyimage_core::image::probe;
use greyimage_core::pagination::{PaginatedResult, Pagination};
use greyimage_core::search::normalize_term;
use greyimage_core::types::DbId;
use greyimage_db::models::image::{
    CreateImage, Image, ImageDto, ImageQuery, ImageSortField, UpdateImage,
};
use greyimage_db::store::ImageStore;
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::query::ListImagesParams;

/// Filename recorded when the multipart part carries none.
const DEFAULT_FILE_NAME: &str = "upload";

/// Longest accepted filename or content type.
const MAX_LABEL_LEN: usize = 255;

/// An uploaded file as received from the multipart body.
#[derive(Debug, Clone, Default)]
pub struct UploadedFile {
    pub file_name: Option<String>,
    pub content_type: Option<String>,
    pub bytes: Vec<u8>,
}

/// Raw image bytes with the content type to serve them under.
#[derive(Debug, Clone)]
pub struct ImageContent {
    pub content_type: String,
    pub bytes: Vec<u8>,
}

#[derive(Clone)]
pub struct ImageService {
    store: Arc<dyn ImageStore>,
}

impl ImageService {
    pub fn new(store: Arc<dyn ImageStore>) -> Self {
        Self { store }
    }

    /// Store a new image from an upload.
    ///
    /// The bytes are probed for format and dimensions before anything is
    /// written; an empty or undecodable upload is rejected.
    pub async fn create(&self, upload: UploadedFile, actor: DbId) -> AppResult<ImageDto> {
        if upload.bytes.is_empty() {
            return Err(CoreError::Validation("Uploaded file is empty".into()).into());
        }

        let probed = probe(&upload.bytes)?;
        let width = pixels(probed.width, "width")?;
        let height = pixels(probed.height, "height")?;

        let name = non_blank(upload.file_name).unwrap_or_else(|| DEFAULT_FILE_NAME.to_string());
        let content_type =
            non_blank(upload.content_type).unwrap_or_else(|| probed.mime_type.to_string());
        check_label("File name", &name)?;
        check_label("Content type", &content_type)?;

        let input = CreateImage {
            name,
            content_type,
            content: upload.bytes,
            width,
            height,
            created_by: actor,
        };
        let image = self.store.insert(&input).await?;

        tracing::info!(
            image_id = %image.id,
            width,
            height,
            size_bytes = image.content.len(),
            "Image stored"
        );
        Ok(ImageDto::from(&image))
    }

    pub async fn get_by_id(&self, id: DbId) -> AppResult<ImageDto> {
        let image = self.find(id).await?;
        Ok(ImageDto::from(&image))
    }

    /// Apply a partial update. Only the fields present in `input` change;
    /// a payload with no fields is rejected.
    pub async fn update(&self, input: UpdateImage, id: DbId, actor: DbId) -> AppResult<ImageDto> {
        if input.is_empty() {
            return Err(
                CoreError::Validation("Update must set name or content_type".into()).into(),
            );
        }
        input
            .validate()
            .map_err(|e| CoreError::Validation(e.to_string()))?;

        let mut image = self.find(id).await?;
        input.apply_to(&mut image);
        image.updated_at = Some(Utc::now());
        image.updated_by = Some(actor);

        self.store.update(&image).await?;
        tracing::info!(image_id = %id, "Image updated");
        Ok(ImageDto::from(&image))
    }

    /// Remove an image. The store is not touched when the id is unknown.
    pub async fn delete(&self, id: DbId) -> AppResult<()> {
        self.find(id).await?;
        self.store.delete(id).await?;
        tracing::info!(image_id = %id, "Image deleted");
        Ok(())
    }

    /// Count, paginate, fetch and map one page of images.
    pub async fn get_paginated_list(
        &self,
        params: &ListImagesParams,
    ) -> AppResult<PaginatedResult<Vec<ImageDto>>> {
        let sort = match params.sort.as_deref().map(str::trim) {
            Some(name) if !name.is_empty() => ImageSortField::from_name(name)?,
            _ => ImageSortField::default(),
        };
        let search = normalize_term(params.search.as_deref());

        let total = self.store.count(search.as_deref()).await?;
        let pagination = Pagination::generate(params.page, params.page_size, total);

        let query = ImageQuery {
            search,
            sort,
            direction: params.direction.unwrap_or_default(),
            page: pagination.current_page,
            page_size: pagination.page_size,
        };
        let images = self.store.list_page(&query).await?;

        tracing::debug!(
            total,
            page = pagination.current_page,
            page_size = pagination.page_size,
            offset = pagination.offset(),
            returned = images.len(),
            "Listed images"
        );
        Ok(PaginatedResult {
            pagination,
            data: images.iter().map(ImageDto::from).collect(),
        })
    }

    /// Raw bytes of an image.
    pub async fn get_image_bytes(&self, id: DbId) -> AppResult<ImageContent> {
        let image = self.find(id).await?;
        Ok(ImageContent {
            content_type: image.content_type,
            bytes: image.content,
        })
    }

    /// Whether the backing store answers.
    pub async fn store_healthy(&self) -> bool {
        self.store.ping().await.is_ok()
    }

    async fn find(&self, id: DbId) -> AppResult<Image> {
        self.store
            .get_by_id(id)
            .await?
            .ok_or(AppError::Core(CoreError::NotFound { entity: "Image", id }))
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn check_label(what: &str, value: &str) -> Result<(), CoreError> {
    if value.chars().count() > MAX_LABEL_LEN {
        return Err(CoreError::Validation(format!(
            "{what} must be at most {MAX_LABEL_LEN} characters"
        )));
    }
    Ok(())
}

fn pixels(value: u32, what: &str) -> Result<i32, CoreError> {
    i32::try_from(value)
        .map_err(|_| CoreError::Validation(format!("Image {what} {value} is out of range")))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
