//! Image entity, its transfer objects, and the field mappings between them.
//!
//! Mapping is explicit: [`ImageDto::from`] copies the shared fields and
//! [`UpdateImage::apply_to`] merges a partial update onto a stored row.

use greyimage_core::error::CoreError;
use greyimage_core::search::SortDirection;
use greyimage_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

// ---------------------------------------------------------------------------
// Image
// ---------------------------------------------------------------------------

/// A row from the `images` table.
#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct Image {
    pub id: DbId,
    /// Original filename of the upload.
    pub name: String,
    pub content_type: String,
    pub content: Vec<u8>,
    pub width: i32,
    pub height: i32,
    pub created_at: Timestamp,
    pub updated_at: Option<Timestamp>,
    pub created_by: DbId,
    pub updated_by: Option<DbId>,
}

/// Input for inserting a new image. The store assigns `id` and `created_at`.
#[derive(Debug, Clone)]
pub struct CreateImage {
    pub name: String,
    pub content_type: String,
    pub content: Vec<u8>,
    pub width: i32,
    pub height: i32,
    pub created_by: DbId,
}

/// Partial update for an image. Only `Some` fields are applied.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateImage {
    #[validate(length(min = 1, max = 255))]
    pub name: Option<String>,
    #[validate(length(min = 1, max = 255))]
    pub content_type: Option<String>,
}

impl UpdateImage {
    /// Merge the present fields onto `image`, leaving the rest untouched.
    pub fn apply_to(&self, image: &mut Image) {
        if let Some(name) = &self.name {
            image.name.clone_from(name);
        }
        if let Some(content_type) = &self.content_type {
            image.content_type.clone_from(content_type);
        }
    }

    /// True when the payload carries no fields at all.
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.content_type.is_none()
    }
}

/// Image as exposed over the API. The bytes are served from `content_url`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ImageDto {
    pub id: DbId,
    pub name: String,
    pub content_type: String,
    pub width: i32,
    pub height: i32,
    pub size_bytes: i64,
    pub created_at: Timestamp,
    pub updated_at: Option<Timestamp>,
    pub created_by: DbId,
    pub updated_by: Option<DbId>,
    pub content_url: String,
}

impl From<&Image> for ImageDto {
    fn from(image: &Image) -> Self {
        Self {
            id: image.id,
            name: image.name.clone(),
            content_type: image.content_type.clone(),
            width: image.width,
            height: image.height,
            size_bytes: i64::try_from(image.content.len()).unwrap_or(i64::MAX),
            created_at: image.created_at,
            updated_at: image.updated_at,
            created_by: image.created_by,
            updated_by: image.updated_by,
            content_url: content_url(image.id),
        }
    }
}

/// Path at which the raw bytes of image `id` are served.
pub fn content_url(id: DbId) -> String {
    format!("/api/v1/images/{id}/content")
}

// ---------------------------------------------------------------------------
// Listing
// ---------------------------------------------------------------------------

/// Columns an image list can be ordered by (`?sort=`).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ImageSortField {
    Name,
    ContentType,
    Width,
    Height,
    /// Natural order when no sort field is requested.
    #[default]
    CreatedAt,
    UpdatedAt,
}

impl ImageSortField {
    /// Parse the `sort` query parameter.
    pub fn from_name(name: &str) -> Result<Self, CoreError> {
        match name {
            "name" => Ok(Self::Name),
            "content_type" => Ok(Self::ContentType),
            "width" => Ok(Self::Width),
            "height" => Ok(Self::Height),
            "created_at" => Ok(Self::CreatedAt),
            "updated_at" => Ok(Self::UpdatedAt),
            other => Err(CoreError::Validation(format!(
                "Unknown sort field '{other}'. Must be one of: name, content_type, width, \
                 height, created_at, updated_at"
            ))),
        }
    }

    /// Column name used in `ORDER BY`.
    pub fn column(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::ContentType => "content_type",
            Self::Width => "width",
            Self::Height => "height",
            Self::CreatedAt => "created_at",
            Self::UpdatedAt => "updated_at",
        }
    }
}

/// One page of an image listing, using effective pagination values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageQuery {
    /// Already-normalised search term; `None` matches everything.
    pub search: Option<String>,
    pub sort: ImageSortField,
    pub direction: SortDirection,
    /// 1-based page number.
    pub page: i64,
    pub page_size: i64,
}

impl ImageQuery {
    pub fn offset(&self) -> i64 {
        (self.page - 1).max(0).saturating_mul(self.page_size)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
