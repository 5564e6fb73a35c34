//! Query parameter types for API handlers.

use greyimage_core::search::SortDirection;
use serde::Deserialize;

/// Parameters for `GET /images` (`?page=&page_size=&sort=&direction=&search=`).
///
/// Page values are normalised by
/// [`Pagination::generate`](greyimage_core::pagination::Pagination::generate);
/// an unknown `sort` field is rejected by the image service.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListImagesParams {
    pub page: Option<i64>,
    pub page_size: Option<i64>,
    pub sort: Option<String>,
    pub direction: Option<SortDirection>,
    pub search: Option<String>,
}
