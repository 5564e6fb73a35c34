//! Domain building blocks shared by the database and API crates.
//!
//! Nothing in here performs I/O: identifiers, errors, pagination math,
//! search/sort helpers and the image header probe.

pub mod error;
pub mod image;
pub mod pagination;
pub mod search;
pub mod types;
