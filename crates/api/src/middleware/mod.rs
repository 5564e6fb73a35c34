//! Request extractors shared by the handlers.
//!
//! - [`actor::Actor`] -- The caller identity recorded in audit fields.

pub mod actor;
