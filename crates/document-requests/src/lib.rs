//! Resolves the document requests a reviewing authority still expects from an applicant.
//!
//! The [`requests`] module holds the locator/resolver pipeline; [`display`] carries the
//! timestamp rendering shared by every presentation surface.

pub mod config;
pub mod display;
pub mod error;
pub mod requests;
pub mod telemetry;
