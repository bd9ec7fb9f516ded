//! `tracking` - a minimal issue tracker served over HTTP.
//!
//! Issues live in `SQLite`. Each request opens a [`storage::UnitOfWork`],
//! reaches the issue store through it, and commits with `complete()`.
//! The [`web`] module maps the issue controller's actions onto routes and
//! renders HTML through [`format`].

pub mod cli;
pub mod config;
pub mod error;
pub mod format;
pub mod logging;
pub mod model;
pub mod storage;
pub mod validation;
pub mod web;

pub use error::{ErrorCode, Result, StructuredError, TrackingError};
