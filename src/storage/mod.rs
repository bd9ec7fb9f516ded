//! Persistence for `tracking`.
//!
//! - [`Database`] - connection factory shared by the web server
//! - [`UnitOfWork`] - one session per request, memoized issue store, `complete()`
//! - [`SqliteIssueRepository`] - the issue store, behind [`IssueRepository`]

mod database;
pub mod schema;
mod sqlite;
mod unit_of_work;

pub use database::Database;
pub use sqlite::{IssueRepository, SqliteIssueRepository};
pub use unit_of_work::UnitOfWork;
