//! Request-scoped unit of work.

use crate::error::Result;
use crate::storage::sqlite::{Session, SqliteIssueRepository};
use rusqlite::Connection;
use std::cell::OnceCell;
use std::rc::Rc;
use tracing::debug;

/// Owns one database session for the lifetime of a request.
///
/// The issue store is built on first access and the same instance is handed
/// out afterwards. Dropping the unit of work closes the connection.
#[derive(Debug)]
pub struct UnitOfWork {
    session: Rc<Session>,
    issues: OnceCell<SqliteIssueRepository>,
}

impl UnitOfWork {
    #[must_use]
    pub fn new(conn: Connection) -> Self {
        Self {
            session: Rc::new(Session::new(conn)),
            issues: OnceCell::new(),
        }
    }

    /// The issue store for this scope.
    pub fn issues(&self) -> &SqliteIssueRepository {
        self.issues
            .get_or_init(|| SqliteIssueRepository::new(Rc::clone(&self.session)))
    }

    /// Flush pending changes and return the number of affected rows.
    ///
    /// # Errors
    ///
    /// Returns an error if the flush fails.
    pub fn complete(&self) -> Result<usize> {
        let rows = self.session.flush()?;
        debug!(rows, "unit of work completed");
        Ok(rows)
    }
}
