//! `SQLite` issue store.
//!
//! A [`Session`] wraps one connection and runs every write through
//! [`Session::mutate`], which opens an immediate transaction, runs the
//! statement, commits, and counts the rows written. [`SqliteIssueRepository`]
//! is the issue store built on top of a shared session.

use crate::error::{Result, TrackingError};
use crate::model::Issue;
use rusqlite::{Connection, OptionalExtension, Row, Transaction, TransactionBehavior, params};
use std::cell::Cell;
use std::rc::Rc;
use tracing::debug;

/// CRUD contract for the issue store.
///
/// Every mutation commits on its own; there is no batching across calls.
pub trait IssueRepository {
    /// Point lookup by primary key.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    fn get_by_id(&self, id: i64) -> Result<Option<Issue>>;

    /// Every issue, in insertion order.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    fn get_all(&self) -> Result<Vec<Issue>>;

    /// Insert a new issue and write the assigned identity back into it.
    ///
    /// # Errors
    ///
    /// Returns `InvalidArgument` if the issue already carries an identity.
    fn add(&self, issue: &mut Issue) -> Result<()>;

    /// Replace every field of a stored issue.
    ///
    /// # Errors
    ///
    /// Returns `InvalidArgument` if the issue has no identity and
    /// `IssueNotFound` if no row matched when the write was committed.
    fn update(&self, issue: &Issue) -> Result<()>;

    /// Remove an issue. Missing ids are a no-op.
    ///
    /// # Errors
    ///
    /// Returns an error if the delete fails.
    fn delete(&self, id: i64) -> Result<()>;

    /// Whether a row with this id exists.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    fn exists(&self, id: i64) -> Result<bool>;
}

/// Context for a mutation, tracking its side effects.
pub struct MutationContext {
    pub op_name: String,
    pub rows_affected: usize,
}

impl MutationContext {
    #[must_use]
    pub fn new(op_name: &str) -> Self {
        Self {
            op_name: op_name.to_string(),
            rows_affected: 0,
        }
    }

    pub const fn record_rows(&mut self, rows: usize) {
        self.rows_affected += rows;
    }
}

/// One database connection shared by everything inside a unit of work.
#[derive(Debug)]
pub struct Session {
    conn: Connection,
    written: Cell<usize>,
}

impl Session {
    #[must_use]
    pub const fn new(conn: Connection) -> Self {
        Self {
            conn,
            written: Cell::new(0),
        }
    }

    /// The underlying connection, for read queries.
    #[must_use]
    pub const fn connection(&self) -> &Connection {
        &self.conn
    }

    /// Run a write inside an immediate transaction and commit it.
    ///
    /// # Errors
    ///
    /// Returns an error if any step fails. The transaction is rolled back on
    /// error.
    pub fn mutate<F, R>(&self, op: &str, f: F) -> Result<R>
    where
        F: FnOnce(&Transaction<'_>, &mut MutationContext) -> Result<R>,
    {
        let tx = Transaction::new_unchecked(&self.conn, TransactionBehavior::Immediate)?;
        let mut ctx = MutationContext::new(op);

        let result = f(&tx, &mut ctx)?;

        tx.commit()?;
        self.written.set(self.written.get() + ctx.rows_affected);
        debug!(op = %ctx.op_name, rows = ctx.rows_affected, "committed");

        Ok(result)
    }

    #[cfg(test)]
    fn pending_rows(&self) -> usize {
        self.written.get()
    }

    /// Commit anything still open on the connection and return the number of
    /// rows written since the previous flush.
    ///
    /// # Errors
    ///
    /// Returns an error if the commit fails.
    pub fn flush(&self) -> Result<usize> {
        if !self.conn.is_autocommit() {
            self.conn.execute_batch("COMMIT")?;
        }
        Ok(self.written.replace(0))
    }
}

/// Issue store over a shared [`Session`].
#[derive(Debug, Clone)]
pub struct SqliteIssueRepository {
    session: Rc<Session>,
}

const ISSUE_COLUMNS: &str = "id, title, description, status, assignment, priority";

fn issue_from_row(row: &Row<'_>) -> rusqlite::Result<Issue> {
    Ok(Issue {
        id: row.get(0)?,
        title: row.get(1)?,
        description: row.get(2)?,
        status: row.get(3)?,
        assignment: row.get(4)?,
        priority: row.get(5)?,
    })
}

impl SqliteIssueRepository {
    #[must_use]
    pub const fn new(session: Rc<Session>) -> Self {
        Self { session }
    }

    /// Number of stored issues.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn count(&self) -> Result<usize> {
        let count: i64 = self
            .session
            .connection()
            .query_row("SELECT COUNT(*) FROM issues", [], |row| row.get(0))?;
        Ok(usize::try_from(count).unwrap_or(0))
    }
}

impl IssueRepository for SqliteIssueRepository {
    fn get_by_id(&self, id: i64) -> Result<Option<Issue>> {
        let issue = self
            .session
            .connection()
            .query_row(
                &format!("SELECT {ISSUE_COLUMNS} FROM issues WHERE id = ?"),
                [id],
                issue_from_row,
            )
            .optional()?;
        Ok(issue)
    }

    fn get_all(&self) -> Result<Vec<Issue>> {
        let conn = self.session.connection();
        let mut stmt = conn.prepare(&format!("SELECT {ISSUE_COLUMNS} FROM issues ORDER BY id"))?;
        let issues = stmt
            .query_map([], issue_from_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(issues)
    }

    fn add(&self, issue: &mut Issue) -> Result<()> {
        if issue.id != 0 {
            return Err(TrackingError::invalid_argument(
                "issue",
                format!("expected a new issue, got one with id {}", issue.id),
            ));
        }

        let id = self.session.mutate("add_issue", |tx, ctx| {
            let rows = tx.execute(
                "INSERT INTO issues (title, description, status, assignment, priority)
                 VALUES (?, ?, ?, ?, ?)",
                params![
                    issue.title,
                    issue.description,
                    issue.status,
                    issue.assignment,
                    issue.priority,
                ],
            )?;
            ctx.record_rows(rows);
            Ok(tx.last_insert_rowid())
        })?;

        issue.id = id;
        Ok(())
    }

    fn update(&self, issue: &Issue) -> Result<()> {
        if !issue.is_persisted() {
            return Err(TrackingError::invalid_argument(
                "issue",
                "cannot update an issue that has no id",
            ));
        }

        self.session.mutate("update_issue", |tx, ctx| {
            let rows = tx.execute(
                "UPDATE issues
                 SET title = ?, description = ?, status = ?, assignment = ?, priority = ?
                 WHERE id = ?",
                params![
                    issue.title,
                    issue.description,
                    issue.status,
                    issue.assignment,
                    issue.priority,
                    issue.id,
                ],
            )?;
            if rows == 0 {
                return Err(TrackingError::IssueNotFound { id: issue.id });
            }
            ctx.record_rows(rows);
            Ok(())
        })
    }

    fn delete(&self, id: i64) -> Result<()> {
        self.session.mutate("delete_issue", |tx, ctx| {
            let rows = tx.execute("DELETE FROM issues WHERE id = ?", [id])?;
            ctx.record_rows(rows);
            Ok(())
        })
    }

    fn exists(&self, id: i64) -> Result<bool> {
        let found = self
            .session
            .connection()
            .prepare("SELECT 1 FROM issues WHERE id = ?")?
            .exists([id])?;
        Ok(found)
    }
}
