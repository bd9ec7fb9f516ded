//! Connection factory shared across requests.

use crate::error::{Result, TrackingError};
use crate::storage::schema::{apply_schema, configure_connection};
use crate::storage::unit_of_work::UnitOfWork;
use anyhow::Context;
use rusqlite::{Connection, OpenFlags};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tracing::{debug, info};

static MEMORY_DB_COUNTER: AtomicUsize = AtomicUsize::new(0);

#[derive(Debug)]
enum Location {
    File(PathBuf),
    /// Named shared-cache in-memory database. The anchor connection keeps it
    /// alive between sessions.
    Memory {
        uri: String,
        _anchor: Mutex<Connection>,
    },
}

#[derive(Debug)]
struct Inner {
    location: Location,
    busy_timeout: Option<Duration>,
}

/// Async-safe handle to the tracking database.
///
/// Cheap to clone. Each [`Database::call`] opens a fresh session on tokio's
/// blocking pool, so synchronous `SQLite` I/O never ties up async workers.
#[derive(Debug, Clone)]
pub struct Database {
    inner: Arc<Inner>,
}

impl Database {
    /// Open (or create) a database file and apply the schema.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be opened or the schema fails.
    pub fn open(path: &Path, lock_timeout_ms: Option<u64>) -> Result<Self> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        let db = Self {
            inner: Arc::new(Inner {
                location: Location::File(path.to_path_buf()),
                busy_timeout: lock_timeout_ms.map(Duration::from_millis),
            }),
        };
        let conn = db.connect()?;
        apply_schema(&conn)?;
        info!(path = %path.display(), "database ready");
        Ok(db)
    }

    /// Create a fresh database file, optionally replacing an existing one.
    ///
    /// # Errors
    ///
    /// Returns `AlreadyInitialized` if the file exists and `force` is false.
    pub fn create(path: &Path, force: bool, lock_timeout_ms: Option<u64>) -> Result<Self> {
        if path.exists() {
            if !force {
                return Err(TrackingError::AlreadyInitialized {
                    path: path.to_path_buf(),
                });
            }
            std::fs::remove_file(path)?;
            for suffix in ["-wal", "-shm"] {
                let mut side = path.as_os_str().to_owned();
                side.push(suffix);
                let side = PathBuf::from(side);
                if side.exists() {
                    std::fs::remove_file(side)?;
                }
            }
        }
        Self::open(path, lock_timeout_ms)
    }

    /// Open a private in-memory database (tests, demos).
    ///
    /// # Errors
    ///
    /// Returns an error if the connection cannot be established.
    pub fn open_memory() -> Result<Self> {
        let n = MEMORY_DB_COUNTER.fetch_add(1, Ordering::Relaxed);
        let uri = format!(
            "file:tracking-mem-{}-{n}?mode=memory&cache=shared",
            std::process::id()
        );
        let anchor = open_memory_connection(&uri)?;
        apply_schema(&anchor)?;
        Ok(Self {
            inner: Arc::new(Inner {
                location: Location::Memory {
                    uri,
                    _anchor: Mutex::new(anchor),
                },
                busy_timeout: None,
            }),
        })
    }

    /// Path of the backing file, if file-backed.
    #[must_use]
    pub fn path(&self) -> Option<&Path> {
        match &self.inner.location {
            Location::File(path) => Some(path),
            Location::Memory { .. } => None,
        }
    }

    /// Open a new session connection.
    ///
    /// # Errors
    ///
    /// Returns an error if the connection cannot be established.
    pub fn connect(&self) -> Result<Connection> {
        let conn = match &self.inner.location {
            Location::File(path) => {
                let conn = Connection::open(path)?;
                configure_connection(&conn, true)?;
                conn
            }
            Location::Memory { uri, .. } => {
                let conn = open_memory_connection(uri)?;
                configure_connection(&conn, false)?;
                conn
            }
        };
        if let Some(timeout) = self.inner.busy_timeout {
            conn.busy_timeout(timeout)?;
        }
        Ok(conn)
    }

    /// Start a unit of work on a new session.
    ///
    /// # Errors
    ///
    /// Returns an error if the connection cannot be established.
    pub fn unit_of_work(&self) -> Result<UnitOfWork> {
        Ok(UnitOfWork::new(self.connect()?))
    }

    /// Run a closure inside a fresh unit of work on a blocking thread.
    ///
    /// All data passed into `f` must be owned (`'static`). The unit of work,
    /// and its connection, is dropped when `f` returns.
    ///
    /// # Errors
    ///
    /// Returns whatever `f` returns, or an error if the session cannot be
    /// opened or the blocking task panics.
    pub async fn call<F, R>(&self, f: F) -> Result<R>
    where
        F: FnOnce(&UnitOfWork) -> Result<R> + Send + 'static,
        R: Send + 'static,
    {
        let db = self.clone();
        tokio::task::spawn_blocking(move || {
            let uow = db.unit_of_work()?;
            debug!("unit of work opened");
            f(&uow)
        })
        .await
        .context("database task panicked")?
    }
}

fn open_memory_connection(uri: &str) -> Result<Connection> {
    let flags = OpenFlags::SQLITE_OPEN_READ_WRITE
        | OpenFlags::SQLITE_OPEN_CREATE
        | OpenFlags::SQLITE_OPEN_URI
        | OpenFlags::SQLITE_OPEN_NO_MUTEX;
    Ok(Connection::open_with_flags(uri, flags)?)
}
