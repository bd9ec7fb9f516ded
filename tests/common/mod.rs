#![allow(dead_code)]

use std::sync::Once;
use std::time::Instant;
use tempfile::TempDir;
use tracing::info;
use tracking::storage::Database;

pub mod cli;
pub mod fixtures;
pub mod http;

static INIT: Once = Once::new();

pub fn init_test_logging() {
    INIT.call_once(|| {
        tracking::logging::init_test_logging();
    });
}

pub struct TestLogGuard {
    name: String,
    start: Instant,
}

impl TestLogGuard {
    fn new(name: &str) -> Self {
        init_test_logging();
        info!("{name}: starting");
        Self {
            name: name.to_string(),
            start: Instant::now(),
        }
    }
}

impl Drop for TestLogGuard {
    fn drop(&mut self) {
        info!(
            "{}: assertions passed (elapsed {:?})",
            self.name,
            self.start.elapsed()
        );
    }
}

pub fn test_log(name: &str) -> TestLogGuard {
    TestLogGuard::new(name)
}

pub fn test_db() -> Database {
    init_test_logging();
    Database::open_memory().expect("Failed to create test database")
}

pub fn test_db_with_dir() -> (Database, TempDir) {
    init_test_logging();
    let dir = TempDir::new().expect("Failed to create temp dir");
    let db_path = dir.path().join("data").join("tracking.db");
    let db = Database::open(&db_path, Some(1000)).expect("Failed to create test database");
    (db, dir)
}

/// A database holding the two standard fixture issues.
pub fn seeded_db() -> Database {
    let db = test_db();
    fixtures::seed(&db);
    db
}
