use crate::config::ServerConfig;
use crate::error::Result;
use crate::storage::Database;
use crate::web::{self, AppState};
use tracing::info;

/// Execute the serve command.
///
/// Opens (or creates) the database, then serves HTTP on a multi-threaded
/// Tokio runtime until Ctrl-C.
///
/// # Errors
///
/// Returns an error if the database cannot be opened, the runtime cannot be
/// built, or the server fails.
pub fn execute(config: &ServerConfig) -> Result<()> {
    let db = Database::open(&config.db_path, Some(config.lock_timeout_ms))?;
    info!(
        db = %config.db_path.display(),
        bind = %config.bind,
        lock_timeout_ms = config.lock_timeout_ms,
        "starting server"
    );

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;
    runtime.block_on(web::serve(config.bind, AppState::new(db)))
}
