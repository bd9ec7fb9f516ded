use crate::config::ServerConfig;
use crate::error::Result;
use crate::storage::Database;
use serde_json::json;
use tracing::info;

/// Execute the init command.
///
/// # Errors
///
/// Returns `AlreadyInitialized` if the database exists and `force` is false,
/// or an error if the file cannot be created.
pub fn execute(config: &ServerConfig, force: bool, json_mode: bool) -> Result<()> {
    let db = Database::create(&config.db_path, force, Some(config.lock_timeout_ms))?;
    let path = db.path().unwrap_or(config.db_path.as_path()).display().to_string();
    info!(path = %path, force, "initialized database");

    if json_mode {
        println!(
            "{}",
            serde_json::to_string_pretty(&json!({ "initialized": true, "path": path }))?
        );
    } else {
        println!("Initialized tracking database at {path}");
    }
    Ok(())
}
