//! Show the resolved configuration.

use crate::config::{ConfigLayer, ServerConfig};
use crate::error::Result;
use std::collections::BTreeMap;

/// Execute the config command.
///
/// Prints the resolved settings, followed by any extra keys found in the
/// merged layers.
///
/// # Errors
///
/// Returns an error if JSON serialization fails.
pub fn execute(layer: &ConfigLayer, config: &ServerConfig, json_mode: bool) -> Result<()> {
    if json_mode {
        println!("{}", serde_json::to_string_pretty(config)?);
        return Ok(());
    }

    println!("{}", render(layer, config));
    Ok(())
}

fn render(layer: &ConfigLayer, config: &ServerConfig) -> String {
    let mut lines = vec![
        format!("bind = {}", config.bind),
        format!("db = {}", config.db_path.display()),
        format!("lock-timeout = {}", config.lock_timeout_ms),
    ];

    let extra: BTreeMap<&String, &String> = layer
        .values
        .iter()
        .filter(|(key, _)| !matches!(key.as_str(), "bind" | "db" | "lock-timeout"))
        .collect();
    for (key, value) in extra {
        lines.push(format!("{key} = {value} (unused)"));
    }

    lines.join("\n")
}
