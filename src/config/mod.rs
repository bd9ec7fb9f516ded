//! Configuration management for `tracking`.
//!
//! Configuration sources and precedence (highest wins):
//! 1. CLI overrides
//! 2. Environment variables (`TRACKING_*`)
//! 3. Project config (`./tracking.yaml`, or `--config PATH`)
//! 4. User config (`~/.config/tracking/config.yaml`)
//! 5. Defaults

use crate::error::{Result, TrackingError};
use serde::Serialize;
use std::collections::HashMap;
use std::env;
use std::fs;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};

/// Default listen address.
pub const DEFAULT_BIND: &str = "127.0.0.1:5000";
/// Default database filename, relative to the working directory.
pub const DEFAULT_DB_FILENAME: &str = "tracking.db";
/// Default `SQLite` busy timeout in milliseconds.
pub const DEFAULT_LOCK_TIMEOUT_MS: u64 = 5000;
/// Project config filename looked up in the working directory.
pub const PROJECT_CONFIG_FILENAME: &str = "tracking.yaml";

const ENV_PREFIX: &str = "TRACKING_";

/// A flat layer of normalized `key -> value` settings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigLayer {
    pub values: HashMap<String, String>,
}

impl ConfigLayer {
    /// Merge another layer on top of this one (higher precedence wins).
    pub fn merge_from(&mut self, other: &Self) {
        for (key, value) in &other.values {
            self.values.insert(key.clone(), value.clone());
        }
    }

    /// Merge multiple layers in precedence order (lowest to highest).
    #[must_use]
    pub fn merge_layers(layers: &[Self]) -> Self {
        let mut merged = Self::default();
        for layer in layers {
            merged.merge_from(layer);
        }
        merged
    }

    /// Build a layer from a YAML file path. Missing files return empty config.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn from_yaml(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path)?;
        Self::from_yaml_str(&contents)
    }

    /// Build a layer from YAML text.
    ///
    /// # Errors
    ///
    /// Returns an error if the text is not valid YAML.
    pub fn from_yaml_str(contents: &str) -> Result<Self> {
        let value: serde_yaml::Value = serde_yaml::from_str(contents)?;
        Ok(layer_from_yaml_value(&value))
    }

    /// Build a layer from the process environment.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_env_vars(env::vars())
    }

    /// Build a layer from `TRACKING_*` variables in `vars`.
    #[must_use]
    pub fn from_env_vars<I, K, V>(vars: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        let mut layer = Self::default();
        for (key, value) in vars {
            if let Some(stripped) = key.as_ref().strip_prefix(ENV_PREFIX) {
                layer.set(stripped, value.into());
            }
        }
        layer
    }

    /// Insert a value under its canonical key.
    pub fn set(&mut self, key: &str, value: String) {
        self.values.insert(canonical_key(key), value);
    }

    /// Look up a value by key or alias.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&String> {
        self.values.get(&canonical_key(key))
    }
}

/// CLI overrides for config loading (optional).
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub config: Option<PathBuf>,
    pub db: Option<PathBuf>,
    pub bind: Option<String>,
    pub lock_timeout: Option<u64>,
}

impl CliOverrides {
    #[must_use]
    pub fn as_layer(&self) -> ConfigLayer {
        let mut layer = ConfigLayer::default();

        if let Some(path) = &self.db {
            layer.set("db", path.to_string_lossy().to_string());
        }
        if let Some(bind) = &self.bind {
            layer.set("bind", bind.clone());
        }
        if let Some(lock_timeout) = self.lock_timeout {
            layer.set("lock-timeout", lock_timeout.to_string());
        }

        layer
    }
}

/// Fully resolved settings for the server and CLI.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ServerConfig {
    pub bind: SocketAddr,
    pub db_path: PathBuf,
    pub lock_timeout_ms: u64,
}

impl ServerConfig {
    /// Resolve settings from a merged layer.
    ///
    /// # Errors
    ///
    /// Returns `Config` if a value cannot be parsed.
    pub fn from_layer(layer: &ConfigLayer) -> Result<Self> {
        let bind_raw = layer
            .get("bind")
            .map_or(DEFAULT_BIND, |value| value.trim());
        let bind = bind_raw.parse::<SocketAddr>().map_err(|e| {
            TrackingError::Config(format!("invalid bind address '{bind_raw}': {e}"))
        })?;

        let db_path = layer
            .get("db")
            .map(|value| value.trim())
            .filter(|value| !value.is_empty())
            .map_or_else(|| PathBuf::from(DEFAULT_DB_FILENAME), PathBuf::from);

        let lock_timeout_ms = match layer.get("lock-timeout") {
            Some(value) => value.trim().parse::<u64>().map_err(|e| {
                TrackingError::Config(format!("invalid lock-timeout '{value}': {e}"))
            })?,
            None => DEFAULT_LOCK_TIMEOUT_MS,
        };

        Ok(Self {
            bind,
            db_path,
            lock_timeout_ms,
        })
    }
}

/// Default config layer (lowest precedence).
#[must_use]
pub fn default_config_layer() -> ConfigLayer {
    let mut layer = ConfigLayer::default();
    layer.set("bind", DEFAULT_BIND.to_string());
    layer.set("db", DEFAULT_DB_FILENAME.to_string());
    layer.set("lock-timeout", DEFAULT_LOCK_TIMEOUT_MS.to_string());
    layer
}

/// Load user config (`~/.config/tracking/config.yaml`).
///
/// # Errors
///
/// Returns an error if the file exists but cannot be read or parsed.
pub fn load_user_config() -> Result<ConfigLayer> {
    let Ok(home) = env::var("HOME") else {
        return Ok(ConfigLayer::default());
    };
    let path = Path::new(&home)
        .join(".config")
        .join("tracking")
        .join("config.yaml");
    ConfigLayer::from_yaml(&path)
}

/// Load project config from `path`, or `./tracking.yaml` when unset.
///
/// An explicitly requested file must exist.
///
/// # Errors
///
/// Returns an error if the file cannot be read or parsed.
pub fn load_project_config(path: Option<&Path>) -> Result<ConfigLayer> {
    match path {
        Some(path) => {
            if !path.is_file() {
                return Err(TrackingError::Config(format!(
                    "config file not found: {}",
                    path.display()
                )));
            }
            ConfigLayer::from_yaml(path)
        }
        None => ConfigLayer::from_yaml(Path::new(PROJECT_CONFIG_FILENAME)),
    }
}

/// Load configuration with the standard precedence order.
///
/// # Errors
///
/// Returns an error if any config file cannot be read or parsed.
pub fn load_config(cli: &CliOverrides) -> Result<ConfigLayer> {
    let defaults = default_config_layer();
    let user = load_user_config()?;
    let project = load_project_config(cli.config.as_deref())?;
    let env_layer = ConfigLayer::from_env();
    let cli_layer = cli.as_layer();

    Ok(ConfigLayer::merge_layers(&[
        defaults, user, project, env_layer, cli_layer,
    ]))
}

/// Load and resolve the server settings in one step.
///
/// # Errors
///
/// Returns an error if loading or resolving fails.
pub fn load_server_config(cli: &CliOverrides) -> Result<ServerConfig> {
    ServerConfig::from_layer(&load_config(cli)?)
}

fn normalize_key(key: &str) -> String {
    key.trim().to_lowercase().replace('_', "-")
}

/// Fold nested and alternate spellings onto the keys [`ServerConfig`] reads.
fn canonical_key(key: &str) -> String {
    let key = normalize_key(key);
    match key.as_str() {
        "server.bind" | "listen" => "bind".to_string(),
        "database" | "database.path" => "db".to_string(),
        "database.lock-timeout" => "lock-timeout".to_string(),
        _ => key,
    }
}

fn layer_from_yaml_value(value: &serde_yaml::Value) -> ConfigLayer {
    let mut layer = ConfigLayer::default();
    let mut flat = HashMap::new();
    flatten_yaml(value, "", &mut flat);

    for (key, value) in flat {
        layer.set(&key, value);
    }

    layer
}

fn flatten_yaml(value: &serde_yaml::Value, prefix: &str, out: &mut HashMap<String, String>) {
    match value {
        serde_yaml::Value::Mapping(map) => {
            for (key, value) in map {
                let Some(key_str) = key.as_str() else {
                    continue;
                };
                let next_prefix = if prefix.is_empty() {
                    key_str.to_string()
                } else {
                    format!("{prefix}.{key_str}")
                };
                flatten_yaml(value, &next_prefix, out);
            }
        }
        serde_yaml::Value::Sequence(values) => {
            let joined = values
                .iter()
                .filter_map(yaml_scalar_to_string)
                .collect::<Vec<_>>()
                .join(",");
            out.insert(prefix.to_string(), joined);
        }
        _ => {
            if let Some(value) = yaml_scalar_to_string(value) {
                out.insert(prefix.to_string(), value);
            }
        }
    }
}

fn yaml_scalar_to_string(value: &serde_yaml::Value) -> Option<String> {
    match value {
        serde_yaml::Value::Bool(v) => Some(v.to_string()),
        serde_yaml::Value::Number(n) => Some(n.to_string()),
        serde_yaml::Value::String(s) => Some(s.clone()),
        serde_yaml::Value::Null
        | serde_yaml::Value::Sequence(_)
        | serde_yaml::Value::Mapping(_) => None,
        serde_yaml::Value::Tagged(tagged) => yaml_scalar_to_string(&tagged.value),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn defaults_resolve() {
        let config = ServerConfig::from_layer(&default_config_layer()).unwrap();
        assert_eq!(config.bind, DEFAULT_BIND.parse::<SocketAddr>().unwrap());
        assert_eq!(config.db_path, PathBuf::from(DEFAULT_DB_FILENAME));
        assert_eq!(config.lock_timeout_ms, DEFAULT_LOCK_TIMEOUT_MS);
    }

    #[test]
    fn merge_precedence_order() {
        let mut low = ConfigLayer::default();
        low.set("bind", "0.0.0.0:1".to_string());
        low.set("db", "low.db".to_string());
        let mut high = ConfigLayer::default();
        high.set("bind", "0.0.0.0:2".to_string());

        let merged = ConfigLayer::merge_layers(&[low, high]);
        assert_eq!(merged.get("bind").unwrap(), "0.0.0.0:2");
        assert_eq!(merged.get("db").unwrap(), "low.db");
    }

    #[test]
    fn yaml_nested_keys_flatten() {
        let layer = ConfigLayer::from_yaml_str(
            "server:\n  bind: 127.0.0.1:8080\ndatabase:\n  path: data/issues.db\n  lock_timeout: 250\n",
        )
        .unwrap();
        let merged = ConfigLayer::merge_layers(&[default_config_layer(), layer]);
        let config = ServerConfig::from_layer(&merged).unwrap();
        assert_eq!(config.bind.port(), 8080);
        assert_eq!(config.db_path, PathBuf::from("data/issues.db"));
        assert_eq!(config.lock_timeout_ms, 250);
    }

    #[test]
    fn yaml_sequence_flattens_to_csv() {
        let layer = ConfigLayer::from_yaml_str("tags:\n  - a\n  - b\n").unwrap();
        assert_eq!(layer.get("tags").unwrap(), "a,b");
    }

    #[test]
    fn env_vars_are_prefixed_and_normalized() {
        let layer = ConfigLayer::from_env_vars([
            ("TRACKING_BIND", "0.0.0.0:9000"),
            ("TRACKING_LOCK_TIMEOUT", "42"),
            ("UNRELATED", "ignored"),
        ]);
        assert_eq!(layer.values.len(), 2);
        assert_eq!(layer.get("lock-timeout").unwrap(), "42");
        assert_eq!(layer.get("lock_timeout").unwrap(), "42");
    }

    #[test]
    fn cli_layer_wins_over_env() {
        let env_layer = ConfigLayer::from_env_vars([("TRACKING_DB", "env.db")]);
        let cli = CliOverrides {
            db: Some(PathBuf::from("cli.db")),
            ..Default::default()
        };
        let merged = ConfigLayer::merge_layers(&[default_config_layer(), env_layer, cli.as_layer()]);
        let config = ServerConfig::from_layer(&merged).unwrap();
        assert_eq!(config.db_path, PathBuf::from("cli.db"));
    }

    #[test]
    fn invalid_bind_is_config_error() {
        let mut layer = default_config_layer();
        layer.set("bind", "not-an-address".to_string());
        let err = ServerConfig::from_layer(&layer).unwrap_err();
        assert!(matches!(err, TrackingError::Config(_)));
    }

    #[test]
    fn invalid_lock_timeout_is_config_error() {
        let mut layer = default_config_layer();
        layer.set("lock-timeout", "soon".to_string());
        assert!(ServerConfig::from_layer(&layer).is_err());
    }

    #[test]
    fn missing_yaml_is_empty_layer() {
        let temp = TempDir::new().unwrap();
        let layer = ConfigLayer::from_yaml(&temp.path().join("absent.yaml")).unwrap();
        assert!(layer.values.is_empty());
    }

    #[test]
    fn explicit_project_config_must_exist() {
        let temp = TempDir::new().unwrap();
        let missing = temp.path().join("nope.yaml");
        assert!(load_project_config(Some(&missing)).is_err());

        let present = temp.path().join("tracking.yaml");
        fs::write(&present, "bind: 127.0.0.1:7000\n").unwrap();
        let layer = load_project_config(Some(&present)).unwrap();
        assert_eq!(layer.get("bind").unwrap(), "127.0.0.1:7000");
    }
}
