//! Service configuration loader.
//!
//! Reads `config.toml` from the data directory (`~/.copilot/` in production)
//! or from an explicit path, and deserializes it into [`ServiceConfig`].
//! Falls back to defaults when the file is missing or malformed.

use std::path::{Path, PathBuf};

use copilot_types::config::ServiceConfig;

use crate::sqlite::pool::default_database_url;

/// Resolve the data directory.
///
/// `COPILOT_DATA_DIR` wins, then `~/.copilot`, then `./.copilot`.
pub fn resolve_data_dir() -> PathBuf {
    if let Ok(dir) = std::env::var("COPILOT_DATA_DIR") {
        return PathBuf::from(dir);
    }

    if let Some(home) = dirs::home_dir() {
        return home.join(".copilot");
    }

    PathBuf::from(".copilot")
}

/// Default location of the config file inside `data_dir`.
pub fn default_config_path(data_dir: &Path) -> PathBuf {
    data_dir.join("config.toml")
}

/// Load configuration from `path`.
///
/// - Missing file: returns [`ServiceConfig::default()`].
/// - Unreadable or unparsable file: logs a warning and returns the default.
pub async fn load_service_config(path: &Path) -> ServiceConfig {
    let content = match tokio::fs::read_to_string(path).await {
        Ok(content) => content,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            tracing::debug!("No config found at {}, using defaults", path.display());
            return ServiceConfig::default();
        }
        Err(err) => {
            tracing::warn!("Failed to read {}: {err}, using defaults", path.display());
            return ServiceConfig::default();
        }
    };

    match toml::from_str::<ServiceConfig>(&content) {
        Ok(config) => config,
        Err(err) => {
            tracing::warn!("Failed to parse {}: {err}, using defaults", path.display());
            ServiceConfig::default()
        }
    }
}

/// Connection string for the configured database.
///
/// An explicit `connection_string` is used verbatim; otherwise the database
/// file `{database}.db` lives in `data_dir`.
pub fn resolve_database_url(config: &ServiceConfig, data_dir: &Path) -> String {
    match config.database.connection_string.as_deref() {
        Some(url) if !url.trim().is_empty() => url.to_string(),
        _ => default_database_url(data_dir, &config.database.database),
    }
}
