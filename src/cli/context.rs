use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use crate::config::app_config::AppConfig;
use crate::core::errors::Result;

static CONFIG_PATH: OnceLock<Option<PathBuf>> = OnceLock::new();

/// Record the `--config` override for the rest of the process.
pub fn init(custom: Option<&str>) {
    let _ = CONFIG_PATH.set(custom.map(PathBuf::from));
}

/// The explicit config path, if one was given.
pub fn config_path() -> Option<&'static Path> {
    CONFIG_PATH.get().and_then(|p| p.as_deref())
}

/// Load the configuration honoring the override.
pub fn load_config() -> Result<AppConfig> {
    AppConfig::load(config_path())
}
