pub mod batch;
pub mod config;
pub mod process;

use std::path::{Path, PathBuf};

use idverify_core::models::IdVerifyConfig;

/// Default configuration file location.
pub fn default_config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("idverify")
        .join("config.json")
}

/// Load the configuration named on the command line, falling back to the
/// default file and then to built-in defaults.
pub fn load_config(config_path: Option<&str>) -> anyhow::Result<IdVerifyConfig> {
    if let Some(path) = config_path {
        return Ok(IdVerifyConfig::from_file(Path::new(path))?);
    }

    let default_path = default_config_path();
    if default_path.exists() {
        Ok(IdVerifyConfig::from_file(&default_path)?)
    } else {
        Ok(IdVerifyConfig::default())
    }
}
