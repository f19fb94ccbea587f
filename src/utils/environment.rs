use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

/// Name of the per-user data directory under the home directory
pub const DATA_DIR_NAME: &str = ".badcalc";

/// Get the default data directory path (~/.badcalc)
pub fn get_data_dir() -> Result<PathBuf> {
    get_data_dir_internal(None)
}

pub(crate) fn get_data_dir_internal(home_override: Option<&Path>) -> Result<PathBuf> {
    let home = match home_override {
        Some(home) => home.to_path_buf(),
        None => dirs::home_dir().context("Failed to determine home directory")?,
    };
    Ok(home.join(DATA_DIR_NAME))
}
