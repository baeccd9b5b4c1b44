//! Application Paths
//!
//! Resolves `~/.askdata/` and the files kept inside it.

use std::path::{Path, PathBuf};

use crate::utils::error::{AppError, AppResult};

/// Get the user's home directory
pub fn home_dir() -> AppResult<PathBuf> {
    dirs::home_dir().ok_or_else(|| AppError::config("Could not determine home directory"))
}

/// Get the AskData directory (~/.askdata/)
pub fn askdata_dir() -> AppResult<PathBuf> {
    Ok(home_dir()?.join(".askdata"))
}

/// Get the config file path (~/.askdata/config.json)
pub fn config_path() -> AppResult<PathBuf> {
    Ok(askdata_dir()?.join("config.json"))
}

/// Ensure a directory exists, creating it if necessary
pub fn ensure_dir(path: &Path) -> AppResult<()> {
    if !path.exists() {
        std::fs::create_dir_all(path)?;
    }
    Ok(())
}

/// Get the AskData directory, creating it if it doesn't exist
pub fn ensure_askdata_dir() -> AppResult<PathBuf> {
    let path = askdata_dir()?;
    ensure_dir(&path)?;
    Ok(path)
}
