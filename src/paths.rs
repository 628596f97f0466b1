//! Common paths for LinkerLab data storage
//!
//! All data is stored under ~/.config/linkerlab/ on all platforms:
//! - config.toml - User configuration
//! - linkerlab.sqlite - Draft store

use anyhow::{Context, Result};
use std::fs;
use std::path::PathBuf;

/// Get the LinkerLab data directory (~/.config/linkerlab/)
pub fn data_dir() -> Result<PathBuf> {
    let home = dirs::home_dir().context("Could not determine home directory")?;
    let dir = home.join(".config").join("linkerlab");
    fs::create_dir_all(&dir).context("Failed to create linkerlab directory")?;
    Ok(dir)
}

/// Get the config file path (~/.config/linkerlab/config.toml)
pub fn config_path() -> Result<PathBuf> {
    Ok(data_dir()?.join("config.toml"))
}

/// Get the draft store path (~/.config/linkerlab/linkerlab.sqlite)
pub fn store_path() -> Result<PathBuf> {
    Ok(data_dir()?.join("linkerlab.sqlite"))
}
