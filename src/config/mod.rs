mod settings;

pub use settings::{Config, DisplaySettings};

use crate::error::{BoqError, Result};
use crate::model::Boq;
use directories::ProjectDirs;
use std::fs;
use std::path::{Path, PathBuf};

/// Get the config directory path (XDG config dir, else ~/.boq/)
pub fn config_dir() -> Result<PathBuf> {
    if let Some(proj_dirs) = ProjectDirs::from("", "", "boq") {
        return Ok(proj_dirs.config_dir().to_path_buf());
    }

    let home = dirs_home().ok_or_else(|| {
        BoqError::Io(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            "Could not determine home directory",
        ))
    })?;

    Ok(home.join(".boq"))
}

fn dirs_home() -> Option<PathBuf> {
    std::env::var_os("HOME").map(PathBuf::from)
}

pub fn config_file(config_dir: &Path) -> PathBuf {
    config_dir.join("config.toml")
}

/// Load config.toml, falling back to built-in policy when it is missing
pub fn load_config(config_dir: &Path) -> Result<Config> {
    let path = config_file(config_dir);
    if !path.exists() {
        tracing::debug!(path = %path.display(), "no config file, using defaults");
        return Ok(Config::default());
    }
    let content = fs::read_to_string(&path)?;
    toml::from_str(&content).map_err(|e| BoqError::ConfigParse { path, source: e })
}

/// Create the config directory with a template config.toml
pub fn init_config_dir(config_dir: &Path) -> Result<PathBuf> {
    if config_dir.exists() {
        return Err(BoqError::AlreadyInitialized(config_dir.to_path_buf()));
    }
    fs::create_dir_all(config_dir)?;
    let path = config_file(config_dir);
    fs::write(&path, CONFIG_TEMPLATE)?;
    Ok(path)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Format {
    Toml,
    Json,
}

fn format_of(path: &Path) -> Result<Format> {
    match path.extension().and_then(|e| e.to_str()) {
        Some(ext) if ext.eq_ignore_ascii_case("toml") => Ok(Format::Toml),
        Some(ext) if ext.eq_ignore_ascii_case("json") => Ok(Format::Json),
        _ => Err(BoqError::UnsupportedFormat(path.to_path_buf())),
    }
}

/// Load a BOQ record from a .toml or .json file
pub fn load_boq(path: &Path) -> Result<Boq> {
    let format = format_of(path)?;
    if !path.exists() {
        return Err(BoqError::BoqFileNotFound(path.to_path_buf()));
    }
    let content = fs::read_to_string(path)?;
    match format {
        Format::Toml => toml::from_str(&content).map_err(|e| BoqError::BoqParse {
            path: path.to_path_buf(),
            source: e,
        }),
        Format::Json => serde_json::from_str(&content).map_err(|e| BoqError::BoqJsonParse {
            path: path.to_path_buf(),
            source: e,
        }),
    }
}

/// Write a BOQ record, refusing to overwrite an existing file
pub fn save_new_boq(path: &Path, boq: &Boq) -> Result<()> {
    let format = format_of(path)?;
    if path.exists() {
        return Err(BoqError::FileExists(path.to_path_buf()));
    }
    let content = match format {
        Format::Toml => toml::to_string_pretty(boq).map_err(|e| BoqError::Serialize {
            what: "BOQ".to_string(),
            reason: e.to_string(),
        })?,
        Format::Json => serde_json::to_string_pretty(boq).map_err(|e| BoqError::Serialize {
            what: "BOQ".to_string(),
            reason: e.to_string(),
        })?,
    };
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, content)?;
    Ok(())
}

/// Template content for config.toml
pub const CONFIG_TEMPLATE: &str = r#"[pricing]
min_profit_margin = 15.0            # suggested discounts never push margin below this (%)
max_suggested_discount = 10.0       # hard cap on any suggested discount (%)
default_version = "surcharge-split" # for records without a version: surcharge-split | legacy-vat

[defaults]
# Percentages given to new sub-items and preliminaries (taken on the client amount)
misc_percentage = 10.0
overhead_profit_percentage = 25.0
transport_percentage = 5.0

[display]
currency = "AED"
decimals = 2
"#;
