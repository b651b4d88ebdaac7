use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BoqError {
    #[error("Failed to parse config file {path}: {source}")]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Config directory already exists at {0}")]
    AlreadyInitialized(PathBuf),

    #[error("BOQ file not found: {0}")]
    BoqFileNotFound(PathBuf),

    #[error("Failed to parse BOQ file {path}: {source}")]
    BoqParse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Failed to parse BOQ file {path}: {source}")]
    BoqJsonParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Unsupported BOQ file '{0}'. Use a .toml or .json extension.")]
    UnsupportedFormat(PathBuf),

    #[error("File already exists: {0}")]
    FileExists(PathBuf),

    #[error("Failed to serialize {what}: {reason}")]
    Serialize { what: String, reason: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, BoqError>;
