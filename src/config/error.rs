use std::path::PathBuf;

use thiserror::Error;

pub type ConfigResult<T> = Result<T, ConfigError>;

/// 配置系统错误
///
/// 所有加载失败都在加载时立即返回，不保留部分加载的状态。
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Command category not found: {name} (expected file: {path})")]
    CategoryNotFound { name: String, path: PathBuf },
    #[error("Season not found: {name} (expected config: {path})")]
    SeasonNotFound { name: String, path: PathBuf },
    #[error("Project file not found: {path}")]
    ProjectNotFound { path: PathBuf },
    #[error("Failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("I/O error while {context}: {source}")]
    Io {
        context: String,
        #[source]
        source: std::io::Error,
    },
    #[error("Duplicate command id '{id}' in category '{category}'")]
    DuplicateCommandId { id: String, category: String },
    #[error("Command id '{id}' is defined by both '{first}' and '{second}' and the season does not resolve the conflict")]
    ConflictingCommandId {
        id: String,
        first: String,
        second: String,
    },
    #[error("Invalid command category '{name}': {}", errors.join("; "))]
    InvalidCategory { name: String, errors: Vec<String> },
    #[error("Invalid season config '{name}': {}", errors.join("; "))]
    InvalidSeason { name: String, errors: Vec<String> },
    #[error("Sequence '{sequence}' references unknown command id '{command}'")]
    UnknownSequenceCommand { sequence: String, command: String },
    #[error("Unknown command id: {id}")]
    UnknownCommand { id: String },
    #[error("Unsupported project file version {found} (current: {current})")]
    IncompatibleVersion { found: String, current: String },
    #[error("Config internal error: {0}")]
    Internal(String),
}

impl ConfigError {
    pub fn io(context: impl Into<String>, source: std::io::Error) -> Self {
        ConfigError::Io {
            context: context.into(),
            source,
        }
    }

    pub fn parse(path: impl Into<PathBuf>, source: serde_json::Error) -> Self {
        ConfigError::Parse {
            path: path.into(),
            source,
        }
    }

    pub fn category_not_found(name: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        ConfigError::CategoryNotFound {
            name: name.into(),
            path: path.into(),
        }
    }

    pub fn season_not_found(name: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        ConfigError::SeasonNotFound {
            name: name.into(),
            path: path.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        ConfigError::Internal(message.into())
    }
}
