//! Configuration errors.

use crate::guard::RouteError;
use crate::menu::CatalogError;
use gatekeep_types::ErrorCode;
use std::path::PathBuf;
use thiserror::Error;

/// Configuration error type.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read config file.
    #[error("failed to read config file '{path}': {source}")]
    ReadFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to parse TOML.
    #[error("failed to parse config file '{path}': {source}")]
    ParseToml {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    /// Explicitly requested config file does not exist.
    #[error("config file '{path}' not found")]
    NotFound { path: PathBuf },

    /// Invalid environment variable value.
    #[error("invalid value for environment variable '{name}': {message}")]
    InvalidEnvVar { name: String, message: String },

    /// Merged menu catalog is invalid.
    #[error("invalid menu: {0}")]
    Catalog(#[from] CatalogError),

    /// Merged route table is invalid.
    #[error("invalid routes: {0}")]
    Route(#[from] RouteError),
}

impl ConfigError {
    /// Creates a read file error.
    pub fn read_file(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::ReadFile {
            path: path.into(),
            source,
        }
    }

    /// Creates a parse TOML error.
    pub fn parse_toml(path: impl Into<PathBuf>, source: toml::de::Error) -> Self {
        Self::ParseToml {
            path: path.into(),
            source,
        }
    }

    /// Creates an invalid env var error.
    pub fn invalid_env_var(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidEnvVar {
            name: name.into(),
            message: message.into(),
        }
    }
}

impl ErrorCode for ConfigError {
    fn code(&self) -> &'static str {
        match self {
            Self::ReadFile { .. } => "CONFIG_READ_FILE",
            Self::ParseToml { .. } => "CONFIG_PARSE_TOML",
            Self::NotFound { .. } => "CONFIG_NOT_FOUND",
            Self::InvalidEnvVar { .. } => "CONFIG_INVALID_ENV_VAR",
            Self::Catalog(_) => "CONFIG_INVALID_MENU",
            Self::Route(_) => "CONFIG_INVALID_ROUTES",
        }
    }

    fn is_recoverable(&self) -> bool {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gatekeep_types::assert_error_codes;

    #[test]
    fn error_display() {
        let err = ConfigError::invalid_env_var("GATEKEEP_GUEST_FALLBACK", "expected bool");
        assert!(err.to_string().contains("GATEKEEP_GUEST_FALLBACK"));
        assert!(err.to_string().contains("expected bool"));
    }

    #[test]
    fn wraps_catalog_error() {
        let err = ConfigError::from(CatalogError::DuplicateId { id: "orders".into() });
        assert_eq!(err.code(), "CONFIG_INVALID_MENU");
        assert!(err.to_string().contains("orders"));
    }

    #[test]
    fn all_variants_have_valid_codes() {
        let errors = vec![
            ConfigError::read_file(
                "/tmp/x",
                std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
            ),
            ConfigError::NotFound {
                path: "/tmp/y".into(),
            },
            ConfigError::invalid_env_var("X", "bad"),
            ConfigError::from(CatalogError::EmptyId { index: 0 }),
            ConfigError::from(RouteError::DuplicateName { name: "A".into() }),
        ];
        assert_error_codes(&errors, "CONFIG_");
    }
}
