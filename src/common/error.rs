use std::path::PathBuf;
use thiserror::Error;

use crate::common::exit_code;

#[derive(Error, Debug)]
pub enum MgitError {
    #[error("Configuration error: {message}")]
    ConfigError {
        message: String,
        path: Option<PathBuf>,
        #[source]
        source: Option<std::io::Error>,
    },

    #[error("Discovery error: {message}")]
    DiscoveryError {
        message: String,
        path: Option<PathBuf>,
        #[source]
        source: Option<std::io::Error>,
    },

    #[error("Command execution failed: {message}")]
    CommandError {
        message: String,
        command: String,
        #[source]
        source: Option<std::io::Error>,
    },

    #[error("Filtering not confirmed for {}", root.display())]
    ConfirmationDeclined { root: PathBuf },

    #[error("Usage error: {message}")]
    UsageError { message: String },

    #[error("Serialization error: {message}")]
    SerializationError {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },
}

impl MgitError {
    pub fn config_error(message: impl Into<String>, path: Option<PathBuf>) -> Self {
        Self::ConfigError {
            message: message.into(),
            path,
            source: None,
        }
    }

    pub fn config_error_with_source(
        message: impl Into<String>,
        path: Option<PathBuf>,
        source: std::io::Error,
    ) -> Self {
        Self::ConfigError {
            message: message.into(),
            path,
            source: Some(source),
        }
    }

    pub fn discovery_error(message: impl Into<String>, path: Option<PathBuf>) -> Self {
        Self::DiscoveryError {
            message: message.into(),
            path,
            source: None,
        }
    }

    pub fn discovery_error_with_source(
        message: impl Into<String>,
        path: Option<PathBuf>,
        source: std::io::Error,
    ) -> Self {
        Self::DiscoveryError {
            message: message.into(),
            path,
            source: Some(source),
        }
    }

    pub fn command_error_with_source(
        message: impl Into<String>,
        command: impl Into<String>,
        source: std::io::Error,
    ) -> Self {
        Self::CommandError {
            message: message.into(),
            command: command.into(),
            source: Some(source),
        }
    }

    pub fn confirmation_declined(root: impl Into<PathBuf>) -> Self {
        Self::ConfirmationDeclined { root: root.into() }
    }

    pub fn usage_error(message: impl Into<String>) -> Self {
        Self::UsageError {
            message: message.into(),
        }
    }

    pub fn serialization_error_with_source(
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::SerializationError {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Process exit status for a run that stopped on this error.
    pub fn exit_code(&self) -> u8 {
        match self {
            Self::ConfirmationDeclined { .. } => exit_code::DECLINED,
            Self::CommandError { .. } => exit_code::DISPATCH_FAILED,
            Self::ConfigError { .. }
            | Self::DiscoveryError { .. }
            | Self::UsageError { .. }
            | Self::SerializationError { .. } => exit_code::FATAL,
        }
    }
}

impl From<serde_yaml::Error> for MgitError {
    fn from(error: serde_yaml::Error) -> Self {
        Self::serialization_error_with_source("YAML serialization failed", error)
    }
}

impl From<serde_json::Error> for MgitError {
    fn from(error: serde_json::Error) -> Self {
        Self::serialization_error_with_source("JSON serialization failed", error)
    }
}
