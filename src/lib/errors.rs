use std::{io, path::PathBuf};

use thiserror::Error;

/// Exit code for handler, I/O and validation failures.
pub const GENERAL_FAILURE_EXIT: u8 = 1;
/// Exit code for command-line usage errors reported by clap.
pub const USAGE_EXIT: u8 = 2;

/// Errors that can occur while reading or writing the profile store.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The store file does not exist. Callers fall back to defaults.
    #[error("Profile store {path} does not exist")]
    NotFound { path: PathBuf },
    /// The file exists but is not a valid profile mapping.
    #[error("Failed to parse profile store {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },
    /// A top-level entry has a shape that is neither a profile nor a scalar.
    #[error("Profile store {path} has invalid entry `{key}`: {message}")]
    InvalidEntry {
        path: PathBuf,
        key: String,
        message: String,
    },
    #[error("Failed to serialize profile store {path}: {source}")]
    Serialize {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },
    #[error("I/O failed for profile store {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl StoreError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, StoreError::NotFound { .. })
    }

    pub fn from_parse_error(path: PathBuf, source: serde_yaml::Error) -> Self {
        Self::Parse { path, source }
    }

    pub fn from_io_error(path: PathBuf, source: io::Error) -> Self {
        Self::Io { path, source }
    }
}

/// Failures while building the effective configuration.
#[derive(Debug, Error)]
pub enum ResolveError {
    #[error("Error reading config file {path}: {source}")]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: StoreError,
    },
}

/// Programming errors detected while the command tree is assembled.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RegistryError {
    #[error("command `{name}` is already registered under `{parent}`")]
    DuplicateCommand { parent: String, name: String },
}

/// Raised by the authorization gate before a handler runs.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum GateError {
    #[error("Authentication is required for `{command}`")]
    AuthRequired { command: String },
}

/// A credential or region value that does not have the expected shape.
///
/// The offending value is deliberately absent so that secrets never reach
/// the terminal.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("Invalid {field} provided: {message}")]
pub struct ValidationError {
    pub field: &'static str,
    pub message: String,
}

impl ValidationError {
    pub fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

/// Failures from the interactive prompt capability.
#[derive(Debug, Error)]
pub enum PromptError {
    #[error("Interactive mode is disabled in this terminal")]
    NotInteractive,
    #[error("Failed to read terminal input: {0}")]
    Terminal(#[from] dialoguer::Error),
}

/// Failures while preparing the Falcon API client configuration.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ApiError {
    #[error("Unknown Falcon cloud region `{cloud}`")]
    InvalidCloud { cloud: String },
    #[error("Falcon API client ID and client secret must both be set")]
    MissingCredentials,
}

/// User-facing description of a failure class.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ErrorDescriptor {
    /// Stable error code.
    pub code: &'static str,
    /// Recommended remediation shown below the message.
    pub remediation: &'static str,
    /// Process exit code.
    pub exit_code: u8,
}

impl ErrorDescriptor {
    pub const fn new(code: &'static str, remediation: &'static str, exit_code: u8) -> Self {
        Self {
            code,
            remediation,
            exit_code,
        }
    }
}

/// The invoked command needs credentials that the effective configuration lacks.
pub const AUTH_REQUIRED_ERROR: ErrorDescriptor = ErrorDescriptor::new(
    "AUTH_REQUIRED",
    "Please use 'falcon auth config' to configure your credentials.\nFor more information, run: 'falcon auth config --help'",
    3,
);

/// The persisted profile store could not be parsed.
pub const CONFIG_PARSE_ERROR: ErrorDescriptor = ErrorDescriptor::new(
    "CONFIG_PARSE",
    "Fix or remove the file, or point --config / FALCON_CONFIG at a valid profile store.",
    4,
);

/// A prompt was needed but stdin/stdout are not a terminal.
pub const NOT_INTERACTIVE_ERROR: ErrorDescriptor = ErrorDescriptor::new(
    "NOT_INTERACTIVE",
    "Please run this command in an interactive terminal, or pass --client-id and --client-secret to 'falcon init'.",
    GENERAL_FAILURE_EXIT,
);
