// file: src/error.rs
// version: 3.0.0
// guid: fd455ef3-ece0-432b-a19e-bec0e859b930

use thiserror::Error;

/// Result type alias for the application
pub type Result<T> = std::result::Result<T, DeployError>;

/// Error types for the appliance deployment wrapper
#[derive(Error, Debug)]
pub enum DeployError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Missing required parameter: {0}")]
    MissingParameter(String),

    #[error("Prompt error: {0}")]
    PromptError(String),

    #[error("Installer not found: {0}")]
    InstallerNotFound(String),

    /// The installer inherits the terminal, so its own output is already shown;
    /// `stderr` holds the failure description recorded by this tool.
    #[error("Process '{command}' failed (exit code {exit_code:?}): {stderr}")]
    ProcessError {
        command: String,
        exit_code: Option<i32>,
        stderr: String,
    },

    #[error("Operation cancelled: {0}")]
    Cancelled(String),

    #[error("Interrupted by user")]
    Interrupted,
}

impl DeployError {
    /// Create a new configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::ConfigError(msg.into())
    }

    /// Create a new validation error
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::ValidationError(msg.into())
    }

    /// Create a new missing parameter error
    pub fn missing(name: impl Into<String>) -> Self {
        Self::MissingParameter(name.into())
    }

    /// Create a new prompt error
    pub fn prompt(msg: impl Into<String>) -> Self {
        Self::PromptError(msg.into())
    }
}

impl DeployError {
    /// Process exit status for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Interrupted => 130,
            _ => 1,
        }
    }
}

impl From<dialoguer::Error> for DeployError {
    fn from(err: dialoguer::Error) -> Self {
        match err {
            // Raw-mode prompts read ^C as a key and report it this way
            dialoguer::Error::IO(ref io) if io.kind() == std::io::ErrorKind::Interrupted => {
                Self::Interrupted
            }
            other => Self::PromptError(other.to_string()),
        }
    }
}
