use std::time::Duration;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DevkitError {
    #[error("Failed to start {name}: {source}")]
    SpawnError {
        name: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Process {name} failed: {source}")]
    ProcessError {
        name: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Could not signal {name}: {message}")]
    SignalError { name: String, message: String },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Configuration error in {field}: {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value for {field} ({value}): {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("{address} did not accept connections within {waited:?}")]
    ReadinessTimeout { address: String, waited: Duration },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Configuration,
    Process,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl DevkitError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::ConfigError { .. }
            | Self::ConfigValidationError { .. }
            | Self::InvalidConfigValueError { .. } => ErrorCategory::Configuration,
            Self::SpawnError { .. }
            | Self::ProcessError { .. }
            | Self::SignalError { .. }
            | Self::ReadinessTimeout { .. } => ErrorCategory::Process,
            Self::IoError(_) => ErrorCategory::System,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            // cleanup keeps going after these
            Self::SignalError { .. } => ErrorSeverity::Low,
            Self::ReadinessTimeout { .. } => ErrorSeverity::Medium,
            Self::SpawnError { .. } | Self::ProcessError { .. } => ErrorSeverity::High,
            Self::ConfigError { .. }
            | Self::ConfigValidationError { .. }
            | Self::InvalidConfigValueError { .. } => ErrorSeverity::High,
            Self::IoError(_) => ErrorSeverity::Critical,
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            Self::SpawnError { name, .. } => format!("Error starting servers: could not launch {name}"),
            Self::ReadinessTimeout { address, .. } => {
                format!("Error starting servers: API never came up on {address}")
            }
            Self::InvalidConfigValueError { field, reason, .. } => {
                format!("Invalid setting {field}: {reason}")
            }
            other => other.to_string(),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self.category() {
            ErrorCategory::Configuration => {
                "Check the command-line flags or the --config file and try again"
            }
            ErrorCategory::Process => match self {
                Self::SpawnError { .. } => {
                    "Make sure the interpreter and npm are installed and the project paths exist"
                }
                Self::ReadinessTimeout { .. } => {
                    "Check the API server output, or raise --startup-delay-ms and drop --wait-for-api"
                }
                _ => "Stray processes may still be running; check with `ps`",
            },
            ErrorCategory::System => "Retry; if it persists, check disk and permissions",
        }
    }

    /// 依嚴重程度決定退出碼
    pub fn exit_code(&self) -> i32 {
        match self.severity() {
            ErrorSeverity::Low => 0,
            ErrorSeverity::Medium => 2,
            ErrorSeverity::High => 1,
            ErrorSeverity::Critical => 3,
        }
    }
}

pub type Result<T> = std::result::Result<T, DevkitError>;
