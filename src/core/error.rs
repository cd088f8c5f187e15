//! Error types for window transparency control
//!
//! Errors are grouped by the layer that raises them: the OS integration
//! layer, the command boundary and the configuration store. Each carries a
//! recovery hint so the plugin knows whether the user must be told.

use thiserror::Error;

use crate::config::ConfigError;

/// Result type alias for transparency operations
pub type Result<T> = std::result::Result<T, TransparencyError>;

/// Main error type
#[derive(Error, Debug)]
pub enum TransparencyError {
    #[error("OS integration error: {0}")]
    Os(#[from] OsError),

    #[error("Command error: {0}")]
    Command(#[from] CommandError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

/// OS integration errors
#[derive(Error, Debug)]
pub enum OsError {
    #[error("Platform not supported: {platform}")]
    PlatformNotSupported { platform: String },

    #[error("{call} failed: {reason}")]
    PlatformCallFailed { call: &'static str, reason: String },

    #[error("Window handle invalid: {reason}")]
    InvalidWindowHandle { reason: String },
}

impl OsError {
    /// Unsupported-platform error for the platform this binary was built for
    pub fn unsupported() -> Self {
        OsError::PlatformNotSupported {
            platform: std::env::consts::OS.to_string(),
        }
    }

    pub fn call_failed(call: &'static str, reason: impl Into<String>) -> Self {
        OsError::PlatformCallFailed {
            call,
            reason: reason.into(),
        }
    }
}

/// Command argument errors
#[derive(Error, Debug)]
pub enum CommandError {
    #[error("Invalid argument: {field} = {value}")]
    InvalidArgument { field: String, value: String },

    #[error("No target window")]
    NoTargetWindow,
}

/// Trait for error recovery strategies
///
/// Nothing is retried automatically: the next user command naturally
/// re-triggers a failed style or alpha application.
pub trait ErrorRecovery {
    /// Get recovery action suggestion
    fn recovery_action(&self) -> RecoveryAction;
}

/// Recovery action suggestions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecoveryAction {
    /// Log and continue, the window is left as it was
    Skip,
    /// Show a notice through the host
    NotifyUser,
}

impl ErrorRecovery for TransparencyError {
    fn recovery_action(&self) -> RecoveryAction {
        match self {
            TransparencyError::Os(e) => e.recovery_action(),
            TransparencyError::Command(e) => e.recovery_action(),
            TransparencyError::Config(_) => RecoveryAction::NotifyUser,
        }
    }
}

impl ErrorRecovery for OsError {
    fn recovery_action(&self) -> RecoveryAction {
        match self {
            OsError::PlatformNotSupported { .. } => RecoveryAction::NotifyUser,
            OsError::PlatformCallFailed { .. } => RecoveryAction::Skip,
            OsError::InvalidWindowHandle { .. } => RecoveryAction::Skip,
        }
    }
}

impl ErrorRecovery for CommandError {
    fn recovery_action(&self) -> RecoveryAction {
        match self {
            CommandError::InvalidArgument { .. } => RecoveryAction::NotifyUser,
            CommandError::NoTargetWindow => RecoveryAction::Skip,
        }
    }
}
