//! Error taxonomy and exit codes

use crate::request::Action;
use crate::status::ServiceStatus;

/// Failure classes reported to the caller. Each owns one exit code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    InvalidInput,
    AmbiguousOrMissingTarget,
    IllegalStateTransition,
    TimeoutExceeded,
    UnexpectedFailure,
}

impl ErrorKind {
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::InvalidInput => 1,
            Self::IllegalStateTransition => 2,
            Self::TimeoutExceeded => 3,
            Self::AmbiguousOrMissingTarget => 4,
            Self::UnexpectedFailure => 99,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ControlError {
    #[error("Invalid action '{0}'. Expected 'start' or 'stop'.")]
    InvalidAction(String),

    #[error("Timeout must be at least 1 second (got {0}).")]
    InvalidTimeout(i64),

    #[error("A service name is required.")]
    EmptyServiceName,

    #[error("Invalid service name pattern '{pattern}': {reason}")]
    InvalidPattern { pattern: String, reason: String },

    #[error("Invalid arguments: {0}")]
    Usage(String),

    #[error("Could not find a service called '{0}'.")]
    NotFound(String),

    #[error("Found more than one service with the supplied name.")]
    Ambiguous { pattern: String, matches: Vec<String> },

    #[error("Cannot {action} a service that is {status}.")]
    IllegalState { action: Action, status: ServiceStatus },

    #[error("Timed out after {seconds} seconds waiting for the service to {action}.")]
    Timeout { action: Action, seconds: u64 },

    #[error("D-Bus error: {0}")]
    Dbus(#[from] zbus::Error),

    #[error("{0}")]
    Unexpected(String),
}

impl ControlError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidAction(_)
            | Self::InvalidTimeout(_)
            | Self::EmptyServiceName
            | Self::InvalidPattern { .. }
            | Self::Usage(_) => ErrorKind::InvalidInput,
            Self::NotFound(_) | Self::Ambiguous { .. } => ErrorKind::AmbiguousOrMissingTarget,
            Self::IllegalState { .. } => ErrorKind::IllegalStateTransition,
            Self::Timeout { .. } => ErrorKind::TimeoutExceeded,
            Self::Dbus(_) | Self::Unexpected(_) => ErrorKind::UnexpectedFailure,
        }
    }

    pub fn exit_code(&self) -> i32 {
        self.kind().exit_code()
    }
}
