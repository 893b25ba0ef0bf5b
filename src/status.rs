//! Observable service status
//!
//! ```text
//!     ┌─────────┐   start    ┌──────────────┐          ┌─────────┐
//!     │ Stopped │───────────▶│ StartPending │─────────▶│ Running │
//!     └─────────┘            └──────────────┘          └────┬────┘
//!          ▲                                                │ stop
//!          │                 ┌──────────────┐               │
//!          └─────────────────│ StopPending  │◀──────────────┘
//!                            └──────────────┘
//! ```
//!
//! Only `Running` and `Stopped` accept a command. Everything else is
//! transitional and rejected as a whole.

use std::fmt;

/// Status of a service as reported by the service manager.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ServiceStatus {
    Running,
    Stopped,
    StartPending,
    StopPending,
    Paused,
    PausePending,
    ContinuePending,
    /// Any other transitional state, carrying the raw manager value
    Other(String),
}

impl ServiceStatus {
    /// Map systemd's ActiveState and FreezerState to a status.
    ///
    /// The freezer wins: a frozen unit is still "active" but cannot be
    /// stopped or started until it is thawed.
    pub fn from_systemd(active_state: &str, freezer_state: &str) -> Self {
        match freezer_state {
            "frozen" => return Self::Paused,
            "freezing" => return Self::PausePending,
            "thawing" => return Self::ContinuePending,
            _ => {}
        }

        match active_state {
            "active" => Self::Running,
            // A failed unit has no processes left
            "inactive" | "failed" => Self::Stopped,
            "activating" => Self::StartPending,
            "deactivating" => Self::StopPending,
            other => Self::Other(other.to_string()),
        }
    }
}

impl fmt::Display for ServiceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Running => "Running",
            Self::Stopped => "Stopped",
            Self::StartPending => "StartPending",
            Self::StopPending => "StopPending",
            Self::Paused => "Paused",
            Self::PausePending => "PausePending",
            Self::ContinuePending => "ContinuePending",
            Self::Other(state) => state.as_str(),
        };
        f.write_str(s)
    }
}
