//! Validated invocation parameters

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use crate::error::ControlError;
use crate::pattern::ServicePattern;
use crate::status::ServiceStatus;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Start,
    Stop,
}

impl Action {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Start => "start",
            Self::Stop => "stop",
        }
    }

    /// Status we wait for after issuing the command
    pub fn target(&self) -> ServiceStatus {
        match self {
            Self::Start => ServiceStatus::Running,
            Self::Stop => ServiceStatus::Stopped,
        }
    }

    pub fn success_message(&self) -> &'static str {
        match self {
            Self::Start => "Started successfully.",
            Self::Stop => "Stopped successfully.",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Action {
    type Err = ControlError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "start" => Ok(Self::Start),
            "stop" => Ok(Self::Stop),
            _ => Err(ControlError::InvalidAction(s.to_string())),
        }
    }
}

/// One start/stop request. Immutable once built.
#[derive(Debug, Clone)]
pub struct Request {
    action: Action,
    pattern: ServicePattern,
    timeout_secs: u64,
}

impl Request {
    /// Validate raw parameters: action first, then timeout, then name.
    pub fn new(action: &str, service_name: &str, timeout_secs: i64) -> Result<Self, ControlError> {
        let action: Action = action.parse()?;

        let timeout_secs = u64::try_from(timeout_secs)
            .ok()
            .filter(|secs| *secs >= 1)
            .ok_or(ControlError::InvalidTimeout(timeout_secs))?;

        let pattern = ServicePattern::new(service_name)?;

        Ok(Self {
            action,
            pattern,
            timeout_secs,
        })
    }

    pub fn action(&self) -> Action {
        self.action
    }

    pub fn pattern(&self) -> &ServicePattern {
        &self.pattern
    }

    pub fn timeout_secs(&self) -> u64 {
        self.timeout_secs
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_action_case_insensitive() {
        assert_eq!("start".parse::<Action>().unwrap(), Action::Start);
        assert_eq!("START".parse::<Action>().unwrap(), Action::Start);
        assert_eq!("Stop".parse::<Action>().unwrap(), Action::Stop);
        assert_eq!(" stop ".parse::<Action>().unwrap(), Action::Stop);
    }

    #[test]
    fn test_action_invalid() {
        for raw in ["restart", "", "starts", "st op"] {
            let err = raw.parse::<Action>().unwrap_err();
            assert!(matches!(err, ControlError::InvalidAction(_)), "{raw}");
            assert_eq!(err.exit_code(), 1);
        }
    }

    #[test]
    fn test_action_targets() {
        assert_eq!(Action::Start.target(), ServiceStatus::Running);
        assert_eq!(Action::Stop.target(), ServiceStatus::Stopped);
        assert_eq!(Action::Start.to_string(), "start");
    }

    #[test]
    fn test_request_valid() {
        let req = Request::new("Start", "nginx", 30).unwrap();
        assert_eq!(req.action(), Action::Start);
        assert_eq!(req.pattern().normalized(), "nginx.service");
        assert_eq!(req.timeout(), Duration::from_secs(30));
    }

    #[test]
    fn test_request_timeout_bounds() {
        assert!(Request::new("stop", "nginx", 1).is_ok());
        for secs in [0, -1, i64::MIN] {
            let err = Request::new("stop", "nginx", secs).unwrap_err();
            assert!(matches!(err, ControlError::InvalidTimeout(s) if s == secs));
        }
    }

    #[test]
    fn test_request_action_checked_first() {
        let err = Request::new("bounce", "", 0).unwrap_err();
        assert!(matches!(err, ControlError::InvalidAction(_)));
    }

    #[test]
    fn test_request_empty_name() {
        let err = Request::new("start", "", 10).unwrap_err();
        assert!(matches!(err, ControlError::EmptyServiceName));
        assert_eq!(err.exit_code(), 1);
    }
}
