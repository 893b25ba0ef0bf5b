//! Start/stop pipeline
//!
//! resolve → read status → (maybe) issue command → wait → one `Outcome`.
//! Every failure is terminal; nothing is retried.

mod wait;

pub use wait::{wait_for_status, WaitOutcome};

use std::time::Duration;

use log::{debug, error, info, warn};

use crate::error::ControlError;
use crate::outcome::Outcome;
use crate::pattern::ServicePattern;
use crate::request::{Action, Request};
use crate::status::ServiceStatus;

pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(250);

/// Floor for the poll interval; tokio intervals must be non-zero
pub const MIN_POLL_INTERVAL: Duration = Duration::from_millis(1);

/// Reference to one service known to the service manager.
///
/// `id` is backend specific (a D-Bus object path for systemd).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceHandle {
    name: String,
    id: String,
}

impl ServiceHandle {
    pub fn new(name: impl Into<String>, id: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            id: id.into(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn id(&self) -> &str {
        &self.id
    }
}

/// Access to the OS service manager.
///
/// `status` must re-read live state on every call.
/// `start`/`stop` return once the command is queued, not when it completes.
#[allow(async_fn_in_trait)]
pub trait ServiceControl {
    async fn lookup(&self, pattern: &ServicePattern) -> Result<Vec<ServiceHandle>, ControlError>;

    async fn status(&self, handle: &ServiceHandle) -> Result<ServiceStatus, ControlError>;

    async fn start(&self, handle: &ServiceHandle) -> Result<(), ControlError>;

    async fn stop(&self, handle: &ServiceHandle) -> Result<(), ControlError>;
}

pub struct Controller<C> {
    control: C,
    poll_interval: Duration,
}

impl<C: ServiceControl> Controller<C> {
    pub fn new(control: C) -> Self {
        Self {
            control,
            poll_interval: DEFAULT_POLL_INTERVAL,
        }
    }

    pub fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval.max(MIN_POLL_INTERVAL);
        self
    }

    pub fn into_inner(self) -> C {
        self.control
    }

    /// Run one request to completion
    pub async fn run(&self, request: &Request) -> Outcome {
        let result = self.execute(request).await;
        if let Err(e) = &result {
            error!("{} {} failed: {}", request.action(), request.pattern().raw(), e);
        }
        Outcome::from(result)
    }

    async fn execute(&self, request: &Request) -> Result<String, ControlError> {
        let action = request.action();
        let handle = self.resolve(request.pattern()).await?;

        let status = self.control.status(&handle).await?;
        info!("{} is {}", handle.name(), status);

        match (action, &status) {
            (Action::Start, ServiceStatus::Running) => {
                return Ok(format!("Service '{}' is already running.", handle.name()));
            }
            (Action::Stop, ServiceStatus::Stopped) => {
                return Ok(format!("Service '{}' is already stopped.", handle.name()));
            }
            (Action::Start, ServiceStatus::Stopped) => {
                info!("Starting {}", handle.name());
                self.control.start(&handle).await?;
            }
            (Action::Stop, ServiceStatus::Running) => {
                info!("Stopping {}", handle.name());
                self.control.stop(&handle).await?;
            }
            _ => {
                return Err(ControlError::IllegalState {
                    action,
                    status: status.clone(),
                })
            }
        }

        let target = action.target();
        match wait_for_status(
            &self.control,
            &handle,
            &target,
            request.timeout(),
            self.poll_interval,
        )
        .await?
        {
            WaitOutcome::Reached => {
                info!("{} reached {}", handle.name(), target);
                Ok(action.success_message().to_string())
            }
            WaitOutcome::TimedOut { last } => {
                match last {
                    Some(status) => warn!(
                        "{} still {} after {}s (wanted {})",
                        handle.name(),
                        status,
                        request.timeout_secs(),
                        target
                    ),
                    None => warn!(
                        "{} status never read within {}s",
                        handle.name(),
                        request.timeout_secs()
                    ),
                }
                Err(ControlError::Timeout {
                    action,
                    seconds: request.timeout_secs(),
                })
            }
        }
    }

    /// Exactly one match or an error
    async fn resolve(&self, pattern: &ServicePattern) -> Result<ServiceHandle, ControlError> {
        let mut handles = self.control.lookup(pattern).await?;

        match handles.len() {
            0 => Err(ControlError::NotFound(pattern.raw().to_string())),
            1 => {
                let handle = handles.remove(0);
                info!("Found service {}", handle.name());
                Ok(handle)
            }
            _ => {
                let matches: Vec<String> = handles.into_iter().map(|h| h.name).collect();
                debug!("{} matched: {}", pattern.normalized(), matches.join(", "));
                Err(ControlError::Ambiguous {
                    pattern: pattern.raw().to_string(),
                    matches,
                })
            }
        }
    }
}
