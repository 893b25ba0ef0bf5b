//! Bounded wait for a target status

use std::time::Duration;

use tokio::time::{self, MissedTickBehavior};

use super::{ServiceControl, ServiceHandle, MIN_POLL_INTERVAL};
use crate::error::ControlError;
use crate::status::ServiceStatus;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WaitOutcome {
    Reached,
    /// Deadline passed. The command is left to finish on its own.
    TimedOut { last: Option<ServiceStatus> },
}

/// Poll `handle` until it reports `target` or `timeout` elapses.
///
/// The first read happens immediately. A failed read ends the wait with
/// that error.
pub async fn wait_for_status<C: ServiceControl>(
    control: &C,
    handle: &ServiceHandle,
    target: &ServiceStatus,
    timeout: Duration,
    poll_interval: Duration,
) -> Result<WaitOutcome, ControlError> {
    let mut last = None;

    let poll = async {
        let mut ticker = time::interval(poll_interval.max(MIN_POLL_INTERVAL));
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        loop {
            ticker.tick().await;
            let status = control.status(handle).await?;
            log::debug!("{} is {}", handle.name(), status);
            if &status == target {
                return Ok::<(), ControlError>(());
            }
            last = Some(status);
        }
    };

    let result = time::timeout(timeout, poll).await;
    match result {
        Ok(Ok(())) => Ok(WaitOutcome::Reached),
        Ok(Err(e)) => Err(e),
        Err(_) => Ok(WaitOutcome::TimedOut { last }),
    }
}
