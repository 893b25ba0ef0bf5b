//! svcctl - start or stop one systemd service and wait for it to settle
//!
//! Meant to run as a step in an orchestration workflow. Each invocation:
//! - Validates the action, service name and timeout
//! - Resolves the name (or glob) to exactly one unit
//! - Issues start/stop only if the unit is in the opposite settled state
//! - Waits, bounded by the timeout, for the target state
//! - Emits one JSON result whose `exitCode` is also the process exit code
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────┐
//! │                     svcctl                       │
//! ├─────────────────────────────────────────────────┤
//! │  Request   │     Controller      │   Outcome    │
//! ├─────────────────────────────────────────────────┤
//! │        ServiceControl (systemd over D-Bus)      │
//! └─────────────────────────────────────────────────┘
//! ```

pub mod controller;
pub mod dbus;
pub mod error;
pub mod outcome;
pub mod pattern;
pub mod request;
pub mod status;

pub use controller::{Controller, ServiceControl, ServiceHandle};
pub use error::{ControlError, ErrorKind};
pub use outcome::Outcome;
pub use request::{Action, Request};
pub use status::ServiceStatus;
