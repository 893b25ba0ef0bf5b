//! Client proxies for org.freedesktop.systemd1
//!
//! Only the calls and properties the controller needs.

use zbus::proxy;
use zbus::zvariant::OwnedObjectPath;

/// One row of `ListUnits`: name, description, load state, active state,
/// sub state, followed unit, object path, job id, job type, job path.
pub type UnitRow = (
    String,
    String,
    String,
    String,
    String,
    String,
    OwnedObjectPath,
    u32,
    String,
    OwnedObjectPath,
);

#[proxy(
    interface = "org.freedesktop.systemd1.Manager",
    default_service = "org.freedesktop.systemd1",
    default_path = "/org/freedesktop/systemd1"
)]
pub trait Systemd1Manager {
    /// Units currently loaded in memory
    fn list_units(&self) -> zbus::Result<Vec<UnitRow>>;

    /// Installed unit files as (path, enablement state)
    fn list_unit_files(&self) -> zbus::Result<Vec<(String, String)>>;

    /// Load a unit (if needed) and return its object path
    fn load_unit(&self, name: &str) -> zbus::Result<OwnedObjectPath>;

    /// Queue a start job. Returns the job path.
    fn start_unit(&self, name: &str, mode: &str) -> zbus::Result<OwnedObjectPath>;

    /// Queue a stop job. Returns the job path.
    fn stop_unit(&self, name: &str, mode: &str) -> zbus::Result<OwnedObjectPath>;
}

#[proxy(
    interface = "org.freedesktop.systemd1.Unit",
    default_service = "org.freedesktop.systemd1"
)]
pub trait Systemd1Unit {
    /// "active", "inactive", "activating", "deactivating", "failed", ...
    #[zbus(property)]
    fn active_state(&self) -> zbus::Result<String>;

    #[zbus(property)]
    fn sub_state(&self) -> zbus::Result<String>;

    /// "loaded", "not-found", "masked", ...
    #[zbus(property)]
    fn load_state(&self) -> zbus::Result<String>;

    /// "running", "frozen", "freezing", "thawing" (systemd 246+)
    #[zbus(property)]
    fn freezer_state(&self) -> zbus::Result<String>;
}
