//! systemd backend over D-Bus
//!
//! Talks to org.freedesktop.systemd1 on the system bus (or the session bus
//! for the per-user manager):
//! - Manager: ListUnits, ListUnitFiles, LoadUnit, StartUnit, StopUnit
//! - Unit: ActiveState, SubState, LoadState, FreezerState properties

pub mod proxy;

pub use proxy::{Systemd1ManagerProxy, Systemd1UnitProxy};

use std::collections::BTreeSet;
use std::path::Path;

use log::debug;
use zbus::proxy::CacheProperties;
use zbus::{fdo, Connection};

use crate::controller::{ServiceControl, ServiceHandle};
use crate::error::ControlError;
use crate::pattern::ServicePattern;
use crate::status::ServiceStatus;

/// Job mode for StartUnit/StopUnit
const JOB_MODE: &str = "replace";

pub struct SystemdControl {
    connection: Connection,
}

impl SystemdControl {
    /// Connect to the system manager, or the user manager if `user` is set
    pub async fn connect(user: bool) -> Result<Self, ControlError> {
        let connection = if user {
            Connection::session().await?
        } else {
            Connection::system().await?
        };
        Ok(Self { connection })
    }

    async fn manager(&self) -> zbus::Result<Systemd1ManagerProxy<'_>> {
        Systemd1ManagerProxy::new(&self.connection).await
    }

    /// Uncached proxy so every property read hits the bus
    async fn unit<'a>(&'a self, path: &'a str) -> zbus::Result<Systemd1UnitProxy<'a>> {
        Systemd1UnitProxy::builder(&self.connection)
            .path(path)?
            .cache_properties(CacheProperties::No)
            .build()
            .await
    }

    /// Names of loaded units and installed unit files
    async fn candidate_names(&self) -> zbus::Result<BTreeSet<String>> {
        let manager = self.manager().await?;
        let units = manager
            .list_units()
            .await?
            .into_iter()
            .map(|(name, _, load_state, ..)| (name, load_state))
            .collect();
        let files = manager.list_unit_files().await?;
        Ok(collect_candidates(units, files))
    }

    /// Load a unit by exact name, None if systemd has never heard of it
    async fn load(&self, name: &str) -> zbus::Result<Option<ServiceHandle>> {
        let manager = self.manager().await?;
        let path = manager.load_unit(name).await?;
        let load_state = self.unit(path.as_str()).await?.load_state().await?;
        if load_state == "not-found" {
            return Ok(None);
        }
        Ok(Some(ServiceHandle::new(name, path.as_str())))
    }
}

impl ServiceControl for SystemdControl {
    async fn lookup(&self, pattern: &ServicePattern) -> Result<Vec<ServiceHandle>, ControlError> {
        let mut names: Vec<String> = self
            .candidate_names()
            .await?
            .into_iter()
            .filter(|name| pattern.matches(name))
            .collect();
        debug!("{} matched {} unit(s)", pattern.normalized(), names.len());

        match names.len() {
            // Units outside the listed paths (generated, runtime) still load by name
            0 if pattern.is_literal() => {
                Ok(self.load(pattern.normalized()).await?.into_iter().collect())
            }
            0 => Ok(Vec::new()),
            1 => {
                let name = names.remove(0);
                let path = self.manager().await?.load_unit(&name).await?;
                Ok(vec![ServiceHandle::new(name, path.as_str())])
            }
            // Rejected by the caller; leave the manager untouched
            _ => Ok(unloaded_handles(names)),
        }
    }

    async fn status(&self, handle: &ServiceHandle) -> Result<ServiceStatus, ControlError> {
        let unit = self.unit(handle.id()).await?;
        let active_state = unit.active_state().await?;
        let sub_state = unit.sub_state().await?;
        let freezer_state = match unit.freezer_state().await {
            Ok(state) => state,
            // Older systemd has no freezer
            Err(e) if is_unknown_property(&e) => "running".to_string(),
            Err(e) => return Err(e.into()),
        };
        debug!(
            "{}: active={} sub={} freezer={}",
            handle.name(),
            active_state,
            sub_state,
            freezer_state
        );
        Ok(ServiceStatus::from_systemd(&active_state, &freezer_state))
    }

    async fn start(&self, handle: &ServiceHandle) -> Result<(), ControlError> {
        let job = self.manager().await?.start_unit(handle.name(), JOB_MODE).await?;
        debug!("Queued start job {} for {}", job.as_str(), handle.name());
        Ok(())
    }

    async fn stop(&self, handle: &ServiceHandle) -> Result<(), ControlError> {
        let job = self.manager().await?.stop_unit(handle.name(), JOB_MODE).await?;
        debug!("Queued stop job {} for {}", job.as_str(), handle.name());
        Ok(())
    }
}

/// Merge `ListUnits` (name, load state) and `ListUnitFiles` (path, state)
/// into startable unit names.
///
/// Skips units systemd could not find, alias symlinks and uninstantiated
/// templates.
fn collect_candidates(
    units: Vec<(String, String)>,
    files: Vec<(String, String)>,
) -> BTreeSet<String> {
    let mut names: BTreeSet<String> = units
        .into_iter()
        .filter(|(_, load_state)| load_state != "not-found")
        .map(|(name, _)| name)
        .collect();

    for (path, state) in files {
        if state == "alias" {
            continue;
        }
        if let Some(name) = Path::new(&path).file_name().and_then(|s| s.to_str()) {
            if !is_template(name) {
                names.insert(name.to_string());
            }
        }
    }

    names
}

/// Handles for names that must not be loaded. Paths are derived, not queried.
fn unloaded_handles(names: Vec<String>) -> Vec<ServiceHandle> {
    names
        .into_iter()
        .map(|name| {
            let path = unit_object_path(&name);
            ServiceHandle::new(name, path)
        })
        .collect()
}

/// Convert unit name to D-Bus object path string
/// e.g., "docker.service" -> "/org/freedesktop/systemd1/unit/docker_2eservice"
pub fn unit_object_path(unit_id: &str) -> String {
    let escaped: String = unit_id
        .bytes()
        .map(|b| {
            if b.is_ascii_alphanumeric() {
                char::from(b).to_string()
            } else {
                format!("_{:02x}", b)
            }
        })
        .collect();

    format!("/org/freedesktop/systemd1/unit/{}", escaped)
}

/// "getty@.service" needs an instance name before it can run
fn is_template(name: &str) -> bool {
    name.rsplit_once('.')
        .map(|(prefix, _)| prefix.ends_with('@'))
        .unwrap_or(false)
}

/// The property does not exist on this systemd version
fn is_unknown_property(error: &zbus::Error) -> bool {
    match error {
        zbus::Error::FDO(e) => matches!(
            **e,
            fdo::Error::UnknownProperty(_) | fdo::Error::InvalidArgs(_)
        ),
        _ => false,
    }
}
