//! Service name patterns
//!
//! A name may be exact ("nginx.service"), bare ("nginx") or a glob
//! ("php*-fpm"). Bare names get the `.service` suffix like systemctl does.

use glob::Pattern;

use crate::error::ControlError;

const UNIT_SUFFIXES: &[&str] = &[
    ".service",
    ".socket",
    ".target",
    ".timer",
    ".mount",
    ".automount",
    ".path",
    ".slice",
    ".scope",
    ".swap",
    ".device",
];

#[derive(Debug, Clone)]
pub struct ServicePattern {
    raw: String,
    normalized: String,
    glob: Pattern,
}

impl ServicePattern {
    pub fn new(raw: &str) -> Result<Self, ControlError> {
        let raw = raw.trim();
        if raw.is_empty() {
            return Err(ControlError::EmptyServiceName);
        }

        let normalized = normalize_name(raw);
        let glob = Pattern::new(&normalized).map_err(|e| ControlError::InvalidPattern {
            pattern: raw.to_string(),
            reason: e.msg.to_string(),
        })?;

        Ok(Self {
            raw: raw.to_string(),
            normalized,
            glob,
        })
    }

    /// Name as the caller supplied it
    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// Name with unit suffix applied
    pub fn normalized(&self) -> &str {
        &self.normalized
    }

    pub fn matches(&self, unit_name: &str) -> bool {
        self.glob.matches(unit_name)
    }

    /// True when the pattern has no glob metacharacters
    pub fn is_literal(&self) -> bool {
        !self.normalized.contains(['*', '?', '['])
    }
}

/// Add .service suffix if no unit suffix is present
fn normalize_name(name: &str) -> String {
    if UNIT_SUFFIXES.iter().any(|suffix| name.ends_with(suffix)) {
        name.to_string()
    } else {
        format!("{}.service", name)
    }
}
