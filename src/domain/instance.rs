//! Instance identity and lifecycle state types.
//!
//! Pure data types. Zero imports from `crate::infra`, `crate::application`,
//! `std::fs`, or `std::net`.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Opaque external identifier assigned by the provider backend.
///
/// The core never parses it; equality and display are the only operations.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct InstanceId(String);

impl InstanceId {
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for InstanceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for InstanceId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for InstanceId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// Resolved connection endpoint for an instance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Endpoint {
    /// Hostname or address reachable from this process.
    pub host: String,
    /// Remote login user.
    pub user: String,
}

/// Observed lifecycle state of an instance handle.
///
/// `Running` and `Stopped` are best-effort snapshots taken when a lifecycle
/// call succeeds; the core never polls the backend to confirm them and never
/// rejects a call locally based on them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InstanceState {
    /// Known by id only; endpoint not yet fetched.
    Unresolved,
    /// Endpoint details fetched from the backend.
    Resolved,
    Running,
    Stopped,
    /// Terminal. The in-memory handle stays valid but no longer maps to
    /// anything on the backend.
    Terminated,
}

impl InstanceState {
    #[must_use]
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Terminated)
    }
}

impl fmt::Display for InstanceState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Unresolved => "unresolved",
            Self::Resolved => "resolved",
            Self::Running => "running",
            Self::Stopped => "stopped",
            Self::Terminated => "terminated",
        };
        f.write_str(s)
    }
}
