//! Pure session construction planning.

use wd_runtime::DriverKind;

use crate::config::{Config, Location};

/// Endpoint decision for one session construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionPlan {
	/// Resolve and launch a driver server binary, then connect to it.
	Provision(DriverKind),
	/// Connect to a pre-running server; no provisioning occurs.
	Remote(String),
}

/// Resolves the construction path from configuration.
///
/// Local sessions provision the backend's driver server; remote sessions
/// use the fixed per-backend endpoint convention.
pub fn resolve_plan(config: &Config) -> SessionPlan {
	match config.location {
		Location::Local => SessionPlan::Provision(config.backend.driver()),
		Location::Remote => SessionPlan::Remote(config.backend.remote_url()),
	}
}
