//! Error types for the WebDriver runtime.

use std::time::Duration;

use thiserror::Error;

/// Result type alias for runtime operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while provisioning a local WebDriver server.
#[derive(Debug, Error)]
pub enum Error {
	/// No usable driver server binary was found.
	#[error("{driver} not found (checked ${env_var}, PATH, and common install locations)")]
	DriverNotFound {
		driver: &'static str,
		env_var: &'static str,
	},

	/// The driver server process failed to start.
	#[error("failed to launch webdriver server: {0}")]
	LaunchFailed(String),

	/// The driver server never reported ready within the deadline.
	#[error("webdriver server at {url} not ready after {waited:?}")]
	StartupTimeout { url: String, waited: Duration },

	/// Underlying I/O failure.
	#[error(transparent)]
	Io(#[from] std::io::Error),
}
