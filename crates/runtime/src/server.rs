//! WebDriver server process lifecycle.
//!
//! Spawns a resolved driver server binary on an ephemeral localhost port
//! and manages it until shutdown. Readiness is established through the W3C
//! `GET /status` endpoint rather than a fixed post-spawn sleep.

use std::net::TcpListener;
use std::path::Path;
use std::process::Stdio;
use std::time::Duration;

use tokio::process::{Child, Command};
use tracing::debug;

use crate::driver::{DriverKind, resolve_driver_binary};
use crate::error::{Error, Result};

/// Total time allowed for a spawned server to report ready.
const STARTUP_DEADLINE: Duration = Duration::from_secs(15);
/// Pause between readiness probes.
const PROBE_INTERVAL: Duration = Duration::from_millis(100);

/// A WebDriver server child process bound to an ephemeral localhost port.
///
/// Each instance owns its own port and process, so parallel launches never
/// contend. The child is spawned with `kill_on_drop`, so an instance that
/// is dropped without [`DriverServer::shutdown`] (for example when a test
/// panics) still takes the process down with it.
#[derive(Debug)]
pub struct DriverServer {
	process: Child,
	url: String,
	kind: DriverKind,
}

impl DriverServer {
	/// Resolve the driver binary for `kind`, spawn it, and wait until it
	/// reports ready.
	///
	/// # Errors
	///
	/// Returns [`Error::DriverNotFound`] if no usable binary exists,
	/// [`Error::LaunchFailed`] if the process cannot be spawned or exits
	/// during startup, and [`Error::StartupTimeout`] if it never reports
	/// ready.
	pub async fn launch(kind: DriverKind) -> Result<Self> {
		let binary = resolve_driver_binary(kind)?;
		Self::spawn_and_wait(kind, &binary, STARTUP_DEADLINE).await
	}

	pub(crate) async fn spawn_and_wait(
		kind: DriverKind,
		binary: &Path,
		deadline: Duration,
	) -> Result<Self> {
		let port = free_port()?;
		let url = format!("http://127.0.0.1:{port}");

		debug!(
			target = "wd.runtime",
			driver = kind.binary_name(),
			binary = %binary.display(),
			port,
			"launching webdriver server"
		);

		let mut child = Command::new(binary)
			.arg(format!("--port={port}"))
			.stdin(Stdio::null())
			.stdout(Stdio::null())
			.stderr(Stdio::null())
			.kill_on_drop(true)
			.spawn()
			.map_err(|e| {
				Error::LaunchFailed(format!("failed to spawn {}: {e}", binary.display()))
			})?;

		// Check if the process started successfully before probing.
		tokio::time::sleep(Duration::from_millis(100)).await;

		match child.try_wait() {
			Ok(Some(status)) => {
				return Err(Error::LaunchFailed(format!(
					"{} exited immediately with status: {status}",
					kind.binary_name()
				)));
			}
			Ok(None) => {}
			Err(e) => {
				return Err(Error::LaunchFailed(format!(
					"failed to check server process status: {e}"
				)));
			}
		}

		if let Err(err) = wait_until_ready(&url, deadline).await {
			// Prefer reporting a startup crash over a bare timeout.
			if let Ok(Some(status)) = child.try_wait() {
				return Err(Error::LaunchFailed(format!(
					"{} exited during startup with status: {status}",
					kind.binary_name()
				)));
			}
			let _ = child.kill().await;
			return Err(err);
		}

		debug!(
			target = "wd.runtime",
			driver = kind.binary_name(),
			url = %url,
			"webdriver server ready"
		);

		Ok(Self {
			process: child,
			url,
			kind,
		})
	}

	/// Session endpoint served by this process.
	pub fn url(&self) -> &str {
		&self.url
	}

	/// Driver family this server was launched for.
	pub fn kind(&self) -> DriverKind {
		self.kind
	}

	/// Terminate the server process and wait for it to exit.
	pub async fn shutdown(mut self) -> Result<()> {
		debug!(
			target = "wd.runtime",
			driver = self.kind.binary_name(),
			url = %self.url,
			"stopping webdriver server"
		);

		self.process
			.kill()
			.await
			.map_err(|e| Error::LaunchFailed(format!("failed to kill server process: {e}")))?;

		let _ = self.process.wait().await;

		Ok(())
	}
}

/// Bind port 0 so the OS picks a free port, then release it for the child.
fn free_port() -> Result<u16> {
	let listener = TcpListener::bind(("127.0.0.1", 0))?;
	Ok(listener.local_addr()?.port())
}

/// Poll the W3C `GET /status` endpoint until `value.ready` is true.
pub async fn wait_until_ready(url: &str, deadline: Duration) -> Result<()> {
	let status_url = format!("{url}/status");
	let client = reqwest::Client::new();
	let started = tokio::time::Instant::now();

	while started.elapsed() < deadline {
		if let Ok(resp) = client.get(&status_url).send().await {
			if let Ok(body) = resp.json::<serde_json::Value>().await {
				if body["value"]["ready"].as_bool().unwrap_or(false) {
					return Ok(());
				}
			}
		}
		tokio::time::sleep(PROBE_INTERVAL).await;
	}

	Err(Error::StartupTimeout {
		url: url.to_string(),
		waited: deadline,
	})
}
