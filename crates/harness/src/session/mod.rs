mod plan;

use std::time::Instant;

use thirtyfour::WebDriver;
use tracing::{debug, warn};
use wd_runtime::DriverServer;

pub use plan::{SessionPlan, resolve_plan};

use crate::backend::Backend;
use crate::config::Config;
use crate::error::{HarnessError, Result};

/// Active browser session handed to exactly one test body.
///
/// Owns the WebDriver handle and, for local sessions, the driver server
/// child process. Released exactly once through [`Session::close`]; a
/// local driver server that never reaches `close` is still reaped when
/// the child handle drops.
#[derive(Debug)]
pub struct Session {
	driver: WebDriver,
	server: Option<DriverServer>,
	backend: Backend,
	started: Instant,
}

impl Session {
	/// Builds a session from resolved configuration.
	///
	/// Local configurations provision a driver server first; remote ones
	/// connect straight to the backend's fixed endpoint. Construction
	/// failures never leak a partial session: a spawned server is stopped
	/// and a connected driver is quit before the error propagates.
	pub async fn build(config: &Config) -> Result<Self> {
		match plan::resolve_plan(config) {
			SessionPlan::Provision(kind) => {
				let server = DriverServer::launch(kind).await?;
				let url = server.url().to_string();
				Self::connect(url, config, Some(server)).await
			}
			SessionPlan::Remote(url) => Self::connect(url, config, None).await,
		}
	}

	/// Connects to a session endpoint and applies post-construction steps.
	pub(crate) async fn connect(
		url: String,
		config: &Config,
		server: Option<DriverServer>,
	) -> Result<Self> {
		let caps = config.backend.capabilities(config.headless)?;

		debug!(
			target = "wd.session",
			backend = %config.backend,
			url = %url,
			headless = config.headless,
			"constructing webdriver session"
		);

		let driver = match WebDriver::new(url.as_str(), caps).await {
			Ok(driver) => driver,
			Err(e) => {
				if let Some(server) = server {
					let _ = server.shutdown().await;
				}
				return Err(HarnessError::SessionConstruction {
					backend: config.backend,
					source: e,
				});
			}
		};

		if config.full_screen {
			if let Err(e) = driver.maximize_window().await {
				let _ = driver.quit().await;
				if let Some(server) = server {
					let _ = server.shutdown().await;
				}
				return Err(HarnessError::SessionConstruction {
					backend: config.backend,
					source: e,
				});
			}
		}

		Ok(Self {
			driver,
			server,
			backend: config.backend,
			started: Instant::now(),
		})
	}

	/// Backend family this session runs.
	pub fn backend(&self) -> Backend {
		self.backend
	}

	/// Underlying WebDriver handle for the test body.
	pub fn driver(&self) -> &WebDriver {
		&self.driver
	}

	/// Tears the session down: close the window, quit the driver, stop the
	/// local driver server. Every step is attempted even when an earlier
	/// one fails; the first failure is returned.
	pub async fn close(self) -> Result<()> {
		let Session {
			driver,
			server,
			backend,
			started,
		} = self;

		debug!(
			target = "wd.session",
			backend = %backend,
			uptime_ms = started.elapsed().as_millis() as u64,
			"tearing down session"
		);

		let mut first_failure: Option<HarnessError> = None;

		if let Err(e) = driver.close_window().await {
			warn!(
				target = "wd.session",
				backend = %backend,
				error = %e,
				"closing browser window failed"
			);
			first_failure.get_or_insert(HarnessError::Teardown {
				stage: "close-window",
				source: anyhow::Error::new(e),
			});
		}

		if let Err(e) = driver.quit().await {
			warn!(
				target = "wd.session",
				backend = %backend,
				error = %e,
				"quitting webdriver session failed"
			);
			first_failure.get_or_insert(HarnessError::Teardown {
				stage: "quit",
				source: anyhow::Error::new(e),
			});
		}

		if let Some(server) = server {
			if let Err(e) = server.shutdown().await {
				warn!(
					target = "wd.session",
					backend = %backend,
					error = %e,
					"stopping driver server failed"
				);
				first_failure.get_or_insert(HarnessError::Teardown {
					stage: "driver-server",
					source: anyhow::Error::new(e),
				});
			}
		}

		match first_failure {
			Some(err) => Err(err),
			None => Ok(()),
		}
	}
}
