use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use thirtyfour::prelude::*;
use thirtyfour::Capabilities;
use wd_runtime::DriverKind;

use crate::error::{HarnessError, Result};

/// Browser backend family served by the harness.
///
/// The registry is closed: adding a family means adding a variant and its
/// dispatch arms below, nothing else. Unknown names are rejected at the
/// string boundary instead of falling back to a default.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Backend {
	/// Google Chrome, driven through chromedriver.
	#[default]
	Chrome,
	/// Mozilla Firefox, driven through geckodriver.
	Firefox,
}

impl Backend {
	/// Every supported backend, in display order.
	pub const ALL: [Backend; 2] = [Backend::Chrome, Backend::Firefox];

	/// Comma-separated names of every supported backend, for error messages.
	pub(crate) fn supported_list() -> String {
		Self::ALL.map(|backend| backend.to_string()).join(", ")
	}

	/// Resolves a backend identifier (ASCII case-insensitive).
	///
	/// # Errors
	///
	/// Returns [`HarnessError::UnknownBackend`] for identifiers outside the
	/// registry; nothing is constructed in that case.
	pub fn from_name(name: &str) -> Result<Self> {
		match name.trim().to_ascii_lowercase().as_str() {
			"chrome" => Ok(Backend::Chrome),
			"firefox" => Ok(Backend::Firefox),
			_ => Err(HarnessError::UnknownBackend {
				name: name.to_string(),
			}),
		}
	}

	/// Remote endpoint convention: port 4444 on a host named after the
	/// backend.
	pub fn remote_url(self) -> String {
		format!("http://{self}:4444")
	}

	/// Driver server binary family used for local sessions.
	pub fn driver(self) -> DriverKind {
		match self {
			Backend::Chrome => DriverKind::Chromedriver,
			Backend::Firefox => DriverKind::Geckodriver,
		}
	}

	/// W3C capabilities for this backend.
	///
	/// The headless launch option is applied when requested, for local and
	/// remote sessions alike.
	pub fn capabilities(self, headless: bool) -> Result<Capabilities> {
		let construction = |source| HarnessError::SessionConstruction {
			backend: self,
			source,
		};

		match self {
			Backend::Chrome => {
				let mut caps = DesiredCapabilities::chrome();
				if headless {
					caps.set_headless().map_err(construction)?;
				}
				Ok(caps.into())
			}
			Backend::Firefox => {
				let mut caps = DesiredCapabilities::firefox();
				if headless {
					caps.set_headless().map_err(construction)?;
				}
				Ok(caps.into())
			}
		}
	}
}

impl std::fmt::Display for Backend {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self {
			Backend::Chrome => write!(f, "chrome"),
			Backend::Firefox => write!(f, "firefox"),
		}
	}
}
