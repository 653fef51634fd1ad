use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::backend::Backend;
use crate::error::{HarnessError, Result};

/// Where the browser session runs.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Location {
	/// Browser process driven by a driver server spawned on this machine.
	#[default]
	Local,
	/// Pre-running browser server reached over the network.
	Remote,
}

impl Location {
	/// Resolves a location identifier (ASCII case-insensitive).
	pub fn from_name(name: &str) -> Result<Self> {
		match name.trim().to_ascii_lowercase().as_str() {
			"local" => Ok(Location::Local),
			"remote" => Ok(Location::Remote),
			_ => Err(HarnessError::InvalidOption {
				option: "location",
				value: name.to_string(),
			}),
		}
	}
}

impl std::fmt::Display for Location {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self {
			Location::Local => write!(f, "local"),
			Location::Remote => write!(f, "remote"),
		}
	}
}

/// Fully owned harness configuration.
///
/// This type is the stable handoff between the option source and session
/// construction. Supplied once per test invocation; never mutated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
	/// Browser backend family.
	pub backend: Backend,
	/// Local driver process vs remote endpoint.
	pub location: Location,
	/// Whether the browser launches headless.
	pub headless: bool,
	/// Whether the window is maximized after construction.
	pub full_screen: bool,
}

impl Default for Config {
	fn default() -> Self {
		Self {
			backend: Backend::Chrome,
			location: Location::Local,
			headless: false,
			full_screen: false,
		}
	}
}

impl Config {
	pub const ENV_BROWSER: &'static str = "WD_BROWSER";
	pub const ENV_LOCATION: &'static str = "WD_LOCATION";
	pub const ENV_HEADLESS: &'static str = "WD_HEADLESS";
	pub const ENV_FULL_SCREEN: &'static str = "WD_FULL_SCREEN";

	/// Resolves configuration from `WD_*` environment variables, with the
	/// documented defaults for anything unset.
	///
	/// This is the option source for `cargo test` runs, where harness flags
	/// cannot be threaded through the test binary's own argument list.
	pub fn from_env() -> Result<Self> {
		Self::from_lookup(|name| std::env::var(name).ok())
	}

	fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
		let mut config = Config::default();

		if let Some(raw) = lookup(Self::ENV_BROWSER) {
			config.backend = Backend::from_name(&raw)?;
		}
		if let Some(raw) = lookup(Self::ENV_LOCATION) {
			config.location = Location::from_name(&raw)?;
		}
		if let Some(raw) = lookup(Self::ENV_HEADLESS) {
			config.headless = parse_bool("headless", &raw)?;
		}
		if let Some(raw) = lookup(Self::ENV_FULL_SCREEN) {
			config.full_screen = parse_bool("full_screen", &raw)?;
		}

		Ok(config)
	}
}

fn parse_bool(option: &'static str, raw: &str) -> Result<bool> {
	match raw.trim().to_ascii_lowercase().as_str() {
		"true" | "1" | "yes" => Ok(true),
		"false" | "0" | "no" => Ok(false),
		_ => Err(HarnessError::InvalidOption {
			option,
			value: raw.to_string(),
		}),
	}
}
