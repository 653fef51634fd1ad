use clap::Parser;

use crate::backend::Backend;
use crate::config::{Config, Location};

/// Command-line options accepted by harness-driven test runners.
///
/// The core consumes [`Config`] only; argument syntax stays at this
/// boundary.
#[derive(Parser, Debug, Clone)]
#[command(name = "wd-harness")]
#[command(about = "WebDriver session harness")]
pub struct Opts {
	/// Browser backend to drive.
	#[arg(long, value_enum, default_value_t = Backend::Chrome)]
	pub browser: Backend,

	/// Where the session runs.
	#[arg(long, value_enum, default_value_t = Location::Local)]
	pub location: Location,

	/// Launch the browser headless.
	#[arg(long)]
	pub headless: bool,

	/// Maximize the window once the session is constructed.
	#[arg(long)]
	pub full_screen: bool,
}

impl Opts {
	/// Collapses parsed options into the resolved configuration record.
	pub fn into_config(self) -> Config {
		Config {
			backend: self.browser,
			location: self.location,
			headless: self.headless,
			full_screen: self.full_screen,
		}
	}
}

#[cfg(test)]
mod tests {
	use clap::Parser;

	use super::*;

	#[test]
	fn parse_defaults() {
		let opts = Opts::try_parse_from(vec!["wd-harness"]).unwrap();
		let config = opts.into_config();
		assert_eq!(config, Config::default());
	}

	#[test]
	fn parse_all_flags() {
		let opts = Opts::try_parse_from(vec![
			"wd-harness",
			"--browser",
			"firefox",
			"--location",
			"remote",
			"--headless",
			"--full-screen",
		])
		.unwrap();

		let config = opts.into_config();
		assert_eq!(config.backend, Backend::Firefox);
		assert_eq!(config.location, Location::Remote);
		assert!(config.headless);
		assert!(config.full_screen);
	}

	#[test]
	fn unsupported_browser_fails_to_parse() {
		let result = Opts::try_parse_from(vec!["wd-harness", "--browser", "safari"]);
		assert!(result.is_err());
	}

	#[test]
	fn unsupported_location_fails_to_parse() {
		let result = Opts::try_parse_from(vec!["wd-harness", "--location", "cloud"]);
		assert!(result.is_err());
	}
}
