//! WebDriver server binary resolution.
//!
//! Locates an installed driver server binary for a backend family. Binary
//! installation itself is delegated to the environment (package manager,
//! container image, CI setup step); this module only resolves and probes.

use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use tracing::{debug, warn};

use crate::error::{Error, Result};

/// Driver server binary family used to launch local sessions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DriverKind {
	/// Drives Chrome and other Chromium-based browsers.
	Chromedriver,
	/// Drives Firefox.
	Geckodriver,
}

impl DriverKind {
	/// Executable name looked up on `PATH` and in common locations.
	pub fn binary_name(self) -> &'static str {
		match self {
			DriverKind::Chromedriver => "chromedriver",
			DriverKind::Geckodriver => "geckodriver",
		}
	}

	/// Environment variable that overrides binary resolution.
	pub fn env_override(self) -> &'static str {
		match self {
			DriverKind::Chromedriver => "WD_CHROMEDRIVER",
			DriverKind::Geckodriver => "WD_GECKODRIVER",
		}
	}
}

/// Locate a usable driver server binary for `kind`.
///
/// This function attempts to locate the binary in the following order:
/// 1. The kind's environment variable override (runtime override)
/// 2. `PATH` lookup
/// 3. Common install locations
///
/// Every candidate is probed with `--version` before being accepted, so a
/// stale or non-executable path never reaches the spawn step.
///
/// # Errors
///
/// Returns [`Error::DriverNotFound`] if no usable binary exists in any of
/// the search paths.
pub fn resolve_driver_binary(kind: DriverKind) -> Result<PathBuf> {
	#[cfg(not(windows))]
	let common_dirs = [
		Path::new("/usr/local/bin"),
		Path::new("/usr/bin"),
		Path::new("/opt/homebrew/bin"),
		Path::new("/snap/bin"),
	];
	#[cfg(windows)]
	let common_dirs: [&Path; 0] = [];

	resolve_with(
		kind,
		|name| std::env::var(name).ok(),
		std::env::var_os("PATH"),
		&common_dirs,
	)
}

/// Resolution against explicit inputs, so the process environment stays
/// out of the picture.
fn resolve_with(
	kind: DriverKind,
	lookup: impl Fn(&str) -> Option<String>,
	search_path: Option<OsString>,
	fallback_dirs: &[&Path],
) -> Result<PathBuf> {
	if let Some(raw) = lookup(kind.env_override()) {
		let path = PathBuf::from(raw);
		if binary_is_usable(&path) {
			debug!(
				target = "wd.runtime",
				driver = kind.binary_name(),
				binary = %path.display(),
				"resolved driver binary from env override"
			);
			return Ok(path);
		}
		warn!(
			target = "wd.runtime",
			driver = kind.binary_name(),
			env_var = kind.env_override(),
			binary = %path.display(),
			"driver binary from env override is not runnable; trying fallback resolution"
		);
	}

	let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
	let mut candidates = Vec::new();
	if let Ok(path) = which::which_in(kind.binary_name(), search_path, cwd) {
		candidates.push(path);
	}
	candidates.extend(fallback_dirs.iter().map(|dir| dir.join(kind.binary_name())));

	if let Some(path) = first_usable(candidates) {
		debug!(
			target = "wd.runtime",
			driver = kind.binary_name(),
			binary = %path.display(),
			"resolved driver binary"
		);
		return Ok(path);
	}

	Err(Error::DriverNotFound {
		driver: kind.binary_name(),
		env_var: kind.env_override(),
	})
}

/// Returns the first existing candidate that passes the usability probe.
fn first_usable(candidates: impl IntoIterator<Item = PathBuf>) -> Option<PathBuf> {
	candidates
		.into_iter()
		.find(|path| path.exists() && binary_is_usable(path))
}

fn binary_is_usable(binary: &Path) -> bool {
	Command::new(binary)
		.arg("--version")
		.stdout(Stdio::null())
		.stderr(Stdio::null())
		.status()
		.map(|status| status.success())
		.unwrap_or(false)
}

#[cfg(test)]
mod tests {
	use std::fs;
	#[cfg(unix)]
	use std::os::unix::fs::PermissionsExt;

	use tempfile::TempDir;

	use super::*;

	#[cfg(unix)]
	fn write_mock_driver(path: &Path, exit_code: i32) {
		// Only answers --version, like the real probe target.
		let script = format!(
			"#!/bin/sh\n[ \"$1\" = \"--version\" ] || exit 64\nexit {}\n",
			exit_code
		);
		fs::write(path, script).unwrap();
		let mut perms = fs::metadata(path).unwrap().permissions();
		perms.set_mode(0o755);
		fs::set_permissions(path, perms).unwrap();
	}

	#[test]
	fn kind_names_and_env_overrides() {
		assert_eq!(DriverKind::Chromedriver.binary_name(), "chromedriver");
		assert_eq!(DriverKind::Geckodriver.binary_name(), "geckodriver");
		assert_eq!(DriverKind::Chromedriver.env_override(), "WD_CHROMEDRIVER");
		assert_eq!(DriverKind::Geckodriver.env_override(), "WD_GECKODRIVER");
	}

	#[cfg(unix)]
	#[test]
	fn usable_probe_accepts_exit_zero() {
		let temp = TempDir::new().unwrap();
		let binary = temp.path().join("chromedriver");
		write_mock_driver(&binary, 0);
		assert!(binary_is_usable(&binary));
	}

	#[cfg(unix)]
	#[test]
	fn usable_probe_rejects_nonzero_exit() {
		let temp = TempDir::new().unwrap();
		let binary = temp.path().join("chromedriver");
		write_mock_driver(&binary, 1);
		assert!(!binary_is_usable(&binary));
	}

	#[test]
	fn usable_probe_rejects_missing_binary() {
		assert!(!binary_is_usable(Path::new(
			"/definitely/missing/chromedriver"
		)));
	}

	#[cfg(unix)]
	#[test]
	fn first_usable_skips_broken_candidates() {
		let temp = TempDir::new().unwrap();
		let broken = temp.path().join("broken-driver");
		let good = temp.path().join("good-driver");
		write_mock_driver(&broken, 1);
		write_mock_driver(&good, 0);

		let missing = temp.path().join("missing-driver");
		let resolved = first_usable(vec![missing, broken, good.clone()]);
		assert_eq!(resolved, Some(good));
	}

	#[cfg(unix)]
	#[test]
	fn first_usable_returns_none_when_exhausted() {
		let temp = TempDir::new().unwrap();
		let broken = temp.path().join("broken-driver");
		write_mock_driver(&broken, 1);

		assert!(first_usable(vec![broken]).is_none());
	}

	#[cfg(unix)]
	#[test]
	fn env_override_wins_over_search() {
		let temp = TempDir::new().unwrap();
		let override_binary = temp.path().join("chromedriver-override");
		write_mock_driver(&override_binary, 0);
		let empty = TempDir::new().unwrap();

		let resolved = resolve_with(
			DriverKind::Chromedriver,
			|name| {
				assert_eq!(name, "WD_CHROMEDRIVER");
				Some(override_binary.display().to_string())
			},
			Some(empty.path().as_os_str().to_os_string()),
			&[],
		)
		.unwrap();
		assert_eq!(resolved, override_binary);
	}

	#[cfg(unix)]
	#[test]
	fn unusable_env_override_falls_back_to_search() {
		let override_dir = TempDir::new().unwrap();
		let broken = override_dir.path().join("chromedriver");
		write_mock_driver(&broken, 7);

		let search_dir = TempDir::new().unwrap();
		let good = search_dir.path().join("chromedriver");
		write_mock_driver(&good, 0);

		let resolved = resolve_with(
			DriverKind::Chromedriver,
			|_| Some(broken.display().to_string()),
			Some(search_dir.path().as_os_str().to_os_string()),
			&[],
		)
		.unwrap();
		assert_eq!(resolved, good);
	}

	#[cfg(unix)]
	#[test]
	fn resolution_exhaustion_reports_not_found() {
		let empty = TempDir::new().unwrap();

		let err = resolve_with(
			DriverKind::Geckodriver,
			|_| None,
			Some(empty.path().as_os_str().to_os_string()),
			&[empty.path()],
		)
		.unwrap_err();

		match err {
			Error::DriverNotFound { driver, env_var } => {
				assert_eq!(driver, "geckodriver");
				assert_eq!(env_var, "WD_GECKODRIVER");
			}
			e => panic!("unexpected error: {e:?}"),
		}
	}

	#[test]
	fn resolve_reports_not_found_or_an_installed_binary() {
		// Environment-dependent: accept either outcome, but never a panic
		// or a path that does not exist.
		match resolve_driver_binary(DriverKind::Geckodriver) {
			Ok(path) => assert!(path.exists()),
			Err(Error::DriverNotFound { driver, env_var }) => {
				assert_eq!(driver, "geckodriver");
				assert_eq!(env_var, "WD_GECKODRIVER");
			}
			Err(e) => panic!("unexpected error: {e:?}"),
		}
	}
}
