use thiserror::Error;

use crate::backend::Backend;

pub type Result<T> = std::result::Result<T, HarnessError>;

/// Error taxonomy for session acquisition and teardown.
///
/// Everything except [`HarnessError::Teardown`] is fatal and surfaces
/// before the test body runs. Teardown failures are non-fatal relative to
/// the test outcome: the lifecycle manager logs them and preserves the
/// body's own result.
#[derive(Debug, Error)]
pub enum HarnessError {
	/// Configuration named a backend outside the registry.
	#[error("unknown backend: {name} (supported: {supported})", supported = Backend::supported_list())]
	UnknownBackend { name: String },

	/// An option value could not be interpreted.
	#[error("invalid value for {option}: {value:?}")]
	InvalidOption {
		option: &'static str,
		value: String,
	},

	/// Local driver binary resolution or server launch failed.
	#[error("driver provisioning failed: {0}")]
	DriverProvisioning(#[from] wd_runtime::Error),

	/// The WebDriver session could not be constructed.
	#[error("session construction failed for {backend}")]
	SessionConstruction {
		backend: Backend,
		#[source]
		source: thirtyfour::error::WebDriverError,
	},

	/// A teardown step failed after the test body completed.
	#[error("teardown step {stage} failed")]
	Teardown {
		stage: &'static str,
		#[source]
		source: anyhow::Error,
	},
}
