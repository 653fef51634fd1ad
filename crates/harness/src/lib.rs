//! WebDriver test harness - configuration, dispatch, and scoped lifecycle
//!
//! A thin layer between a test suite and the WebDriver protocol client:
//!
//! - **Option source**: command-line flags and `WD_*` environment variables
//!   resolved into one immutable [`Config`] record
//! - **Backend dispatch**: a closed [`Backend`] enumeration mapping browser
//!   names to endpoints, driver binaries, and capabilities, failing fast on
//!   anything outside the registry
//! - **Session lifecycle**: [`with_session`] constructs a session (local
//!   driver process or remote endpoint), hands it to exactly one test body,
//!   and guarantees teardown on every exit path
//!
//! The harness does not implement browser automation itself; test bodies
//! talk to the browser through the [`thirtyfour`] handle a [`Session`]
//! exposes.

pub mod backend;
pub mod config;
pub mod error;
pub mod fixture;
pub mod logging;
pub mod opts;
pub mod session;

pub use backend::Backend;
pub use config::{Config, Location};
pub use error::{HarnessError, Result};
pub use fixture::with_session;
pub use logging::init_logging;
pub use opts::Opts;
pub use session::Session;
