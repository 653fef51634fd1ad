//! WebDriver server runtime - binary resolution and process lifecycle
//!
//! This crate provides the local-session side of the harness: everything
//! needed to turn "run Chrome locally" into a session endpoint URL.
//!
//! - **Driver resolution**: Locating a usable driver server binary
//!   (chromedriver, geckodriver) via environment override, `PATH`, and
//!   common install locations
//! - **Server lifecycle**: Spawning the binary on an ephemeral localhost
//!   port, waiting for its `/status` endpoint to report ready, and
//!   terminating it on shutdown
//!
//! Remote sessions never touch this crate; they connect to a pre-running
//! server directly.

pub mod driver;
pub mod error;
pub mod server;

pub use driver::{DriverKind, resolve_driver_binary};
pub use error::{Error, Result};
pub use server::DriverServer;
