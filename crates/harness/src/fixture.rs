//! Scoped session acquisition around one test body.

use std::panic::AssertUnwindSafe;
use std::time::Instant;

use futures::FutureExt;
use tracing::{info, warn};

use crate::config::Config;
use crate::error::Result;
use crate::session::Session;

/// Executes one test body with a ready session, guaranteeing teardown.
///
/// The session is constructed from `config`, handed to `body` by
/// reference, and torn down on every exit path: `Ok`, `Err`, and a
/// panicking body (the panic resumes once teardown has run).
/// Construction errors propagate before the body ever runs. Teardown
/// failures are logged and never replace the body's own outcome.
pub async fn with_session<T>(
	config: &Config,
	body: impl for<'s> FnOnce(
		&'s Session,
	) -> std::pin::Pin<Box<dyn std::future::Future<Output = Result<T>> + 's>>,
) -> Result<T> {
	let acquire_started = Instant::now();
	let session = Session::build(config).await?;

	info!(
		target = "wd",
		backend = %config.backend,
		location = %config.location,
		headless = config.headless,
		full_screen = config.full_screen,
		acquire_ms = acquire_started.elapsed().as_millis() as u64,
		"session ready"
	);

	run_scoped(session, body).await
}

/// Runs `body` against an already-built session and tears it down on
/// every exit path. An unwinding body is caught, teardown runs, and the
/// panic is resumed.
pub(crate) async fn run_scoped<T>(
	session: Session,
	body: impl for<'s> FnOnce(
		&'s Session,
	) -> std::pin::Pin<Box<dyn std::future::Future<Output = Result<T>> + 's>>,
) -> Result<T> {
	let body_started = Instant::now();
	let outcome = AssertUnwindSafe(body(&session)).catch_unwind().await;
	let duration_ms = body_started.elapsed().as_millis() as u64;

	match &outcome {
		Ok(Ok(_)) => info!(target = "wd", duration_ms, "test body completed"),
		Ok(Err(e)) => warn!(target = "wd", duration_ms, error = %e, "test body failed"),
		Err(_) => warn!(target = "wd", duration_ms, "test body panicked"),
	}

	if let Err(e) = session.close().await {
		warn!(target = "wd", error = %e, "session teardown reported an error");
	}

	match outcome {
		Ok(res) => res,
		Err(panic) => std::panic::resume_unwind(panic),
	}
}
