//! Diagnostic logging setup for the timestampr binary.
//!
//! Console status lines are plain `println!` output; `tracing` events go to
//! stderr so they never interleave with the progress bar on stdout.

use crate::Result;
use tracing_subscriber::EnvFilter;

/// Environment variable holding a `tracing` filter directive.
pub const LOG_ENV_VAR: &str = "TIMESTAMPR_LOG";

/// Filter used when [`LOG_ENV_VAR`] is unset or empty.
pub const DEFAULT_LOG_FILTER: &str = "warn";

/// Picks the filter directive to use, falling back to [`DEFAULT_LOG_FILTER`].
pub fn filter_directive(configured: Option<&str>) -> &str {
    match configured.map(str::trim) {
        Some(directive) if !directive.is_empty() => directive,
        _ => DEFAULT_LOG_FILTER,
    }
}

/// Initializes structured logging from a filter directive.
///
/// # Example
/// ```rust,no_run
/// use timestampr_core::logging::init_logging;
///
/// init_logging(Some("timestampr_core=debug")).expect("Failed to initialize logging");
/// ```
pub fn init_logging(configured: Option<&str>) -> Result<()> {
    let filter = EnvFilter::try_new(filter_directive(configured)).map_err(|e| {
        crate::error::TimestamprError::configuration(format!(
            "Invalid {} directive: {}",
            LOG_ENV_VAR, e
        ))
    })?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .try_init()
        .map_err(|e| {
            crate::error::TimestamprError::configuration(format!(
                "Failed to initialize logging: {}",
                e
            ))
        })?;

    Ok(())
}
