//! # Tripwire
//!
//! Debug-support toolkit: bounded formatted logging, hex dumps, stack
//! traces, debugger and terminal probes, and assertion macros that stop at
//! an interactive, per-call-site breakpoint.
//!
//! Everything from `tripwire-core` is re-exported here, along with the
//! logging bootstrap from `tripwire-utils`.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use tripwire::prelude::*;
//!
//! tripwire::init().expect("Failed to initialize tripwire");
//!
//! let header = [0x7fu8, b'E', b'L', b'F', 2, 1, 1, 0];
//! debugf!("parsed {} header bytes", header.len());
//! dump_hex(&header);
//! checkf!(header[0] == 0x7f, "bad magic {:#x}", header[0]);
//! ```
//!
//! Disable the default `diagnostics` feature to compile every operation to
//! a no-op. `check!`/`checkf!` conditions are still evaluated once.

pub use tripwire_core::*;
pub use tripwire_utils::{init_logging, init_logging_with_level, LogFormat, LogLevel, LoggingError, TracingSink};

/// Failure while bootstrapping diagnostics.
#[derive(Debug, thiserror::Error)]
pub enum InitError
{
    /// A `TRIPWIRE_*` variable has an invalid value
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The `tracing` subscriber could not be installed
    #[error(transparent)]
    Logging(#[from] LoggingError),
}

/// Validate the `TRIPWIRE_*` environment, install logging, and create the
/// process-wide diagnostics state.
///
/// Calling this is optional: every operation initializes lazily, falling
/// back to defaults for invalid settings. Use it at startup to get invalid
/// configuration and logging failures reported as errors instead.
///
/// ## Errors
///
/// Returns [`InitError::Config`] if a `TRIPWIRE_*` variable is malformed, and
/// [`InitError::Logging`] if a subscriber is already installed or the log
/// file cannot be opened.
pub fn init() -> Result<(), InitError>
{
    let config = Config::from_env()?;
    init_logging()?;

    let tripwire = global();
    tracing::debug!(?config, tag = %emitter_tag(), enabled = ENABLED, "tripwire ready");
    if tripwire.config() != &config {
        tracing::warn!("diagnostics were used before init; keeping the configuration loaded then");
    }
    Ok(())
}
