//! # Error Types
//!
//! Errors for the few internal steps that can fail.
//!
//! None of these reach callers of the diagnostics API: a failed probe reads as
//! `false`, a failed write is dropped. They exist so the failing step can be
//! logged with a useful message, and so configuration loading can report bad
//! environment values to callers that ask for them.
//!
//! We use `thiserror` to generate the `Error` implementations.

use thiserror::Error;

/// Failure while asking the OS about the current process.
#[derive(Error, Debug)]
pub enum ProbeError
{
    /// Reading a procfs file or stdin failed
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// `/proc/self/status` had no usable `TracerPid` line
    ///
    /// Seen on kernels with restricted procfs or inside some sandboxes.
    #[error("Malformed process status: {0}")]
    MalformedStatus(String),

    /// A process info query (`proc_pidinfo` on macOS) failed
    #[error("Process info query failed: {0}")]
    ProcessInfo(String),
}

/// Invalid runtime configuration value.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError
{
    /// An environment variable held a value we could not parse
    #[error("Invalid value {value:?} for {variable}, expected {expected}")]
    InvalidValue
    {
        /// Name of the environment variable
        variable: &'static str,
        /// The rejected value
        value: String,
        /// Human-readable list of accepted values
        expected: &'static str,
    },
}

/// Convenience type alias for probe results.
pub type ProbeResult<T> = std::result::Result<T, ProbeError>;
