//! # Tripwire Utilities
//!
//! Logging bootstrap for applications using tripwire diagnostics, and a
//! [`TracingSink`] that forwards diagnostic lines into `tracing`.

pub mod logging;
pub mod sink;

// Re-export commonly used logging functions for convenience
pub use logging::{init_logging, init_logging_with_level, LogFormat, LogLevel, LoggingError};
pub use sink::TracingSink;
pub use tracing::{debug, error, info, trace, warn};
