//! Process-wide diagnostics.
//!
//! The free functions here operate on one lazily created
//! [`Tripwire<HostBackend>`](Tripwire), configured from the environment the
//! first time any of them runs (see [`crate::config`]).

use core::fmt;

use once_cell::sync::Lazy;

use crate::config::Config;
use crate::context::Tripwire;
use crate::platform::{probe, HostBackend};
use crate::trace::StackTrace;
use crate::trap::CallSite;

static GLOBAL: Lazy<Tripwire<HostBackend>> = Lazy::new(|| {
    let config = Config::from_env_lossy();
    tracing::debug!(?config, "diagnostics initialized");
    Tripwire::with_config(HostBackend::new(), config)
});

/// The process-wide [`Tripwire`].
#[must_use]
pub fn global() -> &'static Tripwire<HostBackend>
{
    &GLOBAL
}

/// Write one formatted line to the host sink. See [`debugf!`](crate::debugf).
pub fn log_line(args: fmt::Arguments<'_>)
{
    if crate::ENABLED {
        global().log_line(args);
    }
}

/// Write one formatted line, highlighted. See [`errorf!`](crate::errorf).
pub fn log_error_line(args: fmt::Arguments<'_>)
{
    if crate::ENABLED {
        global().log_error_line(args);
    }
}

/// Dump `bytes` as hex + ASCII, one line per 16 bytes.
pub fn dump_hex(bytes: &[u8])
{
    if crate::ENABLED {
        global().dump_hex(bytes);
    }
}

/// Print the caller's stack, one line per frame.
pub fn print_stack_trace()
{
    if crate::ENABLED {
        global().print_stack_trace();
    }
}

/// Capture the caller's stack without printing it.
#[must_use]
pub fn capture_stack_trace() -> StackTrace
{
    global().capture_stack_trace()
}

/// Whether standard input is a terminal.
#[must_use]
pub fn is_stdin_terminal() -> bool
{
    crate::ENABLED && probe::is_stdin_terminal()
}

/// Whether a debugger is attached to this process.
#[must_use]
pub fn is_debugger_attached() -> bool
{
    crate::ENABLED && probe::is_debugger_attached()
}

/// Discard pending stdin input and block for one character.
#[must_use]
pub fn read_one_char() -> Option<char>
{
    if crate::ENABLED {
        probe::read_interactive_char()
    } else {
        None
    }
}

/// Breakpoint at the caller's location.
///
/// On a terminal the user may continue once, continue and silence this
/// location for good, or halt. Halting traps into an attached debugger, or
/// aborts the process when there is none.
#[track_caller]
pub fn trap_here()
{
    if crate::ENABLED {
        global().trap(CallSite::caller());
    }
}
