//! # Platform Backends
//!
//! Everything target-specific sits behind the [`Backend`] trait: where text
//! goes, how the environment is probed, how the stack is walked, and how
//! execution is stopped. The logic in [`Tripwire`](crate::Tripwire) is
//! written once against it.
//!
//! - [`HostBackend`]: the native desktop/server/mobile implementation,
//!   selected per `target_os` at compile time
//!   - **Linux**: stderr, `/proc/self/status` tracer probe, `tcflush`
//!   - **other Unix**: stderr, `tcflush`, no debugger probe
//!   - **macOS**: stderr, `proc_pidinfo` `P_TRACED` probe
//!   - **Windows**: `OutputDebugStringA` / stderr, `IsDebuggerPresent`
//!   - **Android**: `__android_log_write`
//! - Custom backends: consoles, RTOS targets, test doubles. Targets with no
//!   process model report [`HaltPolicy::Immediate`].

#[cfg(any(windows, target_os = "android"))]
pub mod ffi;
pub mod host;
pub mod probe;

pub use host::HostBackend;

use crate::sink::Sink;
use crate::trace::StackTrace;

/// How a backend wants breakpoints handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HaltPolicy
{
    /// Per-site skip state, optional prompt, then trap or terminate
    #[default]
    Interactive,
    /// Trap unconditionally; no prompt, no skip state (no process to skip within)
    Immediate,
}

/// Target-specific capabilities used by the diagnostics core.
///
/// Every probe has a safe fallback (`false` / `None`); none of these methods
/// report errors.
pub trait Backend: Sink
{
    /// Whether standard input is an interactive terminal.
    fn is_stdin_terminal(&self) -> bool;

    /// Whether a debugger is currently attached to this process.
    fn is_debugger_attached(&self) -> bool;

    /// Discard pending input, then block until one character is read.
    ///
    /// There is no timeout: an unattended process waiting here hangs.
    /// Returns `None` at end of input or on error.
    fn read_interactive_char(&self) -> Option<char>;

    /// Show a breakpoint prompt where the person answering it will see it.
    ///
    /// The prompt belongs with [`Backend::read_interactive_char`], not with
    /// the log route: backends whose [`Sink`] output leaves the terminal
    /// override this to write to the console.
    fn prompt(&self, text: &str)
    {
        self.emit(text);
    }

    /// Capture the caller's stack. Targets without stack walking return an
    /// empty trace.
    fn capture_trace(&self) -> StackTrace
    {
        StackTrace::empty()
    }

    /// Whether [`Backend::debug_trap`] is a real, resumable trap instruction.
    fn has_trap_instruction(&self) -> bool
    {
        true
    }

    /// Hand control to the debugger in place. Execution continues afterwards
    /// if the debugger steps past the trap.
    fn debug_trap(&self);

    /// Terminate the process. Host implementations never return.
    fn terminate(&self);

    /// How breakpoints should behave on this target.
    fn halt_policy(&self) -> HaltPolicy
    {
        HaltPolicy::Interactive
    }
}
