//! # tripwire-core
//!
//! Small, cross-platform debug support primitives.
//!
//! This crate provides:
//! - Bounded, newline-terminated debug and error logging (`debugf!`, `errorf!`)
//! - Hex dumps of byte buffers
//! - Stack trace capture and printing
//! - Debugger and terminal probes
//! - A debugger-aware breakpoint trap with per-site interactive skipping,
//!   driving the `check!`, `checkf!`, `trespass!` and `trespassf!` macros
//!
//! ## Platform Support
//!
//! - **Linux**: stderr output, `TracerPid` debugger probe, `tcflush` input purge
//! - **macOS**: stderr output, `P_TRACED` debugger probe via `libproc`
//! - **Windows**: `OutputDebugStringA` while a debugger is attached, otherwise
//!   stderr; `IsDebuggerPresent` probe
//! - **Android**: `__android_log_write` tagged with the emitter tag
//!
//! Targets without an OS process model plug in their own [`Backend`] and
//! usually pick [`HaltPolicy::Immediate`].
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use tripwire_core::{check, checkf, debugf, dump_hex};
//!
//! debugf!("Hello {}", "world");
//! dump_hex(b"some bytes worth looking at");
//!
//! let fd = 3;
//! check!(fd >= 0);
//! checkf!(fd < 1024, "fd {} out of range", fd);
//! ```
//!
//! ## Why unsafe code is needed
//!
//! Trap instructions (`int3`, `brk`) and the OS debug APIs (`IsDebuggerPresent`,
//! `OutputDebugStringA`, `__android_log_write`, `tcflush`, raw `read`) are only
//! reachable through `asm!` and FFI.

#![allow(unsafe_code)] // Required for trap instructions and OS debug APIs

pub mod config;
pub mod context;
pub mod error;
pub mod format;
pub mod global;
pub mod hexdump;
mod macros;
pub mod platform;
pub mod prelude;
pub mod sink;
pub mod tag;
pub mod trace;
pub mod trap;

pub use config::{ColorMode, Config};
pub use context::Tripwire;
pub use error::{ConfigError, ProbeError};
pub use format::{format_line, Line, LINE_CAPACITY};
pub use global::{
    capture_stack_trace, dump_hex, global, is_debugger_attached, is_stdin_terminal, log_error_line, log_line,
    print_stack_trace, read_one_char, trap_here,
};
pub use platform::{Backend, HaltPolicy, HostBackend};
pub use sink::{HighlightGuard, Sink};
pub use tag::{emitter_tag, set_emitter_tag, DEFAULT_TAG};
pub use trace::{Frame, StackTrace, MAX_FRAMES};
pub use trap::{Answer, CallSite, SiteRegistry, TrapOutcome};

/// Whether diagnostics are compiled in (the `diagnostics` feature).
///
/// Every operation checks this constant first, so a build without the feature
/// folds them away entirely.
pub const ENABLED: bool = cfg!(feature = "diagnostics");

#[doc(hidden)]
pub mod __private
{
    use core::fmt;

    use crate::trap::CallSite;

    #[cold]
    #[inline(never)]
    pub fn check_failed(site: CallSite, condition: &str, message: Option<fmt::Arguments<'_>>)
    {
        crate::global().check_failed(site, condition, message);
    }

    #[cold]
    #[inline(never)]
    pub fn trespassed(site: CallSite, message: Option<fmt::Arguments<'_>>)
    {
        crate::global().trespassed(site, message);
    }
}
