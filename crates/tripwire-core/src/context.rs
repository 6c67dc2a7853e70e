//! # Tripwire
//!
//! [`Tripwire`] owns everything the diagnostics operations share: a
//! [`Backend`], the [`Config`], the per-site skip registry, and the lock that
//! keeps one line's output (color on, text, color off) from interleaving with
//! another thread's.
//!
//! The process-wide instance behind the free functions lives in
//! [`crate::global`]; tests and embedders can build their own around any
//! backend.
//!
//! ## Breakpoint flow
//!
//! ```text
//! trap(site)
//!  ├─ HaltPolicy::Immediate ─────────────────────────────► debug_trap
//!  ├─ site skipped ──────────────────────────────────────► return
//!  ├─ prompt enabled && stdin is a terminal
//!  │    ├─ 'a' / 'A' ── mark site skipped ───────────────► return
//!  │    ├─ 'y' / 'Y' ────────────────────────────────────► return
//!  │    └─ anything else ─┐
//!  └──────────────────────┴─ debugger attached && trap ──► debug_trap
//!                           otherwise ── stack trace ───► terminate
//! ```

use core::fmt;
use std::sync::{Mutex, MutexGuard, PoisonError};

use crate::config::{ColorMode, Config};
use crate::format::format_line;
use crate::hexdump;
use crate::platform::{Backend, HaltPolicy};
use crate::sink::HighlightGuard;
use crate::trace::StackTrace;
use crate::trap::{Answer, CallSite, SiteRegistry, TrapOutcome};

/// Diagnostics state bound to one backend.
///
/// ## Example
///
/// ```rust
/// use tripwire_core::{Config, HostBackend, Tripwire};
///
/// let tripwire = Tripwire::with_config(HostBackend::new(), Config::default());
/// tripwire.log_line(format_args!("{} widgets loaded", 3));
/// tripwire.dump_hex(&[0xde, 0xad, 0xbe, 0xef]);
/// ```
pub struct Tripwire<B: Backend>
{
    backend: B,
    config: Config,
    sites: SiteRegistry,
    output: Mutex<()>,
}

impl<B: Backend> Tripwire<B>
{
    /// Wrap `backend` with the default configuration.
    pub fn new(backend: B) -> Self
    {
        Self::with_config(backend, Config::default())
    }

    /// Wrap `backend` with an explicit configuration.
    pub fn with_config(backend: B, config: Config) -> Self
    {
        Self {
            backend,
            config,
            sites: SiteRegistry::new(),
            output: Mutex::new(()),
        }
    }

    /// The backend.
    pub fn backend(&self) -> &B
    {
        &self.backend
    }

    /// The active configuration.
    pub fn config(&self) -> &Config
    {
        &self.config
    }

    /// Permanently skipped call sites.
    pub fn sites(&self) -> &SiteRegistry
    {
        &self.sites
    }

    /// Format one line and write it. Output that renders empty is dropped.
    pub fn log_line(&self, args: fmt::Arguments<'_>)
    {
        if !crate::ENABLED {
            return;
        }
        if let Some(line) = format_line(args) {
            let _output = self.lock_output();
            self.backend.emit(line.as_str());
        }
    }

    /// Like [`Tripwire::log_line`], highlighted in red where supported.
    pub fn log_error_line(&self, args: fmt::Arguments<'_>)
    {
        if !crate::ENABLED {
            return;
        }
        if let Some(line) = format_line(args) {
            let _output = self.lock_output();
            let _red = HighlightGuard::new(&self.backend, self.highlight());
            self.backend.emit(line.as_str());
        }
    }

    /// Dump `bytes` as hex + ASCII, one line per 16 bytes.
    pub fn dump_hex(&self, bytes: &[u8])
    {
        if !crate::ENABLED {
            return;
        }
        for row in hexdump::rows(bytes) {
            self.log_line(format_args!("{row}"));
        }
    }

    /// Capture the current stack through the backend.
    pub fn capture_stack_trace(&self) -> StackTrace
    {
        if !crate::ENABLED {
            return StackTrace::empty();
        }
        self.backend.capture_trace()
    }

    /// Capture the current stack and write one line per frame.
    pub fn print_stack_trace(&self)
    {
        if !crate::ENABLED {
            return;
        }
        let trace = self.backend.capture_trace();
        let _output = self.lock_output();
        trace.write_to(&self.backend);
    }

    /// Breakpoint at `site`: prompt, skip, trap or terminate.
    ///
    /// The prompt blocks until a key is pressed; there is no timeout.
    pub fn trap(&self, site: CallSite) -> TrapOutcome
    {
        self.trap_at(site, false)
    }

    /// `traced`: a stack trace for this hit was already printed.
    fn trap_at(&self, site: CallSite, traced: bool) -> TrapOutcome
    {
        if !crate::ENABLED {
            return TrapOutcome::Disabled;
        }

        if self.backend.halt_policy() == HaltPolicy::Immediate {
            self.backend.debug_trap();
            return TrapOutcome::Trapped;
        }

        if self.sites.is_skipped(site) {
            return TrapOutcome::Skipped;
        }

        if self.config.prompt && self.backend.is_stdin_terminal() {
            match self.ask(site) {
                Answer::Always => {
                    self.sites.skip(site);
                    tracing::info!(%site, "breakpoint skipped for the rest of the process");
                    return TrapOutcome::SkippedFromNow;
                }
                Answer::Once => return TrapOutcome::ContinuedOnce,
                Answer::Halt => {}
            }
        }

        self.halt(traced)
    }

    /// Report a failed `check!`/`checkf!` at `site`, then trap.
    pub fn check_failed(&self, site: CallSite, condition: &str, message: Option<fmt::Arguments<'_>>) -> TrapOutcome
    {
        if !crate::ENABLED {
            return TrapOutcome::Disabled;
        }
        match message {
            Some(message) => self.log_error_line(format_args!("{site}: check `{condition}' failed: {message}")),
            None => self.log_error_line(format_args!("{site}: check `{condition}' failed")),
        }
        self.report_and_trap(site)
    }

    /// Report reaching a `trespass!`/`trespassf!` at `site`, then trap.
    pub fn trespassed(&self, site: CallSite, message: Option<fmt::Arguments<'_>>) -> TrapOutcome
    {
        if !crate::ENABLED {
            return TrapOutcome::Disabled;
        }
        match message {
            Some(message) => self.log_error_line(format_args!("{site}: should not be here: {message}")),
            None => self.log_error_line(format_args!("{site}: should not be here")),
        }
        self.report_and_trap(site)
    }

    fn report_and_trap(&self, site: CallSite) -> TrapOutcome
    {
        let traced = self.config.trace_on_check;
        if traced {
            self.print_stack_trace();
        }
        self.trap_at(site, traced)
    }

    fn ask(&self, site: CallSite) -> Answer
    {
        {
            let _output = self.lock_output();
            self.backend.prompt(&format!("{site}: skip breakpoint? [y]es/[a]lways/[N]o "));
        }
        Answer::from_input(self.backend.read_interactive_char())
    }

    fn halt(&self, traced: bool) -> TrapOutcome
    {
        if self.backend.has_trap_instruction() && self.backend.is_debugger_attached() {
            self.backend.debug_trap();
            TrapOutcome::Trapped
        } else {
            // Without a debugger the trace is the only record of where we stopped
            if !traced {
                self.print_stack_trace();
            }
            self.backend.terminate();
            TrapOutcome::Terminated
        }
    }

    fn highlight(&self) -> bool
    {
        match self.config.color {
            ColorMode::Always => true,
            ColorMode::Never => false,
            ColorMode::Auto => self.backend.supports_color(),
        }
    }

    fn lock_output(&self) -> MutexGuard<'_, ()>
    {
        // A panic mid-write must not silence later diagnostics
        self.output.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl<B: Backend + fmt::Debug> fmt::Debug for Tripwire<B>
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result
    {
        f.debug_struct("Tripwire")
            .field("backend", &self.backend)
            .field("config", &self.config)
            .field("sites", &self.sites)
            .finish_non_exhaustive()
    }
}
