//! Native backend for hosted targets.

use std::io;

use crossterm::style::{Color, ResetColor, SetForegroundColor};
use crossterm::tty::IsTty;

use super::{probe, Backend};
use crate::sink::Sink;
use crate::trace::StackTrace;

/// Whether this architecture has a trap instruction we know how to emit.
const HAS_TRAP_INSTRUCTION: bool = cfg!(any(
    target_arch = "x86",
    target_arch = "x86_64",
    target_arch = "aarch64",
    target_arch = "riscv32",
    target_arch = "riscv64"
));

/// Backend for the platform this crate was compiled for.
///
/// ## Output
///
/// - **Android**: `__android_log_write` at info priority, tagged with the
///   emitter tag
/// - **Windows**: `OutputDebugStringA` while a debugger is attached,
///   otherwise stderr
/// - **Everything else**: stderr, flushed after every write
///
/// Highlighting uses `crossterm`: ANSI escapes, or console attributes on
/// legacy Windows consoles.
#[derive(Debug, Default, Clone, Copy)]
pub struct HostBackend;

impl HostBackend
{
    /// Create the host backend.
    #[must_use]
    pub const fn new() -> Self
    {
        Self
    }
}

impl Sink for HostBackend
{
    fn emit(&self, text: &str)
    {
        write_platform(text);
    }

    fn set_highlight(&self, on: bool)
    {
        let mut stderr = io::stderr();
        let result = if on {
            crossterm::execute!(stderr, SetForegroundColor(Color::Red))
        } else {
            crossterm::execute!(stderr, ResetColor)
        };
        if let Err(error) = result {
            tracing::debug!(%error, "changing terminal color failed");
        }
    }

    fn supports_color(&self) -> bool
    {
        !cfg!(target_os = "android") && !routes_to_debugger() && io::stderr().is_tty()
    }
}

impl Backend for HostBackend
{
    fn is_stdin_terminal(&self) -> bool
    {
        probe::is_stdin_terminal()
    }

    fn is_debugger_attached(&self) -> bool
    {
        probe::is_debugger_attached()
    }

    fn read_interactive_char(&self) -> Option<char>
    {
        probe::read_interactive_char()
    }

    fn prompt(&self, text: &str)
    {
        // Stays on the console even while log lines go to the debugger
        #[cfg(not(target_os = "android"))]
        write_stderr(text);
        #[cfg(target_os = "android")]
        self.emit(text);
    }

    fn capture_trace(&self) -> StackTrace
    {
        StackTrace::capture()
    }

    fn has_trap_instruction(&self) -> bool
    {
        HAS_TRAP_INSTRUCTION
    }

    fn debug_trap(&self)
    {
        tracing::debug!("handing control to the debugger");

        // SAFETY: a breakpoint instruction touches neither memory nor stack; with
        // a debugger attached it stops here and may resume after the instruction
        #[cfg(any(target_arch = "x86", target_arch = "x86_64"))]
        unsafe {
            core::arch::asm!("int3", options(nomem, nostack));
        }
        #[cfg(target_arch = "aarch64")]
        unsafe {
            core::arch::asm!("brk #0xf000", options(nomem, nostack));
        }
        #[cfg(any(target_arch = "riscv32", target_arch = "riscv64"))]
        unsafe {
            core::arch::asm!("ebreak", options(nomem, nostack));
        }
        #[cfg(not(any(
            target_arch = "x86",
            target_arch = "x86_64",
            target_arch = "aarch64",
            target_arch = "riscv32",
            target_arch = "riscv64"
        )))]
        self.terminate();
    }

    fn terminate(&self)
    {
        tracing::error!("terminating process");
        std::process::abort();
    }
}

/// Whether output currently goes to the debugger instead of the console.
fn routes_to_debugger() -> bool
{
    cfg!(windows) && probe::is_debugger_attached()
}

#[cfg(target_os = "android")]
fn write_platform(text: &str)
{
    use super::ffi;

    let tag = c_string(&crate::tag::emitter_tag());
    let text = c_string(text);
    // SAFETY: both pointers are valid NUL-terminated strings for the call
    unsafe {
        ffi::__android_log_write(ffi::ANDROID_LOG_INFO, tag.as_ptr(), text.as_ptr());
    }
}

#[cfg(windows)]
fn write_platform(text: &str)
{
    if routes_to_debugger() {
        let text = c_string(text);
        // SAFETY: valid NUL-terminated string for the duration of the call
        unsafe {
            super::ffi::OutputDebugStringA(text.as_ptr());
        }
    } else {
        write_stderr(text);
    }
}

#[cfg(not(any(target_os = "android", windows)))]
fn write_platform(text: &str)
{
    write_stderr(text);
}

#[cfg(not(target_os = "android"))]
fn write_stderr(text: &str)
{
    use std::io::Write;

    let mut stderr = io::stderr().lock();
    // Nowhere left to report a failed stderr write
    let _ = stderr.write_all(text.as_bytes());
    let _ = stderr.flush();
}

/// C string for the platform log APIs, cut at the first interior NUL.
#[cfg(any(target_os = "android", windows))]
fn c_string(text: &str) -> std::ffi::CString
{
    std::ffi::CString::new(text).unwrap_or_else(|error| {
        let end = error.nul_position();
        std::ffi::CString::new(&text.as_bytes()[..end]).unwrap_or_default()
    })
}
