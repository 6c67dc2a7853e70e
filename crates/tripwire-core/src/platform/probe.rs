//! Environment probes for the host process.
//!
//! Each probe answers a yes/no question with a safe fallback: when the
//! platform gives no signal or the query fails, the answer is "no". Failures
//! are logged at `debug` level and never surfaced.

use std::io;

use crossterm::event::{Event, KeyCode, KeyEventKind};
use crossterm::tty::IsTty;

use crate::error::{ProbeError, ProbeResult};

/// Whether standard input is connected to a terminal.
#[must_use]
pub fn is_stdin_terminal() -> bool
{
    io::stdin().is_tty()
}

/// Whether a debugger is attached to this process.
#[must_use]
pub fn is_debugger_attached() -> bool
{
    match debugger_attached() {
        Ok(attached) => attached,
        Err(error) => {
            tracing::debug!(%error, "debugger probe failed, assuming none attached");
            false
        }
    }
}

#[cfg(any(target_os = "linux", target_os = "android"))]
fn debugger_attached() -> ProbeResult<bool>
{
    let status = std::fs::read_to_string("/proc/self/status")?;
    Ok(parse_tracer_pid(&status)? != 0)
}

#[cfg(target_os = "macos")]
fn debugger_attached() -> ProbeResult<bool>
{
    use libproc::libproc::bsd_info::BSDInfo;
    use libproc::libproc::proc_pid::pidinfo;

    /// `PROC_FLAG_TRACED` from `<sys/proc_info.h>` (mirrors `P_TRACED`)
    const PROC_FLAG_TRACED: u32 = 0x2;

    let pid = i32::try_from(std::process::id()).map_err(|e| ProbeError::ProcessInfo(e.to_string()))?;
    let info = pidinfo::<BSDInfo>(pid, 0).map_err(ProbeError::ProcessInfo)?;
    Ok(info.pbi_flags & PROC_FLAG_TRACED != 0)
}

#[cfg(windows)]
fn debugger_attached() -> ProbeResult<bool>
{
    // SAFETY: no arguments, no preconditions
    Ok(unsafe { super::ffi::IsDebuggerPresent() } != 0)
}

#[cfg(not(any(target_os = "linux", target_os = "android", target_os = "macos", windows)))]
fn debugger_attached() -> ProbeResult<bool>
{
    Ok(false)
}

/// Extract the `TracerPid` field from the contents of `/proc/<pid>/status`.
///
/// A non-zero value is the PID of the process tracing us.
///
/// ## Errors
///
/// [`ProbeError::MalformedStatus`] if the field is missing or not a number.
pub fn parse_tracer_pid(status: &str) -> ProbeResult<u32>
{
    let value = status
        .lines()
        .find_map(|line| line.strip_prefix("TracerPid:"))
        .ok_or_else(|| ProbeError::MalformedStatus("no TracerPid field".to_string()))?
        .trim();

    value
        .parse()
        .map_err(|_| ProbeError::MalformedStatus(format!("TracerPid {value:?}")))
}

/// Discard pending input, then block until one character arrives on stdin.
///
/// Purging first means a key pressed before the prompt appeared cannot be
/// taken as the answer. Returns `None` at end of input or on error.
#[cfg(unix)]
#[must_use]
pub fn read_interactive_char() -> Option<char>
{
    // SAFETY: tcflush only discards input queued by the kernel; fails harmlessly
    // with ENOTTY when stdin is not a terminal
    unsafe {
        libc::tcflush(libc::STDIN_FILENO, libc::TCIFLUSH);
    }

    // std's Stdin buffers whole lines; reading the descriptor directly keeps
    // the rest of the line from leaking into a later prompt
    let mut byte = 0u8;
    loop {
        // SAFETY: reading at most one byte into a valid, writable u8
        let n = unsafe { libc::read(libc::STDIN_FILENO, (&mut byte as *mut u8).cast(), 1) };
        match n {
            1 => return Some(char::from(byte)),
            0 => return None,
            _ if io::Error::last_os_error().kind() == io::ErrorKind::Interrupted => continue,
            _ => {
                tracing::debug!(error = %io::Error::last_os_error(), "reading stdin failed");
                return None;
            }
        }
    }
}

/// Discard pending input, then block until one key is pressed.
///
/// The console is read as key events in raw mode. A line-mode read would
/// leave the rest of the line (`\r\n`) buffered, and the next prompt would
/// take it as its answer. Returns `None` on error.
#[cfg(windows)]
#[must_use]
pub fn read_interactive_char() -> Option<char>
{
    use std::time::Duration;

    use crossterm::event;

    let _raw = match RawModeGuard::enable() {
        Ok(guard) => guard,
        Err(error) => {
            tracing::debug!(%error, "enabling raw console mode failed");
            return None;
        }
    };

    while matches!(event::poll(Duration::ZERO), Ok(true)) {
        if event::read().is_err() {
            break;
        }
    }
    answer_from_events(std::iter::repeat_with(event::read))
}

/// Raw console mode for the lifetime of the guard.
#[cfg(windows)]
struct RawModeGuard;

#[cfg(windows)]
impl RawModeGuard
{
    fn enable() -> io::Result<Self>
    {
        crossterm::terminal::enable_raw_mode()?;
        Ok(Self)
    }
}

#[cfg(windows)]
impl Drop for RawModeGuard
{
    fn drop(&mut self)
    {
        if let Err(error) = crossterm::terminal::disable_raw_mode() {
            tracing::debug!(%error, "restoring console mode failed");
        }
    }
}

/// The character of the first key press in `events`.
///
/// Key releases, repeats, mouse and resize events are skipped. Enter reads
/// as `'\n'`; other non-character keys and read errors give `None`.
pub fn answer_from_events<I>(events: I) -> Option<char>
where
    I: IntoIterator<Item = io::Result<Event>>,
{
    for event in events {
        match event {
            Ok(Event::Key(key)) if key.kind == KeyEventKind::Press => {
                return match key.code {
                    KeyCode::Char(c) => Some(c),
                    KeyCode::Enter => Some('\n'),
                    _ => None,
                };
            }
            Ok(_) => {}
            Err(error) => {
                tracing::debug!(%error, "reading terminal input failed");
                return None;
            }
        }
    }
    None
}

/// Block until one character arrives on stdin.
#[cfg(not(any(unix, windows)))]
#[must_use]
pub fn read_interactive_char() -> Option<char>
{
    read_byte()
}

#[cfg(not(any(unix, windows)))]
fn read_byte() -> Option<char>
{
    use std::io::Read;

    let mut byte = [0u8; 1];
    match io::stdin().read(&mut byte) {
        Ok(1) => Some(char::from(byte[0])),
        Ok(_) => None,
        Err(error) => {
            tracing::debug!(%error, "reading stdin failed");
            None
        }
    }
}
