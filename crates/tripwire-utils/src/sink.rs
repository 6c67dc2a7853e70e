//! Diagnostic output routed through `tracing`.

use std::sync::atomic::{AtomicBool, Ordering};

use tripwire_core::{emitter_tag, Backend, HaltPolicy, HostBackend, Sink, StackTrace};

/// Target of the events produced by [`TracingSink`].
pub const TARGET: &str = "tripwire";

/// A [`Sink`] that turns each emitted line into a `tracing` event.
///
/// Events use target [`TARGET`] at level `INFO` and carry the current emitter
/// tag in a `tag` field. Highlighted lines are raised to `ERROR` instead of
/// being colored; the subscriber owns styling.
///
/// ## Example
///
/// ```rust
/// use tripwire_core::StackTrace;
/// use tripwire_utils::TracingSink;
///
/// StackTrace::capture().write_to(&TracingSink::new());
/// ```
#[derive(Debug, Default)]
pub struct TracingSink
{
    highlighted: AtomicBool,
}

impl TracingSink
{
    /// A sink with highlighting off.
    #[must_use]
    pub const fn new() -> Self
    {
        Self {
            highlighted: AtomicBool::new(false),
        }
    }
}

impl Sink for TracingSink
{
    fn emit(&self, text: &str)
    {
        let message = text.trim_end_matches('\n');
        if message.is_empty() {
            return;
        }
        let tag = emitter_tag();
        if self.highlighted.load(Ordering::Relaxed) {
            tracing::error!(target: TARGET, tag = %tag, "{message}");
        } else {
            tracing::info!(target: TARGET, tag = %tag, "{message}");
        }
    }

    fn set_highlight(&self, on: bool)
    {
        self.highlighted.store(on, Ordering::Relaxed);
    }

    fn supports_color(&self) -> bool
    {
        true
    }
}

/// The host backend with its output redirected to [`TracingSink`].
///
/// Probes, stack capture and halting behave exactly as [`HostBackend`].
///
/// ```rust,no_run
/// use tripwire_core::Tripwire;
/// use tripwire_utils::sink::TracingBackend;
///
/// let tripwire = Tripwire::new(TracingBackend::new());
/// tripwire.log_error_line(format_args!("cache miss for {}", "user:42"));
/// ```
#[derive(Debug, Default)]
pub struct TracingBackend
{
    sink: TracingSink,
    host: HostBackend,
}

impl TracingBackend
{
    /// Create a backend that logs through `tracing`.
    #[must_use]
    pub const fn new() -> Self
    {
        Self {
            sink: TracingSink::new(),
            host: HostBackend::new(),
        }
    }
}

impl Sink for TracingBackend
{
    fn emit(&self, text: &str)
    {
        self.sink.emit(text);
    }

    fn set_highlight(&self, on: bool)
    {
        self.sink.set_highlight(on);
    }

    fn supports_color(&self) -> bool
    {
        self.sink.supports_color()
    }
}

impl Backend for TracingBackend
{
    fn is_stdin_terminal(&self) -> bool
    {
        self.host.is_stdin_terminal()
    }

    fn is_debugger_attached(&self) -> bool
    {
        self.host.is_debugger_attached()
    }

    fn read_interactive_char(&self) -> Option<char>
    {
        self.host.read_interactive_char()
    }

    fn prompt(&self, text: &str)
    {
        // Questions go to the console, not into the log
        self.host.prompt(text);
    }

    fn capture_trace(&self) -> StackTrace
    {
        self.host.capture_trace()
    }

    fn has_trap_instruction(&self) -> bool
    {
        self.host.has_trap_instruction()
    }

    fn debug_trap(&self)
    {
        self.host.debug_trap();
    }

    fn terminate(&self)
    {
        self.host.terminate();
    }

    fn halt_policy(&self) -> HaltPolicy
    {
        self.host.halt_policy()
    }
}
