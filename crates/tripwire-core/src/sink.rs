//! # Output Sinks
//!
//! A [`Sink`] receives finished text and writes it verbatim to wherever
//! diagnostics go on the current target: stderr, the debugger's log channel,
//! a platform log facility, a console device.
//!
//! Highlighting is a scoped resource: [`HighlightGuard`] switches it on and
//! restores the previous attribute when dropped, including while unwinding.

/// Destination for diagnostic text.
///
/// Implementations write `text` exactly as given (no newline is added) and
/// flush immediately. Writes cannot fail observably; errors are dropped.
pub trait Sink: Send + Sync
{
    /// Write `text` verbatim.
    fn emit(&self, text: &str);

    /// Switch red highlighting on, or restore the previous attribute.
    ///
    /// The default does nothing, for destinations without color.
    fn set_highlight(&self, _on: bool) {}

    /// Whether highlighting would be visible (used by `ColorMode::Auto`).
    fn supports_color(&self) -> bool
    {
        false
    }
}

impl<S: Sink + ?Sized> Sink for &S
{
    fn emit(&self, text: &str)
    {
        (**self).emit(text);
    }

    fn set_highlight(&self, on: bool)
    {
        (**self).set_highlight(on);
    }

    fn supports_color(&self) -> bool
    {
        (**self).supports_color()
    }
}

/// RAII guard that highlights a sink and restores it when dropped.
///
/// ## Example
///
/// ```rust
/// use tripwire_core::{HighlightGuard, Sink};
///
/// struct Stderr;
/// impl Sink for Stderr
/// {
///     fn emit(&self, text: &str)
///     {
///         eprint!("{text}");
///     }
/// }
///
/// let sink = Stderr;
/// {
///     let _red = HighlightGuard::new(&sink, true);
///     sink.emit("something went wrong\n");
/// } // previous attribute restored here
/// ```
pub struct HighlightGuard<'a, S: Sink + ?Sized>
{
    sink: &'a S,
    active: bool,
}

impl<'a, S: Sink + ?Sized> HighlightGuard<'a, S>
{
    /// Highlight `sink` if `enabled`; a disabled guard does nothing at all.
    pub fn new(sink: &'a S, enabled: bool) -> Self
    {
        if enabled {
            sink.set_highlight(true);
        }
        Self { sink, active: enabled }
    }

    /// Whether this guard changed the sink's attribute.
    #[must_use]
    pub const fn is_active(&self) -> bool
    {
        self.active
    }
}

impl<S: Sink + ?Sized> Drop for HighlightGuard<'_, S>
{
    fn drop(&mut self)
    {
        if self.active {
            self.sink.set_highlight(false);
        }
    }
}
