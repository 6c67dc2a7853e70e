//! Stack trace capture.
//!
//! Frames are walked with the `backtrace` crate (which unwinds with the
//! platform's own machinery and reads DWARF/PDB symbols), capped at
//! [`MAX_FRAMES`], and names are demangled with `rustc-demangle` without the
//! hash suffix.
//!
//! Printing goes straight to the sink, one line per frame, without the
//! 256-byte line bound: long generic symbol names are common and worth keeping.

use core::ffi::c_void;
use core::fmt;

use smallvec::SmallVec;

use crate::sink::Sink;

/// Maximum number of frames captured.
pub const MAX_FRAMES: usize = 64;

/// Extra frames walked so the unwinder's and our own frames do not eat into
/// [`MAX_FRAMES`].
const INTERNAL_FRAMES: usize = 16;

/// Symbol prefixes of frames that belong to the capture machinery.
const INTERNAL_PREFIXES: [&str; 3] = ["backtrace::", "tripwire_core::", "tripwire_utils::"];

/// One captured stack frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame
{
    /// Instruction pointer (return address for every frame but the innermost).
    pub ip: usize,
    /// Demangled symbol name, if it could be resolved.
    pub symbol: Option<String>,
}

impl Frame
{
    /// Create a frame from an address and optional symbol name.
    pub fn new(ip: usize, symbol: Option<impl Into<String>>) -> Self
    {
        Self {
            ip,
            symbol: symbol.map(Into::into),
        }
    }
}

/// A captured call stack, innermost frame first.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StackTrace
{
    frames: SmallVec<[Frame; MAX_FRAMES]>,
}

impl StackTrace
{
    /// An empty trace (what targets without stack walking return).
    #[must_use]
    pub fn empty() -> Self
    {
        Self::default()
    }

    /// Capture the current thread's stack, starting at the first frame
    /// outside the diagnostics crates.
    ///
    /// Never fails: if the unwinder stops early or symbols are missing, the
    /// trace is simply shorter or has unnamed frames.
    #[must_use]
    pub fn capture() -> Self
    {
        let mut ips: SmallVec<[usize; MAX_FRAMES + INTERNAL_FRAMES]> = SmallVec::new();
        backtrace::trace(|frame| {
            ips.push(frame.ip() as usize);
            ips.len() < MAX_FRAMES + INTERNAL_FRAMES
        });

        let frames: Vec<Frame> = ips
            .into_iter()
            .map(|ip| Frame {
                ip,
                symbol: resolve_symbol(ip),
            })
            .collect();

        let skip = leading_internal_frames(&frames);
        frames.into_iter().skip(skip).collect()
    }

    /// The captured frames.
    #[must_use]
    pub fn frames(&self) -> &[Frame]
    {
        &self.frames
    }

    /// Number of frames.
    #[must_use]
    pub fn len(&self) -> usize
    {
        self.frames.len()
    }

    /// Whether no frames were captured.
    #[must_use]
    pub fn is_empty(&self) -> bool
    {
        self.frames.is_empty()
    }

    /// Write one line per frame to `sink`.
    pub fn write_to<S: Sink + ?Sized>(&self, sink: &S)
    {
        for (index, frame) in self.frames.iter().enumerate() {
            sink.emit(&format!("{}\n", FrameLine { index, frame }));
        }
    }
}

impl FromIterator<Frame> for StackTrace
{
    fn from_iter<I: IntoIterator<Item = Frame>>(iter: I) -> Self
    {
        Self {
            frames: iter.into_iter().take(MAX_FRAMES).collect(),
        }
    }
}

struct FrameLine<'a>
{
    index: usize,
    frame: &'a Frame,
}

impl fmt::Display for FrameLine<'_>
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result
    {
        write!(
            f,
            "{:>2}: {:#018x} - {}",
            self.index,
            self.frame.ip,
            self.frame.symbol.as_deref().unwrap_or("<unknown>")
        )
    }
}

/// Number of leading frames up to and including the last one inside the
/// capture machinery. Unresolved frames do not end the prefix.
fn leading_internal_frames(frames: &[Frame]) -> usize
{
    let mut skip = 0;
    for (index, frame) in frames.iter().enumerate() {
        match frame.symbol.as_deref() {
            Some(symbol) if is_internal(symbol) => skip = index + 1,
            Some(_) => break,
            None => {}
        }
    }
    skip
}

fn is_internal(symbol: &str) -> bool
{
    // Trait impls demangle as `<Type as Trait>::method`
    let path = symbol.trim_start_matches('<');
    INTERNAL_PREFIXES.iter().any(|prefix| path.starts_with(prefix))
}

fn resolve_symbol(ip: usize) -> Option<String>
{
    let mut name = None;
    backtrace::resolve(ip as *mut c_void, |symbol| {
        // Inlined frames resolve to several symbols; the first is the innermost
        if name.is_none() {
            name = symbol.name().and_then(|raw| raw.as_str()).map(demangle);
        }
    });
    name
}

/// Demangle a Rust symbol, dropping the hash suffix. Other names pass through.
#[must_use]
pub fn demangle(raw: &str) -> String
{
    format!("{:#}", rustc_demangle::demangle(raw))
}

#[cfg(test)]
mod tests
{
    use std::sync::Mutex;

    use super::*;

    #[derive(Default)]
    struct Lines(Mutex<Vec<String>>);

    impl Sink for Lines
    {
        fn emit(&self, text: &str)
        {
            self.0.lock().unwrap().push(text.to_string());
        }
    }

    #[test]
    fn test_capture_is_bounded()
    {
        let trace = StackTrace::capture();
        assert!(trace.len() <= MAX_FRAMES);
    }

    #[test]
    fn test_leading_internal_frames_skipped()
    {
        let frames = [
            Frame::new(0x1, Some("backtrace::backtrace::trace_unsynchronized")),
            Frame::new(0x2, None::<String>),
            Frame::new(0x3, Some("tripwire_core::trace::StackTrace::capture")),
            Frame::new(
                0x4,
                Some("<tripwire_core::platform::host::HostBackend as tripwire_core::platform::Backend>::capture_trace"),
            ),
            Frame::new(0x5, Some("tripwire_core::__private::check_failed")),
            Frame::new(0x6, Some("app::load")),
            Frame::new(0x7, Some("tripwire_core::global::dump_hex")),
        ];
        assert_eq!(leading_internal_frames(&frames), 5);
    }

    #[test]
    fn test_no_internal_frames_skips_nothing()
    {
        let frames = [Frame::new(0x1, Some("app::main")), Frame::new(0x2, Some("tripwire_core::x"))];
        assert_eq!(leading_internal_frames(&frames), 0);
        assert_eq!(leading_internal_frames(&[]), 0);
    }

    #[inline(never)]
    fn capture_from_here() -> StackTrace
    {
        StackTrace::capture()
    }

    #[test]
    fn test_capture_omits_capture_machinery()
    {
        let trace = capture_from_here();
        if let Some(first) = trace.frames().first().and_then(|frame| frame.symbol.as_deref()) {
            assert!(!first.starts_with("backtrace::"), "{first}");
            assert!(!first.contains("StackTrace::capture"), "{first}");
        }
    }

    #[test]
    fn test_from_iter_caps_frames()
    {
        let trace: StackTrace = (0..100).map(|ip| Frame::new(ip, None::<String>)).collect();
        assert_eq!(trace.len(), MAX_FRAMES);
    }

    #[test]
    fn test_write_to_prints_one_line_per_frame()
    {
        let trace: StackTrace = vec![
            Frame::new(0x1000, Some("app::main")),
            Frame::new(0x2000, None::<String>),
        ]
        .into_iter()
        .collect();

        let sink = Lines::default();
        trace.write_to(&sink);

        let lines = sink.0.lock().unwrap();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0], " 0: 0x0000000000001000 - app::main\n");
        assert_eq!(lines[1], " 1: 0x0000000000002000 - <unknown>\n");
    }

    #[test]
    fn test_empty_trace_writes_nothing()
    {
        let sink = Lines::default();
        StackTrace::empty().write_to(&sink);
        assert!(sink.0.lock().unwrap().is_empty());
    }

    #[test]
    fn test_demangle_strips_hash()
    {
        assert_eq!(demangle("_ZN4core3fmt5write17h0123456789abcdefE"), "core::fmt::write");
        assert_eq!(demangle("main"), "main");
    }
}
