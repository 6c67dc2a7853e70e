//! # Bounded Line Formatting
//!
//! Every diagnostic message is rendered into a fixed-size, stack-allocated
//! buffer before it reaches a sink. Rendering never allocates and never fails:
//!
//! - Output is cut at `N - 2` bytes, on a UTF-8 character boundary
//! - A `\n` is appended unless the text already ends with one
//! - One byte is always left for a terminator, so `len() <= N - 1`
//! - Empty output yields `None` and callers skip the sink entirely
//!
//! ## Example
//!
//! ```rust
//! use tripwire_core::format_line;
//!
//! let line = format_line(format_args!("Hello {}", "world")).unwrap();
//! assert_eq!(line.as_str(), "Hello world\n");
//!
//! assert!(format_line(format_args!("{}", "")).is_none());
//! ```

use core::fmt::{self, Write};

/// Default capacity of a formatted line, terminator included.
pub const LINE_CAPACITY: usize = 256;

/// A formatted, newline-terminated line held on the stack.
#[derive(Clone)]
pub struct Line<const N: usize = LINE_CAPACITY>
{
    buf: [u8; N],
    len: usize,
}

impl<const N: usize> Line<N>
{
    /// Render `args` into a new line.
    ///
    /// Returns `None` if the arguments render to nothing.
    #[must_use]
    pub fn format(args: fmt::Arguments<'_>) -> Option<Self>
    {
        debug_assert!(N >= 2, "a line needs room for a newline and a terminator");

        let mut line = Self { buf: [0; N], len: 0 };
        let mut writer = Truncating {
            buf: &mut line.buf,
            len: 0,
            limit: N.saturating_sub(2),
            full: false,
        };
        // A Display impl returning Err leaves whatever it wrote so far; keep it.
        let _ = writer.write_fmt(args);
        let mut len = writer.len;

        if len == 0 {
            return None;
        }
        if line.buf[len - 1] != b'\n' {
            line.buf[len] = b'\n';
            len += 1;
        }
        line.buf[len] = 0;
        line.len = len;
        Some(line)
    }

    /// The line text, trailing newline included.
    #[must_use]
    pub fn as_str(&self) -> &str
    {
        // Only whole characters are ever copied in
        core::str::from_utf8(&self.buf[..self.len]).unwrap_or_default()
    }

    /// Length in bytes, trailing newline included.
    #[must_use]
    pub const fn len(&self) -> usize
    {
        self.len
    }

    /// Always `false`: empty renderings never produce a `Line`.
    #[must_use]
    pub const fn is_empty(&self) -> bool
    {
        self.len == 0
    }

    /// Total buffer capacity, terminator included.
    #[must_use]
    pub const fn capacity(&self) -> usize
    {
        N
    }
}

impl<const N: usize> fmt::Debug for Line<N>
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result
    {
        f.debug_tuple("Line").field(&self.as_str()).finish()
    }
}

impl<const N: usize> fmt::Display for Line<N>
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result
    {
        f.write_str(self.as_str())
    }
}

impl<const N: usize> AsRef<str> for Line<N>
{
    fn as_ref(&self) -> &str
    {
        self.as_str()
    }
}

/// Render `args` into a [`LINE_CAPACITY`] line.
///
/// See the [module documentation](self) for the truncation rules.
#[must_use]
pub fn format_line(args: fmt::Arguments<'_>) -> Option<Line>
{
    Line::format(args)
}

/// `fmt::Write` adapter that silently drops whatever does not fit.
struct Truncating<'a>
{
    buf: &'a mut [u8],
    len: usize,
    limit: usize,
    full: bool,
}

impl Write for Truncating<'_>
{
    fn write_str(&mut self, s: &str) -> fmt::Result
    {
        if self.full {
            return Ok(());
        }

        let room = self.limit - self.len;
        let end = if s.len() <= room {
            s.len()
        } else {
            // Once anything is cut, later pieces must not be appended after the gap
            self.full = true;
            let mut end = room;
            while !s.is_char_boundary(end) {
                end -= 1;
            }
            end
        };

        self.buf[self.len..self.len + end].copy_from_slice(&s.as_bytes()[..end]);
        self.len += end;
        Ok(())
    }
}
