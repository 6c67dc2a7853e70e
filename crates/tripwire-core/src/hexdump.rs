//! Hex + ASCII dumps.
//!
//! One row per 16 bytes:
//!
//! ```text
//! 0x7ffd5c3e1a40 41 41 41 41 41 41 41 41 41 41 41 41 41 41 41 41 AAAAAAAAAAAAAAAA
//! 0x7ffd5c3e1a50 00 00 00 00                                     ....
//! ```
//!
//! The address is that of the row's first byte. Hex cells past the end of the
//! buffer are blank; the ASCII column only covers the bytes that exist.

use core::fmt::{self, Write};

/// Bytes per dump row.
pub const ROW_BYTES: usize = 16;

/// One row of a hex dump, formatted lazily through `Display`.
#[derive(Debug, Clone, Copy)]
pub struct HexRow<'a>
{
    address: usize,
    bytes: &'a [u8],
}

impl<'a> HexRow<'a>
{
    /// A row starting at `address` covering `bytes` (at most [`ROW_BYTES`] are shown).
    #[must_use]
    pub fn new(address: usize, bytes: &'a [u8]) -> Self
    {
        Self {
            address,
            bytes: &bytes[..bytes.len().min(ROW_BYTES)],
        }
    }

    /// Address of the first byte.
    #[must_use]
    pub const fn address(&self) -> usize
    {
        self.address
    }

    /// The bytes shown in this row.
    #[must_use]
    pub const fn bytes(&self) -> &'a [u8]
    {
        self.bytes
    }
}

impl fmt::Display for HexRow<'_>
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result
    {
        write!(f, "{:#x} ", self.address)?;
        for cell in 0..ROW_BYTES {
            match self.bytes.get(cell) {
                Some(byte) => write!(f, "{byte:02x} ")?,
                None => f.write_str("   ")?,
            }
        }
        for &byte in self.bytes {
            f.write_char(printable(byte))?;
        }
        Ok(())
    }
}

/// Split `bytes` into dump rows addressed by their location in memory.
pub fn rows(bytes: &[u8]) -> impl Iterator<Item = HexRow<'_>>
{
    let base = bytes.as_ptr() as usize;
    bytes
        .chunks(ROW_BYTES)
        .enumerate()
        .map(move |(index, chunk)| HexRow::new(base + index * ROW_BYTES, chunk))
}

/// Render a single row to a `String`.
#[must_use]
pub fn format_hex_row(address: usize, bytes: &[u8]) -> String
{
    HexRow::new(address, bytes).to_string()
}

/// Printable ASCII (space through tilde) as itself, anything else as `.`.
#[must_use]
pub const fn printable(byte: u8) -> char
{
    if byte.is_ascii_graphic() || byte == b' ' {
        byte as char
    } else {
        '.'
    }
}
