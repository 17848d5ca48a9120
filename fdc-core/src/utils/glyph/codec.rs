//! Glyph storage/display codec.
//!
//! Storage form is exactly [`GLYPH_CELLS`] bytes of `'1'` (on) or `'0'` (off).
//! Display form is the text consumed by the LED matrix driver:
//!
//! ```text
//! 000,000,000,000,000
//! 000,070,000,070,000
//! 070,000,070,000,070
//! 000,000,000,000,000
//! 000,000,000,000,000
//! ```
//!
//! Only storage → display is supported; storage form is authored once per
//! action and never reconstructed from pixels.

use core::fmt;

/// Cells along one side of the matrix.
pub const GLYPH_SIDE: usize = 5;
/// Total cells in a glyph.
pub const GLYPH_CELLS: usize = GLYPH_SIDE * GLYPH_SIDE;
/// Bytes per cell in display form: three intensity digits plus a separator.
const CELL_WIDTH: usize = 4;
/// Length of a rendered display pattern.
pub const DISPLAY_LEN: usize = GLYPH_CELLS * CELL_WIDTH;

const BLANK: [u8; DISPLAY_LEN] = blank_template();

const fn blank_template() -> [u8; DISPLAY_LEN] {
    let mut out = [0u8; DISPLAY_LEN];
    let mut cell = 0;
    while cell < GLYPH_CELLS {
        let at = cell * CELL_WIDTH;
        out[at] = b'0';
        out[at + 1] = b'0';
        out[at + 2] = b'0';
        out[at + 3] = if cell % GLYPH_SIDE == GLYPH_SIDE - 1 {
            b'\n'
        } else {
            b','
        };
        cell += 1;
    }
    out
}

/// A 5×5 on/off bitmap in row-major order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Glyph {
    cells: [bool; GLYPH_CELLS],
}

impl Glyph {
    /// Decode a storage-form glyph.
    ///
    /// Only `b'1'` turns a cell on. Input shorter than [`GLYPH_CELLS`] leaves
    /// the remaining cells off and extra bytes are ignored; a short glyph is a
    /// sign of a corrupted log, not a reason to fail.
    pub const fn from_storage(encoded: &[u8]) -> Self {
        let mut cells = [false; GLYPH_CELLS];
        let mut i = 0;
        while i < GLYPH_CELLS && i < encoded.len() {
            cells[i] = encoded[i] == b'1';
            i += 1;
        }
        Self { cells }
    }

    /// Strict variant of [`Glyph::from_storage`]: exactly 25 `'0'`/`'1'` bytes.
    pub fn parse_storage(encoded: &str) -> Option<Self> {
        let bytes = encoded.as_bytes();
        if bytes.len() != GLYPH_CELLS || bytes.iter().any(|b| !matches!(b, b'0' | b'1')) {
            return None;
        }
        Some(Self::from_storage(bytes))
    }

    /// `true` if the LED at `row`, `col` is lit.
    pub fn is_on(
        &self,
        row: usize,
        col: usize,
    ) -> bool {
        row < GLYPH_SIDE && col < GLYPH_SIDE && self.cells[row * GLYPH_SIDE + col]
    }

    /// Storage form of this glyph.
    pub fn to_storage(&self) -> [u8; GLYPH_CELLS] {
        let mut out = [b'0'; GLYPH_CELLS];
        for (byte, &on) in out.iter_mut().zip(self.cells.iter()) {
            if on {
                *byte = b'1';
            }
        }
        out
    }

    /// Render this glyph for the LED matrix.
    pub fn to_display(&self) -> DisplayPattern {
        let mut pattern = DisplayPattern::blank();
        for (cell, &on) in self.cells.iter().enumerate() {
            if on {
                pattern.0[cell * CELL_WIDTH + 1] = b'7';
            }
        }
        pattern
    }
}

impl fmt::Display for Glyph {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        for &on in self.cells.iter() {
            f.write_str(if on { "1" } else { "0" })?;
        }
        Ok(())
    }
}

/// Display-form glyph held in a fixed buffer.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct DisplayPattern([u8; DISPLAY_LEN]);

impl DisplayPattern {
    /// All cells at the "off" intensity.
    pub const fn blank() -> Self {
        Self(BLANK)
    }

    /// Raw display-form bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Display form as text, as handed to the LED matrix.
    pub fn as_str(&self) -> &str {
        // Only ASCII digits, commas and newlines are ever written.
        core::str::from_utf8(&self.0).unwrap_or_default()
    }
}

impl fmt::Debug for DisplayPattern {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.debug_tuple("DisplayPattern").field(&self.as_str()).finish()
    }
}

/// Decode a storage-form glyph straight into display form.
pub fn decode_display(storage: &[u8]) -> DisplayPattern {
    Glyph::from_storage(storage).to_display()
}

#[cfg(test)]
mod tests {
    use super::*;

    const SHAKE_DISPLAY: &str = "000,000,000,000,000\n\
                                 000,070,000,070,000\n\
                                 070,000,070,000,070\n\
                                 000,000,000,000,000\n\
                                 000,000,000,000,000\n";

    #[test]
    fn test_blank_pattern_is_all_off() {
        let blank = DisplayPattern::blank();
        assert_eq!(blank.as_str().len(), DISPLAY_LEN);
        assert_eq!(blank.as_str().matches("000").count(), GLYPH_CELLS);
        assert_eq!(blank.as_str().lines().count(), GLYPH_SIDE);
    }

    #[test]
    fn test_decode_display_shake() {
        let pattern = decode_display(b"0000001010101010000000000");
        assert_eq!(pattern.as_str(), SHAKE_DISPLAY);
    }

    #[test]
    fn test_short_storage_leaves_tail_off() {
        let pattern = decode_display(b"11111");
        let rows: [&str; GLYPH_SIDE] = [
            "070,070,070,070,070",
            "000,000,000,000,000",
            "000,000,000,000,000",
            "000,000,000,000,000",
            "000,000,000,000,000",
        ];
        for (line, expected) in pattern.as_str().lines().zip(rows.iter()) {
            assert_eq!(line, *expected);
        }
    }

    #[test]
    fn test_only_one_turns_cell_on() {
        let glyph = Glyph::from_storage(b"1x2 10000000000000000000001");
        assert!(glyph.is_on(0, 0));
        assert!(!glyph.is_on(0, 1));
        assert!(!glyph.is_on(0, 2));
        assert!(glyph.is_on(0, 4));
        assert!(!glyph.is_on(4, 4));
        assert!(!glyph.is_on(5, 0));
    }

    #[test]
    fn test_storage_round_trip_matches_display() {
        let storage = b"1000101010001000101010001";
        let glyph = Glyph::from_storage(storage);
        assert_eq!(&glyph.to_storage(), storage);
        for (row, line) in glyph.to_display().as_str().lines().enumerate() {
            for (col, value) in line.split(',').enumerate() {
                let on = glyph.is_on(row, col);
                assert_eq!(value, if on { "070" } else { "000" });
            }
        }
    }

    #[test]
    fn test_parse_storage_rejects_bad_input() {
        assert!(Glyph::parse_storage("0101").is_none());
        assert!(Glyph::parse_storage("000000000000000000000000a").is_none());
        assert_eq!(
            Glyph::parse_storage("0000000000111110000000000"),
            Some(Glyph::from_storage(b"0000000000111110000000000"))
        );
    }
}
