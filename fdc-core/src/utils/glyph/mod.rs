//! 5×5 monochrome glyphs.
//!
//! A glyph is stored in the data log as 25 `'1'`/`'0'` characters (row-major)
//! and shown on the LED matrix as five rows of comma-separated intensities.

pub mod codec;

pub use codec::{decode_display, DisplayPattern, Glyph, DISPLAY_LEN, GLYPH_CELLS, GLYPH_SIDE};

/// Default catalog glyph for the "still" action: a flat line.
pub const STILL: Glyph = Glyph::from_storage(b"0000000000111110000000000");
/// Default catalog glyph for the "shake" action: a zig-zag.
pub const SHAKE: Glyph = Glyph::from_storage(b"0000001010101010000000000");
/// Hollow square shown right before sampling starts.
pub const GO: Glyph = Glyph::from_storage(b"1111110001100011000111111");
/// Filled centre block shown while samples are being written.
pub const RECORDING: Glyph = Glyph::from_storage(b"0000001110011100111000000");
/// Cross shown once the operator leaves the recording loop.
pub const EXIT: Glyph = Glyph::from_storage(b"1000101010001000101010001");
