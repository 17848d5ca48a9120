//! First-row catalog parser.
//!
//! The first row of a data log that carries a catalog looks like
//!
//! ```text
//! still0000000000111110000000000;shake0000001010101010000000000;\n
//! ```
//!
//! Each `;`-terminated segment is an action name followed directly by its
//! 25-character storage-form glyph. The row is streamed twice through
//! [`LogBytes`]: once to count segments so the result is allocated exactly
//! once, and once to fill it. Neither pass reads past the first `\n` or the
//! log length it was given.

use alloc::{string::String, vec::Vec};

use super::Action;
use crate::utils::{
    controllers::{DataLog, LogBytes},
    glyph::{Glyph, GLYPH_CELLS},
};

/// Terminates one action segment.
pub const SEGMENT_DELIMITER: u8 = b';';
/// Terminates the catalog row.
pub const ROW_TERMINATOR: u8 = b'\n';

/// Number of `;` before the first newline within `[0, csv_len)`.
pub fn count_segments<L: DataLog + ?Sized>(
    log: &mut L,
    csv_len: usize,
) -> Result<usize, L::Error> {
    let mut count = 0;
    for byte in LogBytes::new(log, csv_len) {
        match byte? {
            SEGMENT_DELIMITER => count += 1,
            ROW_TERMINATOR => break,
            _ => {}
        }
    }
    Ok(count)
}

/// Parse the actions in the first row of `log`.
///
/// Segments shorter than a glyph are dropped, as is an unterminated segment
/// at the end of the row or of the log.
pub fn parse_first_row<L: DataLog + ?Sized>(
    log: &mut L,
    csv_len: usize,
) -> Result<Vec<Action>, L::Error> {
    let count = count_segments(log, csv_len)?;
    let mut actions = Vec::with_capacity(count);
    if count == 0 {
        return Ok(actions);
    }

    let mut segment = Vec::new();
    let mut segment_start = 0;
    let mut bytes = LogBytes::new(log, csv_len);
    while let Some(byte) = bytes.next() {
        match byte? {
            ROW_TERMINATOR => break,
            SEGMENT_DELIMITER => {
                match split_segment(&segment) {
                    Some(action) => actions.push(action),
                    None => tracing::warn!(
                        offset = segment_start,
                        len = segment.len(),
                        "dropping catalog segment shorter than a glyph"
                    ),
                }
                segment.clear();
                segment_start = bytes.position();
                if actions.len() == count {
                    break;
                }
            }
            other => segment.push(other),
        }
    }
    Ok(actions)
}

/// Split `<name><glyph>` into an action. The glyph is the last
/// [`GLYPH_CELLS`] bytes.
fn split_segment(segment: &[u8]) -> Option<Action> {
    let name_size = segment.len().checked_sub(GLYPH_CELLS)?;
    let (name, glyph) = segment.split_at(name_size);
    Some(Action::new(
        String::from_utf8_lossy(name),
        Glyph::from_storage(glyph),
    ))
}

/// Encode actions as a catalog row, the inverse of [`parse_first_row`].
///
/// Returns `None` if a name contains `;` or `\n`, which cannot be encoded.
pub fn encode_row(actions: &[Action]) -> Option<String> {
    let mut row = String::new();
    for action in actions {
        if action
            .name
            .bytes()
            .any(|b| b == SEGMENT_DELIMITER || b == ROW_TERMINATOR)
        {
            return None;
        }
        row.push_str(&action.name);
        for &cell in action.glyph.to_storage().iter() {
            row.push(char::from(cell));
        }
        row.push(char::from(SEGMENT_DELIMITER));
    }
    row.push(char::from(ROW_TERMINATOR));
    Some(row)
}
