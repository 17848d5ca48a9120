//! Collaborator interfaces consumed by the recording loop.
//!
//! The recorder never touches hardware directly. Each device it needs is a
//! trait here, with concrete bindings alongside:
//!
//! - `buttons`: edge-triggered buttons fed through an `embassy_sync` channel
//! - `imu`: ICM-42670 accelerometer on a shared I2C bus
//! - `log`: in-memory CSV data log and a bounded byte stream over any log
//!
//! Sleeps go through `embedded_hal::delay::DelayNs`.

pub mod buttons;
pub mod imu;
pub mod log;

use core::fmt::Debug;

use crate::utils::glyph::DisplayPattern;

pub use buttons::{ChannelButtons, BUTTON_CHANNEL};
pub use imu::{ImuAccelerometer, ImuError};
pub use log::{CsvLog, CsvLogError, LogBytes};

/// LED matrix. Fire-and-forget: nothing is reported back.
pub trait Display {
    /// Show a rendered 5×5 glyph until replaced.
    fn show_pattern(
        &mut self,
        pattern: &DisplayPattern,
    );
    /// Show a single character until replaced. Pacing is up to the caller.
    fn show_char(
        &mut self,
        c: char,
    );
    /// Scroll a short text message.
    fn scroll_text(
        &mut self,
        text: &str,
    );
}

/// Physical inputs. `AB` is the combined press reported by the device, `Logo`
/// is the touch logo used as the exit gesture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Button {
    A,
    B,
    AB,
    Logo,
}

impl Button {
    /// Number of buttons.
    pub const COUNT: usize = 4;
    /// Every button, in polling order.
    pub const ALL: [Button; Button::COUNT] = [Button::A, Button::B, Button::AB, Button::Logo];

    pub(crate) const fn index(self) -> usize {
        self as usize
    }
}

/// Edge-triggered button state. Debouncing is the implementor's job; each
/// press must be reported by `was_pressed` exactly once.
pub trait Buttons {
    fn was_pressed(
        &mut self,
        button: Button,
    ) -> bool;
}

/// Accelerometer axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    X,
    Y,
    Z,
}

/// Three-axis accelerometer returning raw signed readings (milli-g).
pub trait Accelerometer {
    type Error: Debug;

    /// Read a single axis.
    fn read_axis(
        &mut self,
        axis: Axis,
    ) -> Result<i32, Self::Error>;

    /// Read one `[x, y, z]` sample. Sensors that report the full vector in one
    /// transfer should override this so all three axes share an instant.
    fn read_sample(&mut self) -> Result<[i32; 3], Self::Error> {
        Ok([
            self.read_axis(Axis::X)?,
            self.read_axis(Axis::Y)?,
            self.read_axis(Axis::Z)?,
        ])
    }
}

/// Audio feedback played alongside a recording.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundCue {
    RecordingStarted,
    RecordingFinished,
}

impl SoundCue {
    /// Encoded sound expression understood by the device synthesizer.
    pub const fn expression(self) -> &'static str {
        match self {
            Self::RecordingStarted => {
                "002373041050001000392300001023010802050005000000000000000000000000000000"
            }
            Self::RecordingFinished => {
                "010230849100001000000100000000012800000100240000000000000000000000000000"
            }
        }
    }
}

/// Speaker. `play_async` returns immediately; completion is never awaited.
pub trait Sound {
    fn play_async(
        &mut self,
        cue: SoundCue,
    );
}

/// Append-only, single-writer persistent log with a CSV-like text encoding.
///
/// Rows are written with `begin_row` / `log_field`* / `end_row`. Reads address
/// the encoded bytes by offset so a reader never has to hold the whole log.
pub trait DataLog {
    type Error: Debug;

    /// `true` once the backing storage cannot accept more rows.
    fn is_full(&mut self) -> bool;

    /// Open a new row. Fails if a row is already open.
    fn begin_row(&mut self) -> Result<(), Self::Error>;

    /// Append one field to the open row. An error leaves the row open; the
    /// writer is expected to call `discard_row` before starting another.
    fn log_field(
        &mut self,
        name: &str,
        value: &str,
    ) -> Result<(), Self::Error>;

    /// Close the open row and persist it. The row is closed even on error.
    fn end_row(&mut self) -> Result<(), Self::Error>;

    /// Drop the open row without persisting it. No-op if no row is open.
    fn discard_row(&mut self);

    /// Encoded length of the log in bytes.
    fn length(&mut self) -> Result<usize, Self::Error>;

    /// Copy bytes starting at `offset` into `buf`, returning how many were
    /// copied. Returns `0` at or past the end of the log.
    fn read_bytes(
        &mut self,
        offset: usize,
        buf: &mut [u8],
    ) -> Result<usize, Self::Error>;
}
