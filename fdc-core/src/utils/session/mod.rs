//! Recording session state machine.
//!
//! ```text
//!  IDLE ──[A / B]──▶ IDLE (selection moves)
//!    │
//!  [A+B]──▶ COUNTDOWN ──▶ RECORDING ──[sample_size rows]──▶ IDLE
//!    │
//!  [logo, catalog from log]──▶ EXITED
//!
//!  any state ──[log full]──▶ CATALOG_FULL (selection still browsable)
//! ```
//!
//! The machine is advanced one polling iteration at a time with
//! [`Recorder::tick`]; [`Recorder::run`] is the firmware's endless loop.

pub mod config;
pub mod countdown;
pub mod recorder;

pub use config::RecorderConfig;
pub use countdown::run_countdown;
pub use recorder::{Peripherals, Recorder, Session, FULL_INDICATOR, LABEL_SENTINEL};

/// Where the recorder is in its cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecorderState {
    /// Waiting for a selection change or a start gesture.
    Idle,
    /// Running the blocking countdown.
    Countdown,
    /// Appending sample rows.
    Recording,
    /// Log storage exhausted; recordings are refused until reset.
    CatalogFull,
    /// The operator left the loop.
    Exited,
}

/// Errors that can end a single tick.
#[derive(Debug)]
pub enum RecorderError<LE: core::fmt::Debug, AE: core::fmt::Debug> {
    Log(LE),
    Accel(AE),
}
