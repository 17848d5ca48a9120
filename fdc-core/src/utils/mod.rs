//! Utility re-exports for the field data collector.
//!
//! - `glyph`: 5×5 bitmap codec between storage and display form
//! - `catalog`: action catalog, first-row parser and selector
//! - `controllers`: collaborator traits and their bindings (display, buttons,
//!   accelerometer, data log, sound)
//! - `session`: recording state machine, countdown and configuration

pub mod catalog;
pub mod controllers;
pub mod glyph;
pub mod session;

pub use catalog::{Action, ActionSelector, Catalog, CatalogSource};
pub use controllers::{Accelerometer, Axis, Button, Buttons, DataLog, Display, Sound, SoundCue};
pub use glyph::{DisplayPattern, Glyph};
pub use session::{Recorder, RecorderConfig, RecorderError, RecorderState};
