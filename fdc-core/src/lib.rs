//! Core recording loop, action catalog and glyph codec for a motion-sensor
//! field data collector on no-std embedded platforms.
//!
//! For a host-side simulation, see `fdc-app/mock-mcu`.
#![no_std]

extern crate alloc;

pub mod utils;
