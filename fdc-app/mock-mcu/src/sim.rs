//! Simulated peripherals for running the recorder on a host.

use core::convert::Infallible;

use embedded_hal::delay::DelayNs;
use fdc_core::utils::{Accelerometer, Axis, Display, DisplayPattern, Sound, SoundCue};
use tracing::info;

/// LED matrix that logs to the console.
pub struct ConsoleDisplay;

impl Display for ConsoleDisplay {
    fn show_pattern(
        &mut self,
        pattern: &DisplayPattern,
    ) {
        let rows: Vec<String> = pattern
            .as_str()
            .lines()
            .map(|row| {
                row.split(',')
                    .map(|cell| if cell == "000" { '.' } else { '#' })
                    .collect()
            })
            .collect();
        info!("LED: {}", rows.join(" "));
    }

    fn show_char(
        &mut self,
        c: char,
    ) {
        info!("LED: '{}'", c);
    }

    fn scroll_text(
        &mut self,
        text: &str,
    ) {
        info!("LED scroll: {:?}", text);
    }
}

/// Speaker that logs the cue it was asked to play.
pub struct ConsoleSound;

impl Sound for ConsoleSound {
    fn play_async(
        &mut self,
        cue: SoundCue,
    ) {
        info!(?cue, expression = cue.expression(), "sound");
    }
}

/// Synthetic wrist motion: a slow sway on X/Y with gravity on Z.
#[derive(Default)]
pub struct SimAccelerometer {
    reads: u32,
}

impl Accelerometer for SimAccelerometer {
    type Error = Infallible;

    fn read_axis(
        &mut self,
        axis: Axis,
    ) -> Result<i32, Self::Error> {
        let t = (self.reads / 3) as f32 * 0.2;
        self.reads = self.reads.wrapping_add(1);
        let milli_g = match axis {
            Axis::X => 300.0 * t.sin(),
            Axis::Y => 150.0 * t.cos(),
            Axis::Z => -1000.0 + 40.0 * (2.0 * t).sin(),
        };
        Ok(milli_g.round() as i32)
    }
}

/// Real sleeps through `embassy-time`, or none at all with the skipped time
/// added up.
pub enum SimDelay {
    Realtime(embassy_time::Delay),
    Skip { skipped_ns: u64 },
}

impl SimDelay {
    pub fn new(realtime: bool) -> Self {
        if realtime {
            Self::Realtime(embassy_time::Delay)
        } else {
            Self::Skip { skipped_ns: 0 }
        }
    }

    pub fn skipped_ms(&self) -> u64 {
        match self {
            Self::Realtime(_) => 0,
            Self::Skip { skipped_ns } => skipped_ns / 1_000_000,
        }
    }
}

impl DelayNs for SimDelay {
    fn delay_ns(
        &mut self,
        ns: u32,
    ) {
        match self {
            Self::Realtime(delay) => delay.delay_ns(ns),
            Self::Skip { skipped_ns } => *skipped_ns += u64::from(ns),
        }
    }
}
