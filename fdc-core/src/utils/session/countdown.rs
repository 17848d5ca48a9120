//! Pre-recording countdown.
//!
//! Shows 3, 2, 1 and the GO glyph, fires the start cue, then shows the
//! RECORDING glyph. Blocking and not cancelable; it always runs to the end.

use embedded_hal::delay::DelayNs;

use crate::utils::{
    controllers::{Display, Sound, SoundCue},
    glyph,
};

const DIGITS: [char; 3] = ['3', '2', '1'];

/// Run the countdown, pausing `step_ms` after each digit and after GO.
pub fn run_countdown<D, S, T>(
    display: &mut D,
    sound: &mut S,
    delay: &mut T,
    step_ms: u32,
) where
    D: Display + ?Sized,
    S: Sound + ?Sized,
    T: DelayNs + ?Sized,
{
    for digit in DIGITS {
        display.show_char(digit);
        delay.delay_ms(step_ms);
    }
    display.show_pattern(&glyph::GO.to_display());
    delay.delay_ms(step_ms);
    sound.play_async(SoundCue::RecordingStarted);
    display.show_pattern(&glyph::RECORDING.to_display());
}
