//! Channel-fed button input.
//!
//! Debounced press edges are pushed into an `embassy_sync` channel by whatever
//! owns the GPIO (an interrupt handler, a polling task, a simulator). The
//! recorder drains the channel on every query and keeps one pending flag per
//! button, so each edge is consumed exactly once.

use embassy_sync::{
    blocking_mutex::raw::{CriticalSectionRawMutex, RawMutex},
    channel::Channel,
};

use super::{Button, Buttons};

/// Channel used to deliver button edges (`Button` messages) to the recorder.
pub static BUTTON_CHANNEL: Channel<CriticalSectionRawMutex, Button, 16> = Channel::new();

/// `Buttons` implementation that reads press edges from a channel.
pub struct ChannelButtons<'c, M: RawMutex, const N: usize> {
    channel: &'c Channel<M, Button, N>,
    pending: [bool; Button::COUNT],
}

impl<'c, M: RawMutex, const N: usize> ChannelButtons<'c, M, N> {
    /// Buttons fed by edges sent on `channel`.
    pub fn new(channel: &'c Channel<M, Button, N>) -> Self {
        Self {
            channel,
            pending: [false; Button::COUNT],
        }
    }

    fn drain(&mut self) {
        while let Ok(button) = self.channel.try_receive() {
            tracing::trace!(?button, "button edge");
            self.pending[button.index()] = true;
        }
    }
}

impl<M: RawMutex, const N: usize> Buttons for ChannelButtons<'_, M, N> {
    fn was_pressed(
        &mut self,
        button: Button,
    ) -> bool {
        self.drain();
        core::mem::take(&mut self.pending[button.index()])
    }
}
