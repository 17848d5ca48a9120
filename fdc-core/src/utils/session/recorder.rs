//! The recorder: owns the peripherals, the catalog and the session.

use core::fmt::Write as _;

use embedded_hal::delay::DelayNs;

use super::{countdown, RecorderConfig, RecorderError, RecorderState};
use crate::utils::{
    catalog::{Action, ActionSelector, Catalog, CatalogSource},
    controllers::{Accelerometer, Button, Buttons, DataLog, Display, Sound, SoundCue},
    glyph,
};

/// First field of a label row.
pub const LABEL_SENTINEL: &str = "action";
/// Text scrolled when the log is full.
pub const FULL_INDICATOR: &str = "F";

/// Everything the recorder talks to.
pub struct Peripherals<D, B, A, L, S, T> {
    pub display: D,
    pub buttons: B,
    pub accel: A,
    pub log: L,
    pub sound: S,
    pub delay: T,
}

/// Per-loop session state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Session {
    selector: ActionSelector,
    is_recording: bool,
    samples_written: u16,
}

impl Session {
    /// Current action selection.
    pub fn selector(&self) -> &ActionSelector {
        &self.selector
    }

    /// `true` between the label row and the last sample.
    pub fn is_recording(&self) -> bool {
        self.is_recording
    }

    /// Sample rows written in the current recording.
    pub fn samples_written(&self) -> u16 {
        self.samples_written
    }

    fn reset_recording(&mut self) {
        self.is_recording = false;
        self.samples_written = 0;
    }
}

/// Recording loop driving the selector, countdown and data log.
pub struct Recorder<D, B, A, L, S, T> {
    io: Peripherals<D, B, A, L, S, T>,
    catalog: Catalog,
    config: RecorderConfig,
    session: Session,
    state: RecorderState,
}

impl<D, B, A, L, S, T> Recorder<D, B, A, L, S, T>
where
    D: Display,
    B: Buttons,
    A: Accelerometer,
    L: DataLog,
    S: Sound,
    T: DelayNs,
{
    /// Load the catalog from the data log and show the first action.
    pub fn new(
        mut io: Peripherals<D, B, A, L, S, T>,
        config: RecorderConfig,
    ) -> Result<Self, RecorderError<L::Error, A::Error>> {
        let catalog = Catalog::load(&mut io.log).map_err(RecorderError::Log)?;
        Ok(Self::with_catalog(io, catalog, config))
    }

    /// Use an already built catalog and show the first action.
    pub fn with_catalog(
        io: Peripherals<D, B, A, L, S, T>,
        catalog: Catalog,
        config: RecorderConfig,
    ) -> Self {
        tracing::info!(
            source = ?catalog.source(),
            actions = catalog.len(),
            sample_size = config.sample_size,
            "recorder ready"
        );
        let mut recorder = Self {
            io,
            catalog,
            config,
            session: Session::default(),
            state: RecorderState::Idle,
        };
        recorder.refresh_selection();
        recorder
    }

    /// Current state of the recording loop.
    pub fn state(&self) -> RecorderState {
        self.state
    }

    /// Session counters and selection.
    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Catalog in use.
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Timing and sample-count settings.
    pub fn config(&self) -> &RecorderConfig {
        &self.config
    }

    /// Action the selector currently points at.
    pub fn current_action(&self) -> &Action {
        self.session.selector.current(&self.catalog)
    }

    /// Borrow the peripherals.
    pub fn peripherals(&self) -> &Peripherals<D, B, A, L, S, T> {
        &self.io
    }

    /// Mutably borrow the peripherals.
    pub fn peripherals_mut(&mut self) -> &mut Peripherals<D, B, A, L, S, T> {
        &mut self.io
    }

    /// Stop the recorder and hand back its peripherals.
    pub fn into_peripherals(self) -> Peripherals<D, B, A, L, S, T> {
        self.io
    }

    /// Poll forever, or until the exit gesture. A failed tick is logged and
    /// the loop carries on.
    pub fn run(&mut self) {
        loop {
            match self.tick() {
                Ok(RecorderState::Exited) => return,
                Ok(_) => {}
                Err(e) => tracing::error!(?e, "recorder tick failed"),
            }
        }
    }

    /// One polling iteration. Only the countdown and the per-sample pause
    /// block.
    pub fn tick(&mut self) -> Result<RecorderState, RecorderError<L::Error, A::Error>> {
        if self.state == RecorderState::Exited {
            return Ok(self.state);
        }

        if self.state != RecorderState::CatalogFull && self.io.log.is_full() {
            self.enter_full();
        }

        match self.state {
            RecorderState::Idle | RecorderState::CatalogFull => self.idle_tick()?,
            RecorderState::Recording => self.recording_tick()?,
            RecorderState::Countdown | RecorderState::Exited => {}
        }
        Ok(self.state)
    }

    fn transition(
        &mut self,
        next: RecorderState,
    ) {
        if self.state != next {
            tracing::debug!(from = ?self.state, to = ?next, "recorder state change");
            self.state = next;
        }
    }

    fn refresh_selection(&mut self) {
        self.session
            .selector
            .select(&self.catalog, &mut self.io.display);
    }

    fn enter_full(&mut self) {
        if self.session.is_recording {
            tracing::warn!(
                samples = self.session.samples_written,
                "data log full, recording aborted"
            );
        } else {
            tracing::warn!("data log full, recording disabled");
        }
        self.session.reset_recording();
        self.io.display.scroll_text(FULL_INDICATOR);
        self.transition(RecorderState::CatalogFull);
    }

    fn idle_tick(&mut self) -> Result<(), RecorderError<L::Error, A::Error>> {
        if self.io.buttons.was_pressed(Button::A) {
            self.session.selector.advance();
            self.refresh_selection();
        }
        if self.io.buttons.was_pressed(Button::B) {
            self.session.selector.retreat();
            self.refresh_selection();
        }

        if self.io.buttons.was_pressed(Button::Logo) && self.catalog.source() == CatalogSource::Log
        {
            self.io.display.show_pattern(&glyph::EXIT.to_display());
            tracing::info!("exit gesture, leaving recording loop");
            self.transition(RecorderState::Exited);
            return Ok(());
        }

        if self.io.buttons.was_pressed(Button::AB) {
            if self.state == RecorderState::CatalogFull {
                tracing::warn!("start gesture ignored, data log full");
            } else {
                self.start_recording()?;
            }
        }
        Ok(())
    }

    fn start_recording(&mut self) -> Result<(), RecorderError<L::Error, A::Error>> {
        self.session.samples_written = 0;
        self.transition(RecorderState::Countdown);
        countdown::run_countdown(
            &mut self.io.display,
            &mut self.io.sound,
            &mut self.io.delay,
            self.config.countdown_step_ms,
        );

        let action = self.session.selector.current(&self.catalog);
        if let Err(e) = write_label_row(&mut self.io.log, &action.name) {
            self.transition(RecorderState::Idle);
            self.refresh_selection();
            return Err(RecorderError::Log(e));
        }
        tracing::info!(action = %action.name, "recording started");

        self.session.is_recording = true;
        self.transition(RecorderState::Recording);
        if self.config.sample_size == 0 {
            self.finish_recording();
        }
        Ok(())
    }

    fn recording_tick(&mut self) -> Result<(), RecorderError<L::Error, A::Error>> {
        // Edges during a recording are dropped so they cannot fire afterwards.
        for button in Button::ALL {
            let _ = self.io.buttons.was_pressed(button);
        }

        let sample = self.io.accel.read_sample().map_err(RecorderError::Accel)?;
        write_sample_row(&mut self.io.log, sample).map_err(RecorderError::Log)?;
        self.io.delay.delay_ms(self.config.sample_interval_ms);
        self.session.samples_written += 1;

        if self.session.samples_written >= self.config.sample_size {
            self.finish_recording();
        }
        Ok(())
    }

    fn finish_recording(&mut self) {
        tracing::info!(
            samples = self.session.samples_written,
            "recording finished"
        );
        self.session.reset_recording();
        self.io.sound.play_async(SoundCue::RecordingFinished);
        self.transition(RecorderState::Idle);
        self.refresh_selection();
    }
}

fn write_label_row<L: DataLog + ?Sized>(
    log: &mut L,
    name: &str,
) -> Result<(), L::Error> {
    log.begin_row()?;
    let fields = [("x", LABEL_SENTINEL), ("y", name), ("z", "")];
    for (field, value) in fields {
        if let Err(e) = log.log_field(field, value) {
            log.discard_row();
            return Err(e);
        }
    }
    log.end_row()
}

fn write_sample_row<L: DataLog + ?Sized>(
    log: &mut L,
    sample: [i32; 3],
) -> Result<(), L::Error> {
    log.begin_row()?;
    for (name, value) in ["x", "y", "z"].into_iter().zip(sample) {
        // i32 fits in 11 characters; the write cannot fail.
        let mut field: heapless::String<12> = heapless::String::new();
        let _ = write!(field, "{}", value);
        if let Err(e) = log.log_field(name, &field) {
            log.discard_row();
            return Err(e);
        }
    }
    log.end_row()
}
