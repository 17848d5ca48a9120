//! Fake peripherals shared by the integration tests.
#![allow(dead_code)]

use embedded_hal::delay::DelayNs;
use fdc_core::utils::{
    controllers::{CsvLog, CsvLogError},
    session::Peripherals,
    Accelerometer, Axis, Button, Buttons, DataLog, Display, DisplayPattern, Recorder, SoundCue,
    Sound,
};

/// Something the fake display was asked to show.
#[derive(Debug, Clone, PartialEq)]
pub enum Shown {
    Pattern(String),
    Char(char),
    Text(String),
}

#[derive(Debug, Default)]
pub struct FakeDisplay {
    pub shown: Vec<Shown>,
}

impl FakeDisplay {
    pub fn last(&self) -> Option<&Shown> {
        self.shown.last()
    }
}

impl Display for FakeDisplay {
    fn show_pattern(
        &mut self,
        pattern: &DisplayPattern,
    ) {
        self.shown.push(Shown::Pattern(pattern.as_str().to_string()));
    }

    fn show_char(
        &mut self,
        c: char,
    ) {
        self.shown.push(Shown::Char(c));
    }

    fn scroll_text(
        &mut self,
        text: &str,
    ) {
        self.shown.push(Shown::Text(text.to_string()));
    }
}

/// Buttons whose edges are queued by the test with `press`.
#[derive(Debug, Default)]
pub struct FakeButtons {
    pending: Vec<Button>,
}

impl FakeButtons {
    pub fn press(
        &mut self,
        button: Button,
    ) {
        self.pending.push(button);
    }
}

impl Buttons for FakeButtons {
    fn was_pressed(
        &mut self,
        button: Button,
    ) -> bool {
        match self.pending.iter().position(|&b| b == button) {
            Some(i) => {
                self.pending.remove(i);
                true
            }
            None => false,
        }
    }
}

#[derive(Debug, PartialEq)]
pub struct AccelFault;

/// Accelerometer returning 0, 1, 2, ... on successive axis reads.
#[derive(Debug, Default)]
pub struct FakeAccel {
    next: i32,
    pub fail_next: bool,
}

impl Accelerometer for FakeAccel {
    type Error = AccelFault;

    fn read_axis(
        &mut self,
        _axis: Axis,
    ) -> Result<i32, Self::Error> {
        if self.fail_next {
            self.fail_next = false;
            return Err(AccelFault);
        }
        let value = self.next;
        self.next += 1;
        Ok(value)
    }
}

#[derive(Debug, Default)]
pub struct FakeSound {
    pub cues: Vec<SoundCue>,
}

impl Sound for FakeSound {
    fn play_async(
        &mut self,
        cue: SoundCue,
    ) {
        self.cues.push(cue);
    }
}

/// Delay that only adds up the time it was asked to wait.
#[derive(Debug, Default)]
pub struct CountingDelay {
    pub total_ns: u64,
}

impl CountingDelay {
    pub fn total_ms(&self) -> u64 {
        self.total_ns / 1_000_000
    }
}

impl DelayNs for CountingDelay {
    fn delay_ns(
        &mut self,
        ns: u32,
    ) {
        self.total_ns += u64::from(ns);
    }
}

pub type FakePeripherals<L = CsvLog> =
    Peripherals<FakeDisplay, FakeButtons, FakeAccel, L, FakeSound, CountingDelay>;
pub type FakeRecorder<L = CsvLog> =
    Recorder<FakeDisplay, FakeButtons, FakeAccel, L, FakeSound, CountingDelay>;

pub fn peripherals<L: DataLog>(log: L) -> FakePeripherals<L> {
    Peripherals {
        display: FakeDisplay::default(),
        buttons: FakeButtons::default(),
        accel: FakeAccel::default(),
        log,
        sound: FakeSound::default(),
        delay: CountingDelay::default(),
    }
}

/// Queue a button edge and run one tick.
pub fn press_and_tick<L: DataLog>(
    recorder: &mut FakeRecorder<L>,
    button: Button,
) {
    recorder.peripherals_mut().buttons.press(button);
    recorder.tick().unwrap();
}

/// Log whose reads must stay inside `[0, limit)`.
pub struct BoundedLog {
    pub inner: CsvLog,
    pub limit: usize,
    pub furthest_read: usize,
}

impl BoundedLog {
    pub fn new(
        text: &[u8],
        limit: usize,
    ) -> Self {
        Self {
            inner: CsvLog::with_preamble(text.len(), text),
            limit,
            furthest_read: 0,
        }
    }
}

impl DataLog for BoundedLog {
    type Error = <CsvLog as DataLog>::Error;

    fn is_full(&mut self) -> bool {
        self.inner.is_full()
    }

    fn begin_row(&mut self) -> Result<(), Self::Error> {
        self.inner.begin_row()
    }

    fn log_field(
        &mut self,
        name: &str,
        value: &str,
    ) -> Result<(), Self::Error> {
        self.inner.log_field(name, value)
    }

    fn end_row(&mut self) -> Result<(), Self::Error> {
        self.inner.end_row()
    }

    fn discard_row(&mut self) {
        self.inner.discard_row()
    }

    fn length(&mut self) -> Result<usize, Self::Error> {
        Ok(self.limit)
    }

    fn read_bytes(
        &mut self,
        offset: usize,
        buf: &mut [u8],
    ) -> Result<usize, Self::Error> {
        assert!(
            offset + buf.len() <= self.limit,
            "read of {} bytes at {} exceeds limit {}",
            buf.len(),
            offset,
            self.limit
        );
        self.furthest_read = self.furthest_read.max(offset + buf.len());
        self.inner.read_bytes(offset, buf)
    }
}

#[derive(Debug, PartialEq)]
pub enum FlakyLogError {
    FieldRejected,
    Csv(CsvLogError),
}

/// `CsvLog` whose next `log_field` fails once `fail_field_at` is set, after
/// that many fields have gone through.
#[derive(Debug)]
pub struct FlakyLog {
    pub inner: CsvLog,
    pub fail_field_at: Option<usize>,
}

impl FlakyLog {
    pub fn new(capacity: usize) -> Self {
        Self {
            inner: CsvLog::new(capacity),
            fail_field_at: None,
        }
    }
}

impl DataLog for FlakyLog {
    type Error = FlakyLogError;

    fn is_full(&mut self) -> bool {
        self.inner.is_full()
    }

    fn begin_row(&mut self) -> Result<(), Self::Error> {
        self.inner.begin_row().map_err(FlakyLogError::Csv)
    }

    fn log_field(
        &mut self,
        name: &str,
        value: &str,
    ) -> Result<(), Self::Error> {
        match self.fail_field_at {
            Some(0) => {
                self.fail_field_at = None;
                return Err(FlakyLogError::FieldRejected);
            }
            Some(n) => self.fail_field_at = Some(n - 1),
            None => {}
        }
        self.inner.log_field(name, value).map_err(FlakyLogError::Csv)
    }

    fn end_row(&mut self) -> Result<(), Self::Error> {
        self.inner.end_row().map_err(FlakyLogError::Csv)
    }

    fn discard_row(&mut self) {
        self.inner.discard_row()
    }

    fn length(&mut self) -> Result<usize, Self::Error> {
        self.inner.length().map_err(FlakyLogError::Csv)
    }

    fn read_bytes(
        &mut self,
        offset: usize,
        buf: &mut [u8],
    ) -> Result<usize, Self::Error> {
        self.inner.read_bytes(offset, buf).map_err(FlakyLogError::Csv)
    }
}
