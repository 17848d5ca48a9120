//! In-memory CSV data log and a bounded byte stream over any `DataLog`.
//!
//! `CsvLog` keeps the encoded log in RAM up to a fixed byte capacity, which is
//! what the simulator and the tests record into. `LogBytes` walks any log
//! front to back in small chunks through `read_bytes`, never asking for a byte
//! at or beyond the length it was created with.

use alloc::vec::Vec;

use super::DataLog;

/// Bytes fetched per `read_bytes` call while streaming.
const CHUNK: usize = 32;

/// Errors reported by [`CsvLog`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CsvLogError {
    /// The row does not fit in the remaining capacity. The log is now full.
    Full,
    /// `log_field` or `end_row` without `begin_row`.
    RowNotStarted,
    /// `begin_row` while a row is already open.
    RowAlreadyOpen,
}

/// Capacity-bounded, append-only CSV log held in memory.
///
/// Fields are comma-separated in the order they are logged and rows end with
/// `\n`. Values containing a comma, quote or newline are quoted.
#[derive(Debug, Clone)]
pub struct CsvLog {
    data: Vec<u8>,
    capacity: usize,
    row: Option<Vec<u8>>,
    full: bool,
}

impl CsvLog {
    /// Empty log that accepts up to `capacity` encoded bytes.
    pub fn new(capacity: usize) -> Self {
        Self {
            data: Vec::new(),
            capacity,
            row: None,
            full: false,
        }
    }

    /// Log whose storage already holds `preamble`, e.g. a catalog row written
    /// by an earlier session. Anything past `capacity` is cut off.
    pub fn with_preamble(
        capacity: usize,
        preamble: &[u8],
    ) -> Self {
        let kept = preamble.len().min(capacity);
        if kept < preamble.len() {
            tracing::warn!(
                dropped = preamble.len() - kept,
                "log preamble exceeds capacity"
            );
        }
        Self {
            data: preamble[..kept].to_vec(),
            capacity,
            row: None,
            full: false,
        }
    }

    /// Encoded log contents.
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    /// Maximum encoded size in bytes.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Complete rows written so far, without their terminators.
    pub fn rows(&self) -> impl Iterator<Item = &str> {
        core::str::from_utf8(&self.data)
            .unwrap_or_default()
            .lines()
    }

    fn push_value(
        row: &mut Vec<u8>,
        value: &str,
    ) {
        let needs_quotes = value.bytes().any(|b| matches!(b, b',' | b'"' | b'\n'));
        if !needs_quotes {
            row.extend_from_slice(value.as_bytes());
            return;
        }
        row.push(b'"');
        for b in value.bytes() {
            if b == b'"' {
                row.push(b'"');
            }
            row.push(b);
        }
        row.push(b'"');
    }
}

impl DataLog for CsvLog {
    type Error = CsvLogError;

    fn is_full(&mut self) -> bool {
        self.full || self.data.len() >= self.capacity
    }

    fn begin_row(&mut self) -> Result<(), Self::Error> {
        if self.row.is_some() {
            return Err(CsvLogError::RowAlreadyOpen);
        }
        self.row = Some(Vec::new());
        Ok(())
    }

    fn log_field(
        &mut self,
        _name: &str,
        value: &str,
    ) -> Result<(), Self::Error> {
        let row = self.row.as_mut().ok_or(CsvLogError::RowNotStarted)?;
        if !row.is_empty() {
            row.push(b',');
        }
        Self::push_value(row, value);
        Ok(())
    }

    fn end_row(&mut self) -> Result<(), Self::Error> {
        let mut row = self.row.take().ok_or(CsvLogError::RowNotStarted)?;
        row.push(b'\n');
        if self.data.len() + row.len() > self.capacity {
            self.full = true;
            tracing::warn!(
                used = self.data.len(),
                capacity = self.capacity,
                "data log full, row discarded"
            );
            return Err(CsvLogError::Full);
        }
        self.data.extend_from_slice(&row);
        Ok(())
    }

    fn discard_row(&mut self) {
        self.row = None;
    }

    fn length(&mut self) -> Result<usize, Self::Error> {
        Ok(self.data.len())
    }

    fn read_bytes(
        &mut self,
        offset: usize,
        buf: &mut [u8],
    ) -> Result<usize, Self::Error> {
        let Some(available) = self.data.get(offset..) else {
            return Ok(0);
        };
        let n = available.len().min(buf.len());
        buf[..n].copy_from_slice(&available[..n]);
        Ok(n)
    }
}

/// Forward byte stream over a `DataLog`, bounded to `[0, end)`.
///
/// Yields `Err` at most once; the stream ends after a read error.
pub struct LogBytes<'l, L: DataLog + ?Sized> {
    log: &'l mut L,
    end: usize,
    offset: usize,
    chunk: [u8; CHUNK],
    filled: usize,
    pos: usize,
}

impl<'l, L: DataLog + ?Sized> LogBytes<'l, L> {
    /// Stream `log` from offset 0 up to `end`.
    pub fn new(
        log: &'l mut L,
        end: usize,
    ) -> Self {
        Self {
            log,
            end,
            offset: 0,
            chunk: [0; CHUNK],
            filled: 0,
            pos: 0,
        }
    }

    /// Offset of the next byte to be yielded.
    pub fn position(&self) -> usize {
        self.offset - (self.filled - self.pos)
    }

    fn refill(&mut self) -> Option<Result<(), L::Error>> {
        if self.offset >= self.end {
            return None;
        }
        let want = (self.end - self.offset).min(CHUNK);
        match self.log.read_bytes(self.offset, &mut self.chunk[..want]) {
            Ok(0) => {
                self.offset = self.end;
                None
            }
            Ok(n) => {
                let n = n.min(want);
                self.offset += n;
                self.filled = n;
                self.pos = 0;
                Some(Ok(()))
            }
            Err(e) => {
                self.offset = self.end;
                Some(Err(e))
            }
        }
    }
}

impl<L: DataLog + ?Sized> Iterator for LogBytes<'_, L> {
    type Item = Result<u8, L::Error>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.pos == self.filled {
            if let Err(e) = self.refill()? {
                return Some(Err(e));
            }
        }
        let byte = self.chunk[self.pos];
        self.pos += 1;
        Some(Ok(byte))
    }
}
