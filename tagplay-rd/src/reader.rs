//! Tag reader adapter
//!
//! Wraps the blocking hardware read behind the `TagReader` trait so the
//! dispatch loop can be driven by a serial-attached reader in production and
//! a scripted fake in tests. Reader failures are fatal: this daemon defines
//! no recovery for a broken reader, so errors propagate to the top level.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use std::time::Instant;
use thiserror::Error;

/// One physical tag presentation
#[derive(Debug, Clone)]
pub struct TagRead {
    /// Tag identifier in its string form, as produced by the reader
    pub tag_id: String,
    /// Free-text payload stored on the tag; carried but unused
    pub text: String,
    /// Stamped when the read returned
    pub read_at: Instant,
}

/// Tag reader errors (all fatal in this daemon)
#[derive(Debug, Error)]
pub enum ReaderError {
    /// The device stream ended; the reader is gone
    #[error("Tag reader disconnected (end of input)")]
    Disconnected,

    #[error("Tag reader I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Trait for tag reader backends.
/// Implement this for different transports (serial device, HAT driver, test
/// fake).
pub trait TagReader: Send {
    /// Block until a tag is physically presented, then return its
    /// identifier and payload
    fn read_tag(&mut self) -> Result<TagRead, ReaderError>;
}

/// Reads `tag_id` or `tag_id<TAB>text` lines from a character device
///
/// Serial RFID readers emit one line per tag presentation; blank lines are
/// skipped. End of stream means the device disappeared and is reported as
/// `Disconnected`.
pub struct LineTagReader<R: BufRead> {
    input: R,
}

impl LineTagReader<BufReader<File>> {
    /// Open the reader device at `path`
    pub fn open(path: &Path) -> Result<Self, ReaderError> {
        let file = File::open(path)?;
        Ok(Self::new(BufReader::new(file)))
    }
}

impl<R: BufRead> LineTagReader<R> {
    pub fn new(input: R) -> Self {
        Self { input }
    }
}

impl<R: BufRead + Send> TagReader for LineTagReader<R> {
    fn read_tag(&mut self) -> Result<TagRead, ReaderError> {
        loop {
            let mut line = String::new();
            let n = self.input.read_line(&mut line)?;
            if n == 0 {
                return Err(ReaderError::Disconnected);
            }

            let line = line.trim_end_matches(&['\r', '\n']);
            if line.is_empty() {
                continue;
            }

            let (tag_id, text) = match line.split_once('\t') {
                Some((id, text)) => (id, text),
                None => (line, ""),
            };

            return Ok(TagRead {
                tag_id: tag_id.trim().to_string(),
                text: text.to_string(),
                read_at: Instant::now(),
            });
        }
    }
}

/// Release-once teardown hook for the reader hardware
///
/// The hardware must be released exactly once on every exit path, including
/// an interrupt that arrives mid-read. `release()` consumes the hook on
/// first call; `Drop` calls `release()` as well, covering error unwind.
pub struct HardwareGuard {
    teardown: Option<Box<dyn FnOnce() + Send>>,
}

impl HardwareGuard {
    pub fn new(teardown: impl FnOnce() + Send + 'static) -> Self {
        Self {
            teardown: Some(Box::new(teardown)),
        }
    }

    /// Run the teardown hook if it has not run yet
    pub fn release(&mut self) {
        if let Some(teardown) = self.teardown.take() {
            teardown();
        }
    }
}

impl Drop for HardwareGuard {
    fn drop(&mut self) {
        self.release();
    }
}
