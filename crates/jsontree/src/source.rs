//! Chunked byte input with a small pushback queue.
//!
//! [`ByteSource`] pulls bytes from any [`Read`] implementation through a fixed
//! buffer and lets the UTF-8 decoder return up to [`PUSHBACK_CAPACITY`] bytes
//! after it discovers a malformed sequence.

use std::{fmt, io, io::Read};

use bstr::BStr;
use log::trace;

/// Number of bytes that can be pushed back at once.
pub const PUSHBACK_CAPACITY: usize = 4;

/// A buffered byte reader with bounded pushback.
pub struct ByteSource<R> {
    reader: R,
    buffer: Box<[u8]>,
    pos: usize,
    filled: usize,
    pending: [u8; PUSHBACK_CAPACITY],
    head: usize,
    count: usize,
}

impl<R: Read> ByteSource<R> {
    /// Wraps `reader`, requesting at most `buffer_size` bytes per refill.
    ///
    /// A `buffer_size` of zero is treated as one.
    pub fn new(reader: R, buffer_size: usize) -> Self {
        Self {
            reader,
            buffer: vec![0; buffer_size.max(1)].into_boxed_slice(),
            pos: 0,
            filled: 0,
            pending: [0; PUSHBACK_CAPACITY],
            head: 0,
            count: 0,
        }
    }

    /// Returns the next byte, or `None` once the reader reports end of input.
    ///
    /// End of input is not latched: a later call asks the reader again.
    ///
    /// # Errors
    ///
    /// Propagates any reader error other than [`io::ErrorKind::Interrupted`].
    pub fn read(&mut self) -> io::Result<Option<u8>> {
        if self.count > 0 {
            let byte = self.pending[self.head];
            self.head = (self.head + 1) % PUSHBACK_CAPACITY;
            self.count -= 1;
            return Ok(Some(byte));
        }

        if self.pos == self.filled && !self.refill()? {
            return Ok(None);
        }

        let byte = self.buffer[self.pos];
        self.pos += 1;
        Ok(Some(byte))
    }

    /// Returns `bytes` to the front of the stream; they are re-read in order.
    ///
    /// At most [`PUSHBACK_CAPACITY`] bytes may be pending at any time.
    pub fn push_back(&mut self, bytes: &[u8]) {
        debug_assert!(
            self.count + bytes.len() <= PUSHBACK_CAPACITY,
            "pushback queue overflow"
        );
        for &byte in bytes.iter().rev() {
            self.head = (self.head + PUSHBACK_CAPACITY - 1) % PUSHBACK_CAPACITY;
            self.pending[self.head] = byte;
            self.count = (self.count + 1).min(PUSHBACK_CAPACITY);
        }
    }

    /// Consumes the source, returning the wrapped reader.
    pub fn into_inner(self) -> R {
        self.reader
    }

    fn refill(&mut self) -> io::Result<bool> {
        loop {
            match self.reader.read(&mut self.buffer) {
                Ok(0) => return Ok(false),
                Ok(n) => {
                    trace!("refilled {n} bytes");
                    self.pos = 0;
                    self.filled = n;
                    return Ok(true);
                }
                Err(err) if err.kind() == io::ErrorKind::Interrupted => {}
                Err(err) => return Err(err),
            }
        }
    }
}

impl<R> fmt::Debug for ByteSource<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let pending: Vec<u8> = (0..self.count)
            .map(|i| self.pending[(self.head + i) % PUSHBACK_CAPACITY])
            .collect();
        f.debug_struct("ByteSource")
            .field("capacity", &self.buffer.len())
            .field("pending", &BStr::new(&pending))
            .field("buffered", &BStr::new(&self.buffer[self.pos..self.filled]))
            .finish_non_exhaustive()
    }
}
