use std::io::{self, Read};

use crate::{ParserError, Value, parse};

/// Buffer sizes every document is parsed with when checking that chunking
/// does not change the result.
pub const BUFFER_SIZES: [usize; 5] = [1, 2, 3, 4, 4096];

/// A reader that hands out at most `chunk` bytes per `read` call.
pub struct TrickleReader {
    data: Vec<u8>,
    pos: usize,
    chunk: usize,
}

impl TrickleReader {
    pub fn new(data: Vec<u8>, chunk: usize) -> Self {
        Self {
            data,
            pos: 0,
            chunk: chunk.max(1),
        }
    }
}

impl Read for TrickleReader {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let n = self.chunk.min(buf.len()).min(self.data.len() - self.pos);
        buf[..n].copy_from_slice(&self.data[self.pos..self.pos + n]);
        self.pos += n;
        Ok(n)
    }
}

/// A reader that serves `data` and then fails with `BrokenPipe`.
///
/// It also reports one `Interrupted` error up front, which must be retried
/// transparently.
pub struct FailingReader {
    data: Vec<u8>,
    pos: usize,
    interrupted: bool,
}

impl FailingReader {
    pub fn after(data: Vec<u8>) -> Self {
        Self {
            data,
            pos: 0,
            interrupted: false,
        }
    }
}

impl Read for FailingReader {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        if !self.interrupted {
            self.interrupted = true;
            return Err(io::ErrorKind::Interrupted.into());
        }
        if self.pos == self.data.len() {
            return Err(io::ErrorKind::BrokenPipe.into());
        }
        let n = buf.len().min(self.data.len() - self.pos);
        buf[..n].copy_from_slice(&self.data[self.pos..self.pos + n]);
        self.pos += n;
        Ok(n)
    }
}

/// Parses `bytes` with every size in [`BUFFER_SIZES`], through a reader that
/// also splits reads, and asserts all outcomes agree.
pub fn parse_all_sizes(bytes: &[u8]) -> Result<Option<Value>, ParserError> {
    let reference = parse(bytes, 4096);
    for size in BUFFER_SIZES {
        for chunk in [1, 3] {
            let other = parse(TrickleReader::new(bytes.to_vec(), chunk), size);
            match (&reference, &other) {
                (Ok(a), Ok(b)) => assert_eq!(a, b, "buffer size {size}, chunk {chunk}"),
                (Err(a), Err(b)) => {
                    assert_eq!(a.kind(), b.kind(), "buffer size {size}, chunk {chunk}");
                    assert_eq!(a.position(), b.position(), "buffer size {size}, chunk {chunk}");
                }
                _ => panic!("buffer size {size}, chunk {chunk}: {reference:?} vs {other:?}"),
            }
        }
    }
    reference
}

/// Parses `text`, which must hold exactly one document.
pub fn doc(text: &str) -> Value {
    match parse_all_sizes(text.as_bytes()) {
        Ok(Some(value)) => value,
        other => panic!("expected a document from {text:?}, got {other:?}"),
    }
}

/// Parses `text`, which must be rejected.
pub fn reject(text: &[u8]) -> ParserError {
    match parse_all_sizes(text) {
        Err(err) => err,
        other => panic!("expected an error from {text:?}, got {other:?}"),
    }
}
