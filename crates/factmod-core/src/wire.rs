//! Fixed-size binary wire format.
//!
//! A request is 24 bytes: `begin`, `end`, `modulus`. A response is 8 bytes:
//! the modular product. There is no length prefix and no version tag. Every
//! integer is encoded in network byte order (big-endian).

use std::io::{self, ErrorKind, Read, Write};

use crate::constants::{REQUEST_LEN, RESPONSE_LEN, WORD_LEN};
use crate::error::FactError;
use crate::range::Range;

/// One unit of work: the product of `range` modulo `modulus`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Task {
    /// Integers to multiply (bounds as sent; servers normalize them).
    pub range: Range,
    /// Modulus, always non-zero once decoded.
    pub modulus: u64,
}

impl Task {
    /// Create a task.
    #[must_use]
    pub const fn new(range: Range, modulus: u64) -> Self {
        Self { range, modulus }
    }

    /// Encode as a 24-byte request frame.
    #[must_use]
    pub fn encode(&self) -> [u8; REQUEST_LEN] {
        let mut frame = [0u8; REQUEST_LEN];
        frame[..WORD_LEN].copy_from_slice(&self.range.begin.to_be_bytes());
        frame[WORD_LEN..2 * WORD_LEN].copy_from_slice(&self.range.end.to_be_bytes());
        frame[2 * WORD_LEN..].copy_from_slice(&self.modulus.to_be_bytes());
        frame
    }

    /// Decode a request frame.
    ///
    /// # Errors
    ///
    /// `FactError::Malformed` if `frame` is not exactly 24 bytes,
    /// `FactError::ZeroModulus` if the modulus field is zero.
    pub fn decode(frame: &[u8]) -> Result<Self, FactError> {
        if frame.len() != REQUEST_LEN {
            return Err(FactError::short_request(frame.len()));
        }
        let begin = word(&frame[..WORD_LEN]);
        let end = word(&frame[WORD_LEN..2 * WORD_LEN]);
        let modulus = word(&frame[2 * WORD_LEN..]);
        if modulus == 0 {
            return Err(FactError::ZeroModulus);
        }
        Ok(Self::new(Range::new(begin, end), modulus))
    }
}

fn word(bytes: &[u8]) -> u64 {
    let mut buf = [0u8; WORD_LEN];
    buf.copy_from_slice(bytes);
    u64::from_be_bytes(buf)
}

/// Encode a response value.
#[must_use]
pub fn encode_response(value: u64) -> [u8; RESPONSE_LEN] {
    value.to_be_bytes()
}

/// Decode a response frame.
///
/// # Errors
///
/// Returns an `UnexpectedEof` I/O error if `frame` is not exactly 8 bytes.
pub fn decode_response(frame: &[u8]) -> io::Result<u64> {
    if frame.len() != RESPONSE_LEN {
        return Err(io::Error::new(
            ErrorKind::UnexpectedEof,
            format!("expected {RESPONSE_LEN} response bytes, got {}", frame.len()),
        ));
    }
    Ok(word(frame))
}

/// Read the next request from `reader`.
///
/// Returns `Ok(None)` if the peer closed the stream before sending any byte
/// of a new request.
///
/// # Errors
///
/// `FactError::Malformed` if the stream ends part-way through a request,
/// `FactError::ZeroModulus` for a zero modulus, `FactError::Io` for
/// transport errors.
pub fn read_task<R: Read>(reader: &mut R) -> Result<Option<Task>, FactError> {
    let mut frame = [0u8; REQUEST_LEN];
    let mut filled = 0;
    while filled < REQUEST_LEN {
        match reader.read(&mut frame[filled..]) {
            Ok(0) if filled == 0 => return Ok(None),
            Ok(0) => return Err(FactError::short_request(filled)),
            Ok(n) => filled += n,
            Err(e) if e.kind() == ErrorKind::Interrupted => {}
            Err(e) => return Err(FactError::Io(e)),
        }
    }
    Task::decode(&frame).map(Some)
}

/// Write one request frame.
///
/// # Errors
///
/// Propagates I/O errors from `writer`.
pub fn write_task<W: Write>(writer: &mut W, task: &Task) -> io::Result<()> {
    writer.write_all(&task.encode())?;
    writer.flush()
}

/// Write one response frame.
///
/// # Errors
///
/// Propagates I/O errors from `writer`.
pub fn write_response<W: Write>(writer: &mut W, value: u64) -> io::Result<()> {
    writer.write_all(&encode_response(value))?;
    writer.flush()
}

/// Read exactly one response frame.
///
/// # Errors
///
/// `UnexpectedEof` on a short read, or any transport error.
pub fn read_response<R: Read>(reader: &mut R) -> io::Result<u64> {
    let mut frame = [0u8; RESPONSE_LEN];
    reader.read_exact(&mut frame)?;
    decode_response(&frame)
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use super::*;

    #[test]
    fn request_layout_is_big_endian() {
        let task = Task::new(Range::new(1, 0x0102), 97);
        let frame = task.encode();
        assert_eq!(&frame[..8], &[0, 0, 0, 0, 0, 0, 0, 1]);
        assert_eq!(&frame[8..16], &[0, 0, 0, 0, 0, 0, 1, 2]);
        assert_eq!(&frame[16..], &[0, 0, 0, 0, 0, 0, 0, 97]);
        assert_eq!(Task::decode(&frame).unwrap(), task);
    }

    #[test]
    fn decode_keeps_inverted_bounds() {
        let task = Task::new(Range::new(10, 1), 5);
        assert_eq!(Task::decode(&task.encode()).unwrap().range, Range::new(10, 1));
    }

    #[test]
    fn decode_wrong_length() {
        assert!(matches!(
            Task::decode(&[0u8; 23]),
            Err(FactError::Malformed {
                expected: 24,
                actual: 23
            })
        ));
        assert!(matches!(
            Task::decode(&[0u8; 25]),
            Err(FactError::Malformed { actual: 25, .. })
        ));
    }

    #[test]
    fn decode_zero_modulus() {
        let frame = Task::new(Range::new(1, 2), 0).encode();
        assert!(matches!(Task::decode(&frame), Err(FactError::ZeroModulus)));
    }

    #[test]
    fn read_task_clean_eof() {
        let mut empty = Cursor::new(Vec::new());
        assert!(read_task(&mut empty).unwrap().is_none());
    }

    #[test]
    fn read_task_partial_frame() {
        let mut partial = Cursor::new(vec![0u8; 10]);
        assert!(matches!(
            read_task(&mut partial),
            Err(FactError::Malformed { actual: 10, .. })
        ));
    }

    #[test]
    fn read_task_sequence() {
        let a = Task::new(Range::new(1, 5), 1000);
        let b = Task::new(Range::new(6, 9), 7);
        let mut bytes = a.encode().to_vec();
        bytes.extend_from_slice(&b.encode());
        let mut reader = Cursor::new(bytes);
        assert_eq!(read_task(&mut reader).unwrap(), Some(a));
        assert_eq!(read_task(&mut reader).unwrap(), Some(b));
        assert_eq!(read_task(&mut reader).unwrap(), None);
    }

    #[test]
    fn response_short_read() {
        let mut reader = Cursor::new(vec![1u8, 2, 3]);
        let err = read_response(&mut reader).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UnexpectedEof);
    }

    #[test]
    fn response_write_then_read() {
        let mut buf = Vec::new();
        write_response(&mut buf, 120).unwrap();
        assert_eq!(buf.len(), RESPONSE_LEN);
        assert_eq!(read_response(&mut Cursor::new(buf)).unwrap(), 120);
    }

    #[test]
    fn decode_response_wrong_length() {
        assert!(decode_response(&[0u8; 9]).is_err());
    }
}
