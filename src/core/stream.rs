//! Byte Stream Source
//!
//! The reader pulls its input through [`ByteStream`]: read one byte, peek
//! one byte, skip forward. Every `BufRead` gets an implementation, and its
//! bulk scan searches the filled buffer with memchr instead of going
//! byte by byte.

use std::io::{self, BufRead, ErrorKind};

use memchr::memchr;

/// Sequential byte source consumed by the reader
pub trait ByteStream {
    /// Read one byte, or `None` once the stream is exhausted
    fn read_one(&mut self) -> io::Result<Option<u8>>;

    /// Look at the next byte without consuming it
    fn peek_one(&mut self) -> io::Result<Option<u8>>;

    /// Advance past `n` bytes, stopping early at end of stream
    fn skip_forward(&mut self, n: usize) -> io::Result<()>;

    /// Append bytes to `buf` until `delimiter` is read.
    ///
    /// The delimiter is consumed but not appended. Returns `false` if the
    /// stream ended before the delimiter was found; whatever was read is
    /// still left in `buf`.
    fn take_until(&mut self, delimiter: u8, buf: &mut Vec<u8>) -> io::Result<bool> {
        while let Some(b) = self.read_one()? {
            if b == delimiter {
                return Ok(true);
            }
            buf.push(b);
        }
        Ok(false)
    }
}

impl<R: BufRead> ByteStream for R {
    fn read_one(&mut self) -> io::Result<Option<u8>> {
        let byte = self.peek_one()?;
        if byte.is_some() {
            self.consume(1);
        }
        Ok(byte)
    }

    fn peek_one(&mut self) -> io::Result<Option<u8>> {
        loop {
            match self.fill_buf() {
                Ok(available) => return Ok(available.first().copied()),
                Err(e) if e.kind() == ErrorKind::Interrupted => {}
                Err(e) => return Err(e),
            }
        }
    }

    fn skip_forward(&mut self, mut n: usize) -> io::Result<()> {
        while n > 0 {
            let step = match self.fill_buf() {
                Ok(available) => available.len().min(n),
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => return Err(e),
            };
            if step == 0 {
                break;
            }
            self.consume(step);
            n -= step;
        }
        Ok(())
    }

    fn take_until(&mut self, delimiter: u8, buf: &mut Vec<u8>) -> io::Result<bool> {
        loop {
            let (found, used) = {
                let available = match self.fill_buf() {
                    Ok(available) => available,
                    Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                    Err(e) => return Err(e),
                };
                match memchr(delimiter, available) {
                    Some(i) => {
                        buf.extend_from_slice(&available[..i]);
                        (true, i + 1)
                    }
                    None => {
                        buf.extend_from_slice(available);
                        (false, available.len())
                    }
                }
            };
            self.consume(used);
            if found {
                return Ok(true);
            }
            if used == 0 {
                return Ok(false);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{BufReader, Cursor};

    /// Stream that only implements the required methods
    struct ByteByByte {
        data: Vec<u8>,
        pos: usize,
    }

    impl ByteStream for ByteByByte {
        fn read_one(&mut self) -> io::Result<Option<u8>> {
            let b = self.data.get(self.pos).copied();
            if b.is_some() {
                self.pos += 1;
            }
            Ok(b)
        }

        fn peek_one(&mut self) -> io::Result<Option<u8>> {
            Ok(self.data.get(self.pos).copied())
        }

        fn skip_forward(&mut self, n: usize) -> io::Result<()> {
            self.pos = (self.pos + n).min(self.data.len());
            Ok(())
        }
    }

    #[test]
    fn test_read_and_peek() {
        let mut stream: &[u8] = b"ab";
        assert_eq!(stream.peek_one().unwrap(), Some(b'a'));
        assert_eq!(stream.peek_one().unwrap(), Some(b'a'));
        assert_eq!(stream.read_one().unwrap(), Some(b'a'));
        assert_eq!(stream.read_one().unwrap(), Some(b'b'));
        assert_eq!(stream.read_one().unwrap(), None);
        assert_eq!(stream.peek_one().unwrap(), None);
    }

    #[test]
    fn test_skip_forward_past_end() {
        let mut stream = Cursor::new(b"abc".to_vec());
        stream.skip_forward(2).unwrap();
        assert_eq!(stream.read_one().unwrap(), Some(b'c'));
        stream.skip_forward(10).unwrap();
        assert_eq!(stream.peek_one().unwrap(), None);
    }

    #[test]
    fn test_take_until_across_buffer_refills() {
        // Capacity 2 forces several fill_buf rounds before the delimiter
        let mut stream = BufReader::with_capacity(2, &b"hello world<rest"[..]);
        let mut buf = Vec::new();
        assert!(stream.take_until(b'<', &mut buf).unwrap());
        assert_eq!(buf, b"hello world");
        assert_eq!(stream.read_one().unwrap(), Some(b'r'));
    }

    #[test]
    fn test_take_until_missing_delimiter() {
        let mut stream: &[u8] = b"no tag here";
        let mut buf = Vec::new();
        assert!(!stream.take_until(b'<', &mut buf).unwrap());
        assert_eq!(buf, b"no tag here");
    }

    #[test]
    fn test_default_take_until() {
        let mut stream = ByteByByte {
            data: b"root>tail".to_vec(),
            pos: 0,
        };
        let mut buf = Vec::new();
        assert!(stream.take_until(b'>', &mut buf).unwrap());
        assert_eq!(buf, b"root");
        assert_eq!(stream.peek_one().unwrap(), Some(b't'));
    }
}
