//! Character cursor with single-slot pushback
//!
//! Wraps a [`ByteStream`] so the lexer can give back exactly one byte (the
//! `<` that ends a text run) and see it again on the next read.

use super::stream::ByteStream;
use crate::error::ReadError;

/// Cursor over a byte stream with room for one ungotten byte
pub struct CharCursor<S> {
    stream: S,
    pushback: Option<u8>,
    /// Bytes handed to the lexer so far, net of pushback
    position: u64,
}

impl<S: ByteStream> CharCursor<S> {
    /// Create a cursor at the start of `stream`
    pub fn new(stream: S) -> Self {
        CharCursor {
            stream,
            pushback: None,
            position: 0,
        }
    }

    /// Offset of the next byte the lexer will see
    #[inline]
    pub fn position(&self) -> u64 {
        self.position
    }

    /// Whether a byte is waiting in the pushback slot
    #[inline]
    pub fn has_pending(&self) -> bool {
        self.pushback.is_some()
    }

    /// Consume the next byte, draining the pushback slot first
    pub fn get_char(&mut self) -> Result<Option<u8>, ReadError> {
        let ch = match self.pushback.take() {
            Some(ch) => Some(ch),
            None => self.stream.read_one()?,
        };
        if ch.is_some() {
            self.position += 1;
        }
        Ok(ch)
    }

    /// Look at the next byte without consuming it
    pub fn peek_char(&mut self) -> Result<Option<u8>, ReadError> {
        match self.pushback {
            Some(ch) => Ok(Some(ch)),
            None => Ok(self.stream.peek_one()?),
        }
    }

    /// Consume the byte just peeked without materializing it
    pub fn seek_char(&mut self) -> Result<(), ReadError> {
        if self.pushback.take().is_none() {
            if self.stream.peek_one()?.is_none() {
                return Ok(());
            }
            self.stream.skip_forward(1)?;
        }
        self.position += 1;
        Ok(())
    }

    /// Give one byte back to the cursor.
    ///
    /// The position steps back by one, but never below zero: ungetting
    /// before anything was read leaves it at 0.
    ///
    /// # Panics
    ///
    /// Panics if the slot is already occupied.
    pub fn unget(&mut self, ch: u8) {
        assert!(
            self.pushback.is_none(),
            "pushback slot already holds {:?}",
            self.pushback.map(char::from)
        );
        self.pushback = Some(ch);
        self.position = self.position.saturating_sub(1);
    }

    /// Append bytes to `buf` until `delimiter` is consumed.
    ///
    /// Same result as a [`get_char`](Self::get_char) loop; returns `false`
    /// when the input ends first.
    pub fn take_until(&mut self, delimiter: u8, buf: &mut Vec<u8>) -> Result<bool, ReadError> {
        if let Some(ch) = self.pushback.take() {
            self.position += 1;
            if ch == delimiter {
                return Ok(true);
            }
            buf.push(ch);
        }
        let before = buf.len();
        let found = self.stream.take_until(delimiter, buf)?;
        self.position += (buf.len() - before) as u64 + u64::from(found);
        Ok(found)
    }

    /// Detach and return the underlying stream
    pub fn into_inner(self) -> S {
        self.stream
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_and_peek() {
        let mut cursor = CharCursor::new(&b"ab"[..]);
        assert_eq!(cursor.peek_char().unwrap(), Some(b'a'));
        assert_eq!(cursor.get_char().unwrap(), Some(b'a'));
        assert_eq!(cursor.get_char().unwrap(), Some(b'b'));
        assert_eq!(cursor.get_char().unwrap(), None);
        assert_eq!(cursor.position(), 2);
    }

    #[test]
    fn test_pushback_returned_once() {
        let mut cursor = CharCursor::new(&b"text<a>"[..]);
        let mut buf = Vec::new();
        assert!(cursor.take_until(b'<', &mut buf).unwrap());
        assert_eq!(buf, b"text");
        cursor.unget(b'<');
        assert!(cursor.has_pending());
        assert_eq!(cursor.position(), 4);

        assert_eq!(cursor.peek_char().unwrap(), Some(b'<'));
        assert_eq!(cursor.get_char().unwrap(), Some(b'<'));
        assert_eq!(cursor.get_char().unwrap(), Some(b'a'));
        assert!(!cursor.has_pending());
    }

    #[test]
    #[should_panic(expected = "pushback slot already holds")]
    fn test_double_unget_panics() {
        let mut cursor = CharCursor::new(&b"<<"[..]);
        cursor.get_char().unwrap();
        cursor.get_char().unwrap();
        cursor.unget(b'<');
        cursor.unget(b'<');
    }

    #[test]
    fn test_unget_before_any_read() {
        let mut cursor = CharCursor::new(&b"ab"[..]);
        cursor.unget(b'<');
        assert_eq!(cursor.position(), 0);
        assert_eq!(cursor.get_char().unwrap(), Some(b'<'));
        assert_eq!(cursor.position(), 1);
        assert_eq!(cursor.get_char().unwrap(), Some(b'a'));
        assert_eq!(cursor.position(), 2);
    }

    #[test]
    fn test_seek_char() {
        let mut cursor = CharCursor::new(&b"xy"[..]);
        cursor.seek_char().unwrap();
        assert_eq!(cursor.get_char().unwrap(), Some(b'y'));
        cursor.unget(b'y');
        cursor.seek_char().unwrap();
        assert_eq!(cursor.peek_char().unwrap(), None);
        cursor.seek_char().unwrap();
        assert_eq!(cursor.position(), 2);
    }

    #[test]
    fn test_take_until_from_pushback() {
        let mut cursor = CharCursor::new(&b"ab>"[..]);
        assert_eq!(cursor.get_char().unwrap(), Some(b'a'));
        cursor.unget(b'a');
        let mut buf = Vec::new();
        assert!(cursor.take_until(b'>', &mut buf).unwrap());
        assert_eq!(buf, b"ab");
    }

    #[test]
    fn test_nul_byte_is_data() {
        let mut cursor = CharCursor::new(&b"\0<"[..]);
        assert_eq!(cursor.get_char().unwrap(), Some(0));
        assert_eq!(cursor.get_char().unwrap(), Some(b'<'));
    }
}
