//! Pull Reader
//!
//! Lexes one event per call to [`Reader::next`]. A whole `<...>` body is
//! captured before it is classified, so tags are never streamed in part.
//!
//! Classification order for a tag body:
//! - `?xml...` (longer than 4 bytes): document declaration
//! - `/...` (longer than 1 byte): end tag
//! - `!--...--` (longer than 5 bytes): comment
//! - anything else: start tag, including `b/` for `<b/>`

use crate::core::cursor::CharCursor;
use crate::core::keyvalue::parse_key_value;
use crate::core::stream::ByteStream;
use crate::error::ReadError;

use super::events::{Event, EventKind, XmlEvent};

/// Initial capacity of the tag and text scratch buffers
const DEFAULT_BUFFER_SIZE: usize = 256;

/// Pull-style lexer over a byte stream
pub struct Reader<S> {
    cursor: CharCursor<S>,
    event: EventKind,
    /// Interior of the last `<...>`, delimiters excluded
    tag_body: Vec<u8>,
    /// Last run of bytes outside any tag
    text: Vec<u8>,
    version: String,
    encoding: String,
    error: Option<ReadError>,
}

impl<S: ByteStream> Reader<S> {
    /// Open a reader and lex the first event
    pub fn open(stream: S) -> Self {
        Self::with_capacity(stream, DEFAULT_BUFFER_SIZE)
    }

    /// Open a reader with presized scratch buffers and lex the first event
    pub fn with_capacity(stream: S, capacity: usize) -> Self {
        let mut reader = Reader {
            cursor: CharCursor::new(stream),
            event: EventKind::None,
            tag_body: Vec::with_capacity(capacity),
            text: Vec::with_capacity(capacity),
            version: String::new(),
            encoding: String::new(),
            error: None,
        };
        reader.next();
        reader
    }

    /// Release the scratch buffers and hand the stream back, unclosed
    pub fn close(self) -> S {
        self.cursor.into_inner()
    }

    /// Check if there is a current event
    #[inline]
    pub fn has_next(&self) -> bool {
        !self.event.is_none()
    }

    /// Get the kind of the current event
    #[inline]
    pub fn current_event(&self) -> EventKind {
        self.event
    }

    /// Why the last advance produced no event.
    ///
    /// `None` after a clean end of input or while events are still flowing.
    pub fn error(&self) -> Option<&ReadError> {
        self.error.as_ref()
    }

    /// Advance to the next event.
    ///
    /// Returns [`EventKind::None`] at end of input or on a malformed
    /// construct. Reading past that point is not supported.
    #[allow(clippy::should_implement_trait)]
    pub fn next(&mut self) -> EventKind {
        self.event = EventKind::None;
        self.error = None;

        match self.advance() {
            Ok(kind) => {
                self.event = kind;
                tracing::trace!(event = ?kind, position = self.cursor.position(), "xml event");
            }
            Err(err) => {
                tracing::debug!(error = %err, "xml reader stopped");
                self.error = Some(err);
            }
        }
        self.event
    }

    fn advance(&mut self) -> Result<EventKind, ReadError> {
        match self.cursor.peek_char()? {
            None => Ok(EventKind::None),
            Some(b'<') => {
                self.parse_element()?;
                self.classify_tag()
            }
            Some(_) => {
                self.parse_text()?;
                Ok(EventKind::Characters)
            }
        }
    }

    fn classify_tag(&mut self) -> Result<EventKind, ReadError> {
        let body = &self.tag_body;
        let size = body.len();

        if size > 4 && body.starts_with(b"?xml") {
            self.parse_declaration()?;
            Ok(EventKind::DocumentBegin)
        } else if size > 1 && body[0] == b'/' {
            Ok(EventKind::ElementEnd)
        } else if size > 5 && body.starts_with(b"!--") && body.ends_with(b"--") {
            Ok(EventKind::Comment)
        } else {
            Ok(EventKind::ElementBegin)
        }
    }

    /// Capture version and encoding, then skip to the first real tag
    fn parse_declaration(&mut self) -> Result<(), ReadError> {
        let version = parse_key_value(&self.tag_body, b"version")
            .ok_or(ReadError::MissingDeclarationValue { key: "version" })?;
        let encoding = parse_key_value(&self.tag_body, b"encoding")
            .ok_or(ReadError::MissingDeclarationValue { key: "encoding" })?;

        self.version.clear();
        self.version.push_str(&String::from_utf8_lossy(version));
        self.encoding.clear();
        self.encoding.push_str(&String::from_utf8_lossy(encoding));

        // A declaration with nothing after it still counts
        match self.parse_text() {
            Ok(()) | Err(ReadError::UnterminatedText { .. }) => Ok(()),
            Err(err) => Err(err),
        }
    }

    /// Read up to and including the next `>`, keeping what lies between `<` and `>`
    fn parse_element(&mut self) -> Result<(), ReadError> {
        let start = self.cursor.position();
        self.tag_body.clear();

        // Stray bytes ahead of the `<` are dropped
        if !self.cursor.take_until(b'<', &mut self.tag_body)? {
            return Err(ReadError::UnterminatedTag { position: start });
        }
        self.tag_body.clear();

        let open = self.cursor.position() - 1;
        if !self.cursor.take_until(b'>', &mut self.tag_body)? {
            return Err(ReadError::UnterminatedTag { position: open });
        }
        Ok(())
    }

    /// Read up to the next `<` and push it back for the following event
    fn parse_text(&mut self) -> Result<(), ReadError> {
        let start = self.cursor.position();
        self.text.clear();

        if !self.cursor.take_until(b'<', &mut self.text)? {
            return Err(ReadError::UnterminatedText { position: start });
        }
        debug_assert!(!self.cursor.has_pending(), "text run ended with a byte still pushed back");
        self.cursor.unget(b'<');
        Ok(())
    }

    /// Version from the most recent document declaration, empty if none
    pub fn version(&self) -> &str {
        &self.version
    }

    /// Encoding from the most recent document declaration, empty if none
    pub fn encoding(&self) -> &str {
        &self.encoding
    }

    /// Name of the current start or end tag as raw bytes
    pub fn element_name_bytes(&self) -> Option<&[u8]> {
        debug_assert!(
            matches!(self.event, EventKind::ElementBegin | EventKind::ElementEnd),
            "element_name called on {:?} event",
            self.event
        );
        let name = match self.event {
            EventKind::ElementBegin => leading_name(&self.tag_body),
            EventKind::ElementEnd => &self.tag_body[1..],
            _ => return None,
        };
        if name.is_empty() {
            None
        } else {
            Some(name)
        }
    }

    /// Name of the current start or end tag
    pub fn element_name(&self) -> Option<&str> {
        self.element_name_bytes().and_then(|n| std::str::from_utf8(n).ok())
    }

    /// Text of the current comment as raw bytes, without `!--` and `--`
    pub fn comment_text_bytes(&self) -> Option<&[u8]> {
        debug_assert!(
            self.event == EventKind::Comment,
            "comment_text called on {:?} event",
            self.event
        );
        if self.event != EventKind::Comment {
            return None;
        }
        comment_body(&self.tag_body)
    }

    /// Text of the current comment, without `!--` and `--`
    pub fn comment_text(&self) -> Option<&str> {
        self.comment_text_bytes().and_then(|t| std::str::from_utf8(t).ok())
    }

    /// Current character data as raw bytes
    pub fn characters_text_bytes(&self) -> Option<&[u8]> {
        debug_assert!(
            self.event == EventKind::Characters,
            "characters_text called on {:?} event",
            self.event
        );
        if self.event != EventKind::Characters {
            return None;
        }
        Some(&self.text)
    }

    /// Current character data, verbatim
    pub fn characters_text(&self) -> Option<&str> {
        self.characters_text_bytes().and_then(|t| std::str::from_utf8(t).ok())
    }

    /// Attributes are not parsed; always 0
    pub fn attribute_count(&self) -> usize {
        0
    }

    /// Attributes are not parsed; always `None`
    pub fn attribute_name(&self, _index: usize) -> Option<&str> {
        None
    }

    /// Attributes are not parsed; always `None`
    pub fn attribute_value(&self, _index: usize) -> Option<&str> {
        None
    }

    /// Borrowed view of the current event, `None` once input is exhausted
    pub fn event(&self) -> Option<Event<'_>> {
        let event = match self.event {
            EventKind::None => return None,
            EventKind::DocumentBegin => Event::DocumentBegin {
                version: &self.version,
                encoding: &self.encoding,
            },
            EventKind::ElementBegin => Event::ElementBegin {
                name: leading_name(&self.tag_body),
                body: &self.tag_body,
            },
            EventKind::ElementEnd => Event::ElementEnd {
                name: &self.tag_body[1..],
            },
            EventKind::Comment => Event::Comment(comment_body(&self.tag_body).unwrap_or_default()),
            EventKind::Characters => Event::Characters(&self.text),
        };
        Some(event)
    }

    /// Iterate owned copies of the current event and every one after it
    pub fn events(&mut self) -> Events<'_, S> {
        Events { reader: self }
    }
}

/// Iterator returned by [`Reader::events`]
pub struct Events<'r, S> {
    reader: &'r mut Reader<S>,
}

impl<S: ByteStream> Iterator for Events<'_, S> {
    type Item = XmlEvent;

    fn next(&mut self) -> Option<Self::Item> {
        let event = self.reader.event()?.to_owned_event();
        self.reader.next();
        Some(event)
    }
}

/// Lex all events from a stream
pub fn read_events<S: ByteStream>(stream: S) -> Vec<XmlEvent> {
    let mut reader = Reader::open(stream);
    reader.events().collect()
}

/// Leading run of non-whitespace bytes
fn leading_name(body: &[u8]) -> &[u8] {
    let end = body.iter().position(|&b| is_space(b)).unwrap_or(body.len());
    &body[..end]
}

/// Comment interior with `!--` and `--` removed
fn comment_body(body: &[u8]) -> Option<&[u8]> {
    if body.len() < 6 {
        return None;
    }
    Some(&body[3..body.len() - 2])
}

#[inline]
fn is_space(b: u8) -> bool {
    matches!(b, b' ' | b'\t' | b'\n' | b'\r' | 0x0b | 0x0c)
}
