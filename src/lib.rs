//! xmlcursor - Pull-style lexer for a small XML-like markup subset
//!
//! The caller opens a [`Reader`] on a byte stream and walks it one event at
//! a time: document declaration, start tag, end tag, comment, character
//! data. Attributes, entities, CDATA, DTDs and self-closing tags are not
//! interpreted; `<b/>` is a start tag named `b/`.
//!
//! ```
//! use xmlcursor::{EventKind, Reader};
//!
//! let mut reader = Reader::open(&b"<a>hi</a>"[..]);
//! assert_eq!(reader.element_name(), Some("a"));
//! assert_eq!(reader.next(), EventKind::Characters);
//! assert_eq!(reader.characters_text(), Some("hi"));
//! ```

pub mod core;
pub mod error;
pub mod reader;

pub use crate::core::stream::ByteStream;
pub use crate::error::ReadError;
pub use crate::reader::events::{Event, EventKind, XmlEvent};
pub use crate::reader::pull::{read_events, Events, Reader};
