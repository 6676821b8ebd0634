//! XML Event Types
//!
//! Event kinds and payloads for pull-style processing. [`Event`] borrows
//! from the reader's scratch buffers and is only valid until the next
//! advance; [`XmlEvent`] is an owned copy for collecting.

/// Kind of the reader's current event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum EventKind {
    /// No event: end of input, a malformed construct, or not yet primed
    #[default]
    None,
    /// Document declaration: <?xml version="..." encoding="..."?>
    DocumentBegin,
    /// Start tag: <name ...>
    ElementBegin,
    /// End tag: </name>
    ElementEnd,
    /// Comment: <!-- text -->
    Comment,
    /// Text between tags
    Characters,
}

impl EventKind {
    /// Check if this marks the end of the event stream
    #[inline]
    pub fn is_none(self) -> bool {
        self == EventKind::None
    }
}

/// Borrowed view of the current event, carrying only what that kind defines
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event<'a> {
    DocumentBegin { version: &'a str, encoding: &'a str },
    /// `body` is the whole tag interior; `name` its leading non-space run
    ElementBegin { name: &'a [u8], body: &'a [u8] },
    ElementEnd { name: &'a [u8] },
    Comment(&'a [u8]),
    Characters(&'a [u8]),
}

impl<'a> Event<'a> {
    /// Get the kind of this event
    pub fn kind(&self) -> EventKind {
        match self {
            Event::DocumentBegin { .. } => EventKind::DocumentBegin,
            Event::ElementBegin { .. } => EventKind::ElementBegin,
            Event::ElementEnd { .. } => EventKind::ElementEnd,
            Event::Comment(_) => EventKind::Comment,
            Event::Characters(_) => EventKind::Characters,
        }
    }

    /// Get the element name as a string, for start and end tags
    pub fn name_str(&self) -> Option<&'a str> {
        match *self {
            Event::ElementBegin { name, .. } | Event::ElementEnd { name } => {
                std::str::from_utf8(name).ok()
            }
            _ => None,
        }
    }

    /// Get comment or character text as a string
    pub fn text_str(&self) -> Option<&'a str> {
        match *self {
            Event::Comment(t) | Event::Characters(t) => std::str::from_utf8(t).ok(),
            _ => None,
        }
    }

    /// Check if this is a start tag
    pub fn is_start_element(&self) -> bool {
        matches!(self, Event::ElementBegin { .. })
    }

    /// Check if this is an end tag
    pub fn is_end_element(&self) -> bool {
        matches!(self, Event::ElementEnd { .. })
    }

    /// Copy into an owned event, replacing invalid UTF-8
    pub fn to_owned_event(&self) -> XmlEvent {
        match *self {
            Event::DocumentBegin { version, encoding } => XmlEvent::DocumentBegin {
                version: version.to_owned(),
                encoding: encoding.to_owned(),
            },
            Event::ElementBegin { name, .. } => XmlEvent::ElementBegin { name: lossy(name) },
            Event::ElementEnd { name } => XmlEvent::ElementEnd { name: lossy(name) },
            Event::Comment(text) => XmlEvent::Comment(lossy(text)),
            Event::Characters(text) => XmlEvent::Characters(lossy(text)),
        }
    }
}

fn lossy(bytes: &[u8]) -> String {
    String::from_utf8_lossy(bytes).into_owned()
}

/// Owned XML event
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum XmlEvent {
    DocumentBegin { version: String, encoding: String },
    ElementBegin { name: String },
    ElementEnd { name: String },
    Comment(String),
    Characters(String),
}

impl XmlEvent {
    /// Get the kind of this event
    pub fn kind(&self) -> EventKind {
        match self {
            XmlEvent::DocumentBegin { .. } => EventKind::DocumentBegin,
            XmlEvent::ElementBegin { .. } => EventKind::ElementBegin,
            XmlEvent::ElementEnd { .. } => EventKind::ElementEnd,
            XmlEvent::Comment(_) => EventKind::Comment,
            XmlEvent::Characters(_) => EventKind::Characters,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_start_element() {
        let event = Event::ElementBegin {
            name: b"div",
            body: b"div id=\"x\"",
        };
        assert_eq!(event.kind(), EventKind::ElementBegin);
        assert_eq!(event.name_str(), Some("div"));
        assert_eq!(event.text_str(), None);
        assert!(event.is_start_element());
        assert_eq!(event.to_owned_event(), XmlEvent::ElementBegin { name: "div".into() });
    }

    #[test]
    fn test_invalid_utf8_text() {
        let event = Event::Characters(b"a\xffb");
        assert_eq!(event.text_str(), None);
        assert_eq!(event.to_owned_event(), XmlEvent::Characters("a\u{FFFD}b".into()));
    }

    #[test]
    fn test_default_kind() {
        assert!(EventKind::default().is_none());
        assert!(!EventKind::Comment.is_none());
    }
}
