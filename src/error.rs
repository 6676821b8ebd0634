//! Reasons a read stopped early
//!
//! The event stream reports all of these as [`EventKind::None`]; the
//! detail is kept on the reader for callers that want to tell a clean end
//! of input from a truncated tag.
//!
//! [`EventKind::None`]: crate::reader::events::EventKind::None

use std::io;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ReadError {
    /// Input ended before the `>` closing a tag
    #[error("unterminated tag starting at byte {position}")]
    UnterminatedTag { position: u64 },

    /// Input ended inside character data with no following tag
    #[error("character data starting at byte {position} is not followed by a tag")]
    UnterminatedText { position: u64 },

    /// Document declaration without a double-quoted value for `key`
    #[error("document declaration has no quoted `{key}` value")]
    MissingDeclarationValue { key: &'static str },

    #[error("failed to read from stream: {0}")]
    Io(#[from] io::Error),
}
