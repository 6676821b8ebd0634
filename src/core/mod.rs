//! Core lexing primitives
//!
//! - Stream: byte source trait, memchr-backed for `BufRead` inputs
//! - Cursor: single-slot pushback over a stream
//! - KeyValue: quoted value lookup in declaration bodies

pub mod cursor;
pub mod keyvalue;
pub mod stream;
