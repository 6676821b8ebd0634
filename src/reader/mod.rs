//! XML Reader Module
//!
//! - Pull: cursor-driven lexer, one event per advance
//! - Events: event kinds plus borrowed and owned payloads

pub mod events;
pub mod pull;
