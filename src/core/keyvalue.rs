//! Quoted value extraction for document declarations
//!
//! Pulls `version="..."` and `encoding="..."` out of a `<?xml ...?>` body.
//! Only double quotes are recognised; there is no escaping and the first
//! occurrence of the key wins.

use memchr::{memchr, memmem};

/// Find `key` in `data` and return the bytes between the next pair of `"`.
///
/// Returns `None` if the key or either quote is missing.
pub fn parse_key_value<'a>(data: &'a [u8], key: &[u8]) -> Option<&'a [u8]> {
    let after_key = memmem::find(data, key)? + key.len();
    let start = after_key + memchr(b'"', &data[after_key..])? + 1;
    let end = start + memchr(b'"', &data[start..])?;
    Some(&data[start..end])
}
