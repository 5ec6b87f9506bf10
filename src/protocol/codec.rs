//! Protocol codec
//!
//! Formatting of values into wire bytes.
//!
//! ## Wire Format
//!
//! ```text
//! +<text>\r\n                     simple string
//! -<message>\r\n                  error
//! :<int>\r\n                      integer
//! $<len>\r\n<bytes>\r\n           bulk string     ($-1\r\n when null)
//! *<count>\r\n<frame>...          array           (*-1\r\n when null)
//! ```
//!
//! Every frame produced here parses back into an equal `Value`.

use std::io::Write;

use bytes::{BufMut, BytesMut};

use crate::error::Result;
use super::value::{Value, TAG_ARRAY, TAG_BULK_STRING};

/// Line terminator
pub const CRLF: &[u8] = b"\r\n";

// =============================================================================
// Value Encoding
// =============================================================================

/// Append the wire form of a value to `buf`
///
/// Simple string and error payloads are written verbatim; a payload that
/// contains `\r\n` breaks framing and must not be passed in.
pub fn encode_value(value: &Value, buf: &mut BytesMut) {
    match value {
        Value::SimpleString(payload) | Value::Error(payload) => {
            buf.reserve(payload.len() + 3);
            buf.put_u8(value.tag());
            buf.put_slice(payload);
            buf.put_slice(CRLF);
        }
        Value::Integer(n) => put_header(buf, value.tag(), *n),
        Value::BulkString(None) => put_header(buf, TAG_BULK_STRING, -1),
        Value::BulkString(Some(data)) => {
            put_header(buf, TAG_BULK_STRING, data.len() as i64);
            buf.reserve(data.len() + 2);
            buf.put_slice(data);
            buf.put_slice(CRLF);
        }
        Value::Array(None) => put_header(buf, TAG_ARRAY, -1),
        Value::Array(Some(items)) => {
            put_header(buf, TAG_ARRAY, items.len() as i64);
            for item in items {
                encode_value(item, buf);
            }
        }
    }
}

/// Format a value into an owned byte vector
pub fn format_value(value: &Value) -> Vec<u8> {
    let mut buf = BytesMut::new();
    encode_value(value, &mut buf);
    buf.to_vec()
}

/// Tag byte, decimal number, terminator
fn put_header(buf: &mut BytesMut, tag: u8, n: i64) {
    let digits = n.to_string();
    buf.reserve(digits.len() + 3);
    buf.put_u8(tag);
    buf.put_slice(digits.as_bytes());
    buf.put_slice(CRLF);
}

// =============================================================================
// Stream-based I/O helpers
// =============================================================================

/// Write a value to a stream
pub fn write_value<W: Write>(writer: &mut W, value: &Value) -> Result<()> {
    let mut buf = BytesMut::new();
    encode_value(value, &mut buf);
    writer.write_all(&buf)?;
    writer.flush()?;
    Ok(())
}
