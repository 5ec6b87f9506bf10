//! Value definitions
//!
//! Represents one RESP frame as a tagged value tree.

use bytes::Bytes;

use crate::error::{RespError, Result};

/// Tag byte for each frame type
pub const TAG_SIMPLE_STRING: u8 = b'+';
pub const TAG_ERROR: u8 = b'-';
pub const TAG_INTEGER: u8 = b':';
pub const TAG_BULK_STRING: u8 = b'$';
pub const TAG_ARRAY: u8 = b'*';

/// A single RESP frame
///
/// Bulk strings and arrays carry `None` when null, which is distinct from an
/// empty payload (`$0\r\n\r\n` and `*0\r\n`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    /// `+<text>\r\n`
    SimpleString(Bytes),

    /// `-<message>\r\n`
    Error(Bytes),

    /// `:<int>\r\n`
    Integer(i64),

    /// `$<len>\r\n<bytes>\r\n` or `$-1\r\n`
    BulkString(Option<Bytes>),

    /// `*<count>\r\n<frames>` or `*-1\r\n`
    Array(Option<Vec<Value>>),
}

impl Value {
    // =========================================================================
    // Constructors
    // =========================================================================

    /// Create a simple string. The payload must not contain `\r\n`.
    pub fn simple_string(text: impl Into<Bytes>) -> Self {
        Value::SimpleString(text.into())
    }

    /// Create an error reply. The message must not contain `\r\n`.
    pub fn error(message: impl Into<Bytes>) -> Self {
        Value::Error(message.into())
    }

    pub fn integer(n: i64) -> Self {
        Value::Integer(n)
    }

    /// Create a present (non-null) bulk string
    pub fn bulk_string(data: impl Into<Bytes>) -> Self {
        Value::BulkString(Some(data.into()))
    }

    pub fn null_bulk_string() -> Self {
        Value::BulkString(None)
    }

    /// Create a present (non-null) array, taking ownership of its children
    pub fn array(items: Vec<Value>) -> Self {
        Value::Array(Some(items))
    }

    pub fn null_array() -> Self {
        Value::Array(None)
    }

    /// The `+OK` reply
    pub fn ok() -> Self {
        Value::SimpleString(Bytes::from_static(b"OK"))
    }

    // =========================================================================
    // Inspection
    // =========================================================================

    /// Name of the active variant, for diagnostics
    pub fn kind(&self) -> &'static str {
        match self {
            Value::SimpleString(_) => "simple string",
            Value::Error(_) => "error",
            Value::Integer(_) => "integer",
            Value::BulkString(_) => "bulk string",
            Value::Array(_) => "array",
        }
    }

    /// Wire tag byte of the active variant
    pub fn tag(&self) -> u8 {
        match self {
            Value::SimpleString(_) => TAG_SIMPLE_STRING,
            Value::Error(_) => TAG_ERROR,
            Value::Integer(_) => TAG_INTEGER,
            Value::BulkString(_) => TAG_BULK_STRING,
            Value::Array(_) => TAG_ARRAY,
        }
    }

    /// True for a null bulk string or null array
    pub fn is_null(&self) -> bool {
        matches!(self, Value::BulkString(None) | Value::Array(None))
    }

    // =========================================================================
    // Variant-checked accessors
    // =========================================================================

    pub fn as_simple_string(&self) -> Result<&[u8]> {
        match self {
            Value::SimpleString(s) => Ok(&s[..]),
            other => Err(other.wrong_variant("simple string")),
        }
    }

    pub fn as_error(&self) -> Result<&[u8]> {
        match self {
            Value::Error(e) => Ok(&e[..]),
            other => Err(other.wrong_variant("error")),
        }
    }

    pub fn as_integer(&self) -> Result<i64> {
        match self {
            Value::Integer(n) => Ok(*n),
            other => Err(other.wrong_variant("integer")),
        }
    }

    /// Payload of a bulk string, `None` when null
    pub fn as_bulk_string(&self) -> Result<Option<&[u8]>> {
        match self {
            Value::BulkString(data) => Ok(data.as_deref()),
            other => Err(other.wrong_variant("bulk string")),
        }
    }

    /// Children of an array, `None` when null
    pub fn as_array(&self) -> Result<Option<&[Value]>> {
        match self {
            Value::Array(items) => Ok(items.as_deref()),
            other => Err(other.wrong_variant("array")),
        }
    }

    /// Consume an array and return its children, `None` when null
    pub fn into_array(self) -> Result<Option<Vec<Value>>> {
        match self {
            Value::Array(items) => Ok(items),
            other => Err(other.wrong_variant("array")),
        }
    }

    /// Serialize to wire bytes
    pub fn to_bytes(&self) -> Vec<u8> {
        super::codec::format_value(self)
    }

    fn wrong_variant(&self, expected: &'static str) -> RespError {
        RespError::WrongVariant {
            expected,
            found: self.kind(),
        }
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Integer(n)
    }
}
