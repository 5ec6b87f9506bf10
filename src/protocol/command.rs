//! Command definitions
//!
//! Represents a client request as an ordered list of arguments.
//!
//! Commands arrive either as an array of bulk strings (binary safe) or as an
//! inline text line. Both framings normalize to the same `Command`, and a
//! command always formats back to the array of bulk strings form.
//!
//! The positional accessors are permissive: `value` returns `""` and
//! `integer` returns `0` for a missing or malformed argument. Check
//! `arg_count` first when absence matters.

use std::borrow::Cow;

use bytes::Bytes;

use crate::error::{RespError, Result};
use super::codec::format_value;
use super::value::Value;

/// A parsed client command
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Command {
    /// Argument 0 is the command name
    args: Vec<Bytes>,
}

impl Command {
    /// Build a command from explicit arguments
    pub fn new<I, A>(args: I) -> Result<Self>
    where
        I: IntoIterator<Item = A>,
        A: Into<Bytes>,
    {
        let args: Vec<Bytes> = args.into_iter().map(Into::into).collect();
        if args.is_empty() {
            return Err(RespError::Construction(
                "command requires at least one argument".to_string(),
            ));
        }
        Ok(Self { args })
    }

    /// Build a command from an array of non-null bulk strings
    pub fn from_value(value: Value) -> Result<Self> {
        let items = match value {
            Value::Array(Some(items)) => items,
            Value::Array(None) => {
                return Err(RespError::Protocol(
                    "command must be a non-null array".to_string(),
                ))
            }
            other => {
                return Err(RespError::Protocol(format!(
                    "command must be an array, got {}",
                    other.kind()
                )))
            }
        };

        let mut args = Vec::with_capacity(items.len());
        for (index, item) in items.into_iter().enumerate() {
            match item {
                Value::BulkString(Some(data)) => args.push(data),
                Value::BulkString(None) => {
                    return Err(RespError::UnexpectedCommandType {
                        index,
                        found: "null bulk string",
                    })
                }
                other => {
                    return Err(RespError::UnexpectedCommandType {
                        index,
                        found: other.kind(),
                    })
                }
            }
        }

        Self::new(args)
    }

    /// Build a command from an inline line such as `SET key value`
    pub fn from_inline(line: &str) -> Result<Self> {
        Self::from_inline_bytes(line.as_bytes())
    }

    /// Inline parsing over raw bytes; tokens need not be valid UTF-8
    pub fn from_inline_bytes(line: &[u8]) -> Result<Self> {
        let tokens: Vec<Bytes> = line
            .split(|b| b.is_ascii_whitespace())
            .filter(|token| !token.is_empty())
            .map(Bytes::copy_from_slice)
            .collect();

        if tokens.is_empty() {
            return Err(RespError::Construction("empty inline command".to_string()));
        }
        Ok(Self { args: tokens })
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// Argument 0, or `""` if there is none
    pub fn name(&self) -> Cow<'_, str> {
        self.value(0)
    }

    /// Compare the command name ignoring ASCII case
    pub fn is(&self, name: &str) -> bool {
        self.arg(0)
            .map(|arg| arg.eq_ignore_ascii_case(name.as_bytes()))
            .unwrap_or(false)
    }

    /// Argument `index` as text, or `""` when out of range.
    /// Invalid UTF-8 is replaced lossily; use `arg` for raw bytes.
    pub fn value(&self, index: usize) -> Cow<'_, str> {
        match self.args.get(index) {
            Some(arg) => String::from_utf8_lossy(arg),
            None => Cow::Borrowed(""),
        }
    }

    /// Argument `index` parsed as a signed 64-bit integer, or `0` when out of
    /// range or not a number
    pub fn integer(&self, index: usize) -> i64 {
        self.args
            .get(index)
            .and_then(|arg| std::str::from_utf8(arg).ok())
            .and_then(|s| s.parse().ok())
            .unwrap_or(0)
    }

    /// Raw bytes of argument `index`
    pub fn arg(&self, index: usize) -> Option<&[u8]> {
        self.args.get(index).map(|arg| &arg[..])
    }

    pub fn args(&self) -> &[Bytes] {
        &self.args
    }

    pub fn arg_count(&self) -> usize {
        self.args.len()
    }

    // =========================================================================
    // Conversion
    // =========================================================================

    /// The canonical array of bulk strings form
    pub fn to_value(&self) -> Value {
        Value::array(
            self.args
                .iter()
                .map(|arg| Value::BulkString(Some(arg.clone())))
                .collect(),
        )
    }

    /// Wire bytes of the canonical form, whatever framing the command came from
    pub fn format(&self) -> Vec<u8> {
        format_value(&self.to_value())
    }
}

impl TryFrom<Value> for Command {
    type Error = RespError;

    fn try_from(value: Value) -> Result<Self> {
        Command::from_value(value)
    }
}
