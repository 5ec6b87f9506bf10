//! Frame Reader
//!
//! Decodes RESP frames from any blocking byte source.
//!
//! The reader consumes exactly the bytes of one frame per call, one byte at a
//! time while scanning lines, so it never reads into the next frame. Wrap
//! sockets in a `BufReader` to avoid a syscall per byte.
//!
//! A tag byte outside `+ - : $ *` switches to inline mode: the whole line
//! (tag byte included) is split on whitespace and returned as an array of
//! simple strings, the way servers accept telnet-style commands.

use std::io::{self, Read};
use std::iter::FusedIterator;

use bytes::Bytes;

use crate::config::Config;
use crate::error::{RespError, Result};
use super::command::Command;
use super::value::{
    Value, TAG_ARRAY, TAG_BULK_STRING, TAG_ERROR, TAG_INTEGER, TAG_SIMPLE_STRING,
};

/// Upper bound on the capacity reserved up front for an array.
/// Larger arrays grow as their elements actually arrive.
const MAX_PREALLOC_ITEMS: usize = 1024;

/// Upper bound on the capacity reserved up front for a bulk string payload
const MAX_PREALLOC_BYTES: usize = 64 * 1024;

/// Reads frames from a byte source
pub struct Reader<R> {
    /// Underlying byte source (socket, file, in-memory cursor, ...)
    source: R,

    /// Reader limits
    config: Config,
}

impl<R: Read> Reader<R> {
    /// Create a reader with the default limits
    pub fn new(source: R) -> Self {
        Self {
            source,
            config: Config::default(),
        }
    }

    /// Create a reader with custom limits
    pub fn with_config(source: R, config: Config) -> Result<Self> {
        config.validate()?;
        Ok(Self { source, config })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn get_ref(&self) -> &R {
        &self.source
    }

    pub fn get_mut(&mut self) -> &mut R {
        &mut self.source
    }

    pub fn into_inner(self) -> R {
        self.source
    }

    // =========================================================================
    // Public API
    // =========================================================================

    /// Read the next frame
    ///
    /// Returns `Ok(None)` when the source ends cleanly before a new frame
    /// starts. Ending anywhere inside a frame is an I/O error.
    pub fn read_value(&mut self) -> Result<Option<Value>> {
        let tag = match self.read_byte()? {
            Some(tag) => tag,
            None => return Ok(None),
        };

        if is_resp_tag(tag) {
            self.read_frame(tag, 0).map(Some)
        } else {
            let line = self.read_inline_line(tag)?;
            Ok(Some(inline_value(&line)))
        }
    }

    /// Read the next frame as a client command
    ///
    /// Accepts both an array of bulk strings and an inline command line.
    /// Returns `Ok(None)` on clean end of stream.
    pub fn read_command(&mut self) -> Result<Option<Command>> {
        let tag = match self.read_byte()? {
            Some(tag) => tag,
            None => return Ok(None),
        };

        let command = if is_resp_tag(tag) {
            Command::from_value(self.read_frame(tag, 0)?)?
        } else {
            let line = self.read_inline_line(tag)?;
            Command::from_inline_bytes(&line)?
        };

        tracing::trace!("Decoded command {:?} with {} args", command.name(), command.arg_count());
        Ok(Some(command))
    }

    /// Iterate over consecutive frames until the source ends
    ///
    /// The iterator stops after the first error since the stream can no
    /// longer be aligned to frame boundaries.
    pub fn frames(&mut self) -> Frames<'_, R> {
        Frames {
            reader: self,
            done: false,
        }
    }

    // =========================================================================
    // Frame Decoding
    // =========================================================================

    /// Decode the frame whose tag byte has already been consumed.
    /// `depth` is the number of arrays enclosing this frame.
    fn read_frame(&mut self, tag: u8, depth: usize) -> Result<Value> {
        tracing::trace!("Decoding frame tag {:?} at depth {}", tag as char, depth);

        match tag {
            TAG_SIMPLE_STRING => Ok(Value::SimpleString(Bytes::from(self.read_line()?))),
            TAG_ERROR => Ok(Value::Error(Bytes::from(self.read_line()?))),
            TAG_INTEGER => Ok(Value::Integer(self.read_integer_line()?)),
            TAG_BULK_STRING => self.read_bulk_string(),
            TAG_ARRAY => self.read_array(depth + 1),
            other => Err(RespError::Protocol(format!(
                "Unexpected type byte 0x{:02x} inside array",
                other
            ))),
        }
    }

    fn read_bulk_string(&mut self) -> Result<Value> {
        let len = match self.read_length()? {
            Some(len) => len,
            None => return Ok(Value::null_bulk_string()),
        };

        if len > self.config.max_bulk_len {
            return Err(RespError::Protocol(format!(
                "Bulk string too large: {} bytes (max {})",
                len, self.config.max_bulk_len
            )));
        }

        // Grow with the bytes that actually arrive, not the declared length
        let mut payload = Vec::with_capacity(len.min(MAX_PREALLOC_BYTES));
        let read = (&mut self.source)
            .take(len as u64)
            .read_to_end(&mut payload)?;
        if read != len {
            return Err(unexpected_eof("bulk string payload"));
        }

        // Trailing terminator
        let mut terminator = [0u8; 2];
        self.read_exact(&mut terminator, "bulk string terminator")?;

        Ok(Value::bulk_string(payload))
    }

    /// `depth` includes the array being read
    fn read_array(&mut self, depth: usize) -> Result<Value> {
        if depth > self.config.max_depth {
            return Err(RespError::DepthExceeded {
                max: self.config.max_depth,
            });
        }

        let count = match self.read_length()? {
            Some(count) => count,
            None => return Ok(Value::null_array()),
        };

        let mut items = Vec::with_capacity(count.min(MAX_PREALLOC_ITEMS));
        for _ in 0..count {
            let tag = self
                .read_byte()?
                .ok_or_else(|| unexpected_eof("array element"))?;
            items.push(self.read_frame(tag, depth)?);
        }

        Ok(Value::array(items))
    }

    /// Parse a length line. `-1` means null; anything below is rejected.
    fn read_length(&mut self) -> Result<Option<usize>> {
        let len = self.read_integer_line()?;
        match len {
            -1 => Ok(None),
            n if n < -1 => Err(RespError::Protocol(format!("Invalid length: {}", n))),
            n => usize::try_from(n)
                .map(Some)
                .map_err(|_| RespError::Protocol(format!("Length out of range: {}", n))),
        }
    }

    fn read_integer_line(&mut self) -> Result<i64> {
        let line = self.read_line()?;
        parse_integer(&line)
    }

    // =========================================================================
    // Line Reading
    // =========================================================================

    /// Read up to and including the next `\n`, returning the line without
    /// its terminator
    fn read_line(&mut self) -> Result<Vec<u8>> {
        let mut line = Vec::new();
        self.read_until_newline(&mut line)?;
        strip_terminator(&mut line);
        Ok(line)
    }

    /// The tag byte is the first byte of an inline line
    fn read_inline_line(&mut self, tag: u8) -> Result<Vec<u8>> {
        tracing::debug!("Non-RESP type byte 0x{:02x}, reading inline command", tag);

        let mut line = vec![tag];
        if tag != b'\n' {
            self.read_until_newline(&mut line)?;
        }
        strip_terminator(&mut line);
        Ok(line)
    }

    fn read_until_newline(&mut self, line: &mut Vec<u8>) -> Result<()> {
        loop {
            let byte = self.read_byte()?.ok_or_else(|| unexpected_eof("line"))?;
            line.push(byte);
            if byte == b'\n' {
                return Ok(());
            }
        }
    }

    // =========================================================================
    // Byte Source Helpers
    // =========================================================================

    /// Read a single byte, `None` on end of stream
    fn read_byte(&mut self) -> Result<Option<u8>> {
        let mut byte = [0u8; 1];
        loop {
            match self.source.read(&mut byte) {
                Ok(0) => return Ok(None),
                Ok(_) => return Ok(Some(byte[0])),
                Err(ref e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e.into()),
            }
        }
    }

    fn read_exact(&mut self, buf: &mut [u8], what: &str) -> Result<()> {
        self.source.read_exact(buf).map_err(|e| {
            if e.kind() == io::ErrorKind::UnexpectedEof {
                unexpected_eof(what)
            } else {
                e.into()
            }
        })
    }
}

/// Iterator over the frames of a stream, see [`Reader::frames`]
pub struct Frames<'a, R> {
    reader: &'a mut Reader<R>,
    done: bool,
}

impl<R: Read> Iterator for Frames<'_, R> {
    type Item = Result<Value>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        match self.reader.read_value() {
            Ok(Some(value)) => Some(Ok(value)),
            Ok(None) => {
                self.done = true;
                None
            }
            Err(e) => {
                self.done = true;
                Some(Err(e))
            }
        }
    }
}

impl<R: Read> FusedIterator for Frames<'_, R> {}

// =============================================================================
// Convenience functions
// =============================================================================

/// Read one frame from a stream using the default limits
pub fn read_value<R: Read>(source: &mut R) -> Result<Option<Value>> {
    Reader::new(source).read_value()
}

/// Read one command from a stream using the default limits
pub fn read_command<R: Read>(source: &mut R) -> Result<Option<Command>> {
    Reader::new(source).read_command()
}

// =============================================================================
// Helpers
// =============================================================================

fn is_resp_tag(tag: u8) -> bool {
    matches!(
        tag,
        TAG_SIMPLE_STRING | TAG_ERROR | TAG_INTEGER | TAG_BULK_STRING | TAG_ARRAY
    )
}

/// Drop a trailing `\n` and the `\r` before it
fn strip_terminator(line: &mut Vec<u8>) {
    if line.last() == Some(&b'\n') {
        line.pop();
        if line.last() == Some(&b'\r') {
            line.pop();
        }
    }
}

/// Split an inline line into an array of simple strings
fn inline_value(line: &[u8]) -> Value {
    let tokens = line
        .split(|b| b.is_ascii_whitespace())
        .filter(|token| !token.is_empty())
        .map(|token| Value::SimpleString(Bytes::copy_from_slice(token)))
        .collect();
    Value::array(tokens)
}

/// Parse base-10 signed 64-bit text, rejecting overflow
pub(crate) fn parse_integer(text: &[u8]) -> Result<i64> {
    std::str::from_utf8(text)
        .ok()
        .and_then(|s| s.parse::<i64>().ok())
        .ok_or_else(|| {
            RespError::Protocol(format!(
                "Invalid integer: {:?}",
                String::from_utf8_lossy(text)
            ))
        })
}

fn unexpected_eof(what: &str) -> RespError {
    RespError::Io(io::Error::new(
        io::ErrorKind::UnexpectedEof,
        format!("stream ended inside {}", what),
    ))
}
