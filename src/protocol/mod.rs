//! Protocol Module
//!
//! Codec for the RESP wire protocol.
//!
//! ## Frame Format
//!
//! ```text
//! ┌──────────┬─────────────────────────────┬──────────┐
//! │ Tag (1)  │     Payload / Length        │  \r\n    │
//! └──────────┴─────────────────────────────┴──────────┘
//! ```
//!
//! ### Tags
//! - `+`: simple string
//! - `-`: error
//! - `:`: integer
//! - `$`: bulk string (length line, payload, `\r\n`; `-1` is null)
//! - `*`: array (count line, then that many frames; `-1` is null)
//!
//! Any other first byte starts an inline command line.

mod value;
mod reader;
mod codec;
mod command;

pub use value::{
    Value, TAG_ARRAY, TAG_BULK_STRING, TAG_ERROR, TAG_INTEGER, TAG_SIMPLE_STRING,
};
pub use reader::{read_command, read_value, Frames, Reader};
pub use codec::{encode_value, format_value, write_value, CRLF};
pub use command::Command;
