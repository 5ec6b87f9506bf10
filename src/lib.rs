//! # respwire
//!
//! A blocking codec for the RESP wire protocol with:
//! - A typed value tree with explicit null bulk strings and arrays
//! - A byte-exact reader over any `std::io::Read` source
//! - Inline (telnet-style) command support alongside array framing
//! - Bounded nesting depth and bulk length
//!
//! ## Architecture Overview
//!
//! ```text
//!   bytes ──► Reader ──► Value ──► Formatter ──► bytes
//!                          │
//!                          ▼
//!                       Command ──► argument list
//! ```
//!
//! Network listeners, command execution and persistence live outside this
//! crate; any type implementing `Read` or `Write` can be plugged in.

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod config;

pub mod protocol;

// =============================================================================
// Public API Re-exports
// =============================================================================

pub use error::{RespError, Result};
pub use config::Config;
pub use protocol::{Command, Reader, Value};

// =============================================================================
// Version Info
// =============================================================================

/// Current version of respwire
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
