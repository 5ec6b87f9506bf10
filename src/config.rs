//! Configuration for respwire
//!
//! Reader limits with sensible defaults.

use crate::error::{RespError, Result};

/// Default maximum array nesting depth
pub const DEFAULT_MAX_DEPTH: usize = 64;

/// Default maximum declared bulk string length (512 MB)
pub const DEFAULT_MAX_BULK_LEN: usize = 512 * 1024 * 1024;

/// Reader configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Config {
    /// Max number of nested arrays in a single frame.
    /// A top-level array sits at depth 1.
    pub max_depth: usize,

    /// Max bulk string length accepted before allocating its buffer (in bytes)
    pub max_bulk_len: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            max_bulk_len: DEFAULT_MAX_BULK_LEN,
        }
    }
}

impl Config {
    /// Create a new config builder
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }

    /// Check that the limits can admit at least one frame of every kind
    pub fn validate(&self) -> Result<()> {
        if self.max_depth == 0 {
            return Err(RespError::Config(
                "max_depth must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

/// Builder for Config
#[derive(Default)]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Set the maximum array nesting depth
    pub fn max_depth(mut self, depth: usize) -> Self {
        self.config.max_depth = depth;
        self
    }

    /// Set the maximum bulk string length (in bytes)
    pub fn max_bulk_len(mut self, len: usize) -> Self {
        self.config.max_bulk_len = len;
        self
    }

    pub fn build(self) -> Config {
        self.config
    }
}
