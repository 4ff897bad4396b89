//! Configuration for cmdstream
//!
//! Per-call settings with sensible defaults.

use std::time::Duration;

use crate::error::{CmdStreamError, Result};

/// Settings for one streaming call
#[derive(Debug, Clone)]
pub struct CallConfig {
    // -------------------------------------------------------------------------
    // Codec Configuration
    // -------------------------------------------------------------------------
    /// Largest frame accepted on send or receive (in bytes)
    pub max_message_size: usize,

    // -------------------------------------------------------------------------
    // Timing Configuration
    // -------------------------------------------------------------------------
    /// Request sends slower than this are logged
    pub slow_send_threshold: Duration,

    // -------------------------------------------------------------------------
    // Transport Configuration
    // -------------------------------------------------------------------------
    /// Frames buffered by the in-memory transport (0 = rendezvous)
    pub channel_capacity: usize,
}

impl Default for CallConfig {
    fn default() -> Self {
        Self {
            max_message_size: 4 * 1024 * 1024, // 4 MB
            slow_send_threshold: Duration::from_millis(5),
            channel_capacity: 16,
        }
    }
}

impl CallConfig {
    /// Create a new config builder
    pub fn builder() -> CallConfigBuilder {
        CallConfigBuilder::default()
    }

    /// Check that the settings are usable
    pub fn validate(&self) -> Result<()> {
        if self.max_message_size == 0 {
            return Err(CmdStreamError::Config(
                "max_message_size must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }
}

/// Builder for CallConfig
#[derive(Default)]
pub struct CallConfigBuilder {
    config: CallConfig,
}

impl CallConfigBuilder {
    /// Set the maximum frame size (in bytes)
    pub fn max_message_size(mut self, size: usize) -> Self {
        self.config.max_message_size = size;
        self
    }

    /// Set the threshold above which a request send is logged
    pub fn slow_send_threshold(mut self, threshold: Duration) -> Self {
        self.config.slow_send_threshold = threshold;
        self
    }

    /// Set the in-memory transport buffer depth
    pub fn channel_capacity(mut self, capacity: usize) -> Self {
        self.config.channel_capacity = capacity;
        self
    }

    pub fn build(self) -> CallConfig {
        self.config
    }
}
