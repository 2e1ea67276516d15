//! Configuration for blockstore
//!
//! Centralized, immutable configuration with the classic defaults. A
//! `Config` is built once and handed to every [`Schema`](crate::schema::Schema)
//! constructor; nothing reads it from ambient state.

use crate::error::{Result, StoreError};

/// A block holds 1-8 tuples depending on the relation schema.
pub const DEFAULT_FIELDS_PER_BLOCK: usize = 8;

/// Widest relation a schema may declare.
pub const DEFAULT_MAX_FIELDS_PER_RELATION: usize = 8;

/// Small on purpose, to exercise one-pass and two-pass algorithms.
pub const DEFAULT_BLOCKS_IN_MEMORY: usize = 10;

/// Main configuration for the storage core
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    // -------------------------------------------------------------------------
    // Layout Configuration
    // -------------------------------------------------------------------------
    /// Total field slots available in one block.
    /// tuples per block = fields_per_block / fields in the relation
    pub fields_per_block: usize,

    /// Maximum number of fields a schema may declare
    pub max_fields_per_relation: usize,

    // -------------------------------------------------------------------------
    // Frame Manager Configuration (read by memory/disk managers)
    // -------------------------------------------------------------------------
    /// Number of memory frames available to algorithms
    pub blocks_in_memory: usize,

    /// Turns on simulated disk latency
    pub simulated_disk_latency: bool,

    /// Turns on disk I/O counter debug messages
    pub disk_io_debug: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            fields_per_block: DEFAULT_FIELDS_PER_BLOCK,
            max_fields_per_relation: DEFAULT_MAX_FIELDS_PER_RELATION,
            blocks_in_memory: DEFAULT_BLOCKS_IN_MEMORY,
            simulated_disk_latency: true,
            disk_io_debug: false,
        }
    }
}

impl Config {
    /// Create a new config builder
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }

    /// Check that every budget is usable
    pub fn validate(&self) -> Result<()> {
        if self.fields_per_block == 0 {
            return Err(StoreError::Config(
                "fields_per_block must be at least 1".to_string(),
            ));
        }
        if self.max_fields_per_relation == 0 {
            return Err(StoreError::Config(
                "max_fields_per_relation must be at least 1".to_string(),
            ));
        }
        if self.blocks_in_memory == 0 {
            return Err(StoreError::Config(
                "blocks_in_memory must be at least 1".to_string(),
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
    /// Set the per-block field budget
    pub fn fields_per_block(mut self, fields: usize) -> Self {
        self.config.fields_per_block = fields;
        self
    }

    /// Set the maximum number of fields per relation
    pub fn max_fields_per_relation(mut self, fields: usize) -> Self {
        self.config.max_fields_per_relation = fields;
        self
    }

    /// Set the memory frame budget
    pub fn blocks_in_memory(mut self, blocks: usize) -> Self {
        self.config.blocks_in_memory = blocks;
        self
    }

    /// Toggle simulated disk latency
    pub fn simulated_disk_latency(mut self, on: bool) -> Self {
        self.config.simulated_disk_latency = on;
        self
    }

    /// Toggle disk I/O debug output
    pub fn disk_io_debug(mut self, on: bool) -> Self {
        self.config.disk_io_debug = on;
        self
    }

    pub fn build(self) -> Config {
        self.config
    }
}
