//! # blockstore
//!
//! The data-layout core of a teaching storage engine:
//! - Schemas that validate a relation's named, typed fields
//! - Fixed-width tuples bound to one schema
//! - Fixed-capacity blocks of tuple slots standing in for disk/memory pages
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │          Memory / Disk Frame Managers (external)             │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │ owns
//! ┌─────────────────────▼───────────────────────────────────────┐
//! │                        Block                                 │
//! │        (slots: Occupied(Tuple) | Hole, one schema)           │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │ holds
//! ┌─────────────────────▼───────────────────────────────────────┐
//! │                        Tuple                                 │
//! │               (fixed-width field values)                     │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │ bound to
//! ┌─────────────────────▼───────────────────────────────────────┐
//! │                        Schema  ◄──── Config                  │
//! │          (fields, offsets, tuples per block)                 │
//! └─────────────────────────────────────────────────────────────┘
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod config;

pub mod schema;
pub mod tuple;
pub mod block;

// =============================================================================
// Public API Re-exports
// =============================================================================

pub use error::{StoreError, Result};
pub use config::Config;
pub use schema::{FieldType, Schema};
pub use tuple::{Tuple, Value};
pub use block::{Block, Slot};

// =============================================================================
// Version Info
// =============================================================================

/// Current version of blockstore
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
