//! Error types for blockstore
//!
//! Provides a unified error type for all operations.

use thiserror::Error;

use crate::schema::FieldType;

/// Result type alias using StoreError
pub type Result<T> = std::result::Result<T, StoreError>;

/// Unified error type for blockstore operations
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StoreError {
    // -------------------------------------------------------------------------
    // Schema Construction Errors
    // -------------------------------------------------------------------------
    #[error("Schema error: {names} field names but {types} field types")]
    FieldCountMismatch { names: usize, types: usize },

    #[error("Schema error: a schema needs at least one field")]
    NoFields,

    #[error("Schema error: {count} fields exceed the limit of {max}")]
    TooManyFields { count: usize, max: usize },

    #[error("Schema error: empty field name at offset {offset}")]
    EmptyFieldName { offset: usize },

    #[error("Schema error: repeated field name {name} at offset {first} and {second}")]
    DuplicateFieldName {
        name: String,
        first: usize,
        second: usize,
    },

    #[error("Schema error: {0} is not a supported field type")]
    UnsupportedFieldType(String),

    // -------------------------------------------------------------------------
    // Field Lookup Errors
    // -------------------------------------------------------------------------
    #[error("Field offset {offset} out of bound ({count} fields)")]
    FieldOffsetOutOfBound { offset: usize, count: usize },

    #[error("Field name {0} is not found")]
    FieldNotFound(String),

    // -------------------------------------------------------------------------
    // Tuple Errors
    // -------------------------------------------------------------------------
    #[error("Tuple error: expected {expected} values, got {actual}")]
    ValueCountMismatch { expected: usize, actual: usize },

    #[error("Tuple error: field at offset {offset} expects {expected}")]
    ValueTypeMismatch { offset: usize, expected: FieldType },

    #[error("Tuple error: string of {len} bytes exceeds {max} bytes")]
    StringTooLong { len: usize, max: usize },

    #[error("Tuple error: string for field at offset {offset} contains a NUL byte")]
    NulInString { offset: usize },

    // -------------------------------------------------------------------------
    // Block Errors
    // -------------------------------------------------------------------------
    #[error("Tuple offset {offset} out of bound of the block (capacity {capacity})")]
    OutOfBlock { offset: usize, capacity: usize },

    #[error("Tuple offset {offset} out of bound ({len} slots)")]
    SlotOutOfBound { offset: usize, len: usize },

    #[error("Slot {0} is a hole")]
    HoleAtSlot(usize),

    #[error("Tuples' schemas do not match")]
    SchemaMismatch,

    #[error("The block is full ({capacity} tuples)")]
    BlockFull { capacity: usize },

    #[error("Number of tuples {count} exceeds space limit {capacity} of the block")]
    TooManyTuples { count: usize, capacity: usize },

    #[error("Tuple range {start}..{end} is invalid for {len} tuples")]
    InvalidRange { start: usize, end: usize, len: usize },

    // -------------------------------------------------------------------------
    // Serialization Errors
    // -------------------------------------------------------------------------
    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Block image corruption detected: {0}")]
    Corruption(String),

    // -------------------------------------------------------------------------
    // Configuration Errors
    // -------------------------------------------------------------------------
    #[error("Configuration error: {0}")]
    Config(String),
}
