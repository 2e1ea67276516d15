//! Schema Module
//!
//! Describes what a tuple of a relation contains: field names and field
//! types in a defined order. Names and types are addressed by offset.
//!
//! ## Responsibilities
//! - Validate field lists once, at construction
//! - Map field names to offsets
//! - Derive how many tuples fit in one block
//!
//! ## Capacity
//! ```text
//! tuples per block = fields_per_block / number of fields
//!
//!   fields_per_block = 8
//!   ┌────┬────┬────┬────┬────┬────┬────┬────┐
//!   │ id │name│ id │name│ id │name│ id │name│   2 fields → 4 tuples
//!   └────┴────┴────┴────┴────┴────┴────┴────┘
//!   ┌────┬────┬────┬────┬────┬────┬────┬────┐
//!   │ a  │ b  │ c  │ a  │ b  │ c  │ -- │ -- │   3 fields → 2 tuples
//!   └────┴────┴────┴────┴────┴────┴────┴────┘
//! ```
//! The remainder of an unevenly divided budget is left unused in every block.

mod definition;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::StoreError;

pub use definition::Schema;

/// Length in bytes of a `Str20` field
pub const STR20_LEN: usize = 20;

/// Length in bytes of an `Int` field
pub const INT_LEN: usize = std::mem::size_of::<i32>();

/// Supported field kinds. Every field has a fixed width.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum FieldType {
    /// 32-bit signed integer
    Int = 1,

    /// String of at most 20 bytes
    Str20 = 2,
}

impl FieldType {
    /// Encoded width of a value of this type
    pub fn width(self) -> usize {
        match self {
            FieldType::Int => INT_LEN,
            FieldType::Str20 => STR20_LEN,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            FieldType::Int => "INT",
            FieldType::Str20 => "STR20",
        }
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for FieldType {
    type Err = StoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "INT" | "INTEGER" => Ok(FieldType::Int),
            "STR20" | "FIXED_STRING20" => Ok(FieldType::Str20),
            _ => Err(StoreError::UnsupportedFieldType(s.to_string())),
        }
    }
}

impl TryFrom<u8> for FieldType {
    type Error = StoreError;

    fn try_from(tag: u8) -> Result<Self, Self::Error> {
        match tag {
            1 => Ok(FieldType::Int),
            2 => Ok(FieldType::Str20),
            _ => Err(StoreError::UnsupportedFieldType(format!("tag {}", tag))),
        }
    }
}
