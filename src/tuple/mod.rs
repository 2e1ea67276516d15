//! Tuple Module
//!
//! A tuple is one fixed-width record bound to a [`Schema`](crate::schema::Schema).
//!
//! ## Encoding
//! Every field occupies a fixed number of bytes, so a tuple's encoded width
//! depends only on its schema:
//! ```text
//! ┌──────────────┬──────────────────────────────┬──────────────┐
//! │ INT (4)      │ STR20 (20)                   │ INT (4)      │
//! │ i32 LE       │ UTF-8, NUL padded            │ i32 LE       │
//! └──────────────┴──────────────────────────────┴──────────────┘
//! ```

mod codec;
mod record;

use std::fmt;

use crate::error::{Result, StoreError};
use crate::schema::{FieldType, STR20_LEN};

pub use record::Tuple;

/// A single field value
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Value {
    Int(i32),

    /// At most 20 bytes of UTF-8, no NUL bytes
    Str20(String),
}

impl Value {
    pub fn field_type(&self) -> FieldType {
        match self {
            Value::Int(_) => FieldType::Int,
            Value::Str20(_) => FieldType::Str20,
        }
    }

    /// Value a freshly created tuple holds for a field of `field_type`
    pub fn default_for(field_type: FieldType) -> Self {
        match field_type {
            FieldType::Int => Value::Int(0),
            FieldType::Str20 => Value::Str20(String::new()),
        }
    }

    pub fn as_int(&self) -> Option<i32> {
        match self {
            Value::Int(v) => Some(*v),
            Value::Str20(_) => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str20(s) => Some(s),
            Value::Int(_) => None,
        }
    }

    /// Check that this value may be stored in a field of `expected` type
    pub(crate) fn check(&self, offset: usize, expected: FieldType) -> Result<()> {
        if self.field_type() != expected {
            return Err(StoreError::ValueTypeMismatch { offset, expected });
        }
        if let Value::Str20(s) = self {
            if s.contains('\0') {
                return Err(StoreError::NulInString { offset });
            }
            if s.len() > STR20_LEN {
                return Err(StoreError::StringTooLong {
                    len: s.len(),
                    max: STR20_LEN,
                });
            }
        }
        Ok(())
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Value::Int(v)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Str20(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Str20(s)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Int(v) => write!(f, "{}", v),
            Value::Str20(s) => f.write_str(s),
        }
    }
}
