//! Tuple record
//!
//! Owned field values plus the schema they conform to.

use std::fmt;

use crate::error::{Result, StoreError};
use crate::schema::Schema;

use super::Value;

/// A record of one relation.
///
/// A tuple owns its schema copy and its values; cloning never shares
/// storage with the source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tuple {
    schema: Schema,
    values: Vec<Value>,
}

impl Tuple {
    /// Create a tuple with every field set to its default value
    pub fn new(schema: Schema) -> Self {
        let values = schema
            .field_types()
            .iter()
            .map(|t| Value::default_for(*t))
            .collect();
        Self { schema, values }
    }

    /// Create a tuple from values listed in field order
    pub fn with_values(schema: Schema, values: Vec<Value>) -> Result<Self> {
        if values.len() != schema.num_fields() {
            return Err(StoreError::ValueCountMismatch {
                expected: schema.num_fields(),
                actual: values.len(),
            });
        }
        for (offset, (value, field_type)) in values.iter().zip(schema.field_types()).enumerate() {
            value.check(offset, *field_type)?;
        }
        Ok(Self { schema, values })
    }

    pub(crate) fn from_parts(schema: Schema, values: Vec<Value>) -> Self {
        Self { schema, values }
    }

    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    pub fn num_fields(&self) -> usize {
        self.values.len()
    }

    /// Block capacity for tuples of this relation
    pub fn tuples_per_block(&self) -> usize {
        self.schema.tuples_per_block()
    }

    /// Values in field order
    pub fn values(&self) -> &[Value] {
        &self.values
    }

    pub fn field(&self, offset: usize) -> Result<&Value> {
        self.schema.field_type(offset)?;
        Ok(&self.values[offset])
    }

    pub fn field_by_name(&self, name: &str) -> Result<&Value> {
        let offset = self.schema.field_offset(name)?;
        Ok(&self.values[offset])
    }

    /// Overwrite the field at `offset`; the value must match the field type
    pub fn set_field(&mut self, offset: usize, value: impl Into<Value>) -> Result<()> {
        let value = value.into();
        let field_type = self.schema.field_type(offset)?;
        value.check(offset, field_type)?;
        self.values[offset] = value;
        Ok(())
    }

    pub fn set_field_by_name(&mut self, name: &str, value: impl Into<Value>) -> Result<()> {
        let offset = self.schema.field_offset(name)?;
        self.set_field(offset, value)
    }
}

impl fmt::Display for Tuple {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, value) in self.values.iter().enumerate() {
            if i > 0 {
                f.write_str("\t")?;
            }
            write!(f, "{}", value)?;
        }
        Ok(())
    }
}
