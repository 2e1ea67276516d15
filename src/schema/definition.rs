//! Schema definition
//!
//! A validated, immutable field list plus its name → offset map.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::config::Config;
use crate::error::{Result, StoreError};

use super::FieldType;

/// Ordered, named, typed field list of one relation.
///
/// A `Schema` only exists in a valid state: every construction check runs
/// in [`Schema::new`] and any failure is returned instead of a half-built
/// value. Cloning yields an independent copy.
#[derive(Debug, Clone)]
pub struct Schema {
    /// Field names in defined order
    field_names: Vec<String>,
    /// Field types in defined order
    field_types: Vec<FieldType>,
    /// Maps a field name to its offset
    field_offsets: BTreeMap<String, usize>,
    /// Per-block field budget this schema was validated against
    fields_per_block: usize,
}

/// On-the-wire form of a schema; decoding goes back through validation.
#[derive(Serialize, Deserialize)]
struct SchemaDescriptor {
    field_names: Vec<String>,
    field_types: Vec<FieldType>,
}

impl Schema {
    /// Build a schema from parallel name and type lists.
    ///
    /// Checks, in order: list lengths match, at least one field, no more
    /// than `config.max_fields_per_relation` fields, then for each name in
    /// order that it is non-empty and not repeated later in the list.
    pub fn new(config: &Config, field_names: Vec<String>, field_types: Vec<FieldType>) -> Result<Self> {
        Self::validate(config, &field_names, field_types.len()).map_err(rejected)?;

        let field_offsets = field_names
            .iter()
            .enumerate()
            .map(|(offset, name)| (name.clone(), offset))
            .collect();

        Ok(Self {
            field_names,
            field_types,
            field_offsets,
            fields_per_block: config.fields_per_block,
        })
    }

    /// Build a schema from `(name, type)` pairs
    pub fn from_fields(config: &Config, fields: &[(&str, FieldType)]) -> Result<Self> {
        let (names, types): (Vec<String>, Vec<FieldType>) = fields
            .iter()
            .map(|(name, field_type)| (name.to_string(), *field_type))
            .unzip();
        Self::new(config, names, types)
    }

    /// Build a schema from `(name, type tag)` pairs such as `("id", "INT")`.
    ///
    /// Names are checked first; type tags outside the supported set are
    /// reported only once every name check has passed.
    pub fn from_definitions(config: &Config, definitions: &[(&str, &str)]) -> Result<Self> {
        let names: Vec<String> = definitions.iter().map(|(name, _)| name.to_string()).collect();
        Self::validate(config, &names, definitions.len()).map_err(rejected)?;

        let types = definitions
            .iter()
            .map(|(_, tag)| tag.parse::<FieldType>())
            .collect::<Result<Vec<_>>>()
            .map_err(rejected)?;
        Self::new(config, names, types)
    }

    fn validate(config: &Config, field_names: &[String], type_count: usize) -> Result<()> {
        if field_names.len() != type_count {
            return Err(StoreError::FieldCountMismatch {
                names: field_names.len(),
                types: type_count,
            });
        }
        if field_names.is_empty() {
            return Err(StoreError::NoFields);
        }
        if field_names.len() > config.max_fields_per_relation {
            return Err(StoreError::TooManyFields {
                count: field_names.len(),
                max: config.max_fields_per_relation,
            });
        }
        for (i, name) in field_names.iter().enumerate() {
            if name.is_empty() {
                return Err(StoreError::EmptyFieldName { offset: i });
            }
            if let Some(j) = field_names[i + 1..].iter().position(|other| other == name) {
                return Err(StoreError::DuplicateFieldName {
                    name: name.clone(),
                    first: i,
                    second: i + 1 + j,
                });
            }
        }
        Ok(())
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// Field names in defined order
    pub fn field_names(&self) -> &[String] {
        &self.field_names
    }

    /// Field types in defined order
    pub fn field_types(&self) -> &[FieldType] {
        &self.field_types
    }

    pub fn num_fields(&self) -> usize {
        self.field_names.len()
    }

    pub fn field_exists(&self, name: &str) -> bool {
        self.field_offsets.contains_key(name)
    }

    /// Name of the field at `offset`
    pub fn field_name(&self, offset: usize) -> Result<&str> {
        self.check_offset(offset)?;
        Ok(&self.field_names[offset])
    }

    /// Type of the field at `offset`
    pub fn field_type(&self, offset: usize) -> Result<FieldType> {
        self.check_offset(offset)?;
        Ok(self.field_types[offset])
    }

    /// Type of the field called `name`
    pub fn field_type_by_name(&self, name: &str) -> Result<FieldType> {
        let offset = self.field_offset(name)?;
        Ok(self.field_types[offset])
    }

    /// Offset of the field called `name`
    pub fn field_offset(&self, name: &str) -> Result<usize> {
        self.field_offsets.get(name).copied().ok_or_else(|| {
            tracing::debug!(field = name, "field name not found");
            StoreError::FieldNotFound(name.to_string())
        })
    }

    /// Maximum number of tuples of this relation that one block holds.
    ///
    /// Floor division: a relation whose width does not divide the budget
    /// leaves the remainder unused in every block.
    pub fn tuples_per_block(&self) -> usize {
        self.fields_per_block / self.field_names.len()
    }

    /// Encoded width in bytes of one tuple of this schema
    pub fn tuple_width(&self) -> usize {
        self.field_types.iter().map(|t| t.width()).sum()
    }

    /// Field names joined by tabs, one trailing tab per name
    pub fn field_names_line(&self) -> String {
        self.field_names.iter().map(|name| format!("{}\t", name)).collect()
    }

    fn check_offset(&self, offset: usize) -> Result<()> {
        if offset >= self.num_fields() {
            tracing::debug!(offset, fields = self.num_fields(), "field offset out of bound");
            return Err(StoreError::FieldOffsetOutOfBound {
                offset,
                count: self.num_fields(),
            });
        }
        Ok(())
    }

    // =========================================================================
    // Serialization
    // =========================================================================

    /// Serialize the field list with bincode
    pub fn encode(&self) -> Result<Vec<u8>> {
        let descriptor = SchemaDescriptor {
            field_names: self.field_names.clone(),
            field_types: self.field_types.clone(),
        };
        bincode::serialize(&descriptor).map_err(|e| StoreError::Serialization(e.to_string()))
    }

    /// CRC32 of the encoded field list; identifies the relation layout
    pub fn fingerprint(&self) -> Result<u32> {
        Ok(crc32fast::hash(&self.encode()?))
    }

    /// Deserialize and re-validate a schema against `config`
    pub fn decode(config: &Config, bytes: &[u8]) -> Result<Self> {
        let descriptor: SchemaDescriptor =
            bincode::deserialize(bytes).map_err(|e| StoreError::Serialization(e.to_string()))?;
        Self::new(config, descriptor.field_names, descriptor.field_types)
    }
}

/// Log a rejected schema and hand the error back
fn rejected(err: StoreError) -> StoreError {
    tracing::warn!(error = %err, "rejected schema");
    err
}

impl PartialEq for Schema {
    fn eq(&self, other: &Self) -> bool {
        self.field_names == other.field_names
            && self.field_types == other.field_types
            && self.field_offsets == other.field_offsets
    }
}

impl Eq for Schema {}

impl fmt::Display for Schema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (name, field_type)) in self.field_names.iter().zip(&self.field_types).enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{} {};", name, field_type)?;
        }
        Ok(())
    }
}
