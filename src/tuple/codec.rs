//! Tuple codec
//!
//! Fixed-width encoding of tuple values. See the module docs for layout.

use bytes::{Buf, BufMut};

use crate::error::{Result, StoreError};
use crate::schema::{FieldType, Schema, STR20_LEN};

use super::{Tuple, Value};

impl Tuple {
    /// Append exactly `schema().tuple_width()` bytes to `buf`
    pub fn encode_into<B: BufMut>(&self, buf: &mut B) {
        for value in self.values() {
            match value {
                Value::Int(v) => buf.put_i32_le(*v),
                Value::Str20(s) => {
                    // Length and NUL bytes checked on every write path
                    let bytes = s.as_bytes();
                    buf.put_slice(bytes);
                    buf.put_bytes(0, STR20_LEN - bytes.len());
                }
            }
        }
    }

    /// Read one tuple of `schema` from the front of `buf`
    pub fn decode<B: Buf>(schema: &Schema, buf: &mut B) -> Result<Self> {
        let width = schema.tuple_width();
        if buf.remaining() < width {
            return Err(StoreError::Corruption(format!(
                "Incomplete tuple: expected {} bytes, got {}",
                width,
                buf.remaining()
            )));
        }

        let mut values = Vec::with_capacity(schema.num_fields());
        for (offset, field_type) in schema.field_types().iter().enumerate() {
            let value = match field_type {
                FieldType::Int => Value::Int(buf.get_i32_le()),
                FieldType::Str20 => {
                    let mut raw = [0u8; STR20_LEN];
                    buf.copy_to_slice(&mut raw);
                    let len = raw.iter().rposition(|b| *b != 0).map_or(0, |p| p + 1);
                    let s = std::str::from_utf8(&raw[..len]).map_err(|e| {
                        StoreError::Corruption(format!(
                            "Field {} is not valid UTF-8: {}",
                            offset, e
                        ))
                    })?;
                    if s.contains('\0') {
                        return Err(StoreError::Corruption(format!(
                            "Field {} holds a NUL byte inside the string",
                            offset
                        )));
                    }
                    Value::Str20(s.to_string())
                }
            };
            values.push(value);
        }

        Ok(Tuple::from_parts(schema.clone(), values))
    }
}
