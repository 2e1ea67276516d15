//! Block image codec
//!
//! Converts a block to and from the fixed-width image a frame manager
//! moves between memory and disk. See the module docs for the layout.

use bytes::{Buf, BufMut, Bytes, BytesMut};

use crate::error::{Result, StoreError};
use crate::schema::Schema;
use crate::tuple::Tuple;

use super::{Block, Slot};

/// Magic bytes identifying a block image
pub(crate) const MAGIC: &[u8; 4] = b"BLK1";

/// Current block image format version
pub(crate) const VERSION: u16 = 1;

/// Header size: Magic (4) + Version (2) + SlotCount (2) + SchemaCRC (4) = 12 bytes
pub(crate) const HEADER_SIZE: usize = 12;

/// Footer size: CRC32 (4)
pub(crate) const FOOTER_SIZE: usize = 4;

const TAG_HOLE: u8 = 0;
const TAG_OCCUPIED: u8 = 1;

impl Block {
    /// Encode the block into a checksummed image
    pub fn encode(&self) -> Result<Bytes> {
        let slot_count = u16::try_from(self.num_slots()).map_err(|_| {
            StoreError::Serialization(format!("{} slots do not fit a block image", self.num_slots()))
        })?;
        let width = self.schema().map_or(0, Schema::tuple_width);
        let fingerprint = match self.schema() {
            Some(schema) => schema.fingerprint()?,
            None => 0,
        };

        let mut buf =
            BytesMut::with_capacity(HEADER_SIZE + self.num_slots() * (1 + width) + FOOTER_SIZE);
        buf.put_slice(MAGIC);
        buf.put_u16_le(VERSION);
        buf.put_u16_le(slot_count);
        buf.put_u32_le(fingerprint);

        for slot in self.slots() {
            match slot {
                Slot::Occupied(tuple) => {
                    buf.put_u8(TAG_OCCUPIED);
                    tuple.encode_into(&mut buf);
                }
                Slot::Hole => {
                    buf.put_u8(TAG_HOLE);
                    buf.put_bytes(0, width);
                }
            }
        }

        let crc = crc32fast::hash(&buf);
        buf.put_u32_le(crc);

        tracing::trace!(slots = slot_count, bytes = buf.len(), "encoded block image");
        Ok(buf.freeze())
    }

    /// Decode a block image holding tuples of `schema`
    pub fn decode(schema: &Schema, bytes: &[u8]) -> Result<Self> {
        if bytes.len() < HEADER_SIZE + FOOTER_SIZE {
            return Err(StoreError::Corruption(format!(
                "Image too short: {} bytes",
                bytes.len()
            )));
        }

        let (body, footer) = bytes.split_at(bytes.len() - FOOTER_SIZE);
        let stored_crc = u32::from_le_bytes([footer[0], footer[1], footer[2], footer[3]]);
        let computed_crc = crc32fast::hash(body);
        if stored_crc != computed_crc {
            return Err(StoreError::Corruption(format!(
                "CRC mismatch: stored {:08x}, computed {:08x}",
                stored_crc, computed_crc
            )));
        }

        let mut buf = body;
        if &buf[..MAGIC.len()] != MAGIC {
            return Err(StoreError::Corruption("Bad magic bytes".to_string()));
        }
        buf.advance(MAGIC.len());

        let version = buf.get_u16_le();
        if version != VERSION {
            return Err(StoreError::Corruption(format!(
                "Unsupported version: {}",
                version
            )));
        }

        let slot_count = buf.get_u16_le() as usize;
        let fingerprint = buf.get_u32_le();
        if slot_count > 0 && fingerprint != schema.fingerprint()? {
            return Err(StoreError::Corruption(format!(
                "Image was written for another schema (fingerprint {:08x})",
                fingerprint
            )));
        }

        let capacity = schema.tuples_per_block();
        if slot_count > capacity {
            return Err(StoreError::Corruption(format!(
                "{} slots exceed block capacity {}",
                slot_count, capacity
            )));
        }

        let width = schema.tuple_width();
        let expected = slot_count * (1 + width);
        if buf.remaining() != expected {
            return Err(StoreError::Corruption(format!(
                "Slot area is {} bytes, expected {}",
                buf.remaining(),
                expected
            )));
        }

        let mut slots = Vec::with_capacity(slot_count);
        for offset in 0..slot_count {
            match buf.get_u8() {
                TAG_HOLE => {
                    buf.advance(width);
                    slots.push(Slot::Hole);
                }
                TAG_OCCUPIED => slots.push(Slot::Occupied(Tuple::decode(schema, &mut buf)?)),
                tag => {
                    return Err(StoreError::Corruption(format!(
                        "Unknown slot tag {} at slot {}",
                        tag, offset
                    )))
                }
            }
        }

        let schema = if slots.is_empty() {
            None
        } else {
            Some(schema.clone())
        };
        tracing::trace!(slots = slot_count, "decoded block image");
        Ok(Block::from_parts(schema, slots))
    }
}
