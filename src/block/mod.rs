//! Block Module
//!
//! A block is the unit a memory or disk frame holds: an ordered, bounded
//! sequence of tuple slots of a single relation. A tuple is never split
//! across blocks.
//!
//! ## Responsibilities
//! - Bound the slot count by the schema's tuples per block
//! - Keep every tuple in the block on one schema
//! - Fill gaps left by sparse writes with holes
//! - Hand out owned copies so callers never alias block storage
//!
//! ## Slots
//! ```text
//!   capacity = 4
//!   ┌──────────┬──────────┬──────────┬──────────┐
//!   │ Occupied │   Hole   │   Hole   │ Occupied │   set_tuple(3, t) on a
//!   │  (1,a)   │          │          │  (4,d)   │   block with one tuple
//!   └──────────┴──────────┴──────────┴──────────┘
//!   slot 0      slot 1     slot 2     slot 3
//! ```
//! A hole is an allocated slot with no tuple; slots past the current
//! length are not allocated at all.
//!
//! ## Image Format
//! ```text
//! ┌────────────────────────────────────────────────────────┐
//! │ Header (12 bytes)                                      │
//! │   Magic: "BLK1" (4) | Version: u16 (2) | Slots: u16 (2)│
//! │   Schema fingerprint: u32 (4), CRC32 of the schema     │
//! │   descriptor (0 for an empty block)                    │
//! ├────────────────────────────────────────────────────────┤
//! │ Slots (fixed width each)                               │
//! │   [Tag: u8][Tuple bytes]   Tag 1 = occupied, 0 = hole  │
//! │   (hole tuple bytes are zeroed)                        │
//! ├────────────────────────────────────────────────────────┤
//! │ Footer (4 bytes)                                       │
//! │   CRC32 of header and slots                            │
//! └────────────────────────────────────────────────────────┘
//! ```

mod codec;
mod slots;

use std::fmt;

use crate::tuple::Tuple;

pub use slots::Block;

/// Rendering of a hole slot
pub const HOLE_MARKER: &str = "(hole)";

/// One position in a block
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Slot {
    /// A live tuple
    Occupied(Tuple),

    /// A placeholder that keeps the slot position
    Hole,
}

impl Slot {
    pub fn is_hole(&self) -> bool {
        matches!(self, Slot::Hole)
    }

    pub fn as_tuple(&self) -> Option<&Tuple> {
        match self {
            Slot::Occupied(tuple) => Some(tuple),
            Slot::Hole => None,
        }
    }

    pub fn into_tuple(self) -> Option<Tuple> {
        match self {
            Slot::Occupied(tuple) => Some(tuple),
            Slot::Hole => None,
        }
    }
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Slot::Occupied(tuple) => write!(f, "{}", tuple),
            Slot::Hole => f.write_str(HOLE_MARKER),
        }
    }
}
