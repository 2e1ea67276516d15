//! Block slot storage

use std::fmt;
use std::ops::Range;

use crate::error::{Result, StoreError};
use crate::schema::Schema;
use crate::tuple::Tuple;

use super::Slot;

/// An ordered, bounded sequence of tuple slots sharing one schema.
///
/// Failed operations leave the block unchanged and return the reason.
/// Every read returns an owned copy; every write takes ownership of the
/// tuple it stores.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Block {
    /// Schema of the relation the block holds; `None` iff there are no slots
    schema: Option<Schema>,

    /// Allocated slots in order
    slots: Vec<Slot>,
}

/// Log a rejected operation and hand the error back
fn reject(op: &'static str, err: StoreError) -> StoreError {
    tracing::warn!(op, error = %err, "block operation rejected");
    err
}

impl Block {
    /// Create an empty block
    pub fn new() -> Self {
        Self::default()
    }

    // =========================================================================
    // Inspection
    // =========================================================================

    /// True when every slot the schema allows is allocated.
    /// An empty block is never full.
    pub fn is_full(&self) -> bool {
        match self.capacity() {
            Some(capacity) => self.slots.len() >= capacity,
            None => false,
        }
    }

    /// True when no slot is allocated
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Number of slots holding a tuple (holes excluded)
    pub fn num_tuples(&self) -> usize {
        self.slots.iter().filter(|slot| !slot.is_hole()).count()
    }

    /// Number of allocated slots (holes included)
    pub fn num_slots(&self) -> usize {
        self.slots.len()
    }

    /// Tuples per block of the bound schema, if any
    pub fn capacity(&self) -> Option<usize> {
        self.schema.as_ref().map(Schema::tuples_per_block)
    }

    /// Schema of the relation stored in this block, if any
    pub fn schema(&self) -> Option<&Schema> {
        self.schema.as_ref()
    }

    /// Read-only view of the slots
    pub fn slots(&self) -> &[Slot] {
        &self.slots
    }

    // =========================================================================
    // Reads (owned copies)
    // =========================================================================

    /// Copy of the slot at `offset`
    pub fn slot(&self, offset: usize) -> Result<Slot> {
        if let Some(capacity) = self.capacity() {
            if offset >= capacity {
                return Err(reject("get_tuple", StoreError::OutOfBlock { offset, capacity }));
            }
        }
        match self.slots.get(offset) {
            Some(slot) => Ok(slot.clone()),
            None => Err(reject(
                "get_tuple",
                StoreError::SlotOutOfBound {
                    offset,
                    len: self.slots.len(),
                },
            )),
        }
    }

    /// Copy of the tuple at `offset`; a hole is an error
    pub fn tuple(&self, offset: usize) -> Result<Tuple> {
        self.slot(offset)?
            .into_tuple()
            .ok_or_else(|| reject("get_tuple", StoreError::HoleAtSlot(offset)))
    }

    /// Copy of every slot, in order
    pub fn tuples(&self) -> Vec<Slot> {
        self.slots.clone()
    }

    // =========================================================================
    // Writes
    // =========================================================================

    /// Empty the block. The schema binding is dropped as well.
    pub fn clear(&mut self) {
        self.slots.clear();
        self.schema = None;
    }

    /// Store `tuple` at `offset`.
    ///
    /// Overwrites an allocated slot; past the current length, every slot in
    /// between is allocated as a hole first.
    pub fn set_tuple(&mut self, offset: usize, tuple: Tuple) -> Result<()> {
        if let Some(schema) = &self.schema {
            let capacity = schema.tuples_per_block();
            if offset >= capacity {
                return Err(reject("set_tuple", StoreError::OutOfBlock { offset, capacity }));
            }
            if schema != tuple.schema() {
                return Err(reject("set_tuple", StoreError::SchemaMismatch));
            }
        }
        let capacity = tuple.tuples_per_block();
        if offset >= capacity {
            return Err(reject("set_tuple", StoreError::OutOfBlock { offset, capacity }));
        }

        if self.schema.is_none() {
            self.schema = Some(tuple.schema().clone());
        }

        if offset < self.slots.len() {
            self.slots[offset] = Slot::Occupied(tuple);
        } else {
            if offset > self.slots.len() {
                tracing::debug!(from = self.slots.len(), to = offset, "filling gap with holes");
            }
            self.slots.resize(offset, Slot::Hole);
            self.slots.push(Slot::Occupied(tuple));
        }
        Ok(())
    }

    /// Replace all slots with copies of `tuples`
    pub fn set_tuples(&mut self, tuples: &[Tuple]) -> Result<()> {
        self.set_tuples_range(tuples, 0..tuples.len())
    }

    /// Replace all slots with copies of `tuples[range]`.
    ///
    /// Capacity and schema are taken from the first tuple of the list. An
    /// empty selection leaves the block empty.
    pub fn set_tuples_range(&mut self, tuples: &[Tuple], range: Range<usize>) -> Result<()> {
        if range.start > range.end || range.end > tuples.len() {
            return Err(reject(
                "set_tuples",
                StoreError::InvalidRange {
                    start: range.start,
                    end: range.end,
                    len: tuples.len(),
                },
            ));
        }
        let selected = &tuples[range];
        let Some(first) = tuples.first() else {
            self.clear();
            return Ok(());
        };

        let schema = first.schema();
        let capacity = schema.tuples_per_block();
        if selected.len() > capacity {
            return Err(reject(
                "set_tuples",
                StoreError::TooManyTuples {
                    count: selected.len(),
                    capacity,
                },
            ));
        }
        if selected.iter().any(|t| t.schema() != schema) {
            return Err(reject("set_tuples", StoreError::SchemaMismatch));
        }

        self.slots = selected.iter().cloned().map(Slot::Occupied).collect();
        self.schema = if self.slots.is_empty() {
            None
        } else {
            Some(schema.clone())
        };
        Ok(())
    }

    /// Store `tuple` in the next slot
    pub fn append_tuple(&mut self, tuple: Tuple) -> Result<()> {
        let capacity = self
            .capacity()
            .unwrap_or_else(|| tuple.tuples_per_block());
        if self.slots.len() >= capacity {
            return Err(reject("append_tuple", StoreError::BlockFull { capacity }));
        }
        if let Some(schema) = &self.schema {
            if schema != tuple.schema() {
                return Err(reject("append_tuple", StoreError::SchemaMismatch));
            }
        } else {
            self.schema = Some(tuple.schema().clone());
        }
        self.slots.push(Slot::Occupied(tuple));
        Ok(())
    }

    /// Turn the slot at `offset` into a hole
    pub fn invalidate_tuple(&mut self, offset: usize) -> Result<()> {
        match self.slots.get_mut(offset) {
            Some(slot) => {
                *slot = Slot::Hole;
                Ok(())
            }
            None => Err(reject(
                "invalidate_tuple",
                StoreError::SlotOutOfBound {
                    offset,
                    len: self.slots.len(),
                },
            )),
        }
    }

    /// Turn every allocated slot into a hole; the slot count is kept
    pub fn invalidate_tuples(&mut self) {
        for slot in &mut self.slots {
            *slot = Slot::Hole;
        }
    }

    pub(crate) fn from_parts(schema: Option<Schema>, slots: Vec<Slot>) -> Self {
        Self { schema, slots }
    }
}

impl fmt::Display for Block {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for slot in &self.slots {
            writeln!(f, "{}", slot)?;
        }
        Ok(())
    }
}
