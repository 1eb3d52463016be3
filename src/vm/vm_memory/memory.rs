use alloc::boxed::Box;
use alloc::vec;
use alloc::vec::Vec;

use crate::types::felt::Felt252;
use crate::types::relocatable::{MaybeRelocatable, Relocatable};
use crate::vm::errors::memory_errors::MemoryError;

/// A segmented memory store: one growable `Vec` of cells per segment.
/// Implements write-once-unless-equal: inserting a value at an address that
/// already holds a (different) value is an error.
#[derive(Debug, Default)]
pub struct Memory {
    pub data: Vec<Vec<Option<MaybeRelocatable>>>,
}

impl Memory {
    pub fn new() -> Self {
        Memory { data: Vec::new() }
    }

    fn segment_mut(&mut self, index: isize) -> Result<&mut Vec<Option<MaybeRelocatable>>, MemoryError> {
        let index: usize = index
            .try_into()
            .map_err(|_| MemoryError::UnallocatedSegment(Box::new(index)))?;
        self.data
            .get_mut(index)
            .ok_or(MemoryError::UnallocatedSegment(Box::new(index as isize)))
    }

    fn segment(&self, index: isize) -> Result<&Vec<Option<MaybeRelocatable>>, MemoryError> {
        let index: usize = index
            .try_into()
            .map_err(|_| MemoryError::UnallocatedSegment(Box::new(index)))?;
        self.data
            .get(index)
            .ok_or(MemoryError::UnallocatedSegment(Box::new(index as isize)))
    }

    /// Ensures `data[segment_index]` has room for `offset`, growing with `None`s.
    fn ensure_capacity(&mut self, addr: Relocatable) -> Result<(), MemoryError> {
        let segment = self.segment_mut(addr.segment_index)?;
        if segment.len() <= addr.offset {
            segment.resize(addr.offset + 1, None);
        }
        Ok(())
    }

    /// Inserts `value` at `addr`. If a different value is already present,
    /// returns [`MemoryError::InconsistentMemory`].
    pub fn insert(&mut self, addr: Relocatable, value: MaybeRelocatable) -> Result<(), MemoryError> {
        self.ensure_capacity(addr)?;
        let segment = self.segment_mut(addr.segment_index)?;
        match &segment[addr.offset] {
            Some(previous) if previous != &value => Err(MemoryError::InconsistentMemory(
                Box::new(addr),
                Box::new(previous.clone()),
                Box::new(value),
            )),
            _ => {
                segment[addr.offset] = Some(value);
                Ok(())
            }
        }
    }

    pub fn get(&self, addr: &Relocatable) -> Option<&MaybeRelocatable> {
        self.segment(addr.segment_index)
            .ok()?
            .get(addr.offset)?
            .as_ref()
    }

    pub fn get_integer(&self, addr: Relocatable) -> Result<Felt252, MemoryError> {
        match self.get(&addr) {
            Some(MaybeRelocatable::Int(felt)) => Ok(*felt),
            Some(MaybeRelocatable::RelocatableValue(_)) => Err(MemoryError::ExpectedInteger(Box::new(addr))),
            None => Err(MemoryError::UnallocatedSegment(Box::new(addr.segment_index))),
        }
    }

    pub fn get_relocatable(&self, addr: Relocatable) -> Result<Relocatable, MemoryError> {
        match self.get(&addr) {
            Some(MaybeRelocatable::RelocatableValue(rel)) => Ok(*rel),
            Some(MaybeRelocatable::Int(_)) => Err(MemoryError::ExpectedRelocatable(Box::new(addr))),
            None => Err(MemoryError::UnallocatedSegment(Box::new(addr.segment_index))),
        }
    }

    /// Reads `len` consecutive cells starting at `addr`, leaving gaps as `None`.
    pub fn get_range(&self, addr: Relocatable, len: usize) -> Vec<Option<MaybeRelocatable>> {
        (0..len)
            .map(|i| {
                addr.add_usize(i)
                    .ok()
                    .and_then(|a| self.get(&a).cloned())
            })
            .collect()
    }

    /// As [`Self::get_range`] but fails on the first gap.
    pub fn get_continuous_range(
        &self,
        addr: Relocatable,
        len: usize,
    ) -> Result<Vec<MaybeRelocatable>, MemoryError> {
        let mut values = Vec::with_capacity(len);
        for i in 0..len {
            let cell_addr = addr.add_usize(i).map_err(|_| MemoryError::NumOutOfBounds)?;
            match self.get(&cell_addr) {
                Some(value) => values.push(value.clone()),
                None => return Err(MemoryError::GetRangeMemoryGap(Box::new(addr), len)),
            }
        }
        Ok(values)
    }

    /// As [`Self::get_continuous_range`] but additionally requires every cell
    /// to hold a field element.
    pub fn get_felt_range(&self, addr: Relocatable, len: usize) -> Result<Vec<Felt252>, MemoryError> {
        (0..len)
            .map(|i| {
                let cell_addr = addr.add_usize(i).map_err(|_| MemoryError::NumOutOfBounds)?;
                self.get_integer(cell_addr)
            })
            .collect()
    }
}

/// Test-only helper: builds a [`Memory`] from `((segment, offset), value)` pairs.
#[cfg(any(test, feature = "test_utils"))]
pub fn memory_from_entries<T: Into<MaybeRelocatable>>(
    num_segments: usize,
    entries: Vec<((isize, usize), T)>,
) -> Memory {
    let mut memory = Memory {
        data: vec![Vec::new(); num_segments],
    };
    for (addr, value) in entries {
        memory
            .insert(Relocatable::from(addr), value.into())
            .unwrap();
    }
    memory
}
