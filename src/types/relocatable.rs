use alloc::boxed::Box;
use core::cmp::Ordering;
use core::ops::Add;

use num_bigint::BigInt;
use num_traits::ToPrimitive;

use crate::types::errors::math_errors::MathError;
use crate::types::felt::Felt252;
use crate::vm::errors::memory_errors::MemoryError;

/// An address into the VM's segmented memory: `(segment_index, offset)`.
///
/// `segment_index` is signed because temporary segments (allocated before
/// their final location is known) are given negative indices.
#[derive(Eq, Ord, Hash, PartialEq, PartialOrd, Clone, Copy, Debug, Default)]
pub struct Relocatable {
    pub segment_index: isize,
    pub offset: usize,
}

/// A value stored in a memory cell: either a field element or an address.
#[derive(Eq, PartialEq, Clone, Debug, Hash)]
pub enum MaybeRelocatable {
    RelocatableValue(Relocatable),
    Int(Felt252),
}

impl Relocatable {
    pub fn new(segment_index: isize, offset: usize) -> Self {
        Relocatable {
            segment_index,
            offset,
        }
    }

    /// `self + n`, where `n` is an unsigned offset.
    pub fn add_usize(&self, n: usize) -> Result<Self, MathError> {
        Ok(Relocatable {
            segment_index: self.segment_index,
            offset: self
                .offset
                .checked_add(n)
                .ok_or_else(|| MathError::ExpectedPositive(alloc::string::String::from("offset")))?,
        })
    }

    /// `self + value`, where `value` must be representable as a non-negative `usize`.
    pub fn add_int(&self, value: &Felt252) -> Result<Self, MathError> {
        let n = value
            .to_usize()
            .ok_or_else(|| MathError::Felt252ToUsizeConversion(Box::new(*value)))?;
        self.add_usize(n)
    }

    /// `self - other`, requiring both addresses share a segment. Returns the
    /// unsigned distance between them.
    pub fn sub_rel(&self, other: &Self) -> Result<usize, MemoryError> {
        if self.segment_index != other.segment_index {
            return Err(MemoryError::RelocatableDifferentSegments(
                Box::new(*self),
                Box::new(*other),
            ));
        }
        self.offset
            .checked_sub(other.offset)
            .ok_or(MemoryError::NumOutOfBounds)
    }

    /// `self - n`, where `n` is an unsigned offset, staying within the segment.
    pub fn sub_usize(&self, n: usize) -> Result<Self, MathError> {
        Ok(Relocatable {
            segment_index: self.segment_index,
            offset: self
                .offset
                .checked_sub(n)
                .ok_or_else(|| MathError::ExpectedPositive(alloc::string::String::from("offset")))?,
        })
    }
}

impl Add<usize> for Relocatable {
    type Output = Result<Relocatable, MathError>;

    fn add(self, rhs: usize) -> Self::Output {
        self.add_usize(rhs)
    }
}

impl PartialOrd for MaybeRelocatable {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        match (self, other) {
            (MaybeRelocatable::Int(a), MaybeRelocatable::Int(b)) => a.partial_cmp(b),
            (MaybeRelocatable::RelocatableValue(a), MaybeRelocatable::RelocatableValue(b)) => {
                a.partial_cmp(b)
            }
            _ => None,
        }
    }
}

impl From<Relocatable> for MaybeRelocatable {
    fn from(rel: Relocatable) -> Self {
        MaybeRelocatable::RelocatableValue(rel)
    }
}

impl From<Felt252> for MaybeRelocatable {
    fn from(felt: Felt252) -> Self {
        MaybeRelocatable::Int(felt)
    }
}

impl From<(isize, usize)> for Relocatable {
    fn from(index_offset: (isize, usize)) -> Self {
        Relocatable::new(index_offset.0, index_offset.1)
    }
}

impl From<(isize, usize)> for MaybeRelocatable {
    fn from(index_offset: (isize, usize)) -> Self {
        MaybeRelocatable::RelocatableValue(Relocatable::from(index_offset))
    }
}

impl MaybeRelocatable {
    /// Projects this value to a [`Felt252`], failing if it is an address.
    pub fn get_int(&self) -> Option<Felt252> {
        match self {
            MaybeRelocatable::Int(felt) => Some(*felt),
            MaybeRelocatable::RelocatableValue(_) => None,
        }
    }

    /// Projects this value to a [`Relocatable`], failing if it is a felt.
    pub fn get_relocatable(&self) -> Option<Relocatable> {
        match self {
            MaybeRelocatable::RelocatableValue(rel) => Some(*rel),
            MaybeRelocatable::Int(_) => None,
        }
    }

    /// `self + other`, where `other` may be a felt (offset) or a relocatable
    /// only if `self` is a felt (symmetric case).
    pub fn add_int(&self, other: &Felt252) -> Result<MaybeRelocatable, MathError> {
        match self {
            MaybeRelocatable::Int(a) => Ok(MaybeRelocatable::Int(*a + *other)),
            MaybeRelocatable::RelocatableValue(rel) => {
                Ok(MaybeRelocatable::RelocatableValue(rel.add_int(other)?))
            }
        }
    }

    /// `self - other`, requiring both operands be the same variant.
    pub fn sub(&self, other: &MaybeRelocatable) -> Result<MaybeRelocatable, MathError> {
        match (self, other) {
            (MaybeRelocatable::Int(a), MaybeRelocatable::Int(b)) => {
                Ok(MaybeRelocatable::Int(*a - *b))
            }
            (MaybeRelocatable::RelocatableValue(a), MaybeRelocatable::RelocatableValue(b)) => {
                let result = a
                    .sub_rel(b)
                    .map_err(|_| MathError::ExpectedPositive(alloc::string::String::from("offset")))?;
                Ok(MaybeRelocatable::Int(Felt252::from(result)))
            }
            _ => Err(MathError::ExpectedPositive(alloc::string::String::from(
                "operands must be the same kind",
            ))),
        }
    }

    pub fn is_zero(&self) -> bool {
        matches!(self, MaybeRelocatable::Int(felt) if felt == &Felt252::from(0))
    }
}

/// Reinterprets an arbitrary-precision integer as a `Relocatable` segment
/// index for the rare cases a hint needs to round-trip through `BigInt`.
pub fn relocatable_from_bigint(index: &BigInt, offset: usize) -> Option<Relocatable> {
    index.to_isize().map(|i| Relocatable::new(i, offset))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn relocatable_add_sub_roundtrip() {
        let a = Relocatable::new(1, 10);
        let b = a.add_usize(5).unwrap();
        assert_eq!(b, Relocatable::new(1, 15));
        assert_eq!(b.sub_rel(&a).unwrap(), 5);
    }

    #[test]
    fn sub_rel_different_segments_errors() {
        let a = Relocatable::new(1, 10);
        let b = Relocatable::new(2, 5);
        assert!(a.sub_rel(&b).is_err());
    }

    #[test]
    fn maybe_relocatable_sub_ints() {
        let a = MaybeRelocatable::Int(Felt252::from(10));
        let b = MaybeRelocatable::Int(Felt252::from(4));
        assert_eq!(a.sub(&b).unwrap(), MaybeRelocatable::Int(Felt252::from(6)));
    }
}
