use alloc::boxed::Box;
use thiserror_no_std::Error;

use crate::types::relocatable::{MaybeRelocatable, Relocatable};

/// Failures from the memory/segment layer (§3a Minimal VM data model).
#[derive(Debug, PartialEq, Eq, Error)]
pub enum MemoryError {
    #[error("Memory access to segment {0} is not allocated")]
    UnallocatedSegment(Box<isize>),
    #[error("Memory address {0:?} is not relocatable")]
    AddressNotRelocatable(Box<MaybeRelocatable>),
    #[error("Offset {0} exceeds segment size")]
    NumOutOfBounds,
    #[error("Inconsistent memory assignment at address {0:?}: {1:?} != {2:?}")]
    InconsistentMemory(Box<Relocatable>, Box<MaybeRelocatable>, Box<MaybeRelocatable>),
    #[error("Expected integer at address {0:?}")]
    ExpectedInteger(Box<Relocatable>),
    #[error("Expected relocatable at address {0:?}")]
    ExpectedRelocatable(Box<Relocatable>),
    #[error("Range {0:?}..{1} has a memory gap")]
    GetRangeMemoryGap(Box<Relocatable>, usize),
    #[error("Can't compute offset between relocatables in different segments: {0:?} {1:?}")]
    RelocatableDifferentSegments(Box<Relocatable>, Box<Relocatable>),
}
