use alloc::string::String;
use thiserror_no_std::Error;

use crate::types::errors::math_errors::MathError;
use crate::vm::errors::memory_errors::MemoryError;

/// VM-surface failures (§3a): unknown hint codes and the minimal register/
/// segment surface the hint catalog drives.
#[derive(Debug, PartialEq, Eq, Error)]
pub enum VirtualMachineError {
    #[error("Unknown hint: {0}")]
    UnknownHint(String),
    #[error(transparent)]
    Memory(#[from] MemoryError),
    #[error(transparent)]
    Math(#[from] MathError),
    #[error("No range-check builtin registered")]
    NoRangeCheckBuiltin,
}
