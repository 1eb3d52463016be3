use alloc::boxed::Box;
use alloc::string::String;
use thiserror_no_std::Error;

use crate::types::felt::Felt252;

/// Leaf numeric failures, independent of memory or scope layout.
#[derive(Debug, PartialEq, Eq, Error)]
pub enum MathError {
    #[error("Can't calculate the square root of non quadratic residue {0}")]
    SqrtNotQuadraticResidue(Box<Felt252>),
    #[error("Attempted to divide by zero")]
    DividedByZero,
    #[error("Failed to calculate a safe_div: {0} is not divisible by {1}")]
    SafeDivFail(Box<Felt252>, Box<Felt252>),
    #[error("Failed to calculate a safe_div for big integers: {0} is not divisible by {1}")]
    SafeDivFailBigInt(Box<num_bigint::BigInt>, Box<num_bigint::BigInt>),
    #[error("Value {0} is too large to fit in {1} bits")]
    ValueOutOfRange(Box<Felt252>, u32),
    #[error("Couldn't convert {0} to a u64")]
    Felt252ToU64Conversion(Box<Felt252>),
    #[error("Couldn't convert {0} to a usize")]
    Felt252ToUsizeConversion(Box<Felt252>),
    #[error("Attempted to compute a negative bit length for {0}")]
    NegativeBitLength(Box<Felt252>),
    #[error("Requested out-of-range division: div {0} must be in (0, PRIME / bound({1})]")]
    DivOutOfRange(Box<Felt252>, Box<Felt252>),
    #[error("Expected a positive value, got {0}")]
    ExpectedPositive(String),
}
