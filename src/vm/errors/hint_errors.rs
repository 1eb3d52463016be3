use alloc::boxed::Box;
use alloc::string::String;
use thiserror_no_std::Error;

use crate::types::errors::exec_scope_errors::ExecScopeError;
use crate::types::errors::math_errors::MathError;
use crate::types::felt::Felt252;
use crate::types::relocatable::MaybeRelocatable;
use crate::vm::errors::memory_errors::MemoryError;
use crate::vm::errors::vm_errors::VirtualMachineError;

/// The error type every hint handler returns. Wraps every lower layer via
/// `#[from]` so handler bodies can use `?` end to end, and adds one variant
/// per hint-specific testable condition.
#[derive(Debug, PartialEq, Eq, Error)]
pub enum HintError {
    #[error(transparent)]
    Memory(#[from] MemoryError),
    #[error(transparent)]
    Math(#[from] MathError),
    #[error(transparent)]
    VirtualMachine(#[from] VirtualMachineError),
    #[error(transparent)]
    ExecScope(#[from] ExecScopeError),

    #[error("Unknown identifier {0}")]
    UnknownIdentifier(String),
    #[error("Expected integer for {0}, found a relocatable")]
    IdentifierNotInteger(String),
    #[error("{0} has no member {1}")]
    IdentifierHasNoMember(String, String),
    #[error("Expected a relocatable value in memory at the dereferenced address")]
    ExpectedAddressInMemory,
    #[error("Access-path-tracking group mismatch: expected {0}, found {1}")]
    AptGroupMismatch(usize, usize),

    #[error("Variable {0} not in scope")]
    VariableNotInScope(String),
    #[error("Variable {0} has wrong type, expected {1}")]
    VariableWrongType(String, String),

    #[error("Missing constant {0}")]
    MissingConstant(Box<String>),

    #[error("No dict tracker found for segment {0}")]
    NoDictTracker(isize),
    #[error("Dict pointer mismatch: expected {0:?}, found {1:?}")]
    MismatchedDictPtr(Box<MaybeRelocatable>, Box<MaybeRelocatable>),
    #[error("Segment {0} already has a dictionary tracker")]
    CantCreateDictionaryOnTakenSegment(isize),
    #[error("No value found for key: {0:?}")]
    NoValueForKey(Box<MaybeRelocatable>),

    #[error("Assertion failed: {0}")]
    AssertionFailed(String),
    #[error("Attempted to divide by zero")]
    DividedByZero,
    #[error("{0} is not divisible by {1}")]
    SafeDivFail(Box<Felt252>, Box<Felt252>),
    #[error("assert_le_felt: a = {0} is not <= b = {1}")]
    NonLeFelt(Box<Felt252>, Box<Felt252>),
    #[error("split_int: limb {0} is out of range (bound {1})")]
    SplitIntLimbOutOfRange(Box<Felt252>, Box<Felt252>),

    #[error("Invalid set range: set_ptr {0:?} > set_end_ptr {1:?}")]
    InvalidSetRange(Box<MaybeRelocatable>, Box<MaybeRelocatable>),
    #[error("Invalid value for len: {0}")]
    InvalidLenValue(Box<Felt252>),

    #[error("Invalid word size: {0}")]
    InvalidWordSize(Box<Felt252>),
    #[error("Invalid keccak input length: {0}")]
    InvalidKeccakInputLength(Box<Felt252>),
    #[error("Keccak max size exceeded: length {0} > max {1}")]
    KeccakMaxSize(Box<Felt252>, Box<Felt252>),
    #[error("Invalid block size: {0}")]
    InvalidBlockSize(Box<Felt252>),
    #[error("Invalid keccak state size: {0}")]
    InvalidKeccakStateSize(Box<Felt252>),
    #[error("No memory value found in range [{0:?}, {1:?})")]
    NoneInMemoryRange(Box<MaybeRelocatable>, Box<MaybeRelocatable>),

    #[error("Could not recover a valid y value for x = {0}")]
    RecoverYPointNotOnCurve(Box<Felt252>),
    #[error("Could not find a random point on the curve after 100 attempts")]
    RandomEcPointNotOnCurve,

    #[error("usort: value is out of the declared max size")]
    UsortOutOfRange(Box<Felt252>),
    #[error("usort: couldn't pop positions, the list is empty")]
    CouldntPopPositions,
    #[error("usort: unexpected failure looking up positions_dict for value {0:?}")]
    UnexpectedPositionsDictFail(Box<Felt252>),
    #[error("usort: positions list is not empty at the end of verification")]
    PositionsLengthNotZero,

    #[error("Couldn't convert BigInt to the requested unsigned type")]
    BigIntToUnsignedFail,
}
