#![deny(unsafe_code)]

//! Hint processor for a Cairo-like zero-knowledge-proof virtual machine.
//!
//! This crate implements the non-deterministic "hint" execution layer that sits
//! alongside a Cairo VM: resolving symbolic variable references into concrete
//! memory addresses, maintaining per-program execution scopes and dictionary
//! trackers, and running the built-in hint catalog (numeric, multi-precision,
//! elliptic-curve, hashing, sorting and loop-scaffolding hint families).

extern crate alloc;

#[macro_use]
pub mod utils;
pub mod hint_processor;
pub mod math_utils;
pub mod serde;
pub mod types;
pub mod vm;

/// Wraps a value in a `Box<dyn Any>`, used to stash heterogeneous data in an
/// [`types::exec_scope::ExecutionScopes`] frame.
#[macro_export]
macro_rules! any_box {
    ($val:expr) => {
        alloc::boxed::Box::new($val) as alloc::boxed::Box<dyn core::any::Any>
    };
}
