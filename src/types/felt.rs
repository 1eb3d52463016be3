//! Field-element primitive used throughout the hint processor.
//!
//! This crate treats the 252-bit Starknet field as an external numeric
//! primitive (see the data model's "Field element (F)"); [`Felt252`] is the
//! concrete type consumed everywhere else in the crate.

pub use starknet_types_core::felt::Felt252;
