//! Uint384 / Uint768 multi-precision helpers (§4.5): limb base `B = 2**128`,
//! shape 3 limbs (384-bit) or 6 limbs (768-bit). Every hint here packs its
//! inputs to an unbounded integer, computes, and splits the result back.

use alloc::string::String;
use alloc::vec::Vec;

use hashbrown::HashMap;
use num_bigint::BigInt;
use num_integer::Integer;
use num_traits::{One, Zero};

use crate::hint_processor::hint_processor_definition::HintReference;
use crate::hint_processor::hint_processor_utils::{get_integer_from_var_name, insert_value_from_var_name};
use crate::math_utils::{bigint_to_felt, felt_to_bigint, isqrt};
use crate::serde::deserialize_program::ApTracking;
use crate::types::errors::math_errors::MathError;
use crate::types::felt::Felt252;
use crate::vm::errors::hint_errors::HintError;
use crate::vm::vm_core::VirtualMachine;

const B: u32 = 128;

fn base() -> BigInt {
    BigInt::one() << B
}

/// Reads a `length`-limb struct named `name` (`name.d0`, `name.d1`, ...) and
/// packs it as `Σ limb_i * 2**(128*i)`, unsigned (no sign reinterpretation —
/// Uint384/Uint768 are unsigned types, unlike BigInt3/5, §4.6).
fn pack_var(
    name: &str,
    length: usize,
    vm: &VirtualMachine,
    ids_data: &HashMap<String, HintReference>,
    ap_tracking: &ApTracking,
) -> Result<BigInt, HintError> {
    let mut acc = BigInt::zero();
    for i in 0..length {
        let field = alloc::format!("{name}.d{i}");
        let limb = get_integer_from_var_name(&field, vm, ids_data, ap_tracking)?;
        acc += felt_to_bigint(&limb) << (B as usize * i);
    }
    Ok(acc)
}

/// Splits `value` (must be non-negative) into `length` base-`2**128` limbs
/// and writes them to `name.d0, name.d1, ...`.
fn split_and_write(
    name: &str,
    value: &BigInt,
    length: usize,
    vm: &mut VirtualMachine,
    ids_data: &HashMap<String, HintReference>,
    ap_tracking: &ApTracking,
) -> Result<(), HintError> {
    let b = base();
    let mut remaining = value.clone();
    for i in 0..length {
        let (q, limb) = remaining.div_mod_floor(&b);
        let field = alloc::format!("{name}.d{i}");
        insert_value_from_var_name(&field, bigint_to_felt(&limb), vm, ids_data, ap_tracking)?;
        remaining = q;
    }
    Ok(())
}

/// `uint384_unsigned_div_rem`: floor-divides two packed 3-limb values.
pub fn uint384_unsigned_div_rem(
    vm: &mut VirtualMachine,
    ids_data: &HashMap<String, HintReference>,
    ap_tracking: &ApTracking,
) -> Result<(), HintError> {
    unsigned_div_rem_n(vm, ids_data, ap_tracking, 3, 3, 3)
}

/// `uint768_by_uint384_unsigned_div_rem`: 6-limb dividend, 3-limb divisor,
/// 6-limb quotient, 3-limb remainder.
pub fn uint768_by_uint384_unsigned_div_rem(
    vm: &mut VirtualMachine,
    ids_data: &HashMap<String, HintReference>,
    ap_tracking: &ApTracking,
) -> Result<(), HintError> {
    unsigned_div_rem_n(vm, ids_data, ap_tracking, 6, 3, 6)
}

fn unsigned_div_rem_n(
    vm: &mut VirtualMachine,
    ids_data: &HashMap<String, HintReference>,
    ap_tracking: &ApTracking,
    a_limbs: usize,
    div_limbs: usize,
    quotient_limbs: usize,
) -> Result<(), HintError> {
    let a = pack_var("a", a_limbs, vm, ids_data, ap_tracking)?;
    let div = pack_var("div", div_limbs, vm, ids_data, ap_tracking)?;
    if div.is_zero() {
        return Err(HintError::DividedByZero);
    }
    let (quotient, remainder) = a.div_mod_floor(&div);
    split_and_write("quotient", &quotient, quotient_limbs, vm, ids_data, ap_tracking)?;
    split_and_write("remainder", &remainder, 3, vm, ids_data, ap_tracking)
}

/// `uint384_split_128`: splits a single felt (caller guarantees `a < 2**256`)
/// into its low/high 128-bit halves.
pub fn uint384_split_128(
    vm: &mut VirtualMachine,
    ids_data: &HashMap<String, HintReference>,
    ap_tracking: &ApTracking,
) -> Result<(), HintError> {
    let a = get_integer_from_var_name("a", vm, ids_data, ap_tracking)?;
    let a = felt_to_bigint(&a);
    let b = base();
    let (high, low) = a.div_mod_floor(&b);
    insert_value_from_var_name("low", bigint_to_felt(&low), vm, ids_data, ap_tracking)?;
    insert_value_from_var_name("high", bigint_to_felt(&high), vm, ids_data, ap_tracking)
}

/// `add_no_uint384_check`: per-limb addition with explicit carry flags,
/// against a `SHIFT` read out of the constants map.
pub fn add_no_uint384_check(
    vm: &mut VirtualMachine,
    ids_data: &HashMap<String, HintReference>,
    ap_tracking: &ApTracking,
    shift: &Felt252,
) -> Result<(), HintError> {
    let mut carry = Felt252::from(0);
    for i in 0..3 {
        let a_i = get_integer_from_var_name(&alloc::format!("a.d{i}"), vm, ids_data, ap_tracking)?;
        let b_i = get_integer_from_var_name(&alloc::format!("b.d{i}"), vm, ids_data, ap_tracking)?;
        let sum = a_i + b_i + carry;
        carry = if sum >= *shift { Felt252::from(1) } else { Felt252::from(0) };
        insert_value_from_var_name(&alloc::format!("carry_d{i}"), carry, vm, ids_data, ap_tracking)?;
    }
    Ok(())
}

/// `uint384_sqrt`: integer square root of the packed value, asserting the
/// root fits in 192 bits.
pub fn uint384_sqrt(
    vm: &mut VirtualMachine,
    ids_data: &HashMap<String, HintReference>,
    ap_tracking: &ApTracking,
) -> Result<(), HintError> {
    let a = pack_var("a", 3, vm, ids_data, ap_tracking)?;
    let root = isqrt(&a)?;
    if root.is_zero() || root >= (BigInt::one() << 192) {
        return Err(HintError::AssertionFailed(String::from(
            "uint384_sqrt: root is out of the expected 192-bit range",
        )));
    }
    split_and_write("root", &root, 3, vm, ids_data, ap_tracking)
}

/// `uint384_signed_nn`: `1` iff the top limb's bit-length is `<= 127`
/// (equivalently, `0 <= d2 < 2**127`).
pub fn uint384_signed_nn(
    vm: &mut VirtualMachine,
    ids_data: &HashMap<String, HintReference>,
    ap_tracking: &ApTracking,
) -> Result<(), HintError> {
    let d2 = get_integer_from_var_name("a.d2", vm, ids_data, ap_tracking)?;
    let half = Felt252::from(2u32).pow(127u32);
    let result = if d2 < half { Felt252::from(1) } else { Felt252::from(0) };
    vm.insert_value_into_ap(result)?;
    Ok(())
}

/// `sub_reduced_a_and_reduced_b`: `res = (a - b) mod p`, staying positive by
/// folding through `p` once when `a < b` rather than relying on a negative
/// intermediate.
pub fn sub_reduced_a_and_reduced_b(
    vm: &mut VirtualMachine,
    ids_data: &HashMap<String, HintReference>,
    ap_tracking: &ApTracking,
) -> Result<(), HintError> {
    let a = pack_var("a", 3, vm, ids_data, ap_tracking)?;
    let b = pack_var("b", 3, vm, ids_data, ap_tracking)?;
    let p = pack_var("p", 3, vm, ids_data, ap_tracking)?;
    if p.is_zero() {
        return Err(MathError::DividedByZero.into());
    }
    let res = if a < b { &p - (&b - &a) } else { a - b };
    let res = res.mod_floor(&p);
    split_and_write("res", &res, 3, vm, ids_data, ap_tracking)
}
