//! Comparison, range and modular-arithmetic hints (§4.4).

use alloc::boxed::Box;
use alloc::string::String;

use hashbrown::HashMap;
use num_bigint::BigInt;
use num_traits::Zero;

use crate::hint_processor::hint_processor_definition::HintReference;
use crate::hint_processor::hint_processor_utils::{
    get_address_from_var_name, get_integer_from_var_name, insert_value_from_var_name,
};
use crate::math_utils::{as_signed_bigint, bigint_to_felt, bit_length, felt_to_bigint};
use crate::serde::deserialize_program::ApTracking;
use crate::types::felt::Felt252;
use crate::vm::errors::hint_errors::HintError;
use crate::vm::vm_core::VirtualMachine;

fn starknet_prime() -> BigInt {
    BigInt::parse_bytes(
        b"3618502788666131213697322783095070105623107215331596699973092056135872020481",
        10,
    )
    .expect("valid prime literal")
}

fn range_check_bound(vm: &VirtualMachine) -> Result<Felt252, HintError> {
    vm.range_check_bound()?
        .ok_or_else(|| HintError::AssertionFailed(String::from("range_check_builtin.bound is not set")))
}

pub fn is_nn(
    vm: &mut VirtualMachine,
    ids_data: &HashMap<String, HintReference>,
    ap_tracking: &ApTracking,
) -> Result<(), HintError> {
    let a = get_integer_from_var_name("a", vm, ids_data, ap_tracking)?;
    let bound = range_check_bound(vm)?;
    let result = if a < bound { Felt252::from(0) } else { Felt252::from(1) };
    vm.insert_value_into_ap(result)?;
    Ok(())
}

pub fn is_nn_out_of_range(
    vm: &mut VirtualMachine,
    ids_data: &HashMap<String, HintReference>,
    ap_tracking: &ApTracking,
) -> Result<(), HintError> {
    let a = get_integer_from_var_name("a", vm, ids_data, ap_tracking)?;
    let bound = range_check_bound(vm)?;
    let negated = -a - Felt252::from(1);
    let result = if negated < bound { Felt252::from(0) } else { Felt252::from(1) };
    vm.insert_value_into_ap(result)?;
    Ok(())
}

pub fn assert_le_felt(
    vm: &mut VirtualMachine,
    ids_data: &HashMap<String, HintReference>,
    ap_tracking: &ApTracking,
) -> Result<(), HintError> {
    let a = get_integer_from_var_name("a", vm, ids_data, ap_tracking)?;
    let b = get_integer_from_var_name("b", vm, ids_data, ap_tracking)?;
    if a > b {
        return Err(HintError::NonLeFelt(Box::new(a), Box::new(b)));
    }
    Ok(())
}

pub fn assert_le_felt_v08(
    vm: &mut VirtualMachine,
    ids_data: &HashMap<String, HintReference>,
    ap_tracking: &ApTracking,
) -> Result<(), HintError> {
    let a = get_integer_from_var_name("a", vm, ids_data, ap_tracking)?;
    let b = get_integer_from_var_name("b", vm, ids_data, ap_tracking)?;
    if a > b {
        return Err(HintError::NonLeFelt(Box::new(a), Box::new(b)));
    }
    let bound = range_check_bound(vm)?;
    let small_inputs = a < bound && (b - a) < bound;
    insert_value_from_var_name(
        "small_inputs",
        Felt252::from(small_inputs as u8),
        vm,
        ids_data,
        ap_tracking,
    )
}

pub fn split_int(
    vm: &mut VirtualMachine,
    ids_data: &HashMap<String, HintReference>,
    ap_tracking: &ApTracking,
) -> Result<(), HintError> {
    let value = get_integer_from_var_name("value", vm, ids_data, ap_tracking)?;
    let base = get_integer_from_var_name("base", vm, ids_data, ap_tracking)?;
    let bound = get_integer_from_var_name("bound", vm, ids_data, ap_tracking)?;
    if base.is_zero() {
        return Err(HintError::DividedByZero);
    }
    let (_, res) = crate::math_utils::unsigned_div_rem(&value, &base)?;
    if res >= bound {
        return Err(HintError::SplitIntLimbOutOfRange(Box::new(res), Box::new(bound)));
    }
    let output_addr = get_address_from_var_name("output", ids_data, vm, ap_tracking)?;
    vm.insert_value(output_addr, res)?;
    Ok(())
}

pub fn is_addr_bounded(
    vm: &mut VirtualMachine,
    ids_data: &HashMap<String, HintReference>,
    ap_tracking: &ApTracking,
    addr_bound: &Felt252,
    prime: &Felt252,
) -> Result<(), HintError> {
    let two_250 = Felt252::from(2u32).pow(250u32);
    let two_251 = Felt252::from(2u32).pow(251u32);
    let invariant_ok = *addr_bound > two_250
        && *addr_bound <= two_251
        && felt_to_bigint(addr_bound) * BigInt::from(2) > felt_to_bigint(prime);
    if !invariant_ok {
        return Err(HintError::AssertionFailed(String::from(
            "normalize_address() cannot be used with the current constants",
        )));
    }
    let addr = get_integer_from_var_name("addr", vm, ids_data, ap_tracking)?;
    let is_small = if addr < *addr_bound { 1u8 } else { 0u8 };
    insert_value_from_var_name("is_small", Felt252::from(is_small), vm, ids_data, ap_tracking)
}

pub fn is_250_bits(
    vm: &mut VirtualMachine,
    ids_data: &HashMap<String, HintReference>,
    ap_tracking: &ApTracking,
) -> Result<(), HintError> {
    let addr = get_integer_from_var_name("addr", vm, ids_data, ap_tracking)?;
    let is_250 = if bit_length(&addr) <= 250 { 1u8 } else { 0u8 };
    insert_value_from_var_name("is_250", Felt252::from(is_250), vm, ids_data, ap_tracking)
}

/// The auxiliary prime `Q = 2**255 - 19` and the fixed fourth-root-of-unity
/// constant used to fix up a wrong square-root branch (§4.4).
fn split_xx_prime() -> BigInt {
    (BigInt::from(1) << 255) - BigInt::from(19)
}

const SPLIT_XX_I: &str = "19681161376707505956807079304988542015446066515923890162744021073123829784752";

pub fn split_xx(
    vm: &mut VirtualMachine,
    ids_data: &HashMap<String, HintReference>,
    ap_tracking: &ApTracking,
) -> Result<(), HintError> {
    let low = get_integer_from_var_name("xx.d0", vm, ids_data, ap_tracking)
        .or_else(|_| get_integer_from_var_name("low", vm, ids_data, ap_tracking))?;
    let high = get_integer_from_var_name("xx.d1", vm, ids_data, ap_tracking)
        .or_else(|_| get_integer_from_var_name("high", vm, ids_data, ap_tracking))?;

    let q = split_xx_prime();
    let i = BigInt::parse_bytes(SPLIT_XX_I.as_bytes(), 10).expect("valid constant");

    let xx = felt_to_bigint(&low) + (felt_to_bigint(&high) << 128);
    let xx = xx.mod_floor_pos(&q);

    let exponent = (&q + BigInt::from(3)) / BigInt::from(8);
    let mut x = xx.modpow(&exponent, &q);
    if (&x * &x).mod_floor_pos(&q) != xx {
        x = (&x * &i).mod_floor_pos(&q);
    }
    if (&x % BigInt::from(2)) != BigInt::zero() {
        x = &q - &x;
    }

    let x_low = &x & ((BigInt::from(1) << 128) - BigInt::from(1));
    let x_high = &x >> 128;

    insert_value_from_var_name("x.d0", bigint_to_felt(&x_low), vm, ids_data, ap_tracking)?;
    insert_value_from_var_name("x.d1", bigint_to_felt(&x_high), vm, ids_data, ap_tracking)
}

trait ModFloorPos {
    fn mod_floor_pos(&self, modulus: &BigInt) -> BigInt;
}

impl ModFloorPos for BigInt {
    fn mod_floor_pos(&self, modulus: &BigInt) -> BigInt {
        use num_integer::Integer;
        self.mod_floor(modulus)
    }
}

/// `3` is a canonical quadratic non-residue over the Starknet prime.
const NON_RESIDUE: u32 = 3;

pub fn is_quad_residue(
    vm: &mut VirtualMachine,
    ids_data: &HashMap<String, HintReference>,
    ap_tracking: &ApTracking,
) -> Result<(), HintError> {
    let x = get_integer_from_var_name("x", vm, ids_data, ap_tracking)?;
    let prime = starknet_prime();

    let y = if x.is_zero() || x == Felt252::from(1) || is_qr(&x, &prime) {
        x.sqrt().ok_or_else(|| crate::types::errors::math_errors::MathError::SqrtNotQuadraticResidue(Box::new(x)))?
    } else {
        let reduced = crate::math_utils::div_mod(&felt_to_bigint(&x), &BigInt::from(NON_RESIDUE), &prime)?;
        bigint_to_felt(&reduced)
            .sqrt()
            .ok_or_else(|| crate::types::errors::math_errors::MathError::SqrtNotQuadraticResidue(Box::new(x)))?
    };

    insert_value_from_var_name("y", y, vm, ids_data, ap_tracking)
}

fn is_qr(x: &Felt252, prime: &BigInt) -> bool {
    let exponent = (prime - BigInt::from(1)) / BigInt::from(2);
    let result = felt_to_bigint(x).modpow(&exponent, prime);
    result == BigInt::from(1)
}

pub fn unsigned_div_rem(
    vm: &mut VirtualMachine,
    ids_data: &HashMap<String, HintReference>,
    ap_tracking: &ApTracking,
) -> Result<(), HintError> {
    let value = get_integer_from_var_name("value", vm, ids_data, ap_tracking)?;
    let div = get_integer_from_var_name("div", vm, ids_data, ap_tracking)?;
    let (q, r) = crate::math_utils::unsigned_div_rem(&value, &div)?;
    insert_value_from_var_name("q", q, vm, ids_data, ap_tracking)?;
    insert_value_from_var_name("r", r, vm, ids_data, ap_tracking)
}

pub fn signed_div_rem(
    vm: &mut VirtualMachine,
    ids_data: &HashMap<String, HintReference>,
    ap_tracking: &ApTracking,
) -> Result<(), HintError> {
    let value = get_integer_from_var_name("value", vm, ids_data, ap_tracking)?;
    let div = get_integer_from_var_name("div", vm, ids_data, ap_tracking)?;
    let bound = get_integer_from_var_name("bound", vm, ids_data, ap_tracking)?;
    let prime = starknet_prime();
    let (q, r) = crate::math_utils::signed_div_rem(&value, &div, &bound, &prime)?;
    insert_value_from_var_name("biased_q", q + bound, vm, ids_data, ap_tracking)?;
    insert_value_from_var_name("r", r, vm, ids_data, ap_tracking)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starknet_prime_is_valid() {
        assert!(starknet_prime() > BigInt::zero());
    }

    #[test]
    fn split_xx_prime_matches_2_255_minus_19() {
        let expected = (BigInt::from(1) << 255) - BigInt::from(19);
        assert_eq!(split_xx_prime(), expected);
    }

    #[test]
    fn non_residue_is_three() {
        assert_eq!(NON_RESIDUE, 3);
    }
}
