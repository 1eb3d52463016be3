//! BigInt3/BigInt5 (base `2^86`) modular helpers (§4.6). Mirrors the
//! teacher's `secp::bigint_utils`/`secp::secp_utils` pack/split pattern,
//! generalized from the fixed secp256k1 prime to an arbitrary `p` read out
//! of memory alongside the operands.

use alloc::string::String;
use alloc::vec::Vec;

use hashbrown::HashMap;
use num_bigint::BigInt;
use num_traits::{Signed, Zero};

use crate::hint_processor::hint_processor_definition::HintReference;
use crate::hint_processor::hint_processor_utils::{
    get_relocatable_from_var_name, insert_value_from_var_name,
};
use crate::math_utils::{as_signed_bigint, bigint_to_felt};
use crate::serde::deserialize_program::ApTracking;
use crate::types::errors::math_errors::MathError;
use crate::types::exec_scope::ExecutionScopes;
use crate::types::felt::Felt252;
use crate::types::relocatable::{MaybeRelocatable, Relocatable};
use crate::vm::errors::hint_errors::HintError;
use crate::vm::vm_core::VirtualMachine;

const BASE_SHIFT: usize = 86;

fn starknet_prime() -> BigInt {
    BigInt::parse_bytes(
        b"3618502788666131213697322783095070105623107215331596699973092056135872020481",
        10,
    )
    .expect("valid prime literal")
}

/// Packs `n` consecutive limbs starting at `base`, each reinterpreted as a
/// signed value around the field's `P/2` (§3 "BigInt-N value").
fn pack_signed(vm: &VirtualMachine, base: Relocatable, n: usize) -> Result<BigInt, HintError> {
    let prime = starknet_prime();
    let mut acc = BigInt::zero();
    for i in 0..n {
        let limb = vm.get_integer(base.add_usize(i)?)?;
        acc += as_signed_bigint(&limb, &prime) << (BASE_SHIFT * i);
    }
    Ok(acc)
}

/// `bigint_pack_div_mod`: packs `p`, `x` (5 limbs) and `y` (3 limbs), then
/// computes `res = value = x * y⁻¹ mod p`, depositing all five quantities
/// in the current scope as unbounded integers.
pub fn bigint_pack_div_mod(
    vm: &mut VirtualMachine,
    exec_scopes: &mut ExecutionScopes,
    ids_data: &HashMap<String, HintReference>,
    ap_tracking: &ApTracking,
) -> Result<(), HintError> {
    let p_base = get_relocatable_from_var_name("P", vm, ids_data, ap_tracking)?;
    let x_base = get_relocatable_from_var_name("x", vm, ids_data, ap_tracking)?;
    let y_base = get_relocatable_from_var_name("y", vm, ids_data, ap_tracking)?;

    let p = pack_signed(vm, p_base, 3)?;
    let x = pack_signed(vm, x_base, 5)?;
    let y = pack_signed(vm, y_base, 3)?;

    if p.is_zero() {
        return Err(MathError::DividedByZero.into());
    }
    let value = crate::math_utils::div_mod(&x, &y, &p)?;

    exec_scopes.insert_value("res", value.clone());
    exec_scopes.insert_value("value", value);
    exec_scopes.insert_value("x", x);
    exec_scopes.insert_value("y", y);
    exec_scopes.insert_value("p", p);
    Ok(())
}

/// `bigint_safe_div`: follows [`bigint_pack_div_mod`] in the same scope.
/// Computes `k = safe_div(res*y - x, p)`, then `value = |k|`, `flag = k>=0`.
pub fn bigint_safe_div(
    vm: &mut VirtualMachine,
    exec_scopes: &mut ExecutionScopes,
    ids_data: &HashMap<String, HintReference>,
    ap_tracking: &ApTracking,
) -> Result<(), HintError> {
    let res = exec_scopes.get::<BigInt>("res")?;
    let x = exec_scopes.get::<BigInt>("x")?;
    let y = exec_scopes.get::<BigInt>("y")?;
    let p = exec_scopes.get::<BigInt>("p")?;

    let numerator = &res * &y - &x;
    let k = crate::math_utils::safe_div(&numerator, &p)?;
    let value = k.abs();
    let flag = if k.is_negative() { Felt252::from(0) } else { Felt252::from(1) };

    exec_scopes.insert_value("k", k);
    exec_scopes.insert_value("value", value);
    insert_value_from_var_name("flag", flag, vm, ids_data, ap_tracking)
}

/// `nondet_bigint3`: writes `split(value)` (signed `value` read from scope)
/// into `ids.res`'s three limbs.
pub fn nondet_bigint3(
    vm: &mut VirtualMachine,
    exec_scopes: &ExecutionScopes,
    ids_data: &HashMap<String, HintReference>,
    ap_tracking: &ApTracking,
) -> Result<(), HintError> {
    let value = exec_scopes.get::<BigInt>("value")?;
    let res_base = get_relocatable_from_var_name("res", vm, ids_data, ap_tracking)?;
    let limbs = split3(&value)?;
    for (i, limb) in limbs.into_iter().enumerate() {
        vm.insert_value(res_base.add_usize(i)?, MaybeRelocatable::Int(bigint_to_felt(&limb)))?;
    }
    Ok(())
}

fn split3(value: &BigInt) -> Result<[BigInt; 3], HintError> {
    if value.is_negative() {
        return Err(HintError::AssertionFailed(alloc::format!(
            "split: value {value} must be non-negative"
        )));
    }
    let base_max = (BigInt::from(1) << BASE_SHIFT) - BigInt::from(1);
    let mut num = value.clone();
    let mut limbs: [BigInt; 3] = Default::default();
    for limb in &mut limbs {
        *limb = &num & &base_max;
        num >>= BASE_SHIFT;
    }
    if !num.is_zero() {
        return Err(HintError::AssertionFailed(alloc::format!(
            "split: value {value} does not fit in 3 limbs"
        )));
    }
    Ok(limbs)
}
