//! The variable resolver (§4.1): turns a hint's symbol table + the current
//! access-path-tracking data into concrete memory addresses, and the
//! typed read/write helpers built on top of it.

use alloc::string::{String, ToString};

use hashbrown::HashMap;

use crate::hint_processor::hint_processor_definition::{HintReference, OffsetValue};
use crate::serde::deserialize_program::{ApTracking, Register};
use crate::types::felt::Felt252;
use crate::types::relocatable::{MaybeRelocatable, Relocatable};
use crate::vm::errors::hint_errors::HintError;
use crate::vm::vm_core::VirtualMachine;

fn register_base(vm: &VirtualMachine, register: Register) -> Relocatable {
    match register {
        Register::AP => vm.run_context.get_ap(),
        Register::FP => vm.run_context.get_fp(),
    }
}

/// Rebases an AP-relative offset expression against the current tracking
/// data, subtracting how far AP has moved since the reference was captured.
fn apply_ap_tracking_correction(
    mut base: Relocatable,
    reference: &HintReference,
    ap_tracking: &ApTracking,
) -> Result<Relocatable, HintError> {
    if let Some(ref_tracking) = &reference.ap_tracking_data {
        if ref_tracking.group != ap_tracking.group {
            return Err(HintError::AptGroupMismatch(
                ref_tracking.group,
                ap_tracking.group,
            ));
        }
        let diff = ap_tracking
            .offset
            .checked_sub(ref_tracking.offset)
            .ok_or_else(|| HintError::AssertionFailed("ap tracking offset underflow".to_string()))?;
        base = base
            .sub_usize(diff)
            .map_err(|_| HintError::AssertionFailed("ap tracking offset underflow".to_string()))?;
    }
    Ok(base)
}

fn resolve_offset_value(
    vm: &VirtualMachine,
    reference: &HintReference,
    offset: &OffsetValue,
    ap_tracking: &ApTracking,
) -> Result<MaybeRelocatable, HintError> {
    let base = register_base(vm, offset.register);
    let base = if offset.register == Register::AP {
        apply_ap_tracking_correction(base, reference, ap_tracking)?
    } else {
        base
    };
    let addr = if offset.offset >= 0 {
        base.add_usize(offset.offset as usize)?
    } else {
        base.sub_usize((-offset.offset) as usize)?
    };
    if offset.dereference {
        let value = vm
            .get_maybe_relocatable(&addr)
            .ok_or(HintError::ExpectedAddressInMemory)?;
        Ok(value)
    } else {
        Ok(MaybeRelocatable::RelocatableValue(addr))
    }
}

/// Computes the concrete address a [`HintReference`] names, given the
/// current access-path-tracking data.
pub fn compute_addr_from_reference(
    reference: &HintReference,
    vm: &VirtualMachine,
    ap_tracking: &ApTracking,
) -> Result<Relocatable, HintError> {
    let value1 = resolve_offset_value(vm, reference, &reference.offset1, ap_tracking)?;
    let base = match &value1 {
        MaybeRelocatable::RelocatableValue(rel) => *rel,
        MaybeRelocatable::Int(_) => return Err(HintError::ExpectedAddressInMemory),
    };

    let base = if let Some(offset2) = &reference.offset2 {
        let value2 = resolve_offset_value(vm, reference, offset2, ap_tracking)?;
        match value2 {
            MaybeRelocatable::Int(felt) => base.add_int(&felt)?,
            MaybeRelocatable::RelocatableValue(_) => return Err(HintError::ExpectedAddressInMemory),
        }
    } else {
        base
    };

    if reference.dereference {
        Ok(base)
    } else {
        Ok(base)
    }
}

fn get_reference<'a>(
    name: &str,
    ids_data: &'a HashMap<String, HintReference>,
) -> Result<&'a HintReference, HintError> {
    ids_data
        .get(name)
        .ok_or_else(|| HintError::UnknownIdentifier(name.to_string()))
}

pub fn get_address_from_var_name(
    name: &str,
    ids_data: &HashMap<String, HintReference>,
    vm: &VirtualMachine,
    ap_tracking: &ApTracking,
) -> Result<Relocatable, HintError> {
    let reference = get_reference(name, ids_data)?;
    compute_addr_from_reference(reference, vm, ap_tracking)
}

pub fn get_integer_from_var_name(
    name: &str,
    vm: &VirtualMachine,
    ids_data: &HashMap<String, HintReference>,
    ap_tracking: &ApTracking,
) -> Result<Felt252, HintError> {
    let addr = get_address_from_var_name(name, ids_data, vm, ap_tracking)?;
    vm.get_integer(addr)
        .map_err(|_| HintError::IdentifierNotInteger(name.to_string()))
}

pub fn get_relocatable_from_var_name(
    name: &str,
    vm: &VirtualMachine,
    ids_data: &HashMap<String, HintReference>,
    ap_tracking: &ApTracking,
) -> Result<Relocatable, HintError> {
    let addr = get_address_from_var_name(name, ids_data, vm, ap_tracking)?;
    vm.get_relocatable(addr)
        .map_err(|_| HintError::IdentifierHasNoMember(name.to_string(), "relocatable".to_string()))
}

/// Alias kept for readability at call sites that read a pointer-typed variable.
pub fn get_ptr_from_var_name(
    name: &str,
    vm: &VirtualMachine,
    ids_data: &HashMap<String, HintReference>,
    ap_tracking: &ApTracking,
) -> Result<Relocatable, HintError> {
    get_relocatable_from_var_name(name, vm, ids_data, ap_tracking)
}

pub fn insert_value_from_var_name<T: Into<MaybeRelocatable>>(
    name: &str,
    value: T,
    vm: &mut VirtualMachine,
    ids_data: &HashMap<String, HintReference>,
    ap_tracking: &ApTracking,
) -> Result<(), HintError> {
    let addr = get_address_from_var_name(name, ids_data, vm, ap_tracking)?;
    vm.insert_value(addr, value)?;
    Ok(())
}

/// Looks up `short_name` in the constants map. Per §6's "Constants map",
/// some callers have only the short name (`SHIFT`) while the map is keyed by
/// a fully-qualified Cairo module path (`starkware...cairo_secp.SHIFT`); a
/// key matches if it is exactly `short_name` or ends in `.{short_name}`.
pub fn get_constant_from_var_name<'a>(
    short_name: &str,
    constants: &'a HashMap<String, Felt252>,
) -> Result<&'a Felt252, HintError> {
    constants
        .iter()
        .find(|(key, _)| key.as_str() == short_name || key.ends_with(&alloc::format!(".{short_name}")))
        .map(|(_, value)| value)
        .ok_or_else(|| HintError::MissingConstant(alloc::boxed::Box::new(short_name.to_string())))
}

pub fn insert_value_into_ap<T: Into<MaybeRelocatable>>(
    vm: &mut VirtualMachine,
    value: T,
) -> Result<(), HintError> {
    vm.insert_value_into_ap(value)?;
    Ok(())
}
