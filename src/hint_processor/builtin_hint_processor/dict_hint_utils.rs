//! Dictionary hints (§4.10 "dictionary hints"): `dict_new`, `default_dict_new`,
//! `dict_read`, `dict_write`, `dict_update`. Each resolves the shared
//! [`DictManager`] handle out of the `dict_manager` scope key (§6 Reserved
//! scope keys), creating one on first use.

use alloc::rc::Rc;
use alloc::string::String;
use core::cell::RefCell;

use hashbrown::HashMap;

use crate::hint_processor::builtin_hint_processor::dict_manager::{DictManager, DICT_ACCESS_SIZE};
use crate::hint_processor::hint_processor_definition::HintReference;
use crate::hint_processor::hint_processor_utils::{
    get_address_from_var_name, get_integer_from_var_name, get_ptr_from_var_name, insert_value_from_var_name,
};
use crate::serde::deserialize_program::ApTracking;
use crate::types::exec_scope::ExecutionScopes;
use crate::types::relocatable::MaybeRelocatable;
use crate::vm::errors::hint_errors::HintError;
use crate::vm::vm_core::VirtualMachine;

const DICT_MANAGER_KEY: &str = "dict_manager";

fn get_or_create_dict_manager(exec_scopes: &mut ExecutionScopes) -> Rc<RefCell<DictManager>> {
    match exec_scopes.get_ref_counted::<DictManager>(DICT_MANAGER_KEY) {
        Ok(manager) => manager,
        Err(_) => {
            let manager = Rc::new(RefCell::new(DictManager::new()));
            exec_scopes.insert_value(DICT_MANAGER_KEY, Rc::clone(&manager));
            manager
        }
    }
}

/// `dict_new`: creates a simple dictionary tracker (with no initial entries;
/// a host that wants a non-empty `initial_dict` deposits it into the scope
/// under `initial_dict` before running the hint, mirroring the reference
/// implementation's closed-over Python local).
pub fn dict_new(vm: &mut VirtualMachine, exec_scopes: &mut ExecutionScopes) -> Result<(), HintError> {
    let manager = get_or_create_dict_manager(exec_scopes);
    let initial_dict = exec_scopes
        .get::<HashMap<MaybeRelocatable, MaybeRelocatable>>("initial_dict")
        .unwrap_or_default();
    let base = manager.borrow_mut().new_dict(vm, initial_dict)?;
    vm.insert_value_into_ap(base)?;
    Ok(())
}

/// `default_dict_new`: as [`dict_new`], with a default value read from
/// `ids.default_value`.
pub fn default_dict_new(
    vm: &mut VirtualMachine,
    exec_scopes: &mut ExecutionScopes,
    ids_data: &HashMap<String, HintReference>,
    ap_tracking: &ApTracking,
) -> Result<(), HintError> {
    let default_value = get_integer_from_var_name("default_value", vm, ids_data, ap_tracking)?;
    let manager = get_or_create_dict_manager(exec_scopes);
    let initial_dict = exec_scopes
        .get::<HashMap<MaybeRelocatable, MaybeRelocatable>>("initial_dict")
        .ok();
    let base = manager
        .borrow_mut()
        .new_default_dict(vm, MaybeRelocatable::Int(default_value), initial_dict)?;
    vm.insert_value_into_ap(base)?;
    Ok(())
}

/// `dict_read`: advances the tracker's `current_ptr` by `DictAccess::SIZE`
/// and writes `ids.value = tracker[ids.key]`.
pub fn dict_read(
    vm: &mut VirtualMachine,
    exec_scopes: &mut ExecutionScopes,
    ids_data: &HashMap<String, HintReference>,
    ap_tracking: &ApTracking,
) -> Result<(), HintError> {
    let key = MaybeRelocatable::Int(get_integer_from_var_name("key", vm, ids_data, ap_tracking)?);
    let dict_ptr = get_ptr_from_var_name("dict_ptr", vm, ids_data, ap_tracking)?;
    let manager = get_or_create_dict_manager(exec_scopes);
    let mut manager = manager.borrow_mut();
    let tracker = manager.get_tracker(dict_ptr)?;
    let value = tracker.get_value(&key)?;
    tracker.current_ptr = tracker.current_ptr.add_usize(DICT_ACCESS_SIZE)?;
    insert_value_from_var_name("value", value, vm, ids_data, ap_tracking)
}

/// `dict_write`: as [`dict_read`], but also records the previous value at
/// `ids.dict_ptr.prev_value` and overwrites the entry with `ids.new_value`.
pub fn dict_write(
    vm: &mut VirtualMachine,
    exec_scopes: &mut ExecutionScopes,
    ids_data: &HashMap<String, HintReference>,
    ap_tracking: &ApTracking,
) -> Result<(), HintError> {
    let key = MaybeRelocatable::Int(get_integer_from_var_name("key", vm, ids_data, ap_tracking)?);
    let new_value = MaybeRelocatable::Int(get_integer_from_var_name("new_value", vm, ids_data, ap_tracking)?);
    let dict_ptr = get_ptr_from_var_name("dict_ptr", vm, ids_data, ap_tracking)?;
    let manager = get_or_create_dict_manager(exec_scopes);
    let mut manager = manager.borrow_mut();
    let tracker = manager.get_tracker(dict_ptr)?;
    let prev_value = tracker.get_value(&key)?;
    tracker.insert_value(key, new_value);
    tracker.current_ptr = tracker.current_ptr.add_usize(DICT_ACCESS_SIZE)?;
    // prev_value lands at dict_ptr[1] (DictAccess::prev_value).
    let prev_value_addr = get_address_from_var_name("dict_ptr", ids_data, vm, ap_tracking)?.add_usize(1)?;
    vm.insert_value(prev_value_addr, prev_value)?;
    Ok(())
}

/// `dict_update`: squash-preparation hint; asserts the caller's
/// `ids.prev_value` matches the tracker's current value before overwriting.
pub fn dict_update(
    vm: &mut VirtualMachine,
    exec_scopes: &mut ExecutionScopes,
    ids_data: &HashMap<String, HintReference>,
    ap_tracking: &ApTracking,
) -> Result<(), HintError> {
    let key = MaybeRelocatable::Int(get_integer_from_var_name("key", vm, ids_data, ap_tracking)?);
    let prev_value = MaybeRelocatable::Int(get_integer_from_var_name("prev_value", vm, ids_data, ap_tracking)?);
    let new_value = MaybeRelocatable::Int(get_integer_from_var_name("new_value", vm, ids_data, ap_tracking)?);
    let dict_ptr = get_ptr_from_var_name("dict_ptr", vm, ids_data, ap_tracking)?;
    let manager = get_or_create_dict_manager(exec_scopes);
    let mut manager = manager.borrow_mut();
    let tracker = manager.get_tracker(dict_ptr)?;
    let current_value = tracker.get_value(&key)?;
    if current_value != prev_value {
        return Err(HintError::AssertionFailed(alloc::format!(
            "Wrong previous value in dict. Got {:?}, expected {:?}.",
            prev_value, current_value
        )));
    }
    tracker.insert_value(key, new_value);
    tracker.current_ptr = tracker.current_ptr.add_usize(DICT_ACCESS_SIZE)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::felt::Felt252;
    use crate::{add_segments, ids_data, run_context, vm_with_range_check};

    #[test]
    fn dict_new_then_write_then_read() {
        let mut vm = vm_with_range_check!();
        add_segments!(vm, 2);
        run_context!(vm, 0, 0, 0);
        let mut exec_scopes = ExecutionScopes::new();
        dict_new(&mut vm, &mut exec_scopes).unwrap();
        let base = vm.get_relocatable(crate::types::relocatable::Relocatable::new(1, 0)).unwrap();

        let ids_data = ids_data!["key", "new_value", "dict_ptr", "value"];
        run_context!(vm, 0, 3, 3);
        vm.insert_value(crate::types::relocatable::Relocatable::new(1, 0), Felt252::from(5)).unwrap();
        vm.insert_value(crate::types::relocatable::Relocatable::new(1, 1), Felt252::from(10)).unwrap();
        vm.insert_value(crate::types::relocatable::Relocatable::new(1, 2), base).unwrap();
        dict_write(&mut vm, &mut exec_scopes, &ids_data, &ApTracking::default()).unwrap();

        run_context!(vm, 0, 6, 6);
        vm.insert_value(crate::types::relocatable::Relocatable::new(1, 3), Felt252::from(5)).unwrap();
        vm.insert_value(crate::types::relocatable::Relocatable::new(1, 5), base.add_usize(DICT_ACCESS_SIZE).unwrap()).unwrap();
        dict_read(&mut vm, &mut exec_scopes, &ids_data, &ApTracking::default()).unwrap();
        assert_eq!(
            vm.get_integer(crate::types::relocatable::Relocatable::new(1, 4)).unwrap(),
            Felt252::from(10)
        );
    }

    #[test]
    fn dict_read_missing_key_errors() {
        let mut vm = vm_with_range_check!();
        add_segments!(vm, 2);
        run_context!(vm, 0, 0, 0);
        let mut exec_scopes = ExecutionScopes::new();
        dict_new(&mut vm, &mut exec_scopes).unwrap();
        let base = vm.get_relocatable(crate::types::relocatable::Relocatable::new(1, 0)).unwrap();

        let ids_data = ids_data!["key", "dict_ptr", "value"];
        run_context!(vm, 0, 3, 3);
        vm.insert_value(crate::types::relocatable::Relocatable::new(1, 0), Felt252::from(1)).unwrap();
        vm.insert_value(crate::types::relocatable::Relocatable::new(1, 1), base).unwrap();
        assert!(matches!(
            dict_read(&mut vm, &mut exec_scopes, &ids_data, &ApTracking::default()),
            Err(HintError::NoValueForKey(_))
        ));
    }
}
