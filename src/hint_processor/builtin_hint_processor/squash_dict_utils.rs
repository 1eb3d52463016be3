//! Dictionary squashing (§4.3a): replays a dictionary's access log in
//! ascending key, ascending access-index order so the generated Cairo code
//! can fold repeated writes to the same key into a single final value. The
//! bookkeeping (`access_indices`, `keys`, `key`, `current_access_indices`,
//! `current_access_index`) lives entirely in the current [`ExecutionScopes`]
//! frame, the same way [`super::usort`] carries `positions_dict` across its
//! own multi-hint replay loop.

use alloc::format;
use alloc::string::ToString;
use alloc::vec::Vec;

use hashbrown::HashMap;
use num_traits::ToPrimitive;

use crate::hint_processor::builtin_hint_processor::dict_manager::DICT_ACCESS_SIZE;
use crate::hint_processor::hint_processor_definition::HintReference;
use crate::hint_processor::hint_processor_utils::{
    get_address_from_var_name, get_integer_from_var_name, get_ptr_from_var_name, insert_value_from_var_name,
};
use crate::math_utils::felt_to_bigint;
use crate::serde::deserialize_program::ApTracking;
use crate::types::exec_scope::ExecutionScopes;
use crate::types::felt::Felt252;
use crate::vm::errors::hint_errors::HintError;
use crate::vm::vm_core::VirtualMachine;

fn felt_to_usize(value: &Felt252, what: &str) -> Result<usize, HintError> {
    felt_to_bigint(value)
        .to_usize()
        .ok_or_else(|| HintError::AssertionFailed(format!("{what} does not fit in a usize")))
}

/// `squash_dict`: scans `n_accesses` consecutive `DictAccess` entries
/// starting at `dict_accesses`, groups their indices by key, and deposits a
/// descending `keys` stack plus a key→indices `access_indices` map into the
/// scope. Writes `big_keys` (1 if the largest key is ≥ the range-check
/// bound) and `first_key` (the smallest key, the first one the inner loop
/// processes, since `keys` is popped from its tail like the Python list it
/// mirrors).
pub fn squash_dict(
    vm: &mut VirtualMachine,
    exec_scopes: &mut ExecutionScopes,
    ids_data: &HashMap<String, HintReference>,
    ap_tracking: &ApTracking,
) -> Result<(), HintError> {
    let address = get_ptr_from_var_name("dict_accesses", vm, ids_data, ap_tracking)?;
    let ptr_diff = get_integer_from_var_name("ptr_diff", vm, ids_data, ap_tracking)?;
    let ptr_diff = felt_to_usize(&ptr_diff, "ptr_diff")?;
    if ptr_diff % DICT_ACCESS_SIZE != 0 {
        return Err(HintError::AssertionFailed(
            "Accesses array size must be divisible by DictAccess.SIZE".to_string(),
        ));
    }
    let n_accesses = get_integer_from_var_name("n_accesses", vm, ids_data, ap_tracking)?;
    let n_accesses = felt_to_usize(&n_accesses, "n_accesses")?;

    if let Ok(max_size) = exec_scopes.get::<Felt252>("__squash_dict_max_size") {
        if Felt252::from(n_accesses as u64) > max_size {
            return Err(HintError::AssertionFailed(format!(
                "squash_dict() can only be used with n_accesses<={max_size}. Got: n_accesses={n_accesses}."
            )));
        }
    }

    let mut access_indices: HashMap<Felt252, Vec<usize>> = HashMap::new();
    for i in 0..n_accesses {
        let key = vm.get_integer(address.add_usize(DICT_ACCESS_SIZE * i)?)?;
        access_indices.entry(key).or_default().push(i);
    }

    let mut keys: Vec<Felt252> = access_indices.keys().cloned().collect();
    keys.sort_by(|a, b| b.cmp(a));

    let range_check_bound = vm.range_check_bound()?;
    let big_keys = match (keys.first(), range_check_bound) {
        (Some(largest), Some(bound)) if *largest >= bound => Felt252::from(1),
        _ => Felt252::from(0),
    };
    insert_value_from_var_name("big_keys", big_keys, vm, ids_data, ap_tracking)?;

    let first_key = keys
        .pop()
        .ok_or_else(|| HintError::AssertionFailed("squash_dict: no keys to process".to_string()))?;
    insert_value_from_var_name("first_key", first_key, vm, ids_data, ap_tracking)?;

    exec_scopes.insert_value("access_indices", access_indices);
    exec_scopes.insert_value("keys", keys);
    exec_scopes.insert_value("key", first_key);
    Ok(())
}

/// `squash_dict_inner_first_iteration`: pops the first (smallest) access
/// index for the current key and writes it to `range_check_ptr`.
pub fn squash_dict_inner_first_iteration(
    vm: &mut VirtualMachine,
    exec_scopes: &mut ExecutionScopes,
    ids_data: &HashMap<String, HintReference>,
    ap_tracking: &ApTracking,
) -> Result<(), HintError> {
    let key = exec_scopes.get::<Felt252>("key")?;
    let mut current_access_indices = exec_scopes
        .get::<HashMap<Felt252, Vec<usize>>>("access_indices")?
        .get(&key)
        .cloned()
        .unwrap_or_default();
    current_access_indices.sort_by(|a, b| b.cmp(a));
    let current_access_index = current_access_indices
        .pop()
        .ok_or_else(|| HintError::AssertionFailed("squash_dict: key has no accesses".to_string()))?;
    let range_check_ptr = get_ptr_from_var_name("range_check_ptr", vm, ids_data, ap_tracking)?;
    vm.insert_value(range_check_ptr, Felt252::from(current_access_index as u64))?;

    exec_scopes.insert_value("current_access_indices", current_access_indices);
    exec_scopes.insert_value("current_access_index", current_access_index);
    Ok(())
}

/// `squash_dict_inner_skip_loop`: `should_skip_loop = 1` iff the current
/// key's remaining access-index list is empty.
pub fn squash_dict_inner_skip_loop(
    vm: &mut VirtualMachine,
    exec_scopes: &mut ExecutionScopes,
    ids_data: &HashMap<String, HintReference>,
    ap_tracking: &ApTracking,
) -> Result<(), HintError> {
    let should_skip_loop = if exec_scopes.get_mut_ref::<Vec<usize>>("current_access_indices")?.is_empty() {
        1
    } else {
        0
    };
    insert_value_from_var_name("should_skip_loop", Felt252::from(should_skip_loop), vm, ids_data, ap_tracking)
}

/// `squash_dict_inner_check_access_index`: pops the next access index,
/// writes `loop_temps.index_delta_minus1 = new_index - current_index - 1`.
pub fn squash_dict_inner_check_access_index(
    vm: &mut VirtualMachine,
    exec_scopes: &mut ExecutionScopes,
    ids_data: &HashMap<String, HintReference>,
    ap_tracking: &ApTracking,
) -> Result<(), HintError> {
    let current_access_index = exec_scopes.get::<usize>("current_access_index")?;
    let new_access_index = exec_scopes
        .get_mut_ref::<Vec<usize>>("current_access_indices")?
        .pop()
        .ok_or_else(|| HintError::AssertionFailed("squash_dict: no more access indices".to_string()))?;
    let index_delta_minus1 = new_access_index
        .checked_sub(current_access_index)
        .and_then(|d| d.checked_sub(1))
        .ok_or_else(|| {
            HintError::AssertionFailed("squash_dict: access indices must be strictly increasing".to_string())
        })?;

    let loop_temps_addr = get_address_from_var_name("loop_temps", ids_data, vm, ap_tracking)?;
    vm.insert_value(loop_temps_addr, Felt252::from(index_delta_minus1 as u64))?;

    exec_scopes.insert_value("current_access_index", new_access_index);
    Ok(())
}

/// `squash_dict_inner_continue_loop`: `loop_temps.should_continue = 1` iff
/// access indices remain for the current key.
pub fn squash_dict_inner_continue_loop(
    vm: &mut VirtualMachine,
    exec_scopes: &mut ExecutionScopes,
    ids_data: &HashMap<String, HintReference>,
    ap_tracking: &ApTracking,
) -> Result<(), HintError> {
    let should_continue = if exec_scopes.get_mut_ref::<Vec<usize>>("current_access_indices")?.is_empty() {
        0
    } else {
        1
    };
    let loop_temps_addr = get_address_from_var_name("loop_temps", ids_data, vm, ap_tracking)?;
    // `should_continue` is the struct's second member (index_delta_minus1, should_continue).
    vm.insert_value(loop_temps_addr.add_usize(1)?, Felt252::from(should_continue))?;
    Ok(())
}

/// `squash_dict_inner_len_assert`: the current key's access-index list must
/// be fully drained before moving to the next key.
pub fn squash_dict_inner_len_assert(exec_scopes: &mut ExecutionScopes) -> Result<(), HintError> {
    if exec_scopes.get_mut_ref::<Vec<usize>>("current_access_indices")?.is_empty() {
        Ok(())
    } else {
        Err(HintError::AssertionFailed("current_access_indices is not empty".to_string()))
    }
}

/// `squash_dict_inner_used_accesses_assert`: `n_used_accesses` must equal
/// the number of accesses originally recorded for `key`.
pub fn squash_dict_inner_used_accesses_assert(
    vm: &mut VirtualMachine,
    exec_scopes: &mut ExecutionScopes,
    ids_data: &HashMap<String, HintReference>,
    ap_tracking: &ApTracking,
) -> Result<(), HintError> {
    let key = exec_scopes.get::<Felt252>("key")?;
    let n_used_accesses = get_integer_from_var_name("n_used_accesses", vm, ids_data, ap_tracking)?;
    let access_indices = exec_scopes.get::<HashMap<Felt252, Vec<usize>>>("access_indices")?;
    let expected = access_indices.get(&key).map(Vec::len).unwrap_or(0);
    if n_used_accesses != Felt252::from(expected as u64) {
        return Err(HintError::AssertionFailed(format!(
            "Wrong number of used accesses. Got {n_used_accesses}, expected {expected}."
        )));
    }
    Ok(())
}

/// `squash_dict_inner_assert_len_keys`: every key must have been popped off
/// the `keys` stack by the time squashing finishes.
pub fn squash_dict_inner_assert_len_keys(exec_scopes: &mut ExecutionScopes) -> Result<(), HintError> {
    if exec_scopes.get_mut_ref::<Vec<Felt252>>("keys")?.is_empty() {
        Ok(())
    } else {
        Err(HintError::AssertionFailed("keys is not empty".to_string()))
    }
}

/// `squash_dict_inner_next_key`: pops the next (ascending) key and writes it
/// to `ids.next_key`.
pub fn squash_dict_inner_next_key(
    vm: &mut VirtualMachine,
    exec_scopes: &mut ExecutionScopes,
    ids_data: &HashMap<String, HintReference>,
    ap_tracking: &ApTracking,
) -> Result<(), HintError> {
    let next_key = exec_scopes
        .get_mut_ref::<Vec<Felt252>>("keys")?
        .pop()
        .ok_or_else(|| HintError::AssertionFailed("No keys left but remaining accesses > 0".to_string()))?;
    insert_value_from_var_name("next_key", next_key, vm, ids_data, ap_tracking)?;
    exec_scopes.insert_value("key", next_key);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::relocatable::Relocatable;
    use crate::{add_segments, ids_data, run_context, vm_with_range_check};

    fn write_dict_accesses(vm: &mut VirtualMachine, base: Relocatable, entries: &[(u64, u64, u64)]) {
        for (i, (key, prev, new)) in entries.iter().enumerate() {
            let addr = base.add_usize(i * DICT_ACCESS_SIZE).unwrap();
            vm.insert_value(addr, Felt252::from(*key)).unwrap();
            vm.insert_value(addr.add_usize(1).unwrap(), Felt252::from(*prev)).unwrap();
            vm.insert_value(addr.add_usize(2).unwrap(), Felt252::from(*new)).unwrap();
        }
    }

    #[test]
    fn squash_dict_groups_by_key_ascending() {
        let mut vm = vm_with_range_check!();
        add_segments!(vm, 2);
        let accesses_base = vm.add_memory_segment();
        write_dict_accesses(&mut vm, accesses_base, &[(5, 0, 1), (2, 0, 1), (5, 1, 2), (2, 1, 2)]);

        run_context!(vm, 0, 0, 0);
        let ids_data = ids_data!["dict_accesses", "ptr_diff", "n_accesses", "big_keys", "first_key"];
        vm.insert_value(Relocatable::new(1, 0), accesses_base).unwrap();
        vm.insert_value(Relocatable::new(1, 1), Felt252::from((4 * DICT_ACCESS_SIZE) as u64)).unwrap();
        vm.insert_value(Relocatable::new(1, 2), Felt252::from(4)).unwrap();

        let mut exec_scopes = ExecutionScopes::new();
        squash_dict(&mut vm, &mut exec_scopes, &ids_data, &ApTracking::default()).unwrap();

        assert_eq!(vm.get_integer(Relocatable::new(1, 4)).unwrap(), Felt252::from(2));
        let keys = exec_scopes.get::<Vec<Felt252>>("keys").unwrap();
        assert_eq!(keys, alloc::vec![Felt252::from(5)]);
        assert_eq!(exec_scopes.get::<Felt252>("key").unwrap(), Felt252::from(2));
    }

    #[test]
    fn inner_loop_replays_indices_in_order() {
        let mut vm = vm_with_range_check!();
        add_segments!(vm, 2);
        let accesses_base = vm.add_memory_segment();
        write_dict_accesses(&mut vm, accesses_base, &[(7, 0, 1), (7, 1, 2), (7, 2, 3)]);

        run_context!(vm, 0, 0, 0);
        let ids_data = ids_data!["dict_accesses", "ptr_diff", "n_accesses", "big_keys", "first_key"];
        vm.insert_value(Relocatable::new(1, 0), accesses_base).unwrap();
        vm.insert_value(Relocatable::new(1, 1), Felt252::from((3 * DICT_ACCESS_SIZE) as u64)).unwrap();
        vm.insert_value(Relocatable::new(1, 2), Felt252::from(3)).unwrap();
        let mut exec_scopes = ExecutionScopes::new();
        squash_dict(&mut vm, &mut exec_scopes, &ids_data, &ApTracking::default()).unwrap();

        let range_check_ptr = vm.add_memory_segment();
        run_context!(vm, 0, 0, 0);
        let first_iter_ids = ids_data!["range_check_ptr"];
        vm.insert_value(Relocatable::new(1, 0), range_check_ptr).unwrap();
        squash_dict_inner_first_iteration(&mut vm, &mut exec_scopes, &first_iter_ids, &ApTracking::default()).unwrap();
        assert_eq!(vm.get_integer(range_check_ptr).unwrap(), Felt252::from(0));

        run_context!(vm, 0, 0, 1);
        let skip_ids = ids_data!["should_skip_loop"];
        squash_dict_inner_skip_loop(&mut vm, &mut exec_scopes, &skip_ids, &ApTracking::default()).unwrap();
        assert_eq!(vm.get_integer(Relocatable::new(1, 1)).unwrap(), Felt252::from(0));

        squash_dict_inner_len_assert(&mut exec_scopes).unwrap_err();

        let loop_temps_ptr = vm.add_memory_segment();
        run_context!(vm, 0, 0, 2);
        let check_ids = ids_data!["loop_temps"];
        vm.insert_value(Relocatable::new(1, 2), loop_temps_ptr).unwrap();
        squash_dict_inner_check_access_index(&mut vm, &mut exec_scopes, &check_ids, &ApTracking::default()).unwrap();
        assert_eq!(vm.get_integer(loop_temps_ptr).unwrap(), Felt252::from(0));

        squash_dict_inner_continue_loop(&mut vm, &mut exec_scopes, &check_ids, &ApTracking::default()).unwrap();
        assert_eq!(vm.get_integer(loop_temps_ptr.add_usize(1).unwrap()).unwrap(), Felt252::from(1));
    }
}
