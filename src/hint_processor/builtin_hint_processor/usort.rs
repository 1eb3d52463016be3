//! Unstable-sort-with-multiplicity hints (§4.9): `usort_body` sorts and
//! dedupes an input array while recording how many times each value
//! occurred and where, then `verify_usort`/`verify_multiplicity_*` let the
//! generated Cairo code walk that record back out one occurrence at a time.

use alloc::string::ToString;
use alloc::vec::Vec;

use hashbrown::HashMap;
use num_traits::ToPrimitive;

use crate::hint_processor::hint_processor_definition::HintReference;
use crate::hint_processor::hint_processor_utils::{
    get_integer_from_var_name, get_ptr_from_var_name, insert_value_from_var_name,
};
use crate::math_utils::felt_to_bigint;
use crate::serde::deserialize_program::ApTracking;
use crate::types::exec_scope::ExecutionScopes;
use crate::types::felt::Felt252;
use crate::vm::errors::hint_errors::HintError;
use crate::vm::vm_core::VirtualMachine;

/// Opens a fresh scope, carrying `usort_max_size` forward if it was set in
/// the enclosing one (mirrors the Python hint's use of `globals()`).
pub fn usort_enter_scope(exec_scopes: &mut ExecutionScopes) -> Result<(), HintError> {
    let carried = exec_scopes.get::<Felt252>("usort_max_size").ok();
    let mut frame = HashMap::new();
    if let Some(max_size) = carried {
        frame.insert("usort_max_size".to_string(), crate::any_box!(max_size));
    }
    exec_scopes.enter_scope(frame);
    Ok(())
}

pub fn usort_body(
    vm: &mut VirtualMachine,
    exec_scopes: &mut ExecutionScopes,
    ids_data: &HashMap<String, HintReference>,
    ap_tracking: &ApTracking,
) -> Result<(), HintError> {
    let input_ptr = get_ptr_from_var_name("input", vm, ids_data, ap_tracking)?;
    let input_len = get_integer_from_var_name("input_len", vm, ids_data, ap_tracking)?;
    let input_len_u64 = felt_to_bigint(&input_len)
        .to_u64()
        .ok_or(HintError::BigIntToUnsignedFail)?;

    if let Ok(max_size) = exec_scopes.get::<Felt252>("usort_max_size") {
        if input_len > max_size {
            return Err(HintError::UsortOutOfRange(alloc::boxed::Box::new(input_len)));
        }
    }

    let mut positions_dict: HashMap<Felt252, Vec<u64>> = HashMap::new();
    let mut output: Vec<Felt252> = Vec::new();
    for i in 0..input_len_u64 {
        let value = vm.get_integer(input_ptr.add_usize(i as usize)?)?;
        if let Err(insert_at) = output.binary_search(&value) {
            output.insert(insert_at, value);
        }
        positions_dict.entry(value).or_default().push(i);
    }

    let multiplicities: Vec<usize> = output.iter().map(|v| positions_dict[v].len()).collect();
    let output_len = output.len();

    let output_base = vm.add_memory_segment();
    let multiplicities_base = vm.add_memory_segment();
    for (i, value) in output.into_iter().enumerate() {
        vm.insert_value(output_base.add_usize(i)?, value)?;
    }
    for (i, count) in multiplicities.into_iter().enumerate() {
        vm.insert_value(multiplicities_base.add_usize(i)?, Felt252::from(count as u64))?;
    }

    exec_scopes.insert_value("positions_dict", positions_dict);
    insert_value_from_var_name("output_len", Felt252::from(output_len as u64), vm, ids_data, ap_tracking)?;
    insert_value_from_var_name("output", output_base, vm, ids_data, ap_tracking)?;
    insert_value_from_var_name("multiplicities", multiplicities_base, vm, ids_data, ap_tracking)
}

pub fn verify_usort(
    vm: &mut VirtualMachine,
    exec_scopes: &mut ExecutionScopes,
    ids_data: &HashMap<String, HintReference>,
    ap_tracking: &ApTracking,
) -> Result<(), HintError> {
    let value = get_integer_from_var_name("value", vm, ids_data, ap_tracking)?;
    let mut positions = exec_scopes
        .get_mut_ref::<HashMap<Felt252, Vec<u64>>>("positions_dict")?
        .remove(&value)
        .ok_or_else(|| HintError::UnexpectedPositionsDictFail(alloc::boxed::Box::new(value)))?;
    positions.reverse();
    exec_scopes.insert_value("positions", positions);
    exec_scopes.insert_value("last_pos", 0u64);
    Ok(())
}

pub fn verify_multiplicity_assert(exec_scopes: &mut ExecutionScopes) -> Result<(), HintError> {
    let positions_len = exec_scopes.get_ref::<Vec<u64>>("positions")?.len();
    if positions_len == 0 {
        Ok(())
    } else {
        Err(HintError::PositionsLengthNotZero)
    }
}

pub fn verify_multiplicity_body(
    vm: &mut VirtualMachine,
    exec_scopes: &mut ExecutionScopes,
    ids_data: &HashMap<String, HintReference>,
    ap_tracking: &ApTracking,
) -> Result<(), HintError> {
    let current_pos = exec_scopes
        .get_mut_ref::<Vec<u64>>("positions")?
        .pop()
        .ok_or(HintError::CouldntPopPositions)?;
    let last_pos = exec_scopes.get::<u64>("last_pos")?;
    let pos_diff = Felt252::from(current_pos - last_pos);
    insert_value_from_var_name("next_item_index", pos_diff, vm, ids_data, ap_tracking)?;
    exec_scopes.insert_value("last_pos", current_pos + 1);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;
    use crate::types::relocatable::Relocatable;
    use crate::{add_segments, ids_data, run_context, vm_with_range_check};

    #[test]
    fn scenario_7_usort_body_sorts_dedupes_and_counts() {
        let mut vm = vm_with_range_check!();
        add_segments!(vm, 2);
        run_context!(vm, 0, 0, 0);
        let ids_data = ids_data!["input", "input_len", "output", "output_len", "multiplicities"];
        let values = [3u64, 1, 0, 3, 1, 2];
        vm.insert_value(Relocatable::new(1, 0), Relocatable::new(1, 10)).unwrap();
        vm.insert_value(Relocatable::new(1, 1), Felt252::from(6)).unwrap();
        for (i, v) in values.iter().enumerate() {
            vm.insert_value(Relocatable::new(1, 10 + i), Felt252::from(*v)).unwrap();
        }

        let mut exec_scopes = ExecutionScopes::new();
        usort_body(&mut vm, &mut exec_scopes, &ids_data, &ApTracking::default()).unwrap();

        let output_len = vm.get_integer(Relocatable::new(1, 3)).unwrap();
        assert_eq!(output_len, Felt252::from(4));
        let output_ptr = vm.get_relocatable(Relocatable::new(1, 2)).unwrap();
        let sorted: Vec<Felt252> = (0..4).map(|i| vm.get_integer(output_ptr.add_usize(i).unwrap()).unwrap()).collect();
        assert_eq!(sorted, vec![Felt252::from(0), Felt252::from(1), Felt252::from(2), Felt252::from(3)]);

        let mult_ptr = vm.get_relocatable(Relocatable::new(1, 4)).unwrap();
        let mults: Vec<Felt252> = (0..4).map(|i| vm.get_integer(mult_ptr.add_usize(i).unwrap()).unwrap()).collect();
        assert_eq!(mults, vec![Felt252::from(1), Felt252::from(2), Felt252::from(1), Felt252::from(2)]);

        let positions_dict = exec_scopes.get_ref::<HashMap<Felt252, Vec<u64>>>("positions_dict").unwrap();
        assert_eq!(positions_dict[&Felt252::from(0)], vec![2]);
        assert_eq!(positions_dict[&Felt252::from(1)], vec![1, 4]);
        assert_eq!(positions_dict[&Felt252::from(2)], vec![5]);
        assert_eq!(positions_dict[&Felt252::from(3)], vec![0, 3]);
    }

    #[test]
    fn usort_out_of_range_errors() {
        let mut vm = vm_with_range_check!();
        add_segments!(vm, 2);
        run_context!(vm, 0, 0, 0);
        let ids_data = ids_data!["input", "input_len"];
        vm.insert_value(Relocatable::new(1, 0), Relocatable::new(1, 10)).unwrap();
        vm.insert_value(Relocatable::new(1, 1), Felt252::from(5)).unwrap();

        let mut exec_scopes = ExecutionScopes::new();
        exec_scopes.insert_value("usort_max_size", Felt252::from(1));
        let err = usort_body(&mut vm, &mut exec_scopes, &ids_data, &ApTracking::default()).unwrap_err();
        assert!(matches!(err, HintError::UsortOutOfRange(_)));
    }
}
