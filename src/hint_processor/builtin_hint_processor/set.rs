//! `set_add` (§4.9): linear membership scan over a packed array of
//! fixed-size elements, used by the generated code for `assert_in_set`-style
//! checks where no sorted structure is available.

use alloc::boxed::Box;

use hashbrown::HashMap;
use num_traits::{ToPrimitive, Zero};

use crate::hint_processor::hint_processor_definition::HintReference;
use crate::hint_processor::hint_processor_utils::{
    get_integer_from_var_name, get_ptr_from_var_name, insert_value_from_var_name,
};
use crate::serde::deserialize_program::ApTracking;
use crate::types::felt::Felt252;
use crate::types::relocatable::MaybeRelocatable;
use crate::vm::errors::hint_errors::HintError;
use crate::vm::vm_core::VirtualMachine;

pub fn set_add(
    vm: &mut VirtualMachine,
    ids_data: &HashMap<String, HintReference>,
    ap_tracking: &ApTracking,
) -> Result<(), HintError> {
    let set_ptr = get_ptr_from_var_name("set_ptr", vm, ids_data, ap_tracking)?;
    let elm_size_felt = get_integer_from_var_name("elm_size", vm, ids_data, ap_tracking)?;
    let elm_size = elm_size_felt.to_usize().ok_or(HintError::BigIntToUnsignedFail)?;
    if elm_size.is_zero() {
        return Err(HintError::AssertionFailed(alloc::format!(
            "Set element size must be non-zero, got {elm_size_felt}"
        )));
    }
    let elm_ptr = get_ptr_from_var_name("elm_ptr", vm, ids_data, ap_tracking)?;
    let set_end_ptr = get_ptr_from_var_name("set_end_ptr", vm, ids_data, ap_tracking)?;

    if set_ptr.segment_index == set_end_ptr.segment_index && set_ptr.offset > set_end_ptr.offset {
        return Err(HintError::InvalidSetRange(
            Box::new(MaybeRelocatable::from(set_ptr)),
            Box::new(MaybeRelocatable::from(set_end_ptr)),
        ));
    }

    let elm = vm.get_continuous_range(elm_ptr, elm_size)?;
    let range_limit = set_end_ptr.sub_rel(&set_ptr)?;

    for i in (0..range_limit).step_by(elm_size) {
        let candidate = vm.get_continuous_range(set_ptr.add_usize(i)?, elm_size)?;
        if candidate == elm {
            insert_value_from_var_name("index", Felt252::from((i / elm_size) as u64), vm, ids_data, ap_tracking)?;
            return insert_value_from_var_name("is_elm_in_set", Felt252::from(1), vm, ids_data, ap_tracking);
        }
    }
    insert_value_from_var_name("is_elm_in_set", Felt252::from(0), vm, ids_data, ap_tracking)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::relocatable::Relocatable;
    use crate::{add_segments, ids_data, run_context, vm_with_range_check};

    fn setup(elm_a: u64, elm_b: u64) -> (VirtualMachine, HashMap<String, HintReference>) {
        let mut vm = vm_with_range_check!();
        add_segments!(vm, 3);
        run_context!(vm, 0, 0, 6);
        let ids_data = ids_data!["is_elm_in_set", "index", "set_ptr", "elm_size", "elm_ptr", "set_end_ptr"];
        vm.insert_value(Relocatable::new(1, 2), Relocatable::new(2, 0)).unwrap();
        vm.insert_value(Relocatable::new(1, 3), Felt252::from(2)).unwrap();
        vm.insert_value(Relocatable::new(1, 4), Relocatable::new(3, 0)).unwrap();
        vm.insert_value(Relocatable::new(1, 5), Relocatable::new(2, 4)).unwrap();
        for (i, v) in [1u64, 3, 5, 7].iter().enumerate() {
            vm.insert_value(Relocatable::new(2, i), Felt252::from(*v)).unwrap();
        }
        vm.insert_value(Relocatable::new(3, 0), Felt252::from(elm_a)).unwrap();
        vm.insert_value(Relocatable::new(3, 1), Felt252::from(elm_b)).unwrap();
        (vm, ids_data)
    }

    #[test]
    fn new_element_not_found() {
        let (mut vm, ids_data) = setup(2, 4);
        set_add(&mut vm, &ids_data, &ApTracking::default()).unwrap();
        assert_eq!(vm.get_integer(Relocatable::new(1, 0)).unwrap(), Felt252::from(0));
    }

    #[test]
    fn existing_element_found_at_index() {
        let (mut vm, ids_data) = setup(1, 3);
        set_add(&mut vm, &ids_data, &ApTracking::default()).unwrap();
        assert_eq!(vm.get_integer(Relocatable::new(1, 0)).unwrap(), Felt252::from(1));
        assert_eq!(vm.get_integer(Relocatable::new(1, 1)).unwrap(), Felt252::from(0));
    }

    #[test]
    fn elm_size_zero_errors() {
        let (mut vm, ids_data) = setup(1, 3);
        vm.insert_value(Relocatable::new(1, 3), Felt252::from(0)).unwrap();
        let err = set_add(&mut vm, &ids_data, &ApTracking::default()).unwrap_err();
        assert!(matches!(err, HintError::AssertionFailed(_)));
    }

    #[test]
    fn set_ptr_after_end_ptr_errors() {
        let (mut vm, ids_data) = setup(1, 3);
        vm.insert_value(Relocatable::new(1, 2), Relocatable::new(2, 4)).unwrap();
        vm.insert_value(Relocatable::new(1, 5), Relocatable::new(2, 0)).unwrap();
        let err = set_add(&mut vm, &ids_data, &ApTracking::default()).unwrap_err();
        assert!(matches!(err, HintError::InvalidSetRange(_, _)));
    }
}
