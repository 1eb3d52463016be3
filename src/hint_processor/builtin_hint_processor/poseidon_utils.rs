//! Small non-deterministic comparison hints (§4.10) that only ever feed an
//! AP-relative boolean back into the generated loop-bound code.

use hashbrown::HashMap;

use crate::hint_processor::hint_processor_definition::HintReference;
use crate::hint_processor::hint_processor_utils::{
    get_integer_from_var_name, get_ptr_from_var_name, insert_value_into_ap,
};
use crate::serde::deserialize_program::ApTracking;
use crate::types::felt::Felt252;
use crate::vm::errors::hint_errors::HintError;
use crate::vm::vm_core::VirtualMachine;

/// `memory[ap] = to_felt_or_relocatable(ids.n >= 10)`.
pub fn nondet_n_greater_than_10(
    vm: &mut VirtualMachine,
    ids_data: &HashMap<String, HintReference>,
    ap_tracking: &ApTracking,
) -> Result<(), HintError> {
    let n = get_integer_from_var_name("n", vm, ids_data, ap_tracking)?;
    let value = if n >= Felt252::from(10) { Felt252::from(1) } else { Felt252::from(0) };
    insert_value_into_ap(vm, value)
}

/// `memory[ap] = to_felt_or_relocatable(ids.n >= 2)`.
pub fn nondet_n_greater_than_2(
    vm: &mut VirtualMachine,
    ids_data: &HashMap<String, HintReference>,
    ap_tracking: &ApTracking,
) -> Result<(), HintError> {
    let n = get_integer_from_var_name("n", vm, ids_data, ap_tracking)?;
    let value = if n >= Felt252::from(2) { Felt252::from(1) } else { Felt252::from(0) };
    insert_value_into_ap(vm, value)
}

/// `memory[ap] = to_felt_or_relocatable(ids.elements_end - ids.elements >= ids.x)`.
pub fn elements_over_x(
    vm: &mut VirtualMachine,
    ids_data: &HashMap<String, HintReference>,
    ap_tracking: &ApTracking,
) -> Result<(), HintError> {
    let elements = get_ptr_from_var_name("elements", vm, ids_data, ap_tracking)?;
    let elements_end = get_ptr_from_var_name("elements_end", vm, ids_data, ap_tracking)?;
    let x = get_integer_from_var_name("x", vm, ids_data, ap_tracking)?;
    let remaining = elements_end.sub_rel(&elements)?;
    let value = if Felt252::from(remaining as u64) >= x { Felt252::from(1) } else { Felt252::from(0) };
    insert_value_into_ap(vm, value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::relocatable::Relocatable;
    use crate::{add_segments, ids_data, run_context, vm_with_range_check};

    #[test]
    fn n_greater_than_10_true() {
        let mut vm = vm_with_range_check!();
        add_segments!(vm, 1);
        run_context!(vm, 3, 0, 1);
        let ids_data = ids_data!["n"];
        vm.insert_value(Relocatable::new(1, 0), Felt252::from(21)).unwrap();
        nondet_n_greater_than_10(&mut vm, &ids_data, &ApTracking::default()).unwrap();
        assert_eq!(vm.get_integer(Relocatable::new(1, 3)).unwrap(), Felt252::from(1));
    }

    #[test]
    fn n_greater_than_10_false() {
        let mut vm = vm_with_range_check!();
        add_segments!(vm, 1);
        run_context!(vm, 3, 0, 1);
        let ids_data = ids_data!["n"];
        vm.insert_value(Relocatable::new(1, 0), Felt252::from(9)).unwrap();
        nondet_n_greater_than_10(&mut vm, &ids_data, &ApTracking::default()).unwrap();
        assert_eq!(vm.get_integer(Relocatable::new(1, 3)).unwrap(), Felt252::from(0));
    }

    #[test]
    fn n_greater_than_2_true() {
        let mut vm = vm_with_range_check!();
        add_segments!(vm, 1);
        run_context!(vm, 3, 0, 1);
        let ids_data = ids_data!["n"];
        vm.insert_value(Relocatable::new(1, 0), Felt252::from(6)).unwrap();
        nondet_n_greater_than_2(&mut vm, &ids_data, &ApTracking::default()).unwrap();
        assert_eq!(vm.get_integer(Relocatable::new(1, 3)).unwrap(), Felt252::from(1));
    }

    #[test]
    fn elements_over_x_boundary() {
        let mut vm = vm_with_range_check!();
        add_segments!(vm, 2);
        run_context!(vm, 5, 0, 1);
        let ids_data = ids_data!["elements", "elements_end", "x"];
        vm.insert_value(Relocatable::new(1, 0), Relocatable::new(1, 20)).unwrap();
        vm.insert_value(Relocatable::new(1, 1), Relocatable::new(1, 24)).unwrap();
        vm.insert_value(Relocatable::new(1, 2), Felt252::from(4)).unwrap();
        elements_over_x(&mut vm, &ids_data, &ApTracking::default()).unwrap();
        assert_eq!(vm.get_integer(Relocatable::new(1, 5)).unwrap(), Felt252::from(1));
    }
}
