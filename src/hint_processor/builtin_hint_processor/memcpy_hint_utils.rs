//! `memcpy` loop scaffolding (§4.10): identical shape to `memset`'s, keyed
//! off `ids.len` instead of `ids.n`.

use alloc::string::ToString;

use hashbrown::HashMap;
use num_traits::ToPrimitive;

use crate::hint_processor::hint_processor_definition::HintReference;
use crate::hint_processor::hint_processor_utils::{get_integer_from_var_name, insert_value_from_var_name};
use crate::math_utils::felt_to_bigint;
use crate::serde::deserialize_program::ApTracking;
use crate::types::exec_scope::ExecutionScopes;
use crate::types::felt::Felt252;
use crate::vm::errors::hint_errors::HintError;
use crate::vm::vm_core::VirtualMachine;

/// `vm_enter_scope({'n': ids.len})`.
pub fn memcpy_enter_scope(
    vm: &mut VirtualMachine,
    exec_scopes: &mut ExecutionScopes,
    ids_data: &HashMap<String, HintReference>,
    ap_tracking: &ApTracking,
) -> Result<(), HintError> {
    let len = get_integer_from_var_name("len", vm, ids_data, ap_tracking)?;
    let len = felt_to_bigint(&len).to_i64().ok_or(HintError::BigIntToUnsignedFail)?;
    let mut frame = hashbrown::HashMap::new();
    frame.insert("n".to_string(), crate::any_box!(len));
    exec_scopes.enter_scope(frame);
    Ok(())
}

/// `n -= 1; ids.continue_copying = 1 if n > 0 else 0`.
pub fn memcpy_continue_copying(
    vm: &mut VirtualMachine,
    exec_scopes: &mut ExecutionScopes,
    ids_data: &HashMap<String, HintReference>,
    ap_tracking: &ApTracking,
) -> Result<(), HintError> {
    let n = exec_scopes.get_mut_ref::<i64>("n")?;
    *n -= 1;
    let continue_copying = if *n > 0 { Felt252::from(1) } else { Felt252::from(0) };
    insert_value_from_var_name("continue_copying", continue_copying, vm, ids_data, ap_tracking)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::relocatable::Relocatable;
    use crate::{add_segments, ids_data, run_context, vm_with_range_check};

    #[test]
    fn enter_scope_then_copy_until_done() {
        let mut vm = vm_with_range_check!();
        add_segments!(vm, 1);
        run_context!(vm, 0, 0, 1);
        let mut exec_scopes = ExecutionScopes::new();
        let ids_data = ids_data!["len"];
        vm.insert_value(Relocatable::new(1, 0), Felt252::from(1)).unwrap();
        memcpy_enter_scope(&mut vm, &mut exec_scopes, &ids_data, &ApTracking::default()).unwrap();

        let ids_data = ids_data!["continue_copying"];
        memcpy_continue_copying(&mut vm, &mut exec_scopes, &ids_data, &ApTracking::default()).unwrap();
        assert_eq!(vm.get_integer(Relocatable::new(1, 0)).unwrap(), Felt252::from(0));
    }
}
