//! `memset` loop scaffolding (§4.10): pushes a scope holding the remaining
//! iteration count and decrements it once per loop body execution.

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

/// `vm_enter_scope({'n': ids.n})`.
pub fn memset_enter_scope(
    vm: &mut VirtualMachine,
    exec_scopes: &mut ExecutionScopes,
    ids_data: &HashMap<String, HintReference>,
    ap_tracking: &ApTracking,
) -> Result<(), HintError> {
    let n = get_integer_from_var_name("n", vm, ids_data, ap_tracking)?;
    let n = felt_to_bigint(&n).to_i64().ok_or(HintError::BigIntToUnsignedFail)?;
    let mut frame = hashbrown::HashMap::new();
    frame.insert("n".to_string(), crate::any_box!(n));
    exec_scopes.enter_scope(frame);
    Ok(())
}

/// `n -= 1; ids.continue_loop = 1 if n > 0 else 0`.
pub fn memset_continue_loop(
    vm: &mut VirtualMachine,
    exec_scopes: &mut ExecutionScopes,
    ids_data: &HashMap<String, HintReference>,
    ap_tracking: &ApTracking,
) -> Result<(), HintError> {
    let n = exec_scopes.get_mut_ref::<i64>("n")?;
    *n -= 1;
    let continue_loop = if *n > 0 { Felt252::from(1) } else { Felt252::from(0) };
    insert_value_from_var_name("continue_loop", continue_loop, vm, ids_data, ap_tracking)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::relocatable::Relocatable;
    use crate::{add_segments, ids_data, run_context, vm_with_range_check};

    #[test]
    fn enter_scope_then_loop_until_done() {
        let mut vm = vm_with_range_check!();
        add_segments!(vm, 1);
        run_context!(vm, 0, 0, 1);
        let mut exec_scopes = ExecutionScopes::new();
        let ids_data = ids_data!["n"];
        vm.insert_value(Relocatable::new(1, 0), Felt252::from(2)).unwrap();
        memset_enter_scope(&mut vm, &mut exec_scopes, &ids_data, &ApTracking::default()).unwrap();

        let ids_data = ids_data!["continue_loop"];
        memset_continue_loop(&mut vm, &mut exec_scopes, &ids_data, &ApTracking::default()).unwrap();
        assert_eq!(vm.get_integer(Relocatable::new(1, 0)).unwrap(), Felt252::from(1));
        memset_continue_loop(&mut vm, &mut exec_scopes, &ids_data, &ApTracking::default()).unwrap();
        assert_eq!(vm.get_integer(Relocatable::new(1, 0)).unwrap(), Felt252::from(0));
    }

    #[test]
    fn continue_loop_without_scope_errors() {
        let mut vm = vm_with_range_check!();
        add_segments!(vm, 1);
        run_context!(vm, 0, 0, 1);
        let mut exec_scopes = ExecutionScopes::new();
        let ids_data = ids_data!["continue_loop"];
        let err = memset_continue_loop(&mut vm, &mut exec_scopes, &ids_data, &ApTracking::default()).unwrap_err();
        assert!(matches!(err, HintError::VariableNotInScope(_)));
    }
}
