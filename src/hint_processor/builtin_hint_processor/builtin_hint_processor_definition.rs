//! The hint catalog's dispatcher (§5 "Hint dispatcher"): matches a hint's
//! verbatim Python source against [`hint_code`]'s constants and calls the
//! matching handler. Carries no state of its own — every hint handler reads
//! and writes through `vm`/`exec_scopes` instead.

use alloc::string::ToString;

use hashbrown::HashMap;

use crate::hint_processor::builtin_hint_processor::bigint_utils::{
    bigint_pack_div_mod, bigint_safe_div, nondet_bigint3,
};
use crate::hint_processor::builtin_hint_processor::blake2s_utils::compute_blake2s_compress;
use crate::hint_processor::builtin_hint_processor::dict_hint_utils::{
    default_dict_new, dict_new, dict_read, dict_update, dict_write,
};
use crate::hint_processor::builtin_hint_processor::ec_utils::{
    chained_ec_op_random_ec_point, compute_doubling_slope, compute_slope, ec_double_assign_new_x,
    ec_double_assign_new_y, ec_negate, random_ec_point_hint, recover_y_hint,
};
use crate::hint_processor::builtin_hint_processor::hint_code;
use crate::hint_processor::builtin_hint_processor::keccak_utils::{
    block_permutation, cairo_keccak_finalize, keccak_write_args, unsafe_keccak, unsafe_keccak_finalize,
};
use crate::hint_processor::builtin_hint_processor::math_utils::{
    assert_le_felt, assert_le_felt_v08, is_250_bits, is_addr_bounded, is_nn, is_nn_out_of_range,
    is_quad_residue, signed_div_rem, split_int, split_xx, unsigned_div_rem,
};
use crate::hint_processor::builtin_hint_processor::memcpy_hint_utils::{memcpy_continue_copying, memcpy_enter_scope};
use crate::hint_processor::builtin_hint_processor::memset_utils::{memset_continue_loop, memset_enter_scope};
use crate::hint_processor::builtin_hint_processor::poseidon_utils::{
    elements_over_x, nondet_n_greater_than_10, nondet_n_greater_than_2,
};
use crate::hint_processor::builtin_hint_processor::set::set_add;
use crate::hint_processor::builtin_hint_processor::sha256_utils::{sha256_input, sha256_main};
use crate::hint_processor::builtin_hint_processor::squash_dict_utils::{
    squash_dict, squash_dict_inner_assert_len_keys, squash_dict_inner_check_access_index,
    squash_dict_inner_continue_loop, squash_dict_inner_first_iteration, squash_dict_inner_len_assert,
    squash_dict_inner_next_key, squash_dict_inner_skip_loop, squash_dict_inner_used_accesses_assert,
};
use crate::hint_processor::builtin_hint_processor::uint_utils::{
    add_no_uint384_check, sub_reduced_a_and_reduced_b, uint384_signed_nn, uint384_split_128, uint384_sqrt,
    uint384_unsigned_div_rem, uint768_by_uint384_unsigned_div_rem,
};
use crate::hint_processor::builtin_hint_processor::usort::{
    usort_body, usort_enter_scope, verify_multiplicity_assert, verify_multiplicity_body, verify_usort,
};
use crate::hint_processor::hint_processor_definition::{HintProcessor, HintProcessorData};
use crate::hint_processor::hint_processor_utils::get_constant_from_var_name;
use crate::types::felt::Felt252;
use crate::vm::errors::hint_errors::HintError;
use crate::vm::errors::vm_errors::VirtualMachineError;
use crate::vm::vm_core::VirtualMachine;

const CAIRO_KECCAK_MAX_BLOCK_SIZE: u64 = 10;

/// Dispatches the catalog of hints this crate implements (§4). Stateless:
/// one instance can be shared across every hint invocation in a run.
#[derive(Debug, Default, Clone, Copy)]
pub struct BuiltinHintProcessor;

impl BuiltinHintProcessor {
    pub fn new_empty() -> Self {
        BuiltinHintProcessor
    }
}

impl HintProcessor for BuiltinHintProcessor {
    fn execute_hint(
        &self,
        vm: &mut VirtualMachine,
        exec_scopes: &mut crate::types::exec_scope::ExecutionScopes,
        hint_data: &HintProcessorData,
        constants: &HashMap<alloc::string::String, Felt252>,
    ) -> Result<(), HintError> {
        let ids_data = &hint_data.ids_data;
        let ap_tracking = &hint_data.ap_tracking;

        match hint_data.code.as_str() {
            hint_code::IS_NN => is_nn(vm, ids_data, ap_tracking),
            hint_code::IS_NN_OUT_OF_RANGE => is_nn_out_of_range(vm, ids_data, ap_tracking),
            hint_code::ASSERT_LE_FELT => assert_le_felt(vm, ids_data, ap_tracking),
            hint_code::ASSERT_LE_FELT_V_0_8 => assert_le_felt_v08(vm, ids_data, ap_tracking),
            hint_code::SPLIT_INT => split_int(vm, ids_data, ap_tracking),
            hint_code::IS_ADDR_BOUNDED => {
                let addr_bound = *get_constant_from_var_name("ADDR_BOUND", constants)?;
                let prime = *get_constant_from_var_name("PRIME", constants)?;
                is_addr_bounded(vm, ids_data, ap_tracking, &addr_bound, &prime)
            }
            hint_code::IS_250_BITS => is_250_bits(vm, ids_data, ap_tracking),
            hint_code::SPLIT_XX => split_xx(vm, ids_data, ap_tracking),
            hint_code::IS_QUAD_RESIDUE => is_quad_residue(vm, ids_data, ap_tracking),
            hint_code::UNSIGNED_DIV_REM => unsigned_div_rem(vm, ids_data, ap_tracking),
            hint_code::SIGNED_DIV_REM => signed_div_rem(vm, ids_data, ap_tracking),

            hint_code::UINT384_UNSIGNED_DIV_REM => uint384_unsigned_div_rem(vm, ids_data, ap_tracking),
            hint_code::UINT768_UNSIGNED_DIV_REM => uint768_by_uint384_unsigned_div_rem(vm, ids_data, ap_tracking),
            hint_code::UINT384_SPLIT_128 => uint384_split_128(vm, ids_data, ap_tracking),
            hint_code::ADD_NO_UINT384_CHECK => {
                let shift = *get_constant_from_var_name("SHIFT", constants)?;
                add_no_uint384_check(vm, ids_data, ap_tracking, &shift)
            }
            hint_code::UINT384_SQRT => uint384_sqrt(vm, ids_data, ap_tracking),
            hint_code::UINT384_SIGNED_NN => uint384_signed_nn(vm, ids_data, ap_tracking),
            hint_code::SUB_REDUCED_A_AND_REDUCED_B => sub_reduced_a_and_reduced_b(vm, ids_data, ap_tracking),

            hint_code::BIGINT_PACK_DIV_MOD => bigint_pack_div_mod(vm, exec_scopes, ids_data, ap_tracking),
            hint_code::BIGINT_SAFE_DIV => bigint_safe_div(vm, exec_scopes, ids_data, ap_tracking),
            hint_code::NONDET_BIGINT3 => nondet_bigint3(vm, exec_scopes, ids_data, ap_tracking),

            hint_code::COMPUTE_SLOPE => compute_slope(vm, exec_scopes, ids_data, ap_tracking),
            hint_code::COMPUTE_DOUBLING_SLOPE => compute_doubling_slope(vm, exec_scopes, ids_data, ap_tracking),
            hint_code::RECOVER_Y => recover_y_hint(vm, ids_data, ap_tracking),
            hint_code::EC_DOUBLE_ASSIGN_NEW_X => ec_double_assign_new_x(vm, exec_scopes, ids_data, ap_tracking),
            hint_code::EC_DOUBLE_ASSIGN_NEW_Y => ec_double_assign_new_y(vm, exec_scopes, ids_data, ap_tracking),
            hint_code::EC_NEGATE => ec_negate(vm, exec_scopes, ids_data, ap_tracking),
            hint_code::RANDOM_EC_POINT => random_ec_point_hint(vm, ids_data, ap_tracking),
            hint_code::CHAINED_EC_OP_RANDOM_EC_POINT => chained_ec_op_random_ec_point(vm, ids_data, ap_tracking),

            hint_code::BLAKE2S_COMPRESS => compute_blake2s_compress(vm, ids_data, ap_tracking),

            hint_code::SHA256_INPUT => sha256_input(vm, ids_data, ap_tracking),
            hint_code::SHA256_MAIN => sha256_main(vm, ids_data, ap_tracking),

            hint_code::KECCAK_WRITE_ARGS => keccak_write_args(vm, ids_data, ap_tracking),
            hint_code::BLOCK_PERMUTATION => block_permutation(vm, ids_data, ap_tracking),
            hint_code::CAIRO_KECCAK_FINALIZE => {
                cairo_keccak_finalize(vm, ids_data, ap_tracking, CAIRO_KECCAK_MAX_BLOCK_SIZE)
            }
            hint_code::UNSAFE_KECCAK => unsafe_keccak(vm, exec_scopes, ids_data, ap_tracking),
            hint_code::UNSAFE_KECCAK_FINALIZE => unsafe_keccak_finalize(vm, ids_data, ap_tracking),

            hint_code::USORT_ENTER_SCOPE => usort_enter_scope(exec_scopes),
            hint_code::USORT_BODY => usort_body(vm, exec_scopes, ids_data, ap_tracking),
            hint_code::USORT_VERIFY => verify_usort(vm, exec_scopes, ids_data, ap_tracking),
            hint_code::USORT_VERIFY_MULTIPLICITY_BODY => verify_multiplicity_body(vm, exec_scopes, ids_data, ap_tracking),
            hint_code::USORT_VERIFY_MULTIPLICITY_ASSERT => verify_multiplicity_assert(exec_scopes),
            hint_code::SET_ADD => set_add(vm, ids_data, ap_tracking),

            hint_code::DICT_NEW => dict_new(vm, exec_scopes),
            hint_code::DEFAULT_DICT_NEW => default_dict_new(vm, exec_scopes, ids_data, ap_tracking),
            hint_code::DICT_READ => dict_read(vm, exec_scopes, ids_data, ap_tracking),
            hint_code::DICT_WRITE => dict_write(vm, exec_scopes, ids_data, ap_tracking),
            hint_code::DICT_UPDATE => dict_update(vm, exec_scopes, ids_data, ap_tracking),

            hint_code::SQUASH_DICT => squash_dict(vm, exec_scopes, ids_data, ap_tracking),
            hint_code::SQUASH_DICT_INNER_FIRST_ITERATION => {
                squash_dict_inner_first_iteration(vm, exec_scopes, ids_data, ap_tracking)
            }
            hint_code::SQUASH_DICT_INNER_SKIP_LOOP => squash_dict_inner_skip_loop(vm, exec_scopes, ids_data, ap_tracking),
            hint_code::SQUASH_DICT_INNER_CHECK_ACCESS_INDEX => {
                squash_dict_inner_check_access_index(vm, exec_scopes, ids_data, ap_tracking)
            }
            hint_code::SQUASH_DICT_INNER_CONTINUE_LOOP => {
                squash_dict_inner_continue_loop(vm, exec_scopes, ids_data, ap_tracking)
            }
            hint_code::SQUASH_DICT_INNER_LEN_ASSERT => squash_dict_inner_len_assert(exec_scopes),
            hint_code::SQUASH_DICT_INNER_USED_ACCESSES_ASSERT => {
                squash_dict_inner_used_accesses_assert(vm, exec_scopes, ids_data, ap_tracking)
            }
            hint_code::SQUASH_DICT_INNER_ASSERT_LEN_KEYS => squash_dict_inner_assert_len_keys(exec_scopes),
            hint_code::SQUASH_DICT_INNER_NEXT_KEY => squash_dict_inner_next_key(vm, exec_scopes, ids_data, ap_tracking),

            hint_code::MEMSET_ENTER_SCOPE => memset_enter_scope(vm, exec_scopes, ids_data, ap_tracking),
            hint_code::MEMSET_CONTINUE_LOOP => memset_continue_loop(vm, exec_scopes, ids_data, ap_tracking),
            hint_code::MEMCPY_ENTER_SCOPE => memcpy_enter_scope(vm, exec_scopes, ids_data, ap_tracking),
            hint_code::MEMCPY_CONTINUE_COPYING => memcpy_continue_copying(vm, exec_scopes, ids_data, ap_tracking),

            hint_code::NONDET_N_GREATER_THAN_10 => nondet_n_greater_than_10(vm, ids_data, ap_tracking),
            hint_code::NONDET_N_GREATER_THAN_2 => nondet_n_greater_than_2(vm, ids_data, ap_tracking),
            hint_code::ELEMENTS_OVER_X => elements_over_x(vm, ids_data, ap_tracking),

            code => Err(VirtualMachineError::UnknownHint(code.to_string()).into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::exec_scope::ExecutionScopes;
    use crate::types::relocatable::Relocatable;
    use crate::{add_segments, ids_data, run_context, vm_with_range_check};

    #[test]
    fn dispatches_is_nn() {
        let mut vm = vm_with_range_check!();
        add_segments!(vm, 1);
        run_context!(vm, 0, 1, 0);
        let ids_data = ids_data!["a"];
        vm.insert_value(Relocatable::new(1, 0), Felt252::from(5)).unwrap();

        run_hint!(vm, ids_data, hint_code::IS_NN).unwrap();
        assert_eq!(vm.get_integer(Relocatable::new(1, 1)).unwrap(), Felt252::from(0));
    }

    #[test]
    fn unknown_hint_code_errors() {
        let mut vm = vm_with_range_check!();
        add_segments!(vm, 1);
        run_context!(vm, 0, 0, 0);
        let ids_data = ids_data![];
        let err = run_hint!(vm, ids_data, "not a real hint").unwrap_err();
        assert!(matches!(err, HintError::VirtualMachine(VirtualMachineError::UnknownHint(_))));
    }

    #[test]
    fn dispatches_memset_loop_through_exec_scopes() {
        let mut vm = vm_with_range_check!();
        add_segments!(vm, 1);
        run_context!(vm, 0, 0, 1);
        let mut exec_scopes = ExecutionScopes::new();

        let enter_ids = ids_data!["n"];
        vm.insert_value(Relocatable::new(1, 0), Felt252::from(2)).unwrap();
        run_hint!(vm, enter_ids, hint_code::MEMSET_ENTER_SCOPE, &mut exec_scopes).unwrap();

        let loop_ids = ids_data!["continue_loop"];
        run_hint!(vm, loop_ids, hint_code::MEMSET_CONTINUE_LOOP, &mut exec_scopes).unwrap();
        assert_eq!(vm.get_integer(Relocatable::new(1, 0)).unwrap(), Felt252::from(1));
    }
}
