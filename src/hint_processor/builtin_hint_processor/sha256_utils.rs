//! SHA-256 Cairo-side scaffolding (§4.8): `sha256_input` flags whether the
//! next input felt is a full 4-byte word, `sha256_main` packs a 16-word
//! chunk into a 64-byte block and runs one SHA-256 compression round.

use alloc::vec::Vec;

use generic_array::GenericArray;
use hashbrown::HashMap;
use sha2::compress256;

use crate::hint_processor::hint_processor_definition::HintReference;
use crate::hint_processor::hint_processor_utils::{
    get_integer_from_var_name, get_ptr_from_var_name, get_relocatable_from_var_name,
    insert_value_from_var_name,
};
use crate::serde::deserialize_program::ApTracking;
use crate::types::felt::Felt252;
use crate::types::relocatable::MaybeRelocatable;
use crate::vm::errors::hint_errors::HintError;
use crate::vm::vm_core::VirtualMachine;

fn felt_to_u32(value: &Felt252) -> Result<u32, HintError> {
    let bytes = value.to_bytes_be();
    if bytes[..28].iter().any(|b| *b != 0) {
        return Err(HintError::AssertionFailed(alloc::format!(
            "sha256 word {value} does not fit in 32 bits"
        )));
    }
    let last4: [u8; 4] = bytes[28..32].try_into().expect("4 bytes");
    Ok(u32::from_be_bytes(last4))
}

fn felt_to_usize_lt_100(value: &Felt252, what: &str) -> Result<usize, HintError> {
    use num_traits::ToPrimitive;
    let n = crate::math_utils::felt_to_bigint(value)
        .to_usize()
        .ok_or(HintError::BigIntToUnsignedFail)?;
    if n >= 100 {
        return Err(HintError::AssertionFailed(alloc::format!("{what} must be < 100, got {n}")));
    }
    Ok(n)
}

/// `sha256_input`: `ids.full_word = int(ids.n_bytes >= 4)`.
pub fn sha256_input(
    vm: &mut VirtualMachine,
    ids_data: &HashMap<String, HintReference>,
    ap_tracking: &ApTracking,
) -> Result<(), HintError> {
    let n_bytes = get_integer_from_var_name("n_bytes", vm, ids_data, ap_tracking)?;
    let full_word = if n_bytes >= Felt252::from(4u32) { 1u8 } else { 0u8 };
    insert_value_from_var_name("full_word", Felt252::from(full_word), vm, ids_data, ap_tracking)
}

/// `sha256_main`: reads a `chunk_size`-felt message block and an
/// `state_size`-felt chaining state, runs one SHA-256 compression round,
/// and writes the new state back to `ids.output`.
pub fn sha256_main(
    vm: &mut VirtualMachine,
    ids_data: &HashMap<String, HintReference>,
    ap_tracking: &ApTracking,
) -> Result<(), HintError> {
    let chunk_size_felt = get_integer_from_var_name("SHA256_INPUT_CHUNK_SIZE_FELTS", vm, ids_data, ap_tracking)?;
    let chunk_size = felt_to_usize_lt_100(&chunk_size_felt, "SHA256_INPUT_CHUNK_SIZE_FELTS")?;
    let state_size_felt = get_integer_from_var_name("SHA256_STATE_SIZE_FELTS", vm, ids_data, ap_tracking)?;
    let state_size = felt_to_usize_lt_100(&state_size_felt, "SHA256_STATE_SIZE_FELTS")?;

    let sha256_start = get_ptr_from_var_name("sha256_start", vm, ids_data, ap_tracking)?;
    let state_ptr = get_ptr_from_var_name("state", vm, ids_data, ap_tracking)?;

    let message_felts = vm.get_felt_range(sha256_start, chunk_size)?;
    let state_felts = vm.get_felt_range(state_ptr, state_size)?;

    let mut block = [0u8; 64];
    for (i, felt) in message_felts.iter().enumerate().take(16) {
        block[i * 4..i * 4 + 4].copy_from_slice(&felt_to_u32(felt)?.to_be_bytes());
    }

    let mut state = [0u32; 8];
    for (i, slot) in state.iter_mut().enumerate().take(state_size.min(8)) {
        *slot = felt_to_u32(&state_felts[i])?;
    }

    compress256(&mut state, &[*GenericArray::from_slice(&block)]);

    let output_addr = get_relocatable_from_var_name("output", vm, ids_data, ap_tracking)?;
    let values: Vec<MaybeRelocatable> = state.into_iter().map(|w| MaybeRelocatable::Int(Felt252::from(w))).collect();
    for (i, value) in values.into_iter().enumerate() {
        vm.insert_value(output_addr.add_usize(i)?, value)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{add_segments, ids_data, run_context, vm_with_range_check};
    use crate::types::relocatable::Relocatable;

    #[test]
    fn sha256_input_full_word_true() {
        let mut vm = vm_with_range_check!();
        add_segments!(vm, 1);
        run_context!(vm, 0, 0, 0);
        let ids_data = ids_data!["n_bytes", "full_word"];
        vm.insert_value(Relocatable::new(1, 0), Felt252::from(4)).unwrap();
        sha256_input(&mut vm, &ids_data, &ApTracking::default()).unwrap();
        assert_eq!(vm.get_integer(Relocatable::new(1, 1)).unwrap(), Felt252::from(1));
    }

    #[test]
    fn sha256_input_full_word_false() {
        let mut vm = vm_with_range_check!();
        add_segments!(vm, 1);
        run_context!(vm, 0, 0, 0);
        let ids_data = ids_data!["n_bytes", "full_word"];
        vm.insert_value(Relocatable::new(1, 0), Felt252::from(2)).unwrap();
        sha256_input(&mut vm, &ids_data, &ApTracking::default()).unwrap();
        assert_eq!(vm.get_integer(Relocatable::new(1, 1)).unwrap(), Felt252::from(0));
    }

    fn run_compress(vm: &mut VirtualMachine, ids_data: &HashMap<String, HintReference>) -> [Felt252; 8] {
        vm.insert_value(Relocatable::new(1, 0), Felt252::from(16)).unwrap();
        vm.insert_value(Relocatable::new(1, 1), Felt252::from(8)).unwrap();
        vm.insert_value(Relocatable::new(1, 2), Relocatable::new(1, 20)).unwrap();
        vm.insert_value(Relocatable::new(1, 3), Relocatable::new(1, 40)).unwrap();
        vm.insert_value(Relocatable::new(1, 4), Relocatable::new(1, 60)).unwrap();
        for i in 0..16 {
            vm.insert_value(Relocatable::new(1, 20 + i), Felt252::from(0)).unwrap();
        }
        let iv = [
            0x6a09e667u32, 0xbb67ae85, 0x3c6ef372, 0xa54ff53a, 0x510e527f, 0x9b05688c, 0x1f83d9ab, 0x5be0cd19,
        ];
        for (i, word) in iv.iter().enumerate() {
            vm.insert_value(Relocatable::new(1, 40 + i), Felt252::from(*word)).unwrap();
        }
        sha256_main(vm, ids_data, &ApTracking::default()).unwrap();
        let mut out = [Felt252::from(0); 8];
        for (i, slot) in out.iter_mut().enumerate() {
            *slot = vm.get_integer(Relocatable::new(1, 60 + i)).unwrap();
        }
        out
    }

    #[test]
    fn sha256_main_is_deterministic_and_changes_the_iv() {
        let ids_data = ids_data!["SHA256_INPUT_CHUNK_SIZE_FELTS", "SHA256_STATE_SIZE_FELTS", "sha256_start", "state", "output"];

        let mut vm_a = vm_with_range_check!();
        add_segments!(vm_a, 2);
        run_context!(vm_a, 0, 0, 0);
        let out_a = run_compress(&mut vm_a, &ids_data);

        let mut vm_b = vm_with_range_check!();
        add_segments!(vm_b, 2);
        run_context!(vm_b, 0, 0, 0);
        let out_b = run_compress(&mut vm_b, &ids_data);

        assert_eq!(out_a, out_b);
        let iv = [
            0x6a09e667u32, 0xbb67ae85, 0x3c6ef372, 0xa54ff53a, 0x510e527f, 0x9b05688c, 0x1f83d9ab, 0x5be0cd19,
        ];
        assert_ne!(out_a, iv.map(Felt252::from));
    }
}
