//! Keccak hints (§4.8): the legacy byte-oriented `unsafe_keccak` family hashes
//! a memory-resident byte string with Keccak-256, while `block_permutation`
//! runs the full Keccak-f[1600] permutation on 25 packed 64-bit lanes for the
//! `cairo_keccak` builtin-less implementation.

use alloc::boxed::Box;
use alloc::vec::Vec;

use hashbrown::HashMap;
use num_bigint::BigInt;
use num_integer::Integer;
use num_traits::ToPrimitive;
use sha3::{Digest, Keccak256};

use crate::hint_processor::hint_processor_definition::HintReference;
use crate::hint_processor::hint_processor_utils::{
    get_integer_from_var_name, get_ptr_from_var_name, get_relocatable_from_var_name,
};
use crate::math_utils::{bigint_to_felt, felt_to_bigint};
use crate::serde::deserialize_program::ApTracking;
use crate::types::exec_scope::ExecutionScopes;
use crate::types::felt::Felt252;
use crate::types::relocatable::Relocatable;
use crate::vm::errors::hint_errors::HintError;
use crate::vm::vm_core::VirtualMachine;

fn left_pad(bytes: &[u8], total_len: usize) -> Vec<u8> {
    let mut out = alloc::vec![0u8; total_len - bytes.len()];
    out.extend_from_slice(bytes);
    out
}

/// `unsafe_keccak`: hashes `ids.length` bytes read 16 at a time from
/// `ids.data` and writes the 256-bit digest back as `(high, low)` halves.
pub fn unsafe_keccak(
    vm: &mut VirtualMachine,
    exec_scopes: &mut ExecutionScopes,
    ids_data: &HashMap<String, HintReference>,
    ap_tracking: &ApTracking,
) -> Result<(), HintError> {
    let length = get_integer_from_var_name("length", vm, ids_data, ap_tracking)?;

    if let Ok(max_size) = exec_scopes.get::<Felt252>("__keccak_max_size") {
        if length > max_size {
            return Err(HintError::KeccakMaxSize(Box::new(length), Box::new(max_size)));
        }
    }

    let data = get_ptr_from_var_name("data", vm, ids_data, ap_tracking)?;
    let high_addr = get_relocatable_from_var_name("high", vm, ids_data, ap_tracking)?;
    let low_addr = get_relocatable_from_var_name("low", vm, ids_data, ap_tracking)?;

    let byte_len = felt_to_bigint(&length)
        .to_u64()
        .ok_or_else(|| HintError::InvalidKeccakInputLength(Box::new(length)))?;

    let mut keccak_input = Vec::new();
    for (word_i, byte_i) in (0..byte_len).step_by(16).enumerate() {
        let word_addr = data.add_usize(word_i)?;
        let word = vm.get_integer(word_addr)?;
        let n_bytes = core::cmp::min(16, byte_len - byte_i) as usize;

        let bytes = word.to_bytes_be();
        let significant: Vec<u8> = bytes.iter().skip_while(|b| **b == 0).copied().collect();
        if significant.len() > n_bytes {
            return Err(HintError::InvalidWordSize(Box::new(word)));
        }
        keccak_input.extend(left_pad(&significant, n_bytes));
    }

    let hashed = Keccak256::digest(&keccak_input);
    let high = Felt252::from_bytes_be_slice(&hashed[..16]);
    let low = Felt252::from_bytes_be_slice(&hashed[16..32]);
    vm.insert_value(high_addr, high)?;
    vm.insert_value(low_addr, low)?;
    Ok(())
}

/// `unsafe_keccak_finalize`: hashes the contiguous felt range
/// `[keccak_state.start_ptr, keccak_state.end_ptr)`, each felt packed as 16
/// big-endian bytes, and writes `(high, low)` the same way as `unsafe_keccak`.
pub fn unsafe_keccak_finalize(
    vm: &mut VirtualMachine,
    ids_data: &HashMap<String, HintReference>,
    ap_tracking: &ApTracking,
) -> Result<(), HintError> {
    let keccak_state_ptr = get_relocatable_from_var_name("keccak_state", vm, ids_data, ap_tracking)?;
    let start_ptr = get_ptr_from_var_name("keccak_state", vm, ids_data, ap_tracking)?;
    let end_ptr = vm.get_relocatable(Relocatable::new(
        keccak_state_ptr.segment_index,
        keccak_state_ptr.offset + 1,
    ))?;

    let n_elems = end_ptr.sub_rel(&start_ptr)?;
    let range = vm.get_felt_range(start_ptr, n_elems)?;

    let mut keccak_input = Vec::new();
    for word in range {
        let bytes = word.to_bytes_be();
        keccak_input.extend_from_slice(&bytes[16..]);
    }

    let hashed = Keccak256::digest(&keccak_input);
    let high_addr = get_relocatable_from_var_name("high", vm, ids_data, ap_tracking)?;
    let low_addr = get_relocatable_from_var_name("low", vm, ids_data, ap_tracking)?;
    let high = Felt252::from_bytes_be_slice(&hashed[..16]);
    let low = Felt252::from_bytes_be_slice(&hashed[16..32]);
    vm.insert_value(high_addr, high)?;
    vm.insert_value(low_addr, low)?;
    Ok(())
}

fn felt_to_u64(value: &Felt252) -> Result<u64, HintError> {
    felt_to_bigint(value)
        .to_u64()
        .ok_or_else(|| HintError::InvalidWordSize(Box::new(*value)))
}

/// Splits a 128-bit value into its two little-endian 64-bit half-words.
fn split_u128_into_u64_words(value: &Felt252) -> [Felt252; 2] {
    let base = BigInt::from(1u64) << 64;
    let (high, low) = felt_to_bigint(value).div_mod_floor(&base);
    [bigint_to_felt(&low), bigint_to_felt(&high)]
}

/// `keccak_write_args`: packs `ids.low` and `ids.high` (each a 128-bit felt)
/// into four little-endian 64-bit words and writes them to `ids.inputs`.
pub fn keccak_write_args(
    vm: &mut VirtualMachine,
    ids_data: &HashMap<String, HintReference>,
    ap_tracking: &ApTracking,
) -> Result<(), HintError> {
    let low = get_integer_from_var_name("low", vm, ids_data, ap_tracking)?;
    let high = get_integer_from_var_name("high", vm, ids_data, ap_tracking)?;

    let low_words = split_u128_into_u64_words(&low);
    let high_words = split_u128_into_u64_words(&high);

    let inputs_ptr = get_ptr_from_var_name("inputs", vm, ids_data, ap_tracking)?;
    for (i, word) in low_words.into_iter().chain(high_words).enumerate() {
        vm.insert_value(inputs_ptr.add_usize(i)?, word)?;
    }
    Ok(())
}

/// Runs Keccak-f[1600] (24 rounds) on 25 packed 64-bit lanes.
pub fn keccak_f1600(mut state: [u64; 25]) -> [u64; 25] {
    keccak::f1600(&mut state);
    state
}

/// `block_permutation`: reads 25 little-endian 64-bit-valued felts at
/// `ids.keccak_ptr - 25`, runs the Keccak-f[1600] permutation, and writes the
/// 25 output lanes back at `ids.keccak_ptr`.
pub fn block_permutation(
    vm: &mut VirtualMachine,
    ids_data: &HashMap<String, HintReference>,
    ap_tracking: &ApTracking,
) -> Result<(), HintError> {
    let keccak_ptr = get_ptr_from_var_name("keccak_ptr", vm, ids_data, ap_tracking)?;
    let input_ptr = keccak_ptr.sub_usize(25)?;
    let input_felts = vm.get_felt_range(input_ptr, 25)?;

    let mut state = [0u64; 25];
    for (i, slot) in state.iter_mut().enumerate() {
        *slot = felt_to_u64(&input_felts[i])?;
    }
    let output = keccak_f1600(state);

    for (i, lane) in output.into_iter().enumerate() {
        vm.insert_value(keccak_ptr.add_usize(i)?, Felt252::from(lane))?;
    }
    Ok(())
}

/// `cairo_keccak_finalize`: pads the `cairo_keccak` builtin-less
/// implementation's unfinished last block. Precomputes
/// `inp = 0**25 ‖ keccak_f(0**25)`, replicates it `ids.n_blocks` times, and
/// writes the resulting `50 * n_blocks` lanes (25 zero lanes followed by the
/// 25 permuted lanes, per block) starting at `ids.keccak_ptr_end`.
///
/// `block_size` is bounds-checked against `max_block_size` (10 for the v1
/// hint, 1000 for v2 — the two hint code strings share this body and differ
/// only in the bound passed by the dispatcher) and `keccak_state_size_felts`
/// against 100, matching the two invariants the generated Cairo code itself
/// asserts before ever reaching this hint.
pub fn cairo_keccak_finalize(
    vm: &mut VirtualMachine,
    ids_data: &HashMap<String, HintReference>,
    ap_tracking: &ApTracking,
    max_block_size: u64,
) -> Result<(), HintError> {
    let state_size = get_integer_from_var_name("KECCAK_STATE_SIZE_FELTS", vm, ids_data, ap_tracking)?;
    let state_size_val = felt_to_u64(&state_size)?;
    if state_size_val >= 100 {
        return Err(HintError::InvalidKeccakStateSize(Box::new(state_size)));
    }

    let block_size = get_integer_from_var_name("BLOCK_SIZE", vm, ids_data, ap_tracking)?;
    let block_size_val = felt_to_u64(&block_size)?;
    if block_size_val >= max_block_size {
        return Err(HintError::InvalidBlockSize(Box::new(block_size)));
    }

    let permuted = keccak_f1600([0u64; 25]);
    let keccak_ptr_end = get_ptr_from_var_name("keccak_ptr_end", vm, ids_data, ap_tracking)?;
    for block in 0..block_size_val as usize {
        let base = block * 50;
        for i in 0..25 {
            vm.insert_value(keccak_ptr_end.add_usize(base + i)?, Felt252::from(0u64))?;
        }
        for (i, lane) in permuted.into_iter().enumerate() {
            vm.insert_value(keccak_ptr_end.add_usize(base + 25 + i)?, Felt252::from(lane))?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{add_segments, ids_data, run_context, vm_with_range_check};

    #[test]
    fn unsafe_keccak_hashes_short_input() {
        let mut vm = vm_with_range_check!();
        add_segments!(vm, 2);
        run_context!(vm, 0, 0, 0);
        let mut exec_scopes = ExecutionScopes::new();
        let ids_data = ids_data!["length", "data", "high", "low"];
        vm.insert_value(Relocatable::new(1, 0), Felt252::from(3)).unwrap();
        vm.insert_value(Relocatable::new(1, 1), Relocatable::new(1, 10)).unwrap();
        vm.insert_value(Relocatable::new(1, 10), Felt252::from(0x616263u32)).unwrap();

        unsafe_keccak(&mut vm, &mut exec_scopes, &ids_data, &ApTracking::default()).unwrap();

        let expected = Keccak256::digest(b"abc");
        let high = vm.get_integer(Relocatable::new(1, 2)).unwrap();
        let low = vm.get_integer(Relocatable::new(1, 3)).unwrap();
        assert_eq!(high, Felt252::from_bytes_be_slice(&expected[..16]));
        assert_eq!(low, Felt252::from_bytes_be_slice(&expected[16..32]));
    }

    #[test]
    fn unsafe_keccak_respects_max_size_scope_bound() {
        let mut vm = vm_with_range_check!();
        add_segments!(vm, 2);
        run_context!(vm, 0, 0, 0);
        let mut exec_scopes = ExecutionScopes::new();
        exec_scopes.insert_value("__keccak_max_size", Felt252::from(2));
        let ids_data = ids_data!["length", "data", "high", "low"];
        vm.insert_value(Relocatable::new(1, 0), Felt252::from(3)).unwrap();
        vm.insert_value(Relocatable::new(1, 1), Relocatable::new(1, 10)).unwrap();

        let err = unsafe_keccak(&mut vm, &mut exec_scopes, &ids_data, &ApTracking::default()).unwrap_err();
        assert!(matches!(err, HintError::KeccakMaxSize(_, _)));
    }

    #[test]
    fn block_permutation_on_all_zero_state_matches_keccak_f1600() {
        let mut vm = vm_with_range_check!();
        add_segments!(vm, 2);
        run_context!(vm, 0, 0, 0);
        let ids_data = ids_data!["keccak_ptr"];
        vm.insert_value(Relocatable::new(1, 0), Relocatable::new(1, 25)).unwrap();
        for i in 0..25 {
            vm.insert_value(Relocatable::new(1, i), Felt252::from(0)).unwrap();
        }

        block_permutation(&mut vm, &ids_data, &ApTracking::default()).unwrap();

        let expected = keccak_f1600([0u64; 25]);
        for i in 0..25 {
            let value = vm.get_integer(Relocatable::new(1, 25 + i)).unwrap();
            assert_eq!(value, Felt252::from(expected[i]));
        }
    }

    #[test]
    fn cairo_keccak_finalize_writes_padding_blocks() {
        let mut vm = vm_with_range_check!();
        add_segments!(vm, 2);
        run_context!(vm, 0, 0, 0);
        let ids_data = ids_data!["KECCAK_STATE_SIZE_FELTS", "BLOCK_SIZE", "keccak_ptr_end"];
        vm.insert_value(Relocatable::new(1, 0), Felt252::from(25)).unwrap();
        vm.insert_value(Relocatable::new(1, 1), Felt252::from(2)).unwrap();
        vm.insert_value(Relocatable::new(1, 2), Relocatable::new(1, 10)).unwrap();

        cairo_keccak_finalize(&mut vm, &ids_data, &ApTracking::default(), 10).unwrap();

        let permuted = keccak_f1600([0u64; 25]);
        for block in 0..2 {
            let base = 10 + block * 50;
            for i in 0..25 {
                let value = vm.get_integer(Relocatable::new(1, base + i)).unwrap();
                assert_eq!(value, Felt252::from(0u64));
            }
            for i in 0..25 {
                let value = vm.get_integer(Relocatable::new(1, base + 25 + i)).unwrap();
                assert_eq!(value, Felt252::from(permuted[i]));
            }
        }
    }

    #[test]
    fn cairo_keccak_finalize_rejects_oversized_block() {
        let mut vm = vm_with_range_check!();
        add_segments!(vm, 2);
        run_context!(vm, 0, 0, 0);
        let ids_data = ids_data!["KECCAK_STATE_SIZE_FELTS", "BLOCK_SIZE", "keccak_ptr_end"];
        vm.insert_value(Relocatable::new(1, 0), Felt252::from(25)).unwrap();
        vm.insert_value(Relocatable::new(1, 1), Felt252::from(10)).unwrap();
        vm.insert_value(Relocatable::new(1, 2), Relocatable::new(1, 10)).unwrap();

        let err = cairo_keccak_finalize(&mut vm, &ids_data, &ApTracking::default(), 10).unwrap_err();
        assert!(matches!(err, HintError::InvalidBlockSize(_)));
    }
}
