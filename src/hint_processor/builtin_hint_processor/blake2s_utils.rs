//! Blake2s compression (§4.8): the hint reads a 28-felt window (8-word
//! state, 16-word message, `t0, t1, f0, f1`) out of memory, runs the
//! reference Blake2 compression function, and writes the 8-word result back.

use alloc::vec::Vec;

use hashbrown::HashMap;

use crate::hint_processor::hint_processor_definition::HintReference;
use crate::hint_processor::hint_processor_utils::{get_ptr_from_var_name, get_relocatable_from_var_name};
use crate::serde::deserialize_program::ApTracking;
use crate::types::felt::Felt252;
use crate::types::relocatable::MaybeRelocatable;
use crate::vm::errors::hint_errors::HintError;
use crate::vm::vm_core::VirtualMachine;

const IV: [u32; 8] = [
    0x6a09e667, 0xbb67ae85, 0x3c6ef372, 0xa54ff53a, 0x510e527f, 0x9b05688c, 0x1f83d9ab, 0x5be0cd19,
];

const SIGMA: [[usize; 16]; 10] = [
    [0, 1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12, 13, 14, 15],
    [14, 10, 4, 8, 9, 15, 13, 6, 1, 12, 0, 2, 11, 7, 5, 3],
    [11, 8, 12, 0, 5, 2, 15, 13, 10, 14, 3, 6, 7, 1, 9, 4],
    [7, 9, 3, 1, 13, 12, 11, 14, 2, 6, 5, 10, 4, 0, 15, 8],
    [9, 0, 5, 7, 2, 4, 10, 15, 14, 1, 11, 12, 6, 8, 3, 13],
    [2, 12, 6, 10, 0, 11, 8, 3, 4, 13, 7, 5, 15, 14, 1, 9],
    [12, 5, 1, 15, 14, 13, 4, 10, 0, 7, 6, 3, 9, 2, 8, 11],
    [13, 11, 7, 14, 12, 1, 3, 9, 5, 0, 15, 4, 8, 6, 2, 10],
    [6, 15, 14, 9, 11, 3, 0, 8, 12, 2, 13, 7, 1, 4, 10, 5],
    [10, 2, 8, 4, 7, 6, 1, 5, 15, 11, 9, 14, 3, 12, 13, 0],
];

fn g(v: &mut [u32; 16], a: usize, b: usize, c: usize, d: usize, x: u32, y: u32) {
    v[a] = v[a].wrapping_add(v[b]).wrapping_add(x);
    v[d] = (v[d] ^ v[a]).rotate_right(16);
    v[c] = v[c].wrapping_add(v[d]);
    v[b] = (v[b] ^ v[c]).rotate_right(12);
    v[a] = v[a].wrapping_add(v[b]).wrapping_add(y);
    v[d] = (v[d] ^ v[a]).rotate_right(8);
    v[c] = v[c].wrapping_add(v[d]);
    v[b] = (v[b] ^ v[c]).rotate_right(7);
}

/// Runs the 10-round Blake2 compression mixing function and returns the new
/// 8-word chaining value (`h_i ^ state_i ^ state_{i+8}`), §4.8.
pub fn blake2s_compress(h: &[u32; 8], message: &[u32; 16], t0: u32, t1: u32, f0: u32, f1: u32) -> [u32; 8] {
    let mut v: [u32; 16] = [
        h[0], h[1], h[2], h[3], h[4], h[5], h[6], h[7],
        IV[0], IV[1], IV[2], IV[3], IV[4] ^ t0, IV[5] ^ t1, IV[6] ^ f0, IV[7] ^ f1,
    ];

    for round in 0..10 {
        let s = &SIGMA[round];
        g(&mut v, 0, 4, 8, 12, message[s[0]], message[s[1]]);
        g(&mut v, 1, 5, 9, 13, message[s[2]], message[s[3]]);
        g(&mut v, 2, 6, 10, 14, message[s[4]], message[s[5]]);
        g(&mut v, 3, 7, 11, 15, message[s[6]], message[s[7]]);
        g(&mut v, 0, 5, 10, 15, message[s[8]], message[s[9]]);
        g(&mut v, 1, 6, 11, 12, message[s[10]], message[s[11]]);
        g(&mut v, 2, 7, 8, 13, message[s[12]], message[s[13]]);
        g(&mut v, 3, 4, 9, 14, message[s[14]], message[s[15]]);
    }

    let mut out = [0u32; 8];
    for i in 0..8 {
        out[i] = h[i] ^ v[i] ^ v[i + 8];
    }
    out
}

fn felt_to_u32(value: &Felt252) -> Result<u32, HintError> {
    let bytes = value.to_bytes_be();
    let last4: [u8; 4] = bytes[28..32].try_into().expect("4 bytes");
    if bytes[..28].iter().any(|b| *b != 0) {
        return Err(HintError::AssertionFailed(alloc::format!(
            "blake2s word {value} does not fit in 32 bits"
        )));
    }
    Ok(u32::from_be_bytes(last4))
}

/// `blake2s_compress` hint: reads the 28-felt window at `ids.blake2s_ptr`
/// (8 state words, 16 message words, `t0, t1, f0, f1`) and writes the 8
/// output words to `ids.output`.
pub fn compute_blake2s_compress(
    vm: &mut VirtualMachine,
    ids_data: &HashMap<String, HintReference>,
    ap_tracking: &ApTracking,
) -> Result<(), HintError> {
    let blake2s_ptr = get_ptr_from_var_name("blake2s_ptr", vm, ids_data, ap_tracking)?;
    let input = vm.get_felt_range(blake2s_ptr, 28)?;

    let mut h = [0u32; 8];
    for (i, slot) in h.iter_mut().enumerate() {
        *slot = felt_to_u32(&input[i])?;
    }
    let mut message = [0u32; 16];
    for (i, slot) in message.iter_mut().enumerate() {
        *slot = felt_to_u32(&input[8 + i])?;
    }
    let t0 = felt_to_u32(&input[24])?;
    let t1 = felt_to_u32(&input[25])?;
    let f0 = felt_to_u32(&input[26])?;
    let f1 = felt_to_u32(&input[27])?;

    let output = blake2s_compress(&h, &message, t0, t1, f0, f1);
    let output_addr = get_relocatable_from_var_name("output", vm, ids_data, ap_tracking)?;
    let values: Vec<MaybeRelocatable> = output
        .into_iter()
        .map(|w| MaybeRelocatable::Int(Felt252::from(w)))
        .collect();
    for (i, value) in values.into_iter().enumerate() {
        vm.insert_value(output_addr.add_usize(i)?, value)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scenario_4_blake2s_compress() {
        let h = [
            1795745351, 3144134277, 1013904242, 2773480762, 1359893119, 2600822924, 528734635, 1541459225,
        ];
        let message = [0u32; 16];
        let output = blake2s_compress(&h, &message, 2, 0, 0xFFFFFFFF, 0);
        assert_eq!(
            output,
            [412110711, 3234706100, 3894970767, 982912411, 937789635, 742982576, 3942558313, 1407547065]
        );
    }
}
