pub mod bigint_utils;
pub mod blake2s_utils;
pub mod builtin_hint_processor_definition;
pub mod dict_hint_utils;
pub mod dict_manager;
pub mod ec_utils;
pub mod hint_code;
pub mod keccak_utils;
pub mod math_utils;
pub mod memcpy_hint_utils;
pub mod memset_utils;
pub mod poseidon_utils;
pub mod set;
pub mod sha256_utils;
pub mod squash_dict_utils;
pub mod uint_utils;
pub mod usort;
