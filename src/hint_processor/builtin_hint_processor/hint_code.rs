//! Verbatim hint source fragments, used purely as dispatch keys. The
//! dispatcher never parses or executes these strings; it only maps the
//! opaque source text to a handler (§6 Hint catalog surface).

pub const IS_NN: &str = "memory[ap] = 0 if 0 <= (ids.a % PRIME) < range_check_builtin.bound else 1";

pub const IS_NN_OUT_OF_RANGE: &str = "memory[ap] = 0 if 0 <= ((-ids.a - 1) % PRIME) < range_check_builtin.bound else 1";

pub const ASSERT_LE_FELT: &str = "from starkware.cairo.common.math_utils import assert_integer\nassert_integer(ids.a)\nassert_integer(ids.b)\na = ids.a % PRIME\nb = ids.b % PRIME\nassert a <= b, f'a = {a} is not less than or equal to b = {b}.'";

pub const ASSERT_LE_FELT_V_0_8: &str = "from starkware.cairo.common.math_utils import assert_integer\nassert_integer(ids.a)\nassert_integer(ids.b)\nassert (ids.a % PRIME) <= (ids.b % PRIME), \\\n    f'a = {ids.a % PRIME} is not less than or equal to b = {ids.b % PRIME}.'\nids.small_inputs = int(\n    ids.a % PRIME < ids.range_check_builtin.bound and (ids.b - ids.a) % PRIME < ids.range_check_builtin.bound)";

pub const SPLIT_INT: &str = "memory[ids.output] = res = (int(ids.value) % PRIME) % ids.base\nassert res < ids.bound, f'split_int(): Limb {res} is out of range.'";

pub const IS_ADDR_BOUNDED: &str = "from starkware.cairo.common.math_utils import assert_integer\nassert_integer(ids.addr)\nASSUME_CORRECT_ADDR_BOUND = 2**250 < ids.ADDR_BOUND.value <= 2**251\nassert ASSUME_CORRECT_ADDR_BOUND and ids.ADDR_BOUND.value * 2 > ids.PRIME, 'normalize_address() cannot be used with the current constants.'\nids.is_small = 1 if ids.addr < ids.ADDR_BOUND.value else 0";

pub const IS_250_BITS: &str = "ids.is_250 = 1 if ids.addr.bit_length() <= 250 else 0";

pub const SPLIT_XX: &str = "from starkware.python.math_utils import div_mod\nSECP_P = 2**255 - 19\nx = pack(ids.xx, PRIME) % SECP_P\nI = 19681161376707505956807079304988542015446066515923890162744021073123829784752\nsqrt_candidate = pow(x, (SECP_P + 3) // 8, SECP_P)\nif (sqrt_candidate * sqrt_candidate) % SECP_P != x:\n    sqrt_candidate = (sqrt_candidate * I) % SECP_P\nif sqrt_candidate % 2 != 0:\n    sqrt_candidate = SECP_P - sqrt_candidate";

pub const IS_QUAD_RESIDUE: &str = "from starkware.crypto.signature.signature import FIELD_PRIME\nfrom starkware.python.math_utils import div_mod, is_quad_residue, sqrt\n\nx = ids.x\nif is_quad_residue(x, FIELD_PRIME):\n    ids.y = sqrt(x, FIELD_PRIME)\nelse:\n    ids.y = sqrt(div_mod(x, 3, FIELD_PRIME), FIELD_PRIME)";

pub const UNSIGNED_DIV_REM: &str = "ids.q, ids.r = divmod(ids.value, ids.div)";

pub const SIGNED_DIV_REM: &str = "from starkware.cairo.common.math_utils import as_int, assert_integer\n\nassert_integer(ids.div)\nassert 0 < ids.div <= PRIME // range_check_builtin.bound, \\\n    f'div={hex(ids.div)} is out of the valid range.'\n\nassert_integer(ids.bound)\nassert ids.bound <= range_check_builtin.bound // 2, \\\n    f'bound={hex(ids.bound)} is out of the valid range.'\n\nint_value = as_int(ids.value, PRIME)\nq, ids.r = divmod(int_value, ids.div)\n\nassert -ids.bound <= q < ids.bound, \\\n    f'{int_value} / {ids.div} = {q} is out of the range [{-ids.bound}, {ids.bound}).'\n\nids.biased_q = q + ids.bound";

pub const UINT384_UNSIGNED_DIV_REM: &str = "def split(num: int, num_bits_shift: int = 128, length: int = 3):\n    a = []\n    for _ in range(length):\n        a.append( num & ((1 << num_bits_shift) - 1) )\n        num = num >> num_bits_shift\n    return tuple(a)\n\ndef pack(z, num_bits_shift: int = 128) -> int:\n    limbs = (z.d0, z.d1, z.d2)\n    return sum(limb << (num_bits_shift * i) for i, limb in enumerate(limbs))\n\na = pack(ids.a)\ndiv = pack(ids.div)\nquotient, remainder = divmod(a, div)\n\nquotient_split = split(quotient)\nassert len(quotient_split) == 3\nids.quotient.d0, ids.quotient.d1, ids.quotient.d2 = quotient_split\n\nremainder_split = split(remainder)\nids.remainder.d0, ids.remainder.d1, ids.remainder.d2 = remainder_split";

pub const UINT768_UNSIGNED_DIV_REM: &str = "def split(num: int, num_bits_shift: int, length: int):\n    a = []\n    for _ in range(length):\n        a.append( num & ((1 << num_bits_shift) - 1) )\n        num = num >> num_bits_shift\n    return tuple(a)\n\ndef pack(z, num_bits_shift: int, length: int) -> int:\n    limbs = (z.d0, z.d1, z.d2, z.d3, z.d4, z.d5)[:length]\n    return sum(limb << (num_bits_shift * i) for i, limb in enumerate(limbs))\n\na = pack(ids.a, 128, 6)\ndiv = pack(ids.div, 128, 3)\nquotient, remainder = divmod(a, div)\n\nquotient_split = split(quotient, 128, 6)\nids.quotient.d0, ids.quotient.d1, ids.quotient.d2, ids.quotient.d3, ids.quotient.d4, ids.quotient.d5 = quotient_split\n\nremainder_split = split(remainder, 128, 3)\nids.remainder.d0, ids.remainder.d1, ids.remainder.d2 = remainder_split";

pub const UINT384_SPLIT_128: &str = "ids.low = ids.a & ((1 << 128) - 1)\nids.high = ids.a >> 128";

pub const ADD_NO_UINT384_CHECK: &str = "sum_d0 = ids.a.d0 + ids.b.d0\nids.carry_d0 = 1 if sum_d0 >= ids.SHIFT else 0\nsum_d1 = ids.a.d1 + ids.b.d1 + ids.carry_d0\nids.carry_d1 = 1 if sum_d1 >= ids.SHIFT else 0\nsum_d2 = ids.a.d2 + ids.b.d2 + ids.carry_d1\nids.carry_d2 = 1 if sum_d2 >= ids.SHIFT else 0";

pub const UINT384_SQRT: &str = "from starkware.python.math_utils import isqrt\n\ndef split(num: int, num_bits_shift: int = 128, length: int = 3):\n    a = []\n    for _ in range(length):\n        a.append( num & ((1 << num_bits_shift) - 1) )\n        num = num >> num_bits_shift\n    return tuple(a)\n\ndef pack(z, num_bits_shift: int = 128) -> int:\n    limbs = (z.d0, z.d1, z.d2)\n    return sum(limb << (num_bits_shift * i) for i, limb in enumerate(limbs))\n\na = pack(ids.a)\nroot = isqrt(a)\nassert 0 <= root < 2 ** 192\nids.root.d0, ids.root.d1, ids.root.d2 = split(root)";

pub const UINT384_SIGNED_NN: &str = "memory[ap] = 1 if 0 <= (ids.a.d2 % PRIME) < 2 ** 127 else 0";

pub const SUB_REDUCED_A_AND_REDUCED_B: &str = "from starkware.python.math_utils import pack\n\na = pack(ids.a, num_bits_shift = 128)\nb = pack(ids.b, num_bits_shift = 128)\np = pack(ids.p, num_bits_shift = 128)\nres = (a - b) % p\n\nfrom starkware.python.math_utils import split\nids.res.d0, ids.res.d1, ids.res.d2 = split(res, num_bits_shift=128)";

pub const BIGINT_PACK_DIV_MOD: &str = "from starkware.cairo.common.cairo_secp.secp_utils import pack\nfrom starkware.python.math_utils import div_mod, safe_div\n\np = pack(ids.p, PRIME)\nx = pack(ids.x, PRIME) + (ids.x.d3 << 258) + (ids.x.d4 << 344)\ny = pack(ids.y, PRIME)\n\nvalue = res = div_mod(x, y, p)";

pub const BIGINT_SAFE_DIV: &str = "k = safe_div(res * y - x, p)\nvalue = k if k > 0 else 0 - k\nids.flag = 1 if k > 0 else 0";

pub const NONDET_BIGINT3: &str = "from starkware.cairo.common.cairo_secp.secp_utils import split\n\nsegments.write_arg(ids.res.address_, split(value))";

pub const COMPUTE_SLOPE: &str = "from starkware.python.math_utils import line_slope\n\nvalue = slope = line_slope(point1=(ids.point1.x, ids.point1.y), point2=(ids.point2.x, ids.point2.y), p=FIELD_PRIME)";

pub const COMPUTE_DOUBLING_SLOPE: &str = "from starkware.python.math_utils import ec_double_slope\n\n# Compute the slope.\nx = ids.point.x\ny = ids.point.y\nvalue = slope = ec_double_slope(point=(x, y), alpha=ALPHA, p=FIELD_PRIME)";

pub const RECOVER_Y: &str = "from starkware.python.math_utils import recover_y\nids.p.x = ids.x\nids.p.y = recover_y(ids.x, ALPHA, BETA, FIELD_PRIME)";

pub const EC_DOUBLE_ASSIGN_NEW_X: &str = "from starkware.python.math_utils import ec_double_slope\n\nslope = value\nx = ids.point.x\ny = ids.point.y\n\nvalue = new_x = (pow(slope, 2, FIELD_PRIME) - 2 * x) % FIELD_PRIME";

pub const EC_DOUBLE_ASSIGN_NEW_Y: &str = "value = new_y = (slope * (x - new_x) - y) % FIELD_PRIME";

pub const EC_NEGATE: &str = "y = ids.point.y\nvalue = (-y) % FIELD_PRIME";

pub const RANDOM_EC_POINT: &str = "from starkware.crypto.signature.signature import ALPHA, BETA, FIELD_PRIME\nfrom starkware.python.math_utils import random_ec_point\nfrom starkware.python.utils import to_bytes\n\nx, y = random_ec_point(FIELD_PRIME, ALPHA, BETA)\nids.p.x = x\nids.p.y = y";

pub const CHAINED_EC_OP_RANDOM_EC_POINT: &str = "from starkware.crypto.signature.signature import ALPHA, BETA, FIELD_PRIME\nfrom starkware.python.math_utils import random_ec_point\n\nn_elms = ids.len\nassert isinstance(n_elms, int) and n_elms > 0, \\\n    f'Invalid value for len. Got: {n_elms}.'";

pub const BLAKE2S_COMPRESS: &str = "from starkware.cairo.common.cairo_blake2s.blake2s_utils import blake2s_compress\n\n_blake2s_input = [memory[ids.blake2s_ptr + i] for i in range(26)]\n_blake2s_output = blake2s_compress(\n    message=_blake2s_input[2:18],\n    h=_blake2s_input[0:8],\n    t0=_blake2s_input[18],\n    t1=_blake2s_input[19],\n    f0=_blake2s_input[20],\n    f1=_blake2s_input[21],\n)\nsegments.write_arg(ids.output, _blake2s_output)";

pub const SHA256_INPUT: &str = "ids.full_word = int(ids.n_bytes >= 4)";

pub const SHA256_MAIN: &str = "from starkware.cairo.common.cairo_sha256.sha256_utils import (\n    IV, compute_message_schedule, sha2_compress_function)\n\n_sha256_input_chunk_size_felts = int(ids.SHA256_INPUT_CHUNK_SIZE_FELTS)\nassert 0 <= _sha256_input_chunk_size_felts < 100\n_sha256_state_size_felts = int(ids.SHA256_STATE_SIZE_FELTS)\nassert 0 <= _sha256_state_size_felts < 100\nw = compute_message_schedule(memory.get_range(\n    ids.sha256_start, _sha256_input_chunk_size_felts))\nnew_state = sha2_compress_function(memory.get_range(ids.state, _sha256_state_size_felts), w)\nsegments.write_arg(ids.output, new_state)";

pub const KECCAK_WRITE_ARGS: &str = "segments.write_arg(ids.inputs, [ids.low % 2 ** 64, ids.low // 2 ** 64])\nsegments.write_arg(ids.inputs + 2, [ids.high % 2 ** 64, ids.high // 2 ** 64])";

pub const BLOCK_PERMUTATION: &str = "from starkware.cairo.common.keccak_utils.keccak_utils import keccak_func\n_keccak_state_size_felts = int(ids.KECCAK_STATE_SIZE_FELTS)\nassert 0 <= _keccak_state_size_felts < 100\noutput_values = keccak_func(memory.get_range(\n    ids.keccak_ptr_start, _keccak_state_size_felts))\nsegments.write_arg(ids.output, output_values)";

pub const CAIRO_KECCAK_FINALIZE: &str = "# Add dummy pairs of input and output.\n_keccak_state_size_felts = int(ids.KECCAK_STATE_SIZE_FELTS)\n_block_size = int(ids.BLOCK_SIZE)\nassert 0 <= _keccak_state_size_felts < 100\nassert 0 <= _block_size < 10\ninp = [0] * _keccak_state_size_felts\npadding = (inp + keccak_func(inp)) * _block_size\nsegments.write_arg(ids.keccak_ptr_end, padding)";

pub const UNSAFE_KECCAK: &str = "from eth_hash.auto import keccak\n\ndata, length = ids.data, ids.length\n\nif '__keccak_max_size' in globals():\n    assert length <= __keccak_max_size, \\\n        f'unsafe_keccak() can only be used with length<={__keccak_max_size}. ' \\\n        f'Got: length={length}.'\n\nkeccak_input = bytearray()\nfor word_i, byte_i in enumerate(range(0, length, 16)):\n    word = memory[data + word_i]\n    n_bytes = min(16, length - byte_i)\n    assert 0 <= word < 2 ** (8 * n_bytes)\n    keccak_input += word.to_bytes(n_bytes, 'big')\n\nhashed = keccak(keccak_input)\nids.high = int.from_bytes(hashed[:16], 'big')\nids.low = int.from_bytes(hashed[16:32], 'big')";

pub const UNSAFE_KECCAK_FINALIZE: &str = "from eth_hash.auto import keccak\nkeccak_input = bytearray()\nn_elms = ids.keccak_state.end_ptr - ids.keccak_state.start_ptr\nfor word in memory.get_range(ids.keccak_state.start_ptr, n_elms):\n    keccak_input += word.to_bytes(16, 'big')\nhashed = keccak(keccak_input)\nids.high = int.from_bytes(hashed[:16], 'big')\nids.low = int.from_bytes(hashed[16:32], 'big')";

pub const USORT_ENTER_SCOPE: &str = "vm_enter_scope(dict(__usort_max_size = __usort_max_size) if '__usort_max_size' in globals() else {})";

pub const USORT_BODY: &str = "from collections import defaultdict\n\ninput_ptr = ids.input\ninput_len = int(ids.input_len)\nif '__usort_max_size' in globals():\n    assert input_len <= __usort_max_size, (\n        f\"usort() can only be used with input_len<={__usort_max_size}. \"\n        f\"Got: input_len={input_len}.\"\n    )\n\npositions_dict = defaultdict(list)\nfor i in range(input_len):\n    val = memory[input_ptr + i]\n    positions_dict[val].append(i)\n\noutput = sorted(positions_dict.keys())\nids.output_len = len(output)\nids.output = segments.add()\nids.multiplicities = segments.add()\nfor i, val in enumerate(output):\n    memory[ids.output + i] = val\n    multiplicity = len(positions_dict[val])\n    memory[ids.multiplicities + i] = multiplicity";

pub const USORT_VERIFY: &str = "last_pos = 0\npositions = positions_dict[ids.value][::-1]";

pub const USORT_VERIFY_MULTIPLICITY_BODY: &str = "current_pos = positions.pop()\nids.next_item_index = current_pos - last_pos\nlast_pos = current_pos + 1";

pub const USORT_VERIFY_MULTIPLICITY_ASSERT: &str = "assert len(positions) == 0";

pub const SET_ADD: &str = "assert ids.elm_size > 0\nassert ids.set_ptr <= ids.set_end_ptr\nelm_list = memory.get_range(ids.elm_ptr, ids.elm_size)\nfor i in range(0, ids.set_ptr - ids.set_end_ptr, ids.elm_size):\n    if memory.get_range(ids.set_ptr + i, ids.elm_size) == elm_list:\n        ids.index = i // ids.elm_size\n        ids.is_elm_in_set = 1\n        break\nelse:\n    ids.is_elm_in_set = 0";

pub const DICT_NEW: &str = "if '__dict_manager' not in globals():\n    from starkware.cairo.common.dict import DictManager\n    __dict_manager = DictManager()\n\nmemory[ap] = __dict_manager.new_dict(segments, initial_dict)\ndel initial_dict";

pub const DEFAULT_DICT_NEW: &str = "if '__dict_manager' not in globals():\n    from starkware.cairo.common.dict import DictManager\n    __dict_manager = DictManager()\n\nmemory[ap] = __dict_manager.new_default_dict(segments, ids.default_value, initial_dict)";

pub const DICT_READ: &str = "dict_tracker = __dict_manager.get_tracker(ids.dict_ptr)\ndict_tracker.current_ptr += ids.DictAccess.SIZE\nids.value = dict_tracker.data[ids.key]";

pub const DICT_WRITE: &str = "dict_tracker = __dict_manager.get_tracker(ids.dict_ptr)\ndict_tracker.current_ptr += ids.DictAccess.SIZE\nids.dict_ptr.prev_value = dict_tracker.data[ids.key]\ndict_tracker.data[ids.key] = ids.new_value";

pub const DICT_UPDATE: &str = "dict_tracker = __dict_manager.get_tracker(ids.dict_ptr)\ncurrent_value = dict_tracker.data[ids.key]\nassert current_value == ids.prev_value, \\\n    f'Wrong previous value in dict. Got {ids.prev_value}, expected {current_value}.'\n\ndict_tracker.data[ids.key] = ids.new_value\ndict_tracker.current_ptr += ids.DictAccess.SIZE";

pub const SQUASH_DICT: &str = "dict_access_size = ids.DictAccess.SIZE\naddress = ids.dict_accesses.address_\nassert ids.ptr_diff % dict_access_size == 0, \\\n    'Accesses array size must be divisible by DictAccess.SIZE'\nn_accesses = ids.n_accesses\nif '__squash_dict_max_size' in globals():\n    assert n_accesses <= __squash_dict_max_size, \\\n        f'squash_dict() can only be used with n_accesses<={__squash_dict_max_size}. ' \\\n        f'Got: n_accesses={n_accesses}.'\n# A map from key to the list of indices accessing it.\naccess_indices = {}\nfor i in range(n_accesses):\n    key = memory[address + dict_access_size * i]\n    access_indices.setdefault(key, []).append(i)\n# Descending list of keys.\nkeys = sorted(access_indices.keys(), reverse=True)\n# Are the keys used bigger than range_check bound.\nids.big_keys = 1 if keys[0] >= range_check_builtin.bound else 0\nids.first_key = key = keys.pop()";

pub const SQUASH_DICT_INNER_FIRST_ITERATION: &str = "current_access_indices = sorted(access_indices[key])[::-1]\ncurrent_access_index = current_access_indices.pop()\nmemory[ids.range_check_ptr] = current_access_index";

pub const SQUASH_DICT_INNER_SKIP_LOOP: &str = "ids.should_skip_loop = 0 if current_access_indices else 1";

pub const SQUASH_DICT_INNER_CHECK_ACCESS_INDEX: &str = "new_access_index = current_access_indices.pop()\nids.loop_temps.index_delta_minus1 = new_access_index - current_access_index - 1\ncurrent_access_index = new_access_index";

pub const SQUASH_DICT_INNER_CONTINUE_LOOP: &str = "ids.loop_temps.should_continue = 1 if current_access_indices else 0";

pub const SQUASH_DICT_INNER_LEN_ASSERT: &str = "assert len(current_access_indices) == 0";

pub const SQUASH_DICT_INNER_USED_ACCESSES_ASSERT: &str = "n_used_accesses = ids.n_used_accesses\nassert len(current_access_indices) == 0\nassert n_used_accesses == len(access_indices[key])";

pub const SQUASH_DICT_INNER_ASSERT_LEN_KEYS: &str = "assert len(keys) == 0";

pub const SQUASH_DICT_INNER_NEXT_KEY: &str = "assert len(keys) > 0, 'No keys left but remaining_accesses > 0'\nids.next_key = key = keys.pop()";

pub const MEMSET_ENTER_SCOPE: &str = "vm_enter_scope({'n': ids.n})";

pub const MEMSET_CONTINUE_LOOP: &str = "n -= 1\nids.continue_loop = 1 if n > 0 else 0";

pub const MEMCPY_ENTER_SCOPE: &str = "vm_enter_scope({'n': ids.len})";

pub const MEMCPY_CONTINUE_COPYING: &str = "n -= 1\nids.continue_copying = 1 if n > 0 else 0";

pub const NONDET_N_GREATER_THAN_10: &str = "memory[ap] = to_felt_or_relocatable(ids.n >= 10)";

pub const NONDET_N_GREATER_THAN_2: &str = "memory[ap] = to_felt_or_relocatable(ids.n >= 2)";

pub const ELEMENTS_OVER_X: &str = "memory[ap] = to_felt_or_relocatable(ids.elements_end - ids.elements >= ids.x)";
