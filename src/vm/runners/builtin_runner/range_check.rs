use crate::types::felt::Felt252;

/// Minimal surface of the range-check builtin the hint catalog consults:
/// the non-negative representable bound used by `is_nn`/`is_addr_bounded`
/// and friends. Instruction-level range-check validation is out of scope.
#[derive(Debug, Clone, Copy)]
pub struct RangeCheckBuiltinRunner {
    bound: Option<Felt252>,
}

impl RangeCheckBuiltinRunner {
    pub fn new(bound: Option<Felt252>) -> Self {
        RangeCheckBuiltinRunner { bound }
    }

    pub fn bound(&self) -> Option<Felt252> {
        self.bound
    }
}

impl Default for RangeCheckBuiltinRunner {
    fn default() -> Self {
        // 2**128, the standard Cairo range-check bound.
        RangeCheckBuiltinRunner::new(Some(Felt252::from(2u32).pow(128u32)))
    }
}
