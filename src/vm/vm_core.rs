use alloc::vec::Vec;

use crate::types::exec_scope::ExecutionScopes;
use crate::types::felt::Felt252;
use crate::types::relocatable::{MaybeRelocatable, Relocatable};
use crate::vm::context::run_context::RunContext;
use crate::vm::errors::memory_errors::MemoryError;
use crate::vm::errors::vm_errors::VirtualMachineError;
use crate::vm::runners::builtin_runner::{BuiltinRunner, RangeCheckBuiltinRunner};
use crate::vm::vm_memory::memory_segments::MemorySegmentManager;

/// The minimal VM surface the hint catalog is driven against: segmented
/// memory, the three registers, the execution-scope stack, and the single
/// builtin (range-check) any hint in this catalog consults. Instruction
/// decoding, the trace, and the other builtin runners are out of scope.
pub struct VirtualMachine {
    pub segments: MemorySegmentManager,
    pub run_context: RunContext,
    pub exec_scopes: ExecutionScopes,
    pub builtin_runners: Vec<BuiltinRunner>,
}

impl Default for VirtualMachine {
    fn default() -> Self {
        Self::new()
    }
}

impl VirtualMachine {
    pub fn new() -> Self {
        VirtualMachine {
            segments: MemorySegmentManager::new(),
            run_context: RunContext::default(),
            exec_scopes: ExecutionScopes::new(),
            builtin_runners: Vec::new(),
        }
    }

    pub fn add_memory_segment(&mut self) -> Relocatable {
        self.segments.add()
    }

    pub fn get_integer(&self, addr: Relocatable) -> Result<Felt252, MemoryError> {
        self.segments.memory.get_integer(addr)
    }

    pub fn get_relocatable(&self, addr: Relocatable) -> Result<Relocatable, MemoryError> {
        self.segments.memory.get_relocatable(addr)
    }

    pub fn get_maybe_relocatable(&self, addr: &Relocatable) -> Option<MaybeRelocatable> {
        self.segments.memory.get(addr).cloned()
    }

    pub fn get_felt_range(&self, addr: Relocatable, len: usize) -> Result<Vec<Felt252>, MemoryError> {
        self.segments.memory.get_felt_range(addr, len)
    }

    pub fn get_continuous_range(
        &self,
        addr: Relocatable,
        len: usize,
    ) -> Result<Vec<MaybeRelocatable>, MemoryError> {
        self.segments.memory.get_continuous_range(addr, len)
    }

    pub fn insert_value<T: Into<MaybeRelocatable>>(
        &mut self,
        addr: Relocatable,
        value: T,
    ) -> Result<(), MemoryError> {
        self.segments.memory.insert(addr, value.into())
    }

    /// Writes `value` at the current AP and does not advance it (hints never
    /// advance AP themselves; the VM does that between instructions).
    pub fn insert_value_into_ap<T: Into<MaybeRelocatable>>(&mut self, value: T) -> Result<(), MemoryError> {
        let ap = self.run_context.get_ap();
        self.insert_value(ap, value)
    }

    /// Returns the configured range-check bound, if a range-check builtin is registered.
    pub fn range_check_bound(&self) -> Result<Option<Felt252>, VirtualMachineError> {
        for runner in &self.builtin_runners {
            if let BuiltinRunner::RangeCheck(rc) = runner {
                return Ok(rc.bound());
            }
        }
        Err(VirtualMachineError::NoRangeCheckBuiltin)
    }

    pub fn with_range_check(mut self, bound: Option<Felt252>) -> Self {
        self.builtin_runners
            .push(BuiltinRunner::RangeCheck(RangeCheckBuiltinRunner::new(bound)));
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_segment_and_insert() {
        let mut vm = VirtualMachine::new();
        let base = vm.add_memory_segment();
        vm.insert_value(base, Felt252::from(5)).unwrap();
        assert_eq!(vm.get_integer(base).unwrap(), Felt252::from(5));
    }

    #[test]
    fn range_check_bound_default() {
        let vm = VirtualMachine::new().with_range_check(Some(Felt252::from(2u32).pow(128u32)));
        assert_eq!(vm.range_check_bound().unwrap(), Some(Felt252::from(2u32).pow(128u32)));
    }

    #[test]
    fn range_check_bound_missing_errors() {
        let vm = VirtualMachine::new();
        assert!(vm.range_check_bound().is_err());
    }
}
