//! Test-tooling macros (§2a "Test tooling"): small builders that assemble a
//! [`VirtualMachine`](crate::vm::vm_core::VirtualMachine) and its
//! `ids_data` map without restating the same boilerplate in every hint
//! handler's `#[cfg(test)]` module.

#[cfg(any(test, feature = "test_utils"))]
#[macro_use]
pub mod test_utils {
    use alloc::string::String;
    use alloc::vec::Vec;

    use hashbrown::HashMap;

    use crate::types::felt::Felt252;
    use crate::types::relocatable::{MaybeRelocatable, Relocatable};

    /// Converts common literal shapes used in test tables into a
    /// [`MaybeRelocatable`], so `segments!` entries can mix plain integers
    /// and `(segment, offset)` pairs.
    pub trait IntoMaybeRelocatable {
        fn into_mr(self) -> MaybeRelocatable;
    }

    macro_rules! impl_into_mr_int {
        ($($ty:ty),*) => {
            $(
                impl IntoMaybeRelocatable for $ty {
                    fn into_mr(self) -> MaybeRelocatable {
                        MaybeRelocatable::Int(Felt252::from(self))
                    }
                }
            )*
        };
    }
    impl_into_mr_int!(i32, i64, u32, u64, usize, u128, i128);

    impl IntoMaybeRelocatable for Felt252 {
        fn into_mr(self) -> MaybeRelocatable {
            MaybeRelocatable::Int(self)
        }
    }

    impl IntoMaybeRelocatable for (isize, usize) {
        fn into_mr(self) -> MaybeRelocatable {
            MaybeRelocatable::RelocatableValue(Relocatable::from(self))
        }
    }

    impl IntoMaybeRelocatable for Relocatable {
        fn into_mr(self) -> MaybeRelocatable {
            MaybeRelocatable::RelocatableValue(self)
        }
    }

    impl IntoMaybeRelocatable for MaybeRelocatable {
        fn into_mr(self) -> MaybeRelocatable {
            self
        }
    }

    /// Builds a bare [`VirtualMachine`](crate::vm::vm_core::VirtualMachine), no
    /// builtins registered.
    #[macro_export]
    macro_rules! vm {
        () => {
            $crate::vm::vm_core::VirtualMachine::new()
        };
    }

    /// As [`vm!`], with a range-check builtin at the standard `2**128` bound.
    #[macro_export]
    macro_rules! vm_with_range_check {
        () => {
            $crate::vm::vm_core::VirtualMachine::new()
                .with_range_check(Some($crate::types::felt::Felt252::from(2u32).pow(128u32)))
        };
    }

    /// Allocates `$n` fresh memory segments on `$vm`.
    #[macro_export]
    macro_rules! add_segments {
        ($vm:expr, $n:expr) => {
            for _ in 0..$n {
                $vm.add_memory_segment();
            }
        };
    }

    /// Sets `ap`/`fp` (both in segment 1, the convention every test in this
    /// crate uses for the "execution" segment) to the given offsets.
    #[macro_export]
    macro_rules! run_context {
        ($vm:expr, $pc:expr, $ap:expr, $fp:expr) => {
            $vm.run_context.pc = $crate::types::relocatable::Relocatable::new(0, $pc);
            $vm.run_context.ap = $crate::types::relocatable::Relocatable::new(1, $ap);
            $vm.run_context.fp = $crate::types::relocatable::Relocatable::new(1, $fp);
        };
    }

    /// Builds a `HashMap<String, HintReference>` with sequential FP offsets
    /// `0, 1, 2, ...` in declaration order.
    #[macro_export]
    macro_rules! ids_data {
        ( $( $name:expr ),* $(,)? ) => {{
            let mut ids_data = ::hashbrown::HashMap::new();
            let mut __offset: isize = 0;
            $(
                ids_data.insert(
                    alloc::string::String::from($name),
                    $crate::hint_processor::hint_processor_definition::HintReference::new_simple(__offset),
                );
                __offset += 1;
            )*
            ids_data
        }};
    }

    /// As [`ids_data!`], but with an explicit `(name, fp_offset)` per entry.
    #[macro_export]
    macro_rules! non_continuous_ids_data {
        ( $( ($name:expr, $offset:expr) ),* $(,)? ) => {{
            let mut ids_data = ::hashbrown::HashMap::new();
            $(
                ids_data.insert(
                    alloc::string::String::from($name),
                    $crate::hint_processor::hint_processor_definition::HintReference::new_simple($offset),
                );
            )*
            ids_data
        }};
    }

    /// Builds a fresh [`ExecutionScopes`](crate::types::exec_scope::ExecutionScopes)
    /// with the given `(key, value)` pairs deposited in the root frame.
    #[macro_export]
    macro_rules! scope {
        ( $( ($key:expr, $value:expr) ),* $(,)? ) => {{
            let mut scopes = $crate::types::exec_scope::ExecutionScopes::new();
            $( scopes.insert_value($key, $value); )*
            scopes
        }};
    }

    /// Inserts `((segment, offset), value)` entries into an existing VM,
    /// allocating segments as needed.
    pub fn insert_entries<T: IntoMaybeRelocatable>(
        vm: &mut crate::vm::vm_core::VirtualMachine,
        entries: Vec<((isize, usize), T)>,
    ) {
        for (addr, value) in entries {
            while (vm.segments.memory.data.len() as isize) <= addr.0 {
                vm.add_memory_segment();
            }
            vm.insert_value(Relocatable::from(addr), value.into_mr()).unwrap();
        }
    }

    /// Asserts that each `((segment, offset), value)` entry is present in `$memory`.
    #[macro_export]
    macro_rules! check_memory {
        ($memory:expr $(, (($si:expr, $off:expr), $val:expr) )* $(,)?) => {
            $(
                assert_eq!(
                    $memory.get(&$crate::types::relocatable::Relocatable::new($si, $off)).cloned(),
                    Some($crate::utils::test_utils::IntoMaybeRelocatable::into_mr($val))
                );
            )*
        };
    }

    /// Dispatches `$hint_code` through a fresh [`BuiltinHintProcessor`]
    /// against `$vm`, with an optional `exec_scopes`/`constants` override.
    #[macro_export]
    macro_rules! run_hint {
        ($vm:expr, $ids_data:expr, $hint_code:expr, $exec_scopes:expr, $constants:expr) => {{
            let hint_data = $crate::hint_processor::hint_processor_definition::HintProcessorData::new_default(
                alloc::string::String::from($hint_code),
                $ids_data,
            );
            let hint_processor =
                $crate::hint_processor::builtin_hint_processor::builtin_hint_processor_definition::BuiltinHintProcessor::new_empty();
            $crate::hint_processor::hint_processor_definition::HintProcessor::execute_hint(
                &hint_processor,
                &mut $vm,
                $exec_scopes,
                &hint_data,
                $constants,
            )
        }};
        ($vm:expr, $ids_data:expr, $hint_code:expr, $exec_scopes:expr) => {
            run_hint!($vm, $ids_data, $hint_code, $exec_scopes, &::hashbrown::HashMap::new())
        };
        ($vm:expr, $ids_data:expr, $hint_code:expr) => {
            run_hint!(
                $vm,
                $ids_data,
                $hint_code,
                &mut $crate::types::exec_scope::ExecutionScopes::new()
            )
        };
    }

    #[allow(unused_imports)]
    pub use crate::{add_segments, check_memory, ids_data, non_continuous_ids_data, run_context, run_hint, scope, vm, vm_with_range_check};
}
