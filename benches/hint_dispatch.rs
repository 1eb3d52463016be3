use cairo_hint_vm::hint_processor::builtin_hint_processor::builtin_hint_processor_definition::BuiltinHintProcessor;
use cairo_hint_vm::hint_processor::builtin_hint_processor::hint_code;
use cairo_hint_vm::hint_processor::hint_processor_definition::{
    HintProcessor, HintProcessorData, HintReference,
};
use cairo_hint_vm::types::exec_scope::ExecutionScopes;
use cairo_hint_vm::types::felt::Felt252;
use cairo_hint_vm::types::relocatable::Relocatable;
use cairo_hint_vm::vm::vm_core::VirtualMachine;
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use hashbrown::HashMap;

#[cfg(not(target_arch = "wasm32"))]
#[global_allocator]
static ALLOC: mimalloc::MiMalloc = mimalloc::MiMalloc;

fn bench_is_nn(c: &mut Criterion) {
    let processor = BuiltinHintProcessor::new_empty();
    c.bench_function("is_nn", |b| {
        b.iter(|| {
            let mut vm = VirtualMachine::new().with_range_check(Some(Felt252::from(2u32).pow(128u32)));
            vm.add_memory_segment();
            vm.add_memory_segment();
            vm.run_context.ap = Relocatable::new(1, 0);
            vm.run_context.fp = Relocatable::new(1, 0);

            let mut ids_data = HashMap::new();
            ids_data.insert("a".to_string(), HintReference::new_simple(0));
            vm.insert_value(Relocatable::new(1, 0), Felt252::from(1234)).unwrap();
            let hint_data = HintProcessorData::new_default(hint_code::IS_NN.to_string(), ids_data);
            let mut exec_scopes = ExecutionScopes::new();
            black_box(processor.execute_hint(&mut vm, &mut exec_scopes, &hint_data, &HashMap::new())).unwrap();
        })
    });
}

fn bench_usort_body(c: &mut Criterion) {
    let processor = BuiltinHintProcessor::new_empty();
    c.bench_function("usort_body_64_elements", |b| {
        b.iter(|| {
            let mut vm = VirtualMachine::new().with_range_check(Some(Felt252::from(2u32).pow(128u32)));
            vm.add_memory_segment();
            vm.add_memory_segment();
            vm.run_context.ap = Relocatable::new(1, 0);
            vm.run_context.fp = Relocatable::new(1, 0);

            let input_ptr = vm.add_memory_segment();
            for i in 0..64u64 {
                vm.insert_value(input_ptr.add_usize(i as usize).unwrap(), Felt252::from(i % 17)).unwrap();
            }

            let mut ids_data = HashMap::new();
            ids_data.insert("input".to_string(), HintReference::new_simple(0));
            ids_data.insert("input_len".to_string(), HintReference::new_simple(1));
            ids_data.insert("output".to_string(), HintReference::new_simple(2));
            ids_data.insert("output_len".to_string(), HintReference::new_simple(3));
            ids_data.insert("multiplicities".to_string(), HintReference::new_simple(4));
            vm.insert_value(Relocatable::new(1, 0), input_ptr).unwrap();
            vm.insert_value(Relocatable::new(1, 1), Felt252::from(64)).unwrap();

            let hint_data = HintProcessorData::new_default(hint_code::USORT_BODY.to_string(), ids_data);
            let mut exec_scopes = ExecutionScopes::new();
            black_box(processor.execute_hint(&mut vm, &mut exec_scopes, &hint_data, &HashMap::new())).unwrap();
        })
    });
}

fn bench_blake2s_compress(c: &mut Criterion) {
    let processor = BuiltinHintProcessor::new_empty();
    c.bench_function("blake2s_compress", |b| {
        b.iter(|| {
            let mut vm = VirtualMachine::new().with_range_check(Some(Felt252::from(2u32).pow(128u32)));
            vm.add_memory_segment();
            vm.add_memory_segment();
            let blake2s_ptr = vm.add_memory_segment();
            vm.run_context.ap = Relocatable::new(1, 0);
            vm.run_context.fp = Relocatable::new(1, 0);

            for i in 0..26usize {
                vm.insert_value(blake2s_ptr.add_usize(i).unwrap(), Felt252::from(i as u64)).unwrap();
            }
            let mut ids_data = HashMap::new();
            ids_data.insert("blake2s_ptr".to_string(), HintReference::new_simple(0));
            ids_data.insert("output".to_string(), HintReference::new_simple(1));
            vm.insert_value(Relocatable::new(1, 0), blake2s_ptr).unwrap();
            let output_ptr = vm.add_memory_segment();
            vm.insert_value(Relocatable::new(1, 1), output_ptr).unwrap();

            let hint_data = HintProcessorData::new_default(hint_code::BLAKE2S_COMPRESS.to_string(), ids_data);
            let mut exec_scopes = ExecutionScopes::new();
            black_box(processor.execute_hint(&mut vm, &mut exec_scopes, &hint_data, &HashMap::new())).unwrap();
        })
    });
}

criterion_group!(benches, bench_is_nn, bench_usort_body, bench_blake2s_compress);
criterion_main!(benches);
