use alloc::string::String;
use alloc::vec::Vec;

use hashbrown::HashMap;

use crate::serde::deserialize_program::{ApTracking, Register};
use crate::types::exec_scope::ExecutionScopes;
use crate::types::felt::Felt252;
use crate::vm::errors::hint_errors::HintError;
use crate::vm::vm_core::VirtualMachine;

/// One offset expression within a [`HintReference`]: a register plus a
/// signed immediate, with an optional inner dereference.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OffsetValue {
    pub register: Register,
    pub offset: isize,
    pub dereference: bool,
}

impl OffsetValue {
    pub fn new(register: Register, offset: isize, dereference: bool) -> Self {
        OffsetValue {
            register,
            offset,
            dereference,
        }
    }
}

/// Describes how to compute a variable's address from the current register
/// state (§4.1). Immutable once built from the program's symbol table.
#[derive(Debug, Clone)]
pub struct HintReference {
    pub offset1: OffsetValue,
    pub offset2: Option<OffsetValue>,
    pub dereference: bool,
    pub ap_tracking_data: Option<ApTracking>,
    pub cairo_type: Option<String>,
}

impl HintReference {
    pub fn new_simple(offset1: isize) -> Self {
        HintReference {
            offset1: OffsetValue::new(Register::FP, offset1, false),
            offset2: None,
            dereference: true,
            ap_tracking_data: None,
            cairo_type: None,
        }
    }

    pub fn new(
        offset1: isize,
        offset2: isize,
        inner_dereference1: bool,
        inner_dereference2: bool,
    ) -> Self {
        HintReference {
            offset1: OffsetValue::new(Register::FP, offset1, inner_dereference1),
            offset2: Some(OffsetValue::new(Register::FP, offset2, inner_dereference2)),
            dereference: true,
            ap_tracking_data: None,
            cairo_type: None,
        }
    }

    pub fn with_ap_tracking(mut self, ap_tracking: ApTracking) -> Self {
        self.ap_tracking_data = Some(ap_tracking);
        self
    }

    pub fn with_cairo_type(mut self, cairo_type: String) -> Self {
        self.cairo_type = Some(cairo_type);
        self
    }
}

/// Constructor/execution-time context shared by every hint invocation.
pub struct HintProcessorData {
    pub code: String,
    pub ap_tracking: ApTracking,
    pub ids_data: HashMap<String, HintReference>,
}

impl HintProcessorData {
    pub fn new_default(code: String, ids_data: HashMap<String, HintReference>) -> Self {
        HintProcessorData {
            code,
            ap_tracking: ApTracking::default(),
            ids_data,
        }
    }
}

/// Implemented by a catalog of hint handlers, dispatched by hint-code string.
pub trait HintProcessor {
    fn execute_hint(
        &self,
        vm: &mut VirtualMachine,
        exec_scopes: &mut ExecutionScopes,
        hint_data: &HintProcessorData,
        constants: &HashMap<String, Felt252>,
    ) -> Result<(), HintError>;
}

pub fn ids_data_names(ids_data: &HashMap<String, HintReference>) -> Vec<&String> {
    ids_data.keys().collect()
}
