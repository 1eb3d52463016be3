use alloc::boxed::Box;
use alloc::rc::Rc;
use alloc::string::{String, ToString};
use alloc::vec;
use alloc::vec::Vec;
use core::any::Any;
use core::cell::RefCell;

use hashbrown::HashMap;

use crate::types::errors::exec_scope_errors::ExecScopeError;
use crate::vm::errors::hint_errors::HintError;

pub type ExecutionScopesFrame = HashMap<String, Box<dyn Any>>;

/// A stack of string-keyed typed-value maps carrying hint-private state
/// across successive hints in the same program run.
///
/// The bottom ("main") frame always exists and cannot be popped.
#[derive(Debug)]
pub struct ExecutionScopes {
    pub data: Vec<ExecutionScopesFrame>,
}

impl Default for ExecutionScopes {
    fn default() -> Self {
        Self::new()
    }
}

impl ExecutionScopes {
    pub fn new() -> Self {
        ExecutionScopes {
            data: vec![HashMap::new()],
        }
    }

    /// Pushes a new frame with the given initial contents.
    pub fn enter_scope(&mut self, new_scope_locals: ExecutionScopesFrame) {
        self.data.push(new_scope_locals);
    }

    /// Pops the top frame. Fails if only the root frame remains.
    pub fn exit_scope(&mut self) -> Result<(), ExecScopeError> {
        if self.data.len() < 2 {
            return Err(ExecScopeError::ExitMainScopeError);
        }
        self.data.pop();
        Ok(())
    }

    fn current_scope(&self) -> &ExecutionScopesFrame {
        self.data.last().expect("ExecutionScopes is never empty")
    }

    fn current_scope_mut(&mut self) -> &mut ExecutionScopesFrame {
        self.data.last_mut().expect("ExecutionScopes is never empty")
    }

    /// Inserts or overwrites `name` in the top frame with a boxed value of
    /// any type.
    pub fn insert_value<T: Any>(&mut self, name: &str, value: T) {
        self.current_scope_mut()
            .insert(name.to_string(), Box::new(value));
    }

    /// Type-checked read from the top frame.
    pub fn get<T: 'static + Clone>(&self, name: &str) -> Result<T, HintError> {
        let val = self
            .current_scope()
            .get(name)
            .ok_or_else(|| HintError::VariableNotInScope(name.to_string()))?;
        val.downcast_ref::<T>()
            .cloned()
            .ok_or_else(|| HintError::VariableWrongType(name.to_string(), core::any::type_name::<T>().to_string()))
    }

    /// Type-checked reference into the top frame, without cloning.
    pub fn get_ref<T: 'static>(&self, name: &str) -> Result<&T, HintError> {
        let val = self
            .current_scope()
            .get(name)
            .ok_or_else(|| HintError::VariableNotInScope(name.to_string()))?;
        val.downcast_ref::<T>()
            .ok_or_else(|| HintError::VariableWrongType(name.to_string(), core::any::type_name::<T>().to_string()))
    }

    /// Type-checked mutable reference into the top frame, for in-place
    /// mutation of lists/big integers.
    pub fn get_mut_ref<T: 'static>(&mut self, name: &str) -> Result<&mut T, HintError> {
        let val = self
            .current_scope_mut()
            .get_mut(name)
            .ok_or_else(|| HintError::VariableNotInScope(name.to_string()))?;
        val.downcast_mut::<T>()
            .ok_or_else(|| HintError::VariableWrongType(name.to_string(), core::any::type_name::<T>().to_string()))
    }

    /// Convenience accessor for a reference-counted, interior-mutable value
    /// (used by the dictionary manager handle).
    pub fn get_ref_counted<T: 'static>(&self, name: &str) -> Result<Rc<RefCell<T>>, HintError> {
        self.get::<Rc<RefCell<T>>>(name)
    }
}
