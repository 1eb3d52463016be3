use thiserror_no_std::Error;

/// Misuse of the [`crate::types::exec_scope::ExecutionScopes`] stack.
#[derive(Debug, PartialEq, Eq, Error)]
pub enum ExecScopeError {
    #[error("Cannot exit main scope.")]
    ExitMainScopeError,
}
