pub mod exec_scope_errors;
pub mod math_errors;
