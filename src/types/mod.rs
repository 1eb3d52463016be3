pub mod errors;
pub mod exec_scope;
pub mod felt;
pub mod relocatable;
