//! Backend configuration types and validation.

pub mod types;
pub mod validator;
