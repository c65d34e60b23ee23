//! Process exit codes.
//!
//! Failures carrying a `CtListError` use `CtListError::exit_code`; these
//! cover the rest.

pub const SUCCESS: i32 = 0;
pub const INTERNAL_ERROR: i32 = 2; // Argument or plumbing failure outside the library
