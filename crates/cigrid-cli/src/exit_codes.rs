//! Unified exit codes for the cigrid CLI.
//! These codes are part of the public contract; CI wrappers branch on them.

pub const SUCCESS: i32 = 0;
pub const GENERATION_FAILED: i32 = 1; // Output could not be written
pub const CONFIG_ERROR: i32 = 2; // Config or snapshot unreadable/unparsable
