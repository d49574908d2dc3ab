//! Exit code constants for the promptforge CLI.
//!
//! - 0: Success
//! - 1: User error (bad args, unreadable input, completion helper failure)
//! - 2: Validation failure (quality checks failed under `--strict`)
//! - 3: Storage failure (persisted data unreadable or unwritable)
//! - 4: Not found (unknown prompt, version, category, tag or template id)

/// Successful execution.
pub const SUCCESS: i32 = 0;

/// User error: bad arguments, unreadable input files.
pub const USER_ERROR: i32 = 1;

/// Validation failure: a quality check with error severity failed.
pub const VALIDATION_FAILURE: i32 = 2;

/// Storage failure: persisted data could not be decoded or written.
pub const STORAGE_FAILURE: i32 = 3;

/// An id-based lookup did not match anything.
pub const NOT_FOUND: i32 = 4;
