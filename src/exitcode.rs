//! Standard exit codes (BSD sysexits.h compatible)

/// Successful termination
pub const OK: i32 = 0;

/// Command line usage error (unknown command, bad arguments)
pub const USAGE: i32 = 64;

/// Cannot open input (workspace path missing)
pub const NOINPUT: i32 = 66;

/// Service unavailable (docker or compose not installed)
pub const UNAVAILABLE: i32 = 69;

/// Internal software error (external command failed)
pub const SOFTWARE: i32 = 70;

/// Input/output error
pub const IOERR: i32 = 74;

/// Configuration error
pub const CONFIG: i32 = 78;
