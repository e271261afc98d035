//! Process exit statuses.
//!
//! Automation can tell "nothing ran" (`FATAL`, `DECLINED`) apart from
//! "something ran and failed" (`DISPATCH_FAILED`).

/// Every dispatched repository succeeded, or none was dispatched.
pub const SUCCESS: u8 = 0;

/// At least one repository's git invocation failed.
pub const DISPATCH_FAILED: u8 = 1;

/// Usage, configuration or discovery error before any dispatch.
pub const FATAL: u8 = 2;

/// The auto-discovered filter was not confirmed.
pub const DECLINED: u8 = 3;

/// Human readable meaning of an exit status.
pub fn describe(code: u8) -> &'static str {
    match code {
        SUCCESS => "success",
        DISPATCH_FAILED => "one or more repositories failed",
        FATAL => "aborted before dispatch",
        DECLINED => "filtering not confirmed",
        _ => "unknown",
    }
}
