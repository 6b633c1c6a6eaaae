//! Stable identifiers for checks and finding codes.
//!
//! `check_id` is a dotted namespace. `code` is a short snake_case discriminator.

// Checks
pub const CHECK_GLOBALS_UNUSED: &str = "globals.unused";
pub const CHECK_DEPS_CONFLICT: &str = "deps.conflict";
pub const CHECK_DEPS_UNUSED: &str = "deps.unused";

/// Every check, in the order the engine runs them.
pub const ALL_CHECKS: [&str; 3] = [CHECK_GLOBALS_UNUSED, CHECK_DEPS_CONFLICT, CHECK_DEPS_UNUSED];

// Codes: globals.unused
pub const CODE_UNUSED_GLOBAL: &str = "unused_global";

// Codes: deps.conflict
pub const CODE_SPECIFIC_CONFLICT: &str = "specific_conflict";

// Codes: deps.unused
pub const CODE_UNUSED_IN_PACKAGE: &str = "unused_in_package";
pub const CODE_NO_INFORMATION: &str = "no_information";
pub const CODE_SEARCH_TIMED_OUT: &str = "search_timed_out";

// Tool-level
pub const CODE_MANIFEST_NOT_FOUND: &str = "manifest_not_found";
pub const CODE_MANIFEST_UNREADABLE: &str = "manifest_unreadable";
