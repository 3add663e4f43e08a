//! CLI Exit Code Registry
//!
//! This is the single source of truth for all CLI exit codes.
//! Exit codes are part of the shell contract. Scripts rely on them.
//!
//! # Exit Code Ranges
//!
//! | Range   | Domain           | Description                              |
//! |---------|------------------|------------------------------------------|
//! | 0       | Universal        | Success                                  |
//! | 1       | Universal        | General error (unspecified)              |
//! | 2       | Universal        | CLI usage error (bad args)               |
//! | 3-4     | input            | Unreadable or malformed input files      |
//! | 5-9     | apply            | Scripted editor operations               |
//!
//! # Adding New Exit Codes
//!
//! 1. Add the constant in the appropriate range
//! 2. Document what triggers it
//! 3. Update the table above
//! 4. Wire it into the relevant command's error handling

use docgrid_engine::ops::BatchError;

// =============================================================================
// Universal (0-2)
// =============================================================================

/// Success - command completed without errors.
pub const EXIT_SUCCESS: u8 = 0;

/// General error - unspecified failure.
/// Avoid using this; prefer a specific error code.
pub const EXIT_ERROR: u8 = 1;

/// Usage error - bad arguments, missing required options.
pub const EXIT_USAGE: u8 = 2;

// =============================================================================
// Input (3-4)
// =============================================================================

/// Input is not valid JSON, or not a section list / document / op list.
pub const EXIT_PARSE: u8 = 3;

/// Input file could not be read, or output could not be written.
pub const EXIT_IO: u8 = 4;

// =============================================================================
// Apply (5-9)
// =============================================================================

/// Atomic batch rejected: an op addressed a section that does not exist, or
/// the editor was not open. Nothing was written.
pub const EXIT_APPLY_INVALID_OP: u8 = 5;

/// Non-atomic batch stopped early; output holds the ops before the failure.
pub const EXIT_APPLY_PARTIAL: u8 = 6;

/// Map a batch error to its exit code.
pub fn apply_exit_code(err: &BatchError, atomic: bool) -> u8 {
    if !atomic {
        return EXIT_APPLY_PARTIAL;
    }
    match err.code.as_str() {
        "invalid_section" | "editor_closed" => EXIT_APPLY_INVALID_OP,
        _ => EXIT_ERROR,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn batch_error(code: &str) -> BatchError {
        BatchError { code: code.to_string(), message: String::new(), op_index: 0 }
    }

    #[test]
    fn test_apply_exit_codes() {
        assert_eq!(apply_exit_code(&batch_error("invalid_section"), true), EXIT_APPLY_INVALID_OP);
        assert_eq!(apply_exit_code(&batch_error("invalid_section"), false), EXIT_APPLY_PARTIAL);
        assert_eq!(apply_exit_code(&batch_error("editor_closed"), true), EXIT_APPLY_INVALID_OP);
        assert_eq!(apply_exit_code(&batch_error("editor_closed"), false), EXIT_APPLY_PARTIAL);
        assert_eq!(apply_exit_code(&batch_error("unknown"), true), EXIT_ERROR);
    }
}
