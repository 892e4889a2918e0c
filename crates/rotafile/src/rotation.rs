//! Rotation policy and mutable writer state

use std::fs::File;

/// True when the incoming record must go to a new file.
///
/// The check is inclusive: a record that would exactly fill the limit is
/// written to the next file, so records are never split across files.
pub(crate) fn should_rotate(current_size: u64, incoming_len: u64, max_size: u64) -> bool {
    current_size + incoming_len >= max_size
}

/// State of the currently open file, guarded by the writer's lock
#[derive(Debug)]
pub(crate) struct RotationState {
    /// Period key the current file was opened under
    pub period_key: String,
    /// Index of the current file, unique within its period
    pub index: u64,
    /// Bytes written to the current file since open or recovery
    pub size: u64,
    /// Open handle; `None` after a failed rotation open
    pub file: Option<File>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_under_limit() {
        assert!(!should_rotate(0, 5, 10));
        assert!(!should_rotate(4, 5, 10));
    }

    #[test]
    fn test_exactly_at_limit_rotates() {
        assert!(should_rotate(5, 5, 10));
        assert!(should_rotate(10, 0, 10));
    }

    #[test]
    fn test_over_limit_rotates() {
        assert!(should_rotate(10, 1, 10));
        assert!(should_rotate(0, 11, 10));
    }
}
