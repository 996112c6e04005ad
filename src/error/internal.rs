use std::num::ParseIntError;
use thiserror::Error;

/// Internal issues with the codebase indicating unexpected behavior & possible bugs
#[derive(Error, Debug)]
pub enum InternalError {
    /// Failure to parse id from String
    ///
    /// Discord snowflakes are stored as text; a row whose id does not parse is
    /// corrupt and cannot be finalized.
    #[error("Failed to parse ID from String '{value}': {source}")]
    ParseStringId {
        /// The string value that failed to parse
        value: String,
        /// The underlying parse error
        #[source]
        source: ParseIntError,
    },

    /// A stored id of zero, which Discord never assigns.
    #[error("Stored ID '{value}' is zero")]
    ZeroStringId {
        /// The stored string value
        value: String,
    },

    /// Recovery of one stored record panicked.
    #[error("Recovery of {kind} {record_id} panicked")]
    RecoveryPanicked {
        /// Record kind, as logged
        kind: String,
        /// Database id of the record
        record_id: i32,
    },

    /// A deferred task panicked while executing.
    ///
    /// Caught by the task processor so the loop survives.
    #[error("Task {task_id} panicked")]
    TaskPanicked {
        /// Identifier of the task that panicked
        task_id: uuid::Uuid,
    },
}
