//! Shared helper utilities for factory methods.
//!
//! This module provides common utilities used across all factory modules,
//! most importantly unique id generation for Discord snowflakes.

/// Counter for generating unique IDs in tests.
///
/// This atomic counter ensures each factory-created entity gets a unique
/// identifier to prevent collisions in tests.
static COUNTER: std::sync::atomic::AtomicU64 = std::sync::atomic::AtomicU64::new(1);

/// Gets the next unique counter value for test data.
///
/// # Returns
/// - `u64` - Next unique counter value
pub fn next_id() -> u64 {
    COUNTER.fetch_add(1, std::sync::atomic::Ordering::SeqCst)
}

/// Gets a unique snowflake-looking id string.
///
/// Offsets the counter into the range real Discord snowflakes occupy so values
/// parse as `u64` and never collide with small literal ids used in assertions.
///
/// # Returns
/// - `String` - Unique numeric id
pub fn next_snowflake() -> String {
    (100_000_000_000_000_000 + next_id()).to_string()
}
