//! Database repository layer for deferred-work records.
//!
//! Each repository wraps a borrowed `DatabaseConnection` and exposes the persistence
//! contract the scheduler relies on: `create`, `get_by_id`, `list_incomplete`,
//! `mark_completed` and `delete`. `mark_completed` is an UPDATE of the `completed` flag,
//! so applying it twice, or to a row that no longer exists, is not an error.

pub mod giveaway;
pub mod poll;
pub mod reminder;

#[cfg(test)]
mod test;
