//! Test fixtures providing reusable test data without database insertion.
//!
//! This module contains fixture functions that create in-memory test data structures
//! for use in unit tests. Unlike factories, fixtures do NOT insert data into the database.
//!
//! # When to Use Fixtures
//!
//! - **Unit testing**: Test finalization logic without database overhead
//! - **Mocking**: Feed records straight into services backed by a mock platform
//! - **Conversion tests**: Test entity to param conversion without persistence
//!
//! # Example
//!
//! ```rust,ignore
//! use test_utils::fixture;
//!
//! // Create in-memory entity model (no DB)
//! let poll = fixture::poll::entity();
//!
//! // Create with custom fields
//! let giveaway = fixture::giveaway::entity_builder()
//!     .winner_count(3)
//!     .build();
//! ```

pub mod giveaway;
pub mod poll;
pub mod reminder;

pub use giveaway::{entity as giveaway_entity, entity_builder as giveaway_entity_builder};
pub use poll::{entity as poll_entity, entity_builder as poll_entity_builder};
pub use reminder::{entity as reminder_entity, entity_builder as reminder_entity_builder};
