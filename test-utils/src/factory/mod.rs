//! Factory methods for creating test data.
//!
//! This module provides factory methods for creating deferred-work records with sensible
//! defaults, reducing boilerplate in tests. Each record kind has its own factory module
//! with both a `Factory` struct for customization and a `create_*` convenience function
//! for quick default creation.
//!
//! # Basic Usage
//!
//! ```rust,ignore
//! use test_utils::factory;
//!
//! #[tokio::test]
//! async fn test_example() -> Result<(), sea_orm::DbErr> {
//!     let db = /* ... */;
//!
//!     // Create with defaults (due one hour from now, not completed)
//!     let reminder = factory::create_reminder(&db, "123456789").await?;
//!
//!     // Customize through the builder
//!     let poll = factory::poll::PollFactory::new(&db)
//!         .due_time(chrono::Utc::now() - chrono::Duration::minutes(5))
//!         .build()
//!         .await?;
//!
//!     Ok(())
//! }
//! ```
//!
//! # Available Factories
//!
//! - `reminder` - Create reminder entities
//! - `poll` - Create poll entities
//! - `giveaway` - Create giveaway entities
//! - `helpers` - Unique id generation shared across factories

pub mod giveaway;
pub mod helpers;
pub mod poll;
pub mod reminder;

// Re-export commonly used factory functions for concise usage
pub use giveaway::create_giveaway;
pub use poll::create_poll;
pub use reminder::create_reminder;
