//! Test factories for creating Serenity API objects.
//!
//! This module provides factory functions for creating Serenity structs for testing
//! purposes. These factories create valid Serenity objects by deserializing JSON,
//! simulating what Discord's API would return.
//!
//! # Usage
//!
//! ```rust,ignore
//! use test_utils::serenity::create_test_user;
//!
//! let member = create_test_user(123456789, "alice", false);
//! let bot = create_test_user(987654321, "tsgs", true);
//! ```
//!
//! # Available Factories
//!
//! - `user::create_test_user` - Create Serenity User objects

pub mod user;

pub use user::create_test_user;
