//! Business logic for reminders, polls and giveaways.
//!
//! Each service borrows the database and the platform for one operation. The
//! `*_task` functions wrap a record in a `DeferredTask` whose payload rebuilds the service
//! from owned handles once the record is due.

pub mod giveaway;
pub mod poll;
pub mod reminder;
