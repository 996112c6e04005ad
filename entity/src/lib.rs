//! SeaORM entities for the bot's durable deferred-work records.
//!
//! Each table holds one kind of time-deferred action (reminder delivery, poll
//! finalization, giveaway finalization). Every row carries a `due_time` and a
//! `completed` flag; the flag is the single source of truth for whether the
//! action has been carried out.

pub mod prelude;

pub mod giveaway;
pub mod poll;
pub mod reminder;
