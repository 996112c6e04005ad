//! Domain models and operation-specific parameter types.
//!
//! Repositories hand SeaORM entity models to the service layer, which converts them with
//! `from_entity` before doing any work. Discord snowflakes are parsed to `u64` at this
//! boundary, so a corrupt row fails once, here, instead of deep inside a finalization.

pub mod giveaway;
pub mod poll;
pub mod reminder;
