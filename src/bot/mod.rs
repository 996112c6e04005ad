//! Discord bot integration.
//!
//! The bot registers the slash commands on connect and routes every interaction to the
//! command modules: slash commands by name, components and modals by custom-id prefix.
//! Deferred work started by a command is handed to the task queue in `AppState`; the bot
//! itself never waits for a due time.
//!
//! # Gateway Intents
//!
//! - `GUILDS` - Guild availability, needed for interactions in guild channels
//! - `GUILD_MESSAGES` - Messages in guild channels the polls and giveaways live in
//! - `GUILD_MESSAGE_REACTIONS` - Reactions users vote and enter with

pub mod command;
pub mod handler;
pub mod start;
