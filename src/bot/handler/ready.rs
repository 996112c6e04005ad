//! Ready event handler for bot initialization.
//!
//! Fired once per gateway connection after the handshake. Slash commands are registered
//! here so a development guild sees changes immediately while production registers them
//! globally.

use serenity::all::{Command, Context, GuildId, Ready};

use crate::bot::command;

/// Handles the ready event when the bot connects to Discord.
///
/// # Arguments
/// - `ctx` - Discord context used to register commands
/// - `ready` - Ready event data containing bot user information
/// - `command_guild_id` - Guild to register commands in, or `None` for global commands
pub async fn handle_ready(ctx: Context, ready: Ready, command_guild_id: Option<u64>) {
    tracing::info!("{} is connected to Discord", ready.user.name);

    let commands = command::all();
    let count = commands.len();

    let result = match command_guild_id {
        Some(guild_id) => GuildId::new(guild_id)
            .set_commands(&ctx.http, commands)
            .await
            .map(|_| format!("guild {}", guild_id)),
        None => Command::set_global_commands(&ctx.http, commands)
            .await
            .map(|_| "all guilds".to_string()),
    };

    match result {
        Ok(scope) => tracing::info!("Registered {} slash commands for {}", count, scope),
        Err(e) => tracing::error!("Failed to register slash commands: {}", e),
    }
}
