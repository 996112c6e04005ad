use serenity::all::{Client, GatewayIntents};

use crate::{bot::handler::Handler, config::Config, error::AppError, state::AppState};

/// Builds the Discord client without connecting it.
///
/// Connecting is left to the caller so that recovery can finish before the first
/// interaction arrives.
///
/// # Arguments
/// - `config` - Application configuration with the bot token and command scope
/// - `state` - Shared handles for the interaction handlers
///
/// # Returns
/// - `Ok(Client)` - Client ready to `start()`
/// - `Err(AppError::DiscordErr)` - Client construction failed
pub async fn init_bot(config: &Config, state: AppState) -> Result<Client, AppError> {
    let intents = GatewayIntents::GUILDS
        | GatewayIntents::GUILD_MESSAGES
        | GatewayIntents::GUILD_MESSAGE_REACTIONS;

    let handler = Handler::new(
        state,
        config.discord_guild_id.filter(|_| !config.is_production()),
    );

    let client = Client::builder(&config.discord_bot_token, intents)
        .event_handler(handler)
        .await?;

    Ok(client)
}

/// Connects to the gateway and processes events until the shard manager shuts down.
pub async fn start_bot(mut client: Client) -> Result<(), AppError> {
    tracing::info!("Starting Discord bot...");

    client.start().await?;

    Ok(())
}
