mod bot;
mod config;
mod data;
mod error;
mod model;
mod platform;
mod scheduler;
mod service;
mod startup;
mod state;
mod util;

use serenity::http::Http;
use std::sync::Arc;
use tokio::signal;
use tokio_util::sync::CancellationToken;

use crate::{
    config::Config,
    error::AppError,
    platform::{discord::SerenityPlatform, Platform},
    scheduler::{
        inflight::InFlight, processor::TaskProcessor, queue::task_queue,
        recovery::RecoverySequencer, sweep::start_form_sweep,
    },
    state::{form::FormStores, AppState},
};

#[tokio::main]
async fn main() -> Result<(), AppError> {
    dotenvy::dotenv().ok();
    let config = Config::from_env()?;
    startup::init_tracing(&config);

    let db = startup::connect_to_database(&config).await?;

    let discord_http = Arc::new(Http::new(&config.discord_bot_token));
    let platform: Arc<dyn Platform> = Arc::new(SerenityPlatform::new(discord_http));

    let cancel = CancellationToken::new();

    // The processor must be draining the queue before recovery enqueues into it
    let (queue, receiver) = task_queue(config.task_queue_capacity);
    let processor = tokio::spawn(TaskProcessor::new(receiver).run(cancel.clone()));

    let state = AppState::new(
        db,
        platform,
        queue,
        InFlight::new(),
        FormStores::default(),
        config.support_channel_id,
    );

    tracing::info!("Recovering pending reminders, polls and giveaways");
    RecoverySequencer::new(state.deferred_context(), cancel.clone())
        .run()
        .await;

    start_form_sweep(
        state.forms.clone(),
        config.form_state_sweep_interval(),
        config.form_state_max_age(),
        cancel.clone(),
    )
    .await?;

    let client = bot::start::init_bot(&config, state).await?;
    let shard_manager = client.shard_manager.clone();

    let bot = tokio::spawn(async move {
        if let Err(e) = bot::start::start_bot(client).await {
            tracing::error!("Discord bot error: {}", e);
        }
    });

    shutdown_signal().await;

    cancel.cancel();
    shard_manager.shutdown_all().await;

    if let Err(e) = processor.await {
        tracing::error!("Task processor ended abnormally: {}", e);
    }
    if let Err(e) = bot.await {
        tracing::error!("Discord bot task ended abnormally: {}", e);
    }

    tracing::info!("Shutdown complete");

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to listen for SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received, starting graceful shutdown");
}
