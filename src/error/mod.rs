//! Error types for the bot.
//!
//! This module provides the application's error hierarchy. The `AppError` enum is the
//! single error type crossing layer boundaries: repositories return `DbErr`, which the
//! services and scheduler lift into `AppError` with `?`. Command handlers turn the
//! user-facing variants (`BadRequest`, `NotFound`) into ephemeral replies and log the rest.

pub mod config;
pub mod internal;

use thiserror::Error;

use crate::error::{config::ConfigError, internal::InternalError};

/// Top-level application error type.
///
/// Aggregates all possible error types that can occur in the bot. Most variants use
/// `#[from]` for automatic error conversion. Shutdown cancellation is deliberately not
/// represented here; a cancelled deferred task reports `TaskOutcome::Cancelled` instead.
#[derive(Error, Debug)]
pub enum AppError {
    /// Configuration error during startup or environment variable loading.
    #[error(transparent)]
    ConfigErr(#[from] ConfigError),

    /// Database operation error from SeaORM.
    #[error(transparent)]
    DbErr(#[from] sea_orm::DbErr),

    /// Discord API error from Serenity.
    ///
    /// Boxed due to large size.
    #[error(transparent)]
    DiscordErr(#[from] Box<serenity::Error>),

    /// Cron scheduler error from the form-state sweep job.
    #[error(transparent)]
    SchedulerErr(#[from] tokio_cron_scheduler::JobSchedulerError),

    /// JSON encoding or decoding error for poll answers and emojis stored as text.
    #[error(transparent)]
    SerdeErr(#[from] serde_json::Error),

    /// Internal issue indicating a likely bug or corrupt stored data.
    #[error(transparent)]
    InternalErr(#[from] InternalError),

    /// The task queue's consumer has stopped, so the task cannot be accepted.
    #[error("Task queue is closed")]
    QueueClosed,

    /// Resource not found error.
    ///
    /// # Fields
    /// - Message describing what resource was not found
    #[error("{0}")]
    NotFound(String),

    /// Invalid user input.
    ///
    /// The message is shown to the user who issued the command.
    ///
    /// # Fields
    /// - Message describing what was invalid about the input
    #[error("{0}")]
    BadRequest(String),
}

/// Manual conversion from serenity::Error to AppError.
///
/// Boxes the error to reduce the size of the AppError enum, as serenity::Error
/// is very large and would make all AppError variants larger if not boxed.
impl From<serenity::Error> for AppError {
    fn from(err: serenity::Error) -> Self {
        AppError::DiscordErr(Box::new(err))
    }
}
