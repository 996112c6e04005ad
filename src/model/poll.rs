//! Parameter models for poll operations.
//!
//! Answers and their reaction emojis are stored as two JSON string arrays and paired by
//! position.

use chrono::{DateTime, Utc};

use crate::{error::AppError, util::parse::parse_u64_from_string};

/// Minimum number of answers a poll accepts.
pub const MIN_POLL_OPTIONS: usize = 2;

/// Maximum number of answers a poll accepts.
pub const MAX_POLL_OPTIONS: usize = 10;

/// A single answer together with the reaction users vote with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PollOption {
    pub answer: String,
    pub emoji: String,
}

/// A persisted poll with ids parsed and options decoded.
#[derive(Debug, Clone, PartialEq)]
pub struct PollParam {
    pub id: i32,
    pub guild_id: u64,
    pub channel_id: u64,
    pub message_id: u64,
    pub question: String,
    pub options: Vec<PollOption>,
    pub due_time: DateTime<Utc>,
    pub completed: bool,
    pub created_at: DateTime<Utc>,
    pub created_by: u64,
}

impl PollParam {
    /// Converts an entity model to a poll param.
    ///
    /// Options beyond the shorter of the two stored arrays are dropped.
    ///
    /// # Returns
    /// - `Ok(PollParam)` - The converted poll
    /// - `Err(AppError::SerdeErr)` - Answers or emojis are not JSON string arrays
    /// - `Err(AppError::InternalErr)` - A stored snowflake does not parse
    pub fn from_entity(entity: entity::poll::Model) -> Result<Self, AppError> {
        let answers: Vec<String> = serde_json::from_str(&entity.answers)?;
        let emojis: Vec<String> = serde_json::from_str(&entity.emojis)?;

        let options = answers
            .into_iter()
            .zip(emojis)
            .map(|(answer, emoji)| PollOption { answer, emoji })
            .collect();

        Ok(Self {
            id: entity.id,
            guild_id: parse_u64_from_string(&entity.guild_id)?,
            channel_id: parse_u64_from_string(&entity.channel_id)?,
            message_id: parse_u64_from_string(&entity.message_id)?,
            question: entity.question,
            options,
            due_time: entity.due_time,
            completed: entity.completed,
            created_at: entity.created_at,
            created_by: parse_u64_from_string(&entity.created_by)?,
        })
    }
}

/// Parameters for creating a new poll record after its message has been posted.
#[derive(Debug, Clone)]
pub struct CreatePollParam {
    pub guild_id: u64,
    pub channel_id: u64,
    pub message_id: u64,
    pub question: String,
    pub options: Vec<PollOption>,
    pub due_time: DateTime<Utc>,
    pub created_by: u64,
}
