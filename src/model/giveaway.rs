//! Parameter models for giveaway operations.

use chrono::{DateTime, Utc};

use crate::{error::AppError, util::parse::parse_u64_from_string};

/// A persisted giveaway with ids parsed.
#[derive(Debug, Clone, PartialEq)]
pub struct GiveawayParam {
    pub id: i32,
    pub guild_id: u64,
    pub channel_id: u64,
    pub message_id: u64,
    pub prize: String,
    /// Number of winners to draw; never negative once converted.
    pub winner_count: usize,
    /// Reaction users enter with, unicode or `<:name:id>` custom emoji.
    pub reaction_emoji: String,
    pub due_time: DateTime<Utc>,
    pub completed: bool,
    pub created_at: DateTime<Utc>,
    pub created_by: u64,
}

impl GiveawayParam {
    /// Converts an entity model to a giveaway param.
    ///
    /// A negative stored winner count is read as zero.
    ///
    /// # Returns
    /// - `Ok(GiveawayParam)` - The converted giveaway
    /// - `Err(AppError::InternalErr)` - A stored snowflake does not parse
    pub fn from_entity(entity: entity::giveaway::Model) -> Result<Self, AppError> {
        Ok(Self {
            id: entity.id,
            guild_id: parse_u64_from_string(&entity.guild_id)?,
            channel_id: parse_u64_from_string(&entity.channel_id)?,
            message_id: parse_u64_from_string(&entity.message_id)?,
            prize: entity.prize,
            winner_count: usize::try_from(entity.winner_count).unwrap_or(0),
            reaction_emoji: entity.reaction_emoji,
            due_time: entity.due_time,
            completed: entity.completed,
            created_at: entity.created_at,
            created_by: parse_u64_from_string(&entity.created_by)?,
        })
    }
}

/// Parameters for creating a new giveaway record after its message has been posted.
#[derive(Debug, Clone)]
pub struct CreateGiveawayParam {
    pub guild_id: u64,
    pub channel_id: u64,
    pub message_id: u64,
    pub prize: String,
    pub winner_count: usize,
    pub reaction_emoji: String,
    pub due_time: DateTime<Utc>,
    pub created_by: u64,
}
