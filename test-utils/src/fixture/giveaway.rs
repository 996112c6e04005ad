//! Giveaway fixtures for creating in-memory test data.

use chrono::{DateTime, Duration, Utc};
use entity::giveaway;

/// Default test guild ID for giveaways.
pub const DEFAULT_GUILD_ID: &str = "987654321";

/// Default test channel ID for giveaways.
pub const DEFAULT_CHANNEL_ID: &str = "333333333";

/// Default test message ID for giveaways.
pub const DEFAULT_MESSAGE_ID: &str = "444444444";

/// Default test creator ID for giveaways.
pub const DEFAULT_CREATED_BY: &str = "123456789";

/// Default giveaway prize.
pub const DEFAULT_PRIZE: &str = "Nitro Classic";

/// Default giveaway reaction emoji.
pub const DEFAULT_REACTION_EMOJI: &str = "🎉";

/// Creates a giveaway entity model with default values.
///
/// # Default Values
/// - id: `1`
/// - prize: `"Nitro Classic"`
/// - winner_count: `1`
/// - reaction_emoji: `"🎉"`
/// - due_time: 10 minutes from now
/// - completed: `false`
///
/// # Returns
/// - `giveaway::Model` - In-memory giveaway entity
pub fn entity() -> giveaway::Model {
    entity_builder().build()
}

/// Creates a giveaway entity builder for customization.
pub fn entity_builder() -> GiveawayEntityBuilder {
    let now = Utc::now();
    GiveawayEntityBuilder {
        id: 1,
        message_id: DEFAULT_MESSAGE_ID.to_string(),
        prize: DEFAULT_PRIZE.to_string(),
        winner_count: 1,
        reaction_emoji: DEFAULT_REACTION_EMOJI.to_string(),
        due_time: now + Duration::minutes(10),
        completed: false,
        created_at: now,
    }
}

/// Builder for creating customized giveaway entity models.
pub struct GiveawayEntityBuilder {
    id: i32,
    message_id: String,
    prize: String,
    winner_count: i32,
    reaction_emoji: String,
    due_time: DateTime<Utc>,
    completed: bool,
    created_at: DateTime<Utc>,
}

impl GiveawayEntityBuilder {
    pub fn id(mut self, id: i32) -> Self {
        self.id = id;
        self
    }

    pub fn message_id(mut self, message_id: impl Into<String>) -> Self {
        self.message_id = message_id.into();
        self
    }

    pub fn prize(mut self, prize: impl Into<String>) -> Self {
        self.prize = prize.into();
        self
    }

    pub fn winner_count(mut self, winner_count: i32) -> Self {
        self.winner_count = winner_count;
        self
    }

    pub fn reaction_emoji(mut self, reaction_emoji: impl Into<String>) -> Self {
        self.reaction_emoji = reaction_emoji.into();
        self
    }

    pub fn due_time(mut self, due_time: DateTime<Utc>) -> Self {
        self.due_time = due_time;
        self
    }

    pub fn completed(mut self, completed: bool) -> Self {
        self.completed = completed;
        self
    }

    pub fn build(self) -> giveaway::Model {
        giveaway::Model {
            id: self.id,
            guild_id: DEFAULT_GUILD_ID.to_string(),
            channel_id: DEFAULT_CHANNEL_ID.to_string(),
            message_id: self.message_id,
            prize: self.prize,
            winner_count: self.winner_count,
            reaction_emoji: self.reaction_emoji,
            due_time: self.due_time,
            completed: self.completed,
            created_at: self.created_at,
            created_by: DEFAULT_CREATED_BY.to_string(),
        }
    }
}
