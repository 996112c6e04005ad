//! Giveaway factory for creating test giveaway entities.

use chrono::{DateTime, Duration, Utc};
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

use crate::factory::helpers::next_snowflake;

/// Factory for creating test giveaways with customizable fields.
pub struct GiveawayFactory<'a> {
    db: &'a DatabaseConnection,
    guild_id: String,
    channel_id: String,
    message_id: String,
    prize: String,
    winner_count: i32,
    reaction_emoji: String,
    due_time: DateTime<Utc>,
    completed: bool,
    created_by: String,
}

impl<'a> GiveawayFactory<'a> {
    /// Creates a new GiveawayFactory with default values.
    ///
    /// Defaults:
    /// - guild/channel/message/creator ids: unique snowflakes
    /// - prize: `"Steam gift card"`
    /// - winner_count: `1`
    /// - reaction_emoji: `"🎉"`
    /// - due_time: 1 hour from now
    /// - completed: `false`
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self {
            db,
            guild_id: next_snowflake(),
            channel_id: next_snowflake(),
            message_id: next_snowflake(),
            prize: "Steam gift card".to_string(),
            winner_count: 1,
            reaction_emoji: "🎉".to_string(),
            due_time: Utc::now() + Duration::hours(1),
            completed: false,
            created_by: next_snowflake(),
        }
    }

    pub fn channel_id(mut self, channel_id: impl Into<String>) -> Self {
        self.channel_id = channel_id.into();
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

    pub fn due_time(mut self, due_time: DateTime<Utc>) -> Self {
        self.due_time = due_time;
        self
    }

    pub fn completed(mut self, completed: bool) -> Self {
        self.completed = completed;
        self
    }

    /// Inserts the giveaway.
    ///
    /// # Returns
    /// - `Ok(giveaway::Model)` - The inserted giveaway
    /// - `Err(DbErr)` - Database error during insert
    pub async fn build(self) -> Result<entity::giveaway::Model, DbErr> {
        entity::giveaway::ActiveModel {
            guild_id: ActiveValue::Set(self.guild_id),
            channel_id: ActiveValue::Set(self.channel_id),
            message_id: ActiveValue::Set(self.message_id),
            prize: ActiveValue::Set(self.prize),
            winner_count: ActiveValue::Set(self.winner_count),
            reaction_emoji: ActiveValue::Set(self.reaction_emoji),
            due_time: ActiveValue::Set(self.due_time),
            completed: ActiveValue::Set(self.completed),
            created_at: ActiveValue::Set(Utc::now()),
            created_by: ActiveValue::Set(self.created_by),
            ..Default::default()
        }
        .insert(self.db)
        .await
    }
}

/// Creates a pending single-winner giveaway due in one hour.
pub async fn create_giveaway(db: &DatabaseConnection) -> Result<entity::giveaway::Model, DbErr> {
    GiveawayFactory::new(db).build().await
}
