//! Poll factory for creating test poll entities.

use chrono::{DateTime, Duration, Utc};
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

use crate::factory::helpers::next_snowflake;

/// Factory for creating test polls with customizable fields.
///
/// Answers and emojis are stored as JSON arrays, matching how the bot persists them.
pub struct PollFactory<'a> {
    db: &'a DatabaseConnection,
    guild_id: String,
    channel_id: String,
    message_id: String,
    question: String,
    answers: Vec<String>,
    emojis: Vec<String>,
    due_time: DateTime<Utc>,
    completed: bool,
    created_by: String,
}

impl<'a> PollFactory<'a> {
    /// Creates a new PollFactory with default values.
    ///
    /// Defaults:
    /// - guild/channel/message/creator ids: unique snowflakes
    /// - question: `"Are we raiding tonight?"`
    /// - answers: `["Yes", "No"]` with emojis `["1️⃣", "2️⃣"]`
    /// - due_time: 1 hour from now
    /// - completed: `false`
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self {
            db,
            guild_id: next_snowflake(),
            channel_id: next_snowflake(),
            message_id: next_snowflake(),
            question: "Are we raiding tonight?".to_string(),
            answers: vec!["Yes".to_string(), "No".to_string()],
            emojis: vec!["1️⃣".to_string(), "2️⃣".to_string()],
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

    pub fn question(mut self, question: impl Into<String>) -> Self {
        self.question = question.into();
        self
    }

    pub fn options(mut self, answers: Vec<&str>, emojis: Vec<&str>) -> Self {
        self.answers = answers.into_iter().map(String::from).collect();
        self.emojis = emojis.into_iter().map(String::from).collect();
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

    /// Inserts the poll.
    ///
    /// # Returns
    /// - `Ok(poll::Model)` - The inserted poll
    /// - `Err(DbErr)` - Database error during insert
    pub async fn build(self) -> Result<entity::poll::Model, DbErr> {
        entity::poll::ActiveModel {
            guild_id: ActiveValue::Set(self.guild_id),
            channel_id: ActiveValue::Set(self.channel_id),
            message_id: ActiveValue::Set(self.message_id),
            question: ActiveValue::Set(self.question),
            answers: ActiveValue::Set(serde_json::json!(self.answers).to_string()),
            emojis: ActiveValue::Set(serde_json::json!(self.emojis).to_string()),
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

/// Creates a pending two-option poll due in one hour.
pub async fn create_poll(db: &DatabaseConnection) -> Result<entity::poll::Model, DbErr> {
    PollFactory::new(db).build().await
}
