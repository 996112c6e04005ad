//! Poll fixtures for creating in-memory test data.

use chrono::{DateTime, Duration, Utc};
use entity::poll;

/// Default test guild ID for polls.
pub const DEFAULT_GUILD_ID: &str = "987654321";

/// Default test channel ID for polls.
pub const DEFAULT_CHANNEL_ID: &str = "111111111";

/// Default test message ID for polls.
pub const DEFAULT_MESSAGE_ID: &str = "222222222";

/// Default test creator ID for polls.
pub const DEFAULT_CREATED_BY: &str = "123456789";

/// Default poll question.
pub const DEFAULT_QUESTION: &str = "Pizza or tacos?";

/// Creates a poll entity model with default values.
///
/// # Default Values
/// - id: `1`
/// - guild/channel/message ids: the `DEFAULT_*` constants
/// - question: `"Pizza or tacos?"`
/// - answers: `["Pizza", "Tacos"]`
/// - emojis: `["1️⃣", "2️⃣"]`
/// - due_time: 10 minutes from now
/// - completed: `false`
///
/// # Returns
/// - `poll::Model` - In-memory poll entity
///
/// # Example
///
/// ```rust,ignore
/// use test_utils::fixture;
///
/// let poll = fixture::poll::entity();
/// assert_eq!(poll.question, "Pizza or tacos?");
/// ```
pub fn entity() -> poll::Model {
    entity_builder().build()
}

/// Creates a poll entity builder for customization.
pub fn entity_builder() -> PollEntityBuilder {
    let now = Utc::now();
    PollEntityBuilder {
        id: 1,
        channel_id: DEFAULT_CHANNEL_ID.to_string(),
        message_id: DEFAULT_MESSAGE_ID.to_string(),
        question: DEFAULT_QUESTION.to_string(),
        answers: vec!["Pizza".to_string(), "Tacos".to_string()],
        emojis: vec!["1️⃣".to_string(), "2️⃣".to_string()],
        due_time: now + Duration::minutes(10),
        completed: false,
        created_at: now,
    }
}

/// Builder for creating customized poll entity models.
pub struct PollEntityBuilder {
    id: i32,
    channel_id: String,
    message_id: String,
    question: String,
    answers: Vec<String>,
    emojis: Vec<String>,
    due_time: DateTime<Utc>,
    completed: bool,
    created_at: DateTime<Utc>,
}

impl PollEntityBuilder {
    pub fn id(mut self, id: i32) -> Self {
        self.id = id;
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

    /// Sets answers and their reaction emojis, paired by position.
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

    pub fn build(self) -> poll::Model {
        poll::Model {
            id: self.id,
            guild_id: DEFAULT_GUILD_ID.to_string(),
            channel_id: self.channel_id,
            message_id: self.message_id,
            question: self.question,
            answers: serde_json::json!(self.answers).to_string(),
            emojis: serde_json::json!(self.emojis).to_string(),
            due_time: self.due_time,
            completed: self.completed,
            created_at: self.created_at,
            created_by: DEFAULT_CREATED_BY.to_string(),
        }
    }
}
