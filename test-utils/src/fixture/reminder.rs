//! Reminder fixtures for creating in-memory test data.

use chrono::{DateTime, Duration, Utc};
use entity::reminder;

/// Default test user ID for reminders.
pub const DEFAULT_USER_ID: &str = "123456789";

/// Default reminder text.
pub const DEFAULT_TASK: &str = "Check the oven";

/// Creates a reminder entity model with default values.
///
/// # Default Values
/// - id: `1`
/// - user_id: `"123456789"`
/// - task: `"Check the oven"`
/// - due_time: 10 minutes from now
/// - completed: `false`
///
/// # Returns
/// - `reminder::Model` - In-memory reminder entity
pub fn entity() -> reminder::Model {
    entity_builder().build()
}

/// Creates a reminder entity builder for customization.
pub fn entity_builder() -> ReminderEntityBuilder {
    let now = Utc::now();
    ReminderEntityBuilder {
        id: 1,
        user_id: DEFAULT_USER_ID.to_string(),
        task: DEFAULT_TASK.to_string(),
        due_time: now + Duration::minutes(10),
        completed: false,
        created_at: now,
    }
}

/// Builder for creating customized reminder entity models.
pub struct ReminderEntityBuilder {
    id: i32,
    user_id: String,
    task: String,
    due_time: DateTime<Utc>,
    completed: bool,
    created_at: DateTime<Utc>,
}

impl ReminderEntityBuilder {
    pub fn id(mut self, id: i32) -> Self {
        self.id = id;
        self
    }

    pub fn user_id(mut self, user_id: impl Into<String>) -> Self {
        self.user_id = user_id.into();
        self
    }

    pub fn task(mut self, task: impl Into<String>) -> Self {
        self.task = task.into();
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

    pub fn build(self) -> reminder::Model {
        reminder::Model {
            id: self.id,
            user_id: self.user_id,
            task: self.task,
            due_time: self.due_time,
            completed: self.completed,
            created_at: self.created_at,
        }
    }
}
