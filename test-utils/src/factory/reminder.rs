//! Reminder factory for creating test reminder entities.

use chrono::{DateTime, Duration, Utc};
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

use crate::factory::helpers::next_id;

/// Factory for creating test reminders with customizable fields.
///
/// # Example
///
/// ```rust,ignore
/// use test_utils::factory::reminder::ReminderFactory;
///
/// let reminder = ReminderFactory::new(&db, "123456789")
///     .task("Take out the trash")
///     .due_time(Utc::now() - Duration::minutes(1))
///     .build()
///     .await?;
/// ```
pub struct ReminderFactory<'a> {
    db: &'a DatabaseConnection,
    user_id: String,
    task: String,
    due_time: DateTime<Utc>,
    completed: bool,
}

impl<'a> ReminderFactory<'a> {
    /// Creates a new ReminderFactory with default values.
    ///
    /// Defaults:
    /// - task: `"Reminder {id}"` where id is auto-incremented
    /// - due_time: 1 hour from now
    /// - completed: `false`
    ///
    /// # Arguments
    /// - `db` - Database connection for inserting the entity
    /// - `user_id` - Discord ID of the user to remind
    pub fn new(db: &'a DatabaseConnection, user_id: impl Into<String>) -> Self {
        let id = next_id();
        Self {
            db,
            user_id: user_id.into(),
            task: format!("Reminder {}", id),
            due_time: Utc::now() + Duration::hours(1),
            completed: false,
        }
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

    /// Inserts the reminder.
    ///
    /// # Returns
    /// - `Ok(reminder::Model)` - The inserted reminder
    /// - `Err(DbErr)` - Database error during insert
    pub async fn build(self) -> Result<entity::reminder::Model, DbErr> {
        entity::reminder::ActiveModel {
            user_id: ActiveValue::Set(self.user_id),
            task: ActiveValue::Set(self.task),
            due_time: ActiveValue::Set(self.due_time),
            completed: ActiveValue::Set(self.completed),
            created_at: ActiveValue::Set(Utc::now()),
            ..Default::default()
        }
        .insert(self.db)
        .await
    }
}

/// Creates a pending reminder due in one hour for the given user.
pub async fn create_reminder(
    db: &DatabaseConnection,
    user_id: &str,
) -> Result<entity::reminder::Model, DbErr> {
    ReminderFactory::new(db, user_id).build().await
}
