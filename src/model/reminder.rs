//! Parameter models for reminder operations.

use chrono::{DateTime, Utc};

use crate::{error::AppError, util::parse::parse_u64_from_string};

/// A persisted reminder with its target user parsed.
#[derive(Debug, Clone, PartialEq)]
pub struct ReminderParam {
    pub id: i32,
    /// Discord ID of the user who receives the direct message.
    pub user_id: u64,
    pub task: String,
    pub due_time: DateTime<Utc>,
    pub completed: bool,
    pub created_at: DateTime<Utc>,
}

impl ReminderParam {
    /// Converts an entity model to a reminder param.
    ///
    /// # Arguments
    /// - `entity` - The entity model from the database
    ///
    /// # Returns
    /// - `Ok(ReminderParam)` - The converted reminder
    /// - `Err(AppError::InternalErr)` - The stored user id is not a snowflake
    pub fn from_entity(entity: entity::reminder::Model) -> Result<Self, AppError> {
        Ok(Self {
            id: entity.id,
            user_id: parse_u64_from_string(&entity.user_id)?,
            task: entity.task,
            due_time: entity.due_time,
            completed: entity.completed,
            created_at: entity.created_at,
        })
    }
}

/// Parameters for creating a new reminder.
#[derive(Debug, Clone)]
pub struct CreateReminderParam {
    pub user_id: u64,
    pub task: String,
    pub due_time: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_utils::fixture;

    /// Expected: Ok with the user id parsed to u64
    #[test]
    fn converts_entity_with_numeric_user_id() {
        let entity = fixture::reminder::entity();

        let param = ReminderParam::from_entity(entity.clone()).unwrap();

        assert_eq!(param.user_id, 123456789);
        assert_eq!(param.task, entity.task);
        assert_eq!(param.due_time, entity.due_time);
    }

    /// Expected: Err for a user id that is not a snowflake
    #[test]
    fn rejects_corrupt_user_id() {
        let entity = fixture::reminder::entity_builder()
            .user_id("someone")
            .build();

        assert!(ReminderParam::from_entity(entity).is_err());
    }
}
