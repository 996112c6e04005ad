use chrono::Utc;
use sea_orm::DatabaseConnection;
use tokio_util::sync::CancellationToken;

use crate::{
    data::reminder::ReminderRepository,
    error::AppError,
    model::reminder::{CreateReminderParam, ReminderParam},
    platform::{DeliveryStatus, Platform},
    scheduler::{
        deferred::{run_when_due, DeferredContext, DueRecord, Finalized},
        task::{DeferredTask, TaskKind},
    },
};

pub struct ReminderService<'a> {
    db: &'a DatabaseConnection,
    platform: &'a dyn Platform,
}

impl<'a> ReminderService<'a> {
    pub fn new(db: &'a DatabaseConnection, platform: &'a dyn Platform) -> Self {
        Self { db, platform }
    }

    /// Persists a new reminder.
    ///
    /// # Returns
    /// - `Ok(ReminderParam)` - The stored reminder
    /// - `Err(AppError::BadRequest)` - The due time is not in the future
    /// - `Err(AppError::DbErr)` - Database error
    pub async fn create(&self, param: CreateReminderParam) -> Result<ReminderParam, AppError> {
        if param.due_time <= Utc::now() {
            return Err(AppError::BadRequest(
                "Reminders must be set for a time in the future.".to_string(),
            ));
        }

        let entity = ReminderRepository::new(self.db).create(param).await?;
        ReminderParam::from_entity(entity)
    }

    /// Gets a user's pending reminders, earliest due first.
    pub async fn list_active_for_user(&self, user_id: u64) -> Result<Vec<ReminderParam>, AppError> {
        ReminderRepository::new(self.db)
            .list_active_for_user(user_id)
            .await?
            .into_iter()
            .map(ReminderParam::from_entity)
            .collect()
    }

    /// Delivers a due reminder by direct message.
    ///
    /// Re-reads the record first so a reminder completed elsewhere is not sent twice.
    ///
    /// # Returns
    /// - `Ok(Finalized::Performed)` - Message delivered
    /// - `Ok(Finalized::TargetMissing)` - User cannot receive direct messages
    /// - `Ok(Finalized::AlreadyCompleted)` - Record completed or deleted
    /// - `Err(AppError)` - Database, platform or stored-data error
    pub async fn deliver(&self, reminder_id: i32) -> Result<Finalized, AppError> {
        let Some(entity) = ReminderRepository::new(self.db)
            .get_by_id(reminder_id)
            .await?
        else {
            return Ok(Finalized::AlreadyCompleted);
        };
        if entity.completed {
            return Ok(Finalized::AlreadyCompleted);
        }

        let reminder = ReminderParam::from_entity(entity)?;
        let content = format!("🔔 **Reminder:** {}", reminder.task);

        match self
            .platform
            .send_direct_message(reminder.user_id, &content)
            .await?
        {
            DeliveryStatus::Delivered => {
                tracing::info!(
                    "Delivered reminder {} to user {}",
                    reminder.id,
                    reminder.user_id
                );
                Ok(Finalized::Performed)
            }
            DeliveryStatus::UserUnreachable => {
                tracing::warn!(
                    "Could not DM user {} for reminder {}",
                    reminder.user_id,
                    reminder.id
                );
                Ok(Finalized::TargetMissing)
            }
        }
    }

    pub async fn mark_completed(&self, reminder_id: i32) -> Result<(), AppError> {
        ReminderRepository::new(self.db)
            .mark_completed(reminder_id)
            .await?;
        Ok(())
    }
}

/// Builds the deferred task that delivers `reminder` when it is due.
pub fn reminder_task(ctx: DeferredContext, reminder: &ReminderParam) -> DeferredTask {
    let due = DueRecord {
        kind: TaskKind::Reminder,
        record_id: reminder.id,
        due_time: reminder.due_time,
    };

    DeferredTask::new(
        TaskKind::Reminder,
        format!("reminder {} for user {}", reminder.id, reminder.user_id),
        move |cancel: CancellationToken| async move {
            let service = ReminderService::new(&ctx.db, ctx.platform.as_ref());
            run_when_due(
                due,
                &cancel,
                &ctx.inflight,
                || service.deliver(due.record_id),
                || service.mark_completed(due.record_id),
            )
            .await
        },
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        platform::mock::MockPlatform,
        scheduler::{inflight::InFlight, queue::task_queue, task::TaskOutcome},
    };
    use chrono::Duration;
    use std::sync::Arc;
    use test_utils::{builder::TestBuilder, factory::reminder::ReminderFactory};

    #[tokio::test]
    async fn delivers_reminder_text_by_dm() {
        let test = TestBuilder::new()
            .with_table(entity::prelude::Reminder)
            .build()
            .await
            .unwrap();
        let db = test.db.as_ref().unwrap();
        let platform = MockPlatform::new();

        let reminder = ReminderFactory::new(db, "77")
            .task("Feed the cat")
            .build()
            .await
            .unwrap();

        let result = ReminderService::new(db, &platform)
            .deliver(reminder.id)
            .await
            .unwrap();

        assert_eq!(result, Finalized::Performed);
        assert_eq!(
            platform.direct_messages(),
            vec![(77, "🔔 **Reminder:** Feed the cat".to_string())]
        );
    }

    #[tokio::test]
    async fn unreachable_user_is_reported_not_raised() {
        let test = TestBuilder::new()
            .with_table(entity::prelude::Reminder)
            .build()
            .await
            .unwrap();
        let db = test.db.as_ref().unwrap();
        let platform = MockPlatform::new().with_unreachable_user(88);

        let reminder = ReminderFactory::new(db, "88").build().await.unwrap();

        let result = ReminderService::new(db, &platform)
            .deliver(reminder.id)
            .await
            .unwrap();

        assert_eq!(result, Finalized::TargetMissing);
        assert!(platform.direct_messages().is_empty());
    }

    #[tokio::test]
    async fn completed_reminder_is_not_sent_again() {
        let test = TestBuilder::new()
            .with_table(entity::prelude::Reminder)
            .build()
            .await
            .unwrap();
        let db = test.db.as_ref().unwrap();
        let platform = MockPlatform::new();

        let reminder = ReminderFactory::new(db, "5")
            .completed(true)
            .build()
            .await
            .unwrap();

        let result = ReminderService::new(db, &platform)
            .deliver(reminder.id)
            .await
            .unwrap();

        assert_eq!(result, Finalized::AlreadyCompleted);
        assert_eq!(platform.side_effects(), 0);
    }

    #[tokio::test]
    async fn rejects_due_time_in_the_past() {
        let test = TestBuilder::new()
            .with_table(entity::prelude::Reminder)
            .build()
            .await
            .unwrap();
        let db = test.db.as_ref().unwrap();
        let platform = MockPlatform::new();

        let result = ReminderService::new(db, &platform)
            .create(CreateReminderParam {
                user_id: 1,
                task: "too late".to_string(),
                due_time: Utc::now() - Duration::seconds(1),
            })
            .await;

        assert!(matches!(result, Err(AppError::BadRequest(_))));
    }

    #[tokio::test]
    async fn task_delivers_once_and_marks_complete() {
        let test = TestBuilder::new()
            .with_table(entity::prelude::Reminder)
            .build()
            .await
            .unwrap();
        let db = test.db.as_ref().unwrap();
        let platform = Arc::new(MockPlatform::new());
        let (queue, _receiver) = task_queue(4);
        let ctx = DeferredContext {
            db: db.clone(),
            platform: platform.clone(),
            queue,
            inflight: InFlight::new(),
        };

        let entity = ReminderFactory::new(db, "3")
            .due_time(Utc::now() - Duration::seconds(1))
            .build()
            .await
            .unwrap();
        let reminder = ReminderParam::from_entity(entity).unwrap();

        let first = reminder_task(ctx.clone(), &reminder)
            .run(CancellationToken::new())
            .await
            .unwrap();
        let second = reminder_task(ctx, &reminder)
            .run(CancellationToken::new())
            .await
            .unwrap();

        assert_eq!(first, TaskOutcome::Completed);
        assert_eq!(second, TaskOutcome::Skipped);
        assert_eq!(platform.direct_messages().len(), 1);
        let stored = ReminderRepository::new(db)
            .get_by_id(reminder.id)
            .await
            .unwrap()
            .unwrap();
        assert!(stored.completed);
    }
}
