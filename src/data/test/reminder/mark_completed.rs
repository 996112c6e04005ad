use super::*;

/// Tests marking a reminder completed.
///
/// Expected: Ok with completed flag set
#[tokio::test]
async fn marks_reminder_completed() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::Reminder)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let reminder = factory::create_reminder(db, "7").await?;
    let repo = ReminderRepository::new(db);

    repo.mark_completed(reminder.id).await?;

    let stored = repo.get_by_id(reminder.id).await?.unwrap();
    assert!(stored.completed);

    Ok(())
}

/// Tests that marking twice is not an error and leaves the flag set.
///
/// Expected: Ok for both calls, record completed, nothing else changed
#[tokio::test]
async fn marking_twice_is_idempotent() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::Reminder)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let reminder = factory::create_reminder(db, "7").await?;
    let repo = ReminderRepository::new(db);

    repo.mark_completed(reminder.id).await?;
    repo.mark_completed(reminder.id).await?;

    let stored = repo.get_by_id(reminder.id).await?.unwrap();
    assert!(stored.completed);
    assert_eq!(stored.task, reminder.task);
    assert_eq!(stored.due_time, reminder.due_time);

    Ok(())
}

/// Tests marking a reminder that does not exist.
///
/// Expected: Ok, no error
#[tokio::test]
async fn marking_missing_reminder_succeeds() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::Reminder)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let result = ReminderRepository::new(db).mark_completed(404).await;

    assert!(result.is_ok());

    Ok(())
}
