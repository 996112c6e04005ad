use super::*;

/// Tests deleting an existing reminder.
///
/// Expected: Ok(1) and the reminder is gone
#[tokio::test]
async fn deletes_reminder() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::Reminder)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let reminder = factory::create_reminder(db, "9").await?;
    let repo = ReminderRepository::new(db);

    let deleted = repo.delete(reminder.id).await?;

    assert_eq!(deleted, 1);
    assert!(repo.get_by_id(reminder.id).await?.is_none());

    Ok(())
}

/// Tests deleting a reminder that does not exist.
///
/// Expected: Ok(0)
#[tokio::test]
async fn deleting_missing_reminder_affects_nothing() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::Reminder)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let deleted = ReminderRepository::new(db).delete(12345).await?;

    assert_eq!(deleted, 0);

    Ok(())
}
