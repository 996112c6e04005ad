use super::*;

/// Tests fetching an existing reminder.
///
/// Expected: Ok(Some) with matching record
#[tokio::test]
async fn returns_existing_reminder() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::Reminder)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let created = factory::create_reminder(db, "555").await?;

    let found = ReminderRepository::new(db).get_by_id(created.id).await?;

    assert_eq!(found, Some(created));

    Ok(())
}

/// Tests fetching a reminder that does not exist.
///
/// Expected: Ok(None)
#[tokio::test]
async fn returns_none_for_missing_reminder() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::Reminder)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let found = ReminderRepository::new(db).get_by_id(9999).await?;

    assert!(found.is_none());

    Ok(())
}
