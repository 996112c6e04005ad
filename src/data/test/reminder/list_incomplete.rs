use super::*;

/// Tests that only incomplete reminders are listed, earliest due first.
///
/// Expected: Ok with the two pending reminders in due-time order
#[tokio::test]
async fn lists_pending_reminders_by_due_time() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::Reminder)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let now = Utc::now();
    let later = ReminderFactory::new(db, "1")
        .due_time(now + Duration::hours(2))
        .build()
        .await?;
    let sooner = ReminderFactory::new(db, "2")
        .due_time(now - Duration::minutes(5))
        .build()
        .await?;
    ReminderFactory::new(db, "3")
        .due_time(now - Duration::hours(1))
        .completed(true)
        .build()
        .await?;

    let pending = ReminderRepository::new(db).list_incomplete().await?;

    let ids: Vec<i32> = pending.iter().map(|r| r.id).collect();
    assert_eq!(ids, vec![sooner.id, later.id]);

    Ok(())
}

/// Tests listing when every reminder has been delivered.
///
/// Expected: Ok with empty list
#[tokio::test]
async fn returns_empty_when_all_completed() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::Reminder)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    ReminderFactory::new(db, "1").completed(true).build().await?;

    let pending = ReminderRepository::new(db).list_incomplete().await?;

    assert!(pending.is_empty());

    Ok(())
}
