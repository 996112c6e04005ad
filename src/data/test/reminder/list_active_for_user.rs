use super::*;

/// Tests that a user's listing excludes other users and delivered reminders.
///
/// Expected: Ok with only the user's pending reminders, earliest first
#[tokio::test]
async fn lists_only_callers_pending_reminders() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::Reminder)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let now = Utc::now();
    let second = ReminderFactory::new(db, "42")
        .task("second")
        .due_time(now + Duration::days(1))
        .build()
        .await?;
    let first = ReminderFactory::new(db, "42")
        .task("first")
        .due_time(now + Duration::minutes(10))
        .build()
        .await?;
    ReminderFactory::new(db, "42").completed(true).build().await?;
    factory::create_reminder(db, "43").await?;

    let reminders = ReminderRepository::new(db).list_active_for_user(42).await?;

    let tasks: Vec<&str> = reminders.iter().map(|r| r.task.as_str()).collect();
    assert_eq!(tasks, vec!["first", "second"]);
    assert_eq!(reminders[0].id, first.id);
    assert_eq!(reminders[1].id, second.id);

    Ok(())
}
