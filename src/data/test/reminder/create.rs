use super::*;

/// Tests creating a new reminder.
///
/// Verifies that the repository stores the user id as a string, keeps the due time
/// and starts the reminder as not completed.
///
/// Expected: Ok with reminder created
#[tokio::test]
async fn creates_incomplete_reminder() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::Reminder)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let due_time = Utc::now() + Duration::minutes(90);
    let repo = ReminderRepository::new(db);
    let reminder = repo
        .create(CreateReminderParam {
            user_id: 123456789,
            task: "Stretch".to_string(),
            due_time,
        })
        .await?;

    assert_eq!(reminder.user_id, "123456789");
    assert_eq!(reminder.task, "Stretch");
    assert_eq!(reminder.due_time, due_time);
    assert!(!reminder.completed);

    Ok(())
}
