use super::*;

/// Tests creating a poll with three options.
///
/// Verifies that answers and emojis are stored as index-aligned JSON arrays and the
/// snowflakes are stored as strings.
///
/// Expected: Ok with poll created and not completed
#[tokio::test]
async fn creates_poll_with_options_as_json() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::Poll)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let due_time = Utc::now() + Duration::days(1);
    let poll = PollRepository::new(db)
        .create(CreatePollParam {
            guild_id: 1,
            channel_id: 2,
            message_id: 3,
            question: "Best map?".to_string(),
            options: vec![
                PollOption {
                    answer: "Mirage".to_string(),
                    emoji: "1️⃣".to_string(),
                },
                PollOption {
                    answer: "Inferno".to_string(),
                    emoji: "2️⃣".to_string(),
                },
                PollOption {
                    answer: "Nuke".to_string(),
                    emoji: "☢️".to_string(),
                },
            ],
            due_time,
            created_by: 4,
        })
        .await?;

    assert_eq!(poll.message_id, "3");
    assert_eq!(poll.created_by, "4");
    assert_eq!(poll.answers, r#"["Mirage","Inferno","Nuke"]"#);
    let emojis: Vec<String> = serde_json::from_str(&poll.emojis).unwrap();
    assert_eq!(emojis, vec!["1️⃣", "2️⃣", "☢️"]);
    assert_eq!(poll.due_time, due_time);
    assert!(!poll.completed);

    Ok(())
}
