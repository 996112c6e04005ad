use super::*;

/// Tests creating a giveaway.
///
/// Expected: Ok with prize, winner count and emoji stored, not completed
#[tokio::test]
async fn creates_incomplete_giveaway() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::Giveaway)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let due_time = Utc::now() + Duration::hours(12);
    let giveaway = GiveawayRepository::new(db)
        .create(CreateGiveawayParam {
            guild_id: 10,
            channel_id: 20,
            message_id: 30,
            prize: "CS2 Prime".to_string(),
            winner_count: 3,
            reaction_emoji: "🎁".to_string(),
            due_time,
            created_by: 40,
        })
        .await?;

    assert_eq!(giveaway.channel_id, "20");
    assert_eq!(giveaway.prize, "CS2 Prime");
    assert_eq!(giveaway.winner_count, 3);
    assert_eq!(giveaway.reaction_emoji, "🎁");
    assert_eq!(giveaway.due_time, due_time);
    assert!(!giveaway.completed);

    Ok(())
}
