use super::*;

/// Tests that marking a giveaway completed twice succeeds and leaves it completed.
///
/// Expected: Ok for both calls, completed flag set
#[tokio::test]
async fn marking_twice_is_idempotent() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::Giveaway)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let giveaway = factory::create_giveaway(db).await?;
    let repo = GiveawayRepository::new(db);

    repo.mark_completed(giveaway.id).await?;
    repo.mark_completed(giveaway.id).await?;

    let stored = repo.get_by_id(giveaway.id).await?.unwrap();
    assert!(stored.completed);
    assert_eq!(stored.prize, giveaway.prize);

    Ok(())
}
