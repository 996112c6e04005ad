use super::*;

/// Tests deleting a giveaway leaves other giveaways intact.
///
/// Expected: Ok(1) and only the other giveaway remains
#[tokio::test]
async fn deletes_only_targeted_giveaway() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::Giveaway)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let doomed = factory::create_giveaway(db).await?;
    let kept = factory::create_giveaway(db).await?;
    let repo = GiveawayRepository::new(db);

    assert_eq!(repo.delete(doomed.id).await?, 1);

    let pending = repo.list_incomplete().await?;
    assert_eq!(pending.len(), 1);
    assert_eq!(pending[0].id, kept.id);

    Ok(())
}
