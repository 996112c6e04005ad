use super::*;

/// Tests fetching an existing giveaway and a missing one.
///
/// Expected: Ok(Some) for the created giveaway, Ok(None) for an unknown id
#[tokio::test]
async fn finds_existing_giveaway_only() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::Giveaway)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let created = factory::create_giveaway(db).await?;
    let repo = GiveawayRepository::new(db);

    assert_eq!(repo.get_by_id(created.id).await?, Some(created.clone()));
    assert!(repo.get_by_id(created.id + 100).await?.is_none());

    Ok(())
}
