use super::*;

/// Tests that drawn giveaways are excluded and the rest are ordered by due time.
///
/// Expected: Ok with pending giveaways, earliest due first
#[tokio::test]
async fn lists_pending_giveaways_by_due_time() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::Giveaway)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let now = Utc::now();
    let later = GiveawayFactory::new(db)
        .due_time(now + Duration::days(2))
        .build()
        .await?;
    let sooner = GiveawayFactory::new(db)
        .due_time(now + Duration::minutes(1))
        .build()
        .await?;
    GiveawayFactory::new(db)
        .due_time(now - Duration::days(1))
        .completed(true)
        .build()
        .await?;

    let pending = GiveawayRepository::new(db).list_incomplete().await?;

    let ids: Vec<i32> = pending.iter().map(|g| g.id).collect();
    assert_eq!(ids, vec![sooner.id, later.id]);

    Ok(())
}
