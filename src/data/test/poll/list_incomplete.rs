use super::*;

/// Tests that finalized polls are excluded and the rest are ordered by due time.
///
/// Expected: Ok with pending polls, earliest due first
#[tokio::test]
async fn lists_pending_polls_by_due_time() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::Poll)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let now = Utc::now();
    let late = PollFactory::new(db)
        .due_time(now + Duration::hours(3))
        .build()
        .await?;
    let overdue = PollFactory::new(db)
        .due_time(now - Duration::hours(3))
        .build()
        .await?;
    PollFactory::new(db).completed(true).build().await?;

    let pending = PollRepository::new(db).list_incomplete().await?;

    let ids: Vec<i32> = pending.iter().map(|p| p.id).collect();
    assert_eq!(ids, vec![overdue.id, late.id]);

    Ok(())
}
