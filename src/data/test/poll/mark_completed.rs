use super::*;

/// Tests that marking a poll completed twice succeeds and leaves it completed.
///
/// Expected: Ok for both calls, completed flag set
#[tokio::test]
async fn marking_twice_is_idempotent() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::Poll)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let poll = factory::create_poll(db).await?;
    let repo = PollRepository::new(db);

    repo.mark_completed(poll.id).await?;
    repo.mark_completed(poll.id).await?;

    let stored = repo.get_by_id(poll.id).await?.unwrap();
    assert!(stored.completed);
    assert!(repo.list_incomplete().await?.is_empty());

    Ok(())
}

/// Tests that marking one poll leaves the others pending.
///
/// Expected: Ok with only the untouched poll still incomplete
#[tokio::test]
async fn marks_only_targeted_poll() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::Poll)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let finished = factory::create_poll(db).await?;
    let open = factory::create_poll(db).await?;
    let repo = PollRepository::new(db);

    repo.mark_completed(finished.id).await?;

    let pending = repo.list_incomplete().await?;
    assert_eq!(pending.len(), 1);
    assert_eq!(pending[0].id, open.id);

    Ok(())
}
