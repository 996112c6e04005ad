use super::*;

/// Tests deleting a poll.
///
/// Expected: Ok(1) then Ok(0) when deleted again
#[tokio::test]
async fn deletes_poll_once() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::Poll)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let poll = factory::create_poll(db).await?;
    let repo = PollRepository::new(db);

    assert_eq!(repo.delete(poll.id).await?, 1);
    assert_eq!(repo.delete(poll.id).await?, 0);
    assert!(repo.get_by_id(poll.id).await?.is_none());

    Ok(())
}
