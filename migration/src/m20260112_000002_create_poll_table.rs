use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Poll::Table)
                    .if_not_exists()
                    .col(pk_auto(Poll::Id))
                    .col(string(Poll::GuildId))
                    .col(string(Poll::ChannelId))
                    .col(string(Poll::MessageId))
                    .col(text(Poll::Question))
                    .col(text(Poll::Answers))
                    .col(text(Poll::Emojis))
                    .col(timestamp(Poll::DueTime))
                    .col(boolean(Poll::Completed).default(false))
                    .col(
                        timestamp(Poll::CreatedAt)
                            .default(Expr::current_timestamp())
                            .not_null(),
                    )
                    .col(string(Poll::CreatedBy))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_poll_completed_due_time")
                    .table(Poll::Table)
                    .col(Poll::Completed)
                    .col(Poll::DueTime)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(
                Index::drop()
                    .name("idx_poll_completed_due_time")
                    .table(Poll::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(Poll::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum Poll {
    Table,
    Id,
    GuildId,
    ChannelId,
    MessageId,
    Question,
    Answers,
    Emojis,
    DueTime,
    Completed,
    CreatedAt,
    CreatedBy,
}
