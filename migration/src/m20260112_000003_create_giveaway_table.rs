use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Giveaway::Table)
                    .if_not_exists()
                    .col(pk_auto(Giveaway::Id))
                    .col(string(Giveaway::GuildId))
                    .col(string(Giveaway::ChannelId))
                    .col(string(Giveaway::MessageId))
                    .col(text(Giveaway::Prize))
                    .col(integer(Giveaway::WinnerCount).default(1))
                    .col(string(Giveaway::ReactionEmoji))
                    .col(timestamp(Giveaway::DueTime))
                    .col(boolean(Giveaway::Completed).default(false))
                    .col(
                        timestamp(Giveaway::CreatedAt)
                            .default(Expr::current_timestamp())
                            .not_null(),
                    )
                    .col(string(Giveaway::CreatedBy))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_giveaway_completed_due_time")
                    .table(Giveaway::Table)
                    .col(Giveaway::Completed)
                    .col(Giveaway::DueTime)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(
                Index::drop()
                    .name("idx_giveaway_completed_due_time")
                    .table(Giveaway::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(Giveaway::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum Giveaway {
    Table,
    Id,
    GuildId,
    ChannelId,
    MessageId,
    Prize,
    WinnerCount,
    ReactionEmoji,
    DueTime,
    Completed,
    CreatedAt,
    CreatedBy,
}
