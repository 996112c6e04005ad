use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Reminder::Table)
                    .if_not_exists()
                    .col(pk_auto(Reminder::Id))
                    .col(string(Reminder::UserId))
                    .col(text(Reminder::Task))
                    .col(timestamp(Reminder::DueTime))
                    .col(boolean(Reminder::Completed).default(false))
                    .col(
                        timestamp(Reminder::CreatedAt)
                            .default(Expr::current_timestamp())
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        // Recovery and /myreminders both filter on completion first
        manager
            .create_index(
                Index::create()
                    .name("idx_reminder_completed_due_time")
                    .table(Reminder::Table)
                    .col(Reminder::Completed)
                    .col(Reminder::DueTime)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_reminder_user_id")
                    .table(Reminder::Table)
                    .col(Reminder::UserId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(
                Index::drop()
                    .name("idx_reminder_user_id")
                    .table(Reminder::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_index(
                Index::drop()
                    .name("idx_reminder_completed_due_time")
                    .table(Reminder::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(Reminder::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum Reminder {
    Table,
    Id,
    UserId,
    Task,
    DueTime,
    Completed,
    CreatedAt,
}
