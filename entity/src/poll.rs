use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "poll")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub guild_id: String,
    pub channel_id: String,
    pub message_id: String,
    #[sea_orm(column_type = "Text")]
    pub question: String,
    /// JSON array of answer strings, in display order.
    #[sea_orm(column_type = "Text")]
    pub answers: String,
    /// JSON array of emoji strings, index-aligned with `answers`.
    #[sea_orm(column_type = "Text")]
    pub emojis: String,
    pub due_time: DateTimeUtc,
    pub completed: bool,
    pub created_at: DateTimeUtc,
    pub created_by: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
