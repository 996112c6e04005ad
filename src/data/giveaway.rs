use chrono::Utc;
use sea_orm::{
    sea_query::Expr, ActiveModelTrait, ActiveValue, ColumnTrait, DatabaseConnection, DbErr,
    EntityTrait, QueryFilter, QueryOrder,
};

use crate::model::giveaway::CreateGiveawayParam;

pub struct GiveawayRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> GiveawayRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Creates a new giveaway record
    ///
    /// # Arguments
    /// - `param`: Posted message location, prize, winner count, entry emoji and due time
    ///
    /// # Returns
    /// - `Ok(Model)`: The created giveaway, not yet completed
    /// - `Err(DbErr)`: Database error
    pub async fn create(
        &self,
        param: CreateGiveawayParam,
    ) -> Result<entity::giveaway::Model, DbErr> {
        entity::giveaway::ActiveModel {
            guild_id: ActiveValue::Set(param.guild_id.to_string()),
            channel_id: ActiveValue::Set(param.channel_id.to_string()),
            message_id: ActiveValue::Set(param.message_id.to_string()),
            prize: ActiveValue::Set(param.prize),
            winner_count: ActiveValue::Set(i32::try_from(param.winner_count).unwrap_or(i32::MAX)),
            reaction_emoji: ActiveValue::Set(param.reaction_emoji),
            due_time: ActiveValue::Set(param.due_time),
            completed: ActiveValue::Set(false),
            created_at: ActiveValue::Set(Utc::now()),
            created_by: ActiveValue::Set(param.created_by.to_string()),
            ..Default::default()
        }
        .insert(self.db)
        .await
    }

    /// Gets a giveaway by id
    ///
    /// # Returns
    /// - `Ok(Some(Model))`: The giveaway if found
    /// - `Ok(None)`: No giveaway with that id
    /// - `Err(DbErr)`: Database error
    pub async fn get_by_id(&self, id: i32) -> Result<Option<entity::giveaway::Model>, DbErr> {
        entity::prelude::Giveaway::find_by_id(id).one(self.db).await
    }

    /// Gets every giveaway that has not been drawn, earliest due first
    pub async fn list_incomplete(&self) -> Result<Vec<entity::giveaway::Model>, DbErr> {
        entity::prelude::Giveaway::find()
            .filter(entity::giveaway::Column::Completed.eq(false))
            .order_by_asc(entity::giveaway::Column::DueTime)
            .all(self.db)
            .await
    }

    /// Marks a giveaway as drawn
    ///
    /// Idempotent: marking an already completed or missing giveaway succeeds.
    pub async fn mark_completed(&self, id: i32) -> Result<(), DbErr> {
        entity::prelude::Giveaway::update_many()
            .col_expr(entity::giveaway::Column::Completed, Expr::value(true))
            .filter(entity::giveaway::Column::Id.eq(id))
            .exec(self.db)
            .await?;
        Ok(())
    }

    /// Deletes a giveaway
    ///
    /// # Returns
    /// - `Ok(u64)`: Number of rows deleted, zero if it did not exist
    /// - `Err(DbErr)`: Database error
    pub async fn delete(&self, id: i32) -> Result<u64, DbErr> {
        let result = entity::prelude::Giveaway::delete_by_id(id)
            .exec(self.db)
            .await?;
        Ok(result.rows_affected)
    }
}
