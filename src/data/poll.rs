use chrono::Utc;
use sea_orm::{
    sea_query::Expr, ActiveModelTrait, ActiveValue, ColumnTrait, DatabaseConnection, DbErr,
    EntityTrait, QueryFilter, QueryOrder,
};

use crate::model::poll::CreatePollParam;

pub struct PollRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> PollRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Creates a new poll record
    ///
    /// Answers and emojis are serialized as JSON string arrays in option order.
    ///
    /// # Arguments
    /// - `param`: Posted message location, question, options and due time
    ///
    /// # Returns
    /// - `Ok(Model)`: The created poll, not yet completed
    /// - `Err(DbErr)`: Database error
    pub async fn create(&self, param: CreatePollParam) -> Result<entity::poll::Model, DbErr> {
        let (answers, emojis): (Vec<String>, Vec<String>) = param
            .options
            .into_iter()
            .map(|option| (option.answer, option.emoji))
            .unzip();

        entity::poll::ActiveModel {
            guild_id: ActiveValue::Set(param.guild_id.to_string()),
            channel_id: ActiveValue::Set(param.channel_id.to_string()),
            message_id: ActiveValue::Set(param.message_id.to_string()),
            question: ActiveValue::Set(param.question),
            answers: ActiveValue::Set(serde_json::json!(answers).to_string()),
            emojis: ActiveValue::Set(serde_json::json!(emojis).to_string()),
            due_time: ActiveValue::Set(param.due_time),
            completed: ActiveValue::Set(false),
            created_at: ActiveValue::Set(Utc::now()),
            created_by: ActiveValue::Set(param.created_by.to_string()),
            ..Default::default()
        }
        .insert(self.db)
        .await
    }

    /// Gets a poll by id
    ///
    /// # Returns
    /// - `Ok(Some(Model))`: The poll if found
    /// - `Ok(None)`: No poll with that id
    /// - `Err(DbErr)`: Database error
    pub async fn get_by_id(&self, id: i32) -> Result<Option<entity::poll::Model>, DbErr> {
        entity::prelude::Poll::find_by_id(id).one(self.db).await
    }

    /// Gets every poll that has not been finalized, earliest due first
    pub async fn list_incomplete(&self) -> Result<Vec<entity::poll::Model>, DbErr> {
        entity::prelude::Poll::find()
            .filter(entity::poll::Column::Completed.eq(false))
            .order_by_asc(entity::poll::Column::DueTime)
            .all(self.db)
            .await
    }

    /// Marks a poll as finalized
    ///
    /// Idempotent: marking an already completed or missing poll succeeds.
    pub async fn mark_completed(&self, id: i32) -> Result<(), DbErr> {
        entity::prelude::Poll::update_many()
            .col_expr(entity::poll::Column::Completed, Expr::value(true))
            .filter(entity::poll::Column::Id.eq(id))
            .exec(self.db)
            .await?;
        Ok(())
    }

    /// Deletes a poll
    ///
    /// # Returns
    /// - `Ok(u64)`: Number of rows deleted, zero if it did not exist
    /// - `Err(DbErr)`: Database error
    pub async fn delete(&self, id: i32) -> Result<u64, DbErr> {
        let result = entity::prelude::Poll::delete_by_id(id).exec(self.db).await?;
        Ok(result.rows_affected)
    }
}
