use chrono::Utc;
use sea_orm::{
    sea_query::Expr, ActiveModelTrait, ActiveValue, ColumnTrait, DatabaseConnection, DbErr,
    EntityTrait, QueryFilter, QueryOrder,
};

use crate::model::reminder::CreateReminderParam;

pub struct ReminderRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> ReminderRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Creates a new reminder record
    ///
    /// # Arguments
    /// - `param`: Target user, reminder text and due time
    ///
    /// # Returns
    /// - `Ok(Model)`: The created reminder, not yet completed
    /// - `Err(DbErr)`: Database error
    pub async fn create(
        &self,
        param: CreateReminderParam,
    ) -> Result<entity::reminder::Model, DbErr> {
        entity::reminder::ActiveModel {
            user_id: ActiveValue::Set(param.user_id.to_string()),
            task: ActiveValue::Set(param.task),
            due_time: ActiveValue::Set(param.due_time),
            completed: ActiveValue::Set(false),
            created_at: ActiveValue::Set(Utc::now()),
            ..Default::default()
        }
        .insert(self.db)
        .await
    }

    /// Gets a reminder by id
    ///
    /// # Returns
    /// - `Ok(Some(Model))`: The reminder if found
    /// - `Ok(None)`: No reminder with that id
    /// - `Err(DbErr)`: Database error
    pub async fn get_by_id(&self, id: i32) -> Result<Option<entity::reminder::Model>, DbErr> {
        entity::prelude::Reminder::find_by_id(id).one(self.db).await
    }

    /// Gets every reminder that has not been delivered, earliest due first
    ///
    /// # Returns
    /// - `Ok(Vec<Model>)`: Incomplete reminders ordered by due time
    /// - `Err(DbErr)`: Database error
    pub async fn list_incomplete(&self) -> Result<Vec<entity::reminder::Model>, DbErr> {
        entity::prelude::Reminder::find()
            .filter(entity::reminder::Column::Completed.eq(false))
            .order_by_asc(entity::reminder::Column::DueTime)
            .all(self.db)
            .await
    }

    /// Gets a user's pending reminders, earliest due first
    ///
    /// # Arguments
    /// - `user_id`: Discord ID of the user
    ///
    /// # Returns
    /// - `Ok(Vec<Model>)`: The user's incomplete reminders
    /// - `Err(DbErr)`: Database error
    pub async fn list_active_for_user(
        &self,
        user_id: u64,
    ) -> Result<Vec<entity::reminder::Model>, DbErr> {
        entity::prelude::Reminder::find()
            .filter(entity::reminder::Column::UserId.eq(user_id.to_string()))
            .filter(entity::reminder::Column::Completed.eq(false))
            .order_by_asc(entity::reminder::Column::DueTime)
            .all(self.db)
            .await
    }

    /// Marks a reminder as delivered
    ///
    /// Idempotent: marking an already completed or missing reminder succeeds.
    ///
    /// # Returns
    /// - `Ok(())`: The reminder is completed (or does not exist)
    /// - `Err(DbErr)`: Database error
    pub async fn mark_completed(&self, id: i32) -> Result<(), DbErr> {
        entity::prelude::Reminder::update_many()
            .col_expr(entity::reminder::Column::Completed, Expr::value(true))
            .filter(entity::reminder::Column::Id.eq(id))
            .exec(self.db)
            .await?;
        Ok(())
    }

    /// Deletes a reminder
    ///
    /// # Returns
    /// - `Ok(u64)`: Number of rows deleted, zero if it did not exist
    /// - `Err(DbErr)`: Database error
    pub async fn delete(&self, id: i32) -> Result<u64, DbErr> {
        let result = entity::prelude::Reminder::delete_by_id(id)
            .exec(self.db)
            .await?;
        Ok(result.rows_affected)
    }
}
