use crate::{data::reminder::ReminderRepository, model::reminder::CreateReminderParam};
use chrono::{Duration, Utc};
use sea_orm::DbErr;
use test_utils::{builder::TestBuilder, factory, factory::reminder::ReminderFactory};

mod create;
mod delete;
mod get_by_id;
mod list_active_for_user;
mod list_incomplete;
mod mark_completed;
