use crate::{
    data::poll::PollRepository,
    model::poll::{CreatePollParam, PollOption},
};
use chrono::{Duration, Utc};
use sea_orm::DbErr;
use test_utils::{builder::TestBuilder, factory, factory::poll::PollFactory};

mod create;
mod delete;
mod get_by_id;
mod list_incomplete;
mod mark_completed;
