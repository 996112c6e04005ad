use crate::{data::giveaway::GiveawayRepository, model::giveaway::CreateGiveawayParam};
use chrono::{Duration, Utc};
use sea_orm::DbErr;
use test_utils::{builder::TestBuilder, factory, factory::giveaway::GiveawayFactory};

mod create;
mod delete;
mod get_by_id;
mod list_incomplete;
mod mark_completed;
