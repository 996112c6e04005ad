//! Shared handles given to every interaction handler.
//!
//! `AppState` is built once in `main` and cloned into the bot's event handler. Every field
//! is a cheap handle: the database pool, the platform client, the task queue sender, the
//! duplicate guard and the wizard stores all share their inner state across clones.

pub mod form;

use sea_orm::DatabaseConnection;
use std::sync::Arc;

use crate::{
    platform::Platform,
    scheduler::{deferred::DeferredContext, inflight::InFlight, queue::TaskQueue},
};

use self::form::FormStores;

#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
    pub platform: Arc<dyn Platform>,
    pub queue: TaskQueue,
    pub inflight: InFlight,
    pub forms: FormStores,
    /// Channel that receives `/support` tickets; tickets are refused when unset.
    pub support_channel_id: Option<u64>,
}

impl AppState {
    pub fn new(
        db: DatabaseConnection,
        platform: Arc<dyn Platform>,
        queue: TaskQueue,
        inflight: InFlight,
        forms: FormStores,
        support_channel_id: Option<u64>,
    ) -> Self {
        Self {
            db,
            platform,
            queue,
            inflight,
            forms,
            support_channel_id,
        }
    }

    /// Handles a deferred payload needs to outlive the interaction that created it.
    pub fn deferred_context(&self) -> DeferredContext {
        DeferredContext {
            db: self.db.clone(),
            platform: self.platform.clone(),
            queue: self.queue.clone(),
            inflight: self.inflight.clone(),
        }
    }
}
