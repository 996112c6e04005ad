use chrono::{DateTime, Utc};
use std::fmt;
use std::future::Future;
use std::pin::Pin;
use tokio_util::sync::CancellationToken;
use uuid::Uuid;

use crate::error::AppError;

/// Category of deferred work, used for logging and duplicate detection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TaskKind {
    Reminder,
    PollFinalization,
    GiveawayFinalization,
}

impl fmt::Display for TaskKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TaskKind::Reminder => "reminder",
            TaskKind::PollFinalization => "poll finalization",
            TaskKind::GiveawayFinalization => "giveaway finalization",
        };
        f.write_str(name)
    }
}

/// How a payload ended when it did not return an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskOutcome {
    /// Side effect performed and record marked complete.
    Completed,
    /// Side effect failed or its target was gone; record marked complete anyway.
    CompletedWithFailure,
    /// Shutdown interrupted the wait; record left incomplete.
    Cancelled,
    /// Another execution already owns or finished this record.
    Skipped,
}

pub type TaskFuture = Pin<Box<dyn Future<Output = Result<TaskOutcome, AppError>> + Send>>;

type TaskPayload = Box<dyn FnOnce(CancellationToken) -> TaskFuture + Send>;

/// A unit of time-deferred work waiting in the task queue.
///
/// The payload captures everything it needs (record id, due time, handles) and receives
/// the shutdown token when the processor starts it.
pub struct DeferredTask {
    pub id: Uuid,
    pub kind: TaskKind,
    pub created_at: DateTime<Utc>,
    pub description: String,
    payload: TaskPayload,
}

impl DeferredTask {
    pub fn new<F, Fut>(kind: TaskKind, description: impl Into<String>, payload: F) -> Self
    where
        F: FnOnce(CancellationToken) -> Fut + Send + 'static,
        Fut: Future<Output = Result<TaskOutcome, AppError>> + Send + 'static,
    {
        Self {
            id: Uuid::new_v4(),
            kind,
            created_at: Utc::now(),
            description: description.into(),
            payload: Box::new(move |cancel| Box::pin(payload(cancel))),
        }
    }

    /// Consumes the task, producing its payload future.
    pub fn run(self, cancel: CancellationToken) -> TaskFuture {
        (self.payload)(cancel)
    }
}

impl fmt::Debug for DeferredTask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DeferredTask")
            .field("id", &self.id)
            .field("kind", &self.kind)
            .field("created_at", &self.created_at)
            .field("description", &self.description)
            .finish_non_exhaustive()
    }
}
