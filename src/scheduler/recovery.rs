//! Rebuilds pending deferred work from the database at startup.
//!
//! The task queue is volatile, so every boot walks the incomplete records of each kind.
//! Records whose target is gone are marked complete, overdue records are finalized on the
//! spot and the rest are queued for the processor. A failing record is logged and counted
//! without stopping the walk.

use chrono::{DateTime, Utc};
use std::future::Future;
use tokio_util::sync::CancellationToken;

use crate::{
    data::{giveaway::GiveawayRepository, poll::PollRepository, reminder::ReminderRepository},
    error::{internal::InternalError, AppError},
    model::{giveaway::GiveawayParam, poll::PollParam, reminder::ReminderParam},
    scheduler::{
        deferred::{time_until, DeferredContext},
        task::{DeferredTask, TaskKind, TaskOutcome},
    },
    service::{
        giveaway::{giveaway_task, GiveawayService},
        poll::{poll_task, PollService},
        reminder::reminder_task,
    },
};

/// What happened to one incomplete record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Recovered {
    /// Already due; its payload ran during recovery.
    Overdue,
    Queued,
    /// Target gone or record unreadable; marked complete without a side effect.
    Unresolvable,
}

/// Per-kind recovery counts.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct KindReport {
    /// Incomplete records found.
    pub recovered: usize,
    pub overdue: usize,
    pub queued: usize,
    pub unresolvable: usize,
    pub failed: usize,
}

impl KindReport {
    fn record(&mut self, result: Result<Recovered, AppError>) {
        match result {
            Ok(Recovered::Overdue) => self.overdue += 1,
            Ok(Recovered::Queued) => self.queued += 1,
            Ok(Recovered::Unresolvable) => self.unresolvable += 1,
            Err(_) => self.failed += 1,
        }
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct RecoveryReport {
    pub reminders: KindReport,
    pub polls: KindReport,
    pub giveaways: KindReport,
}

#[derive(Clone)]
pub struct RecoverySequencer {
    ctx: DeferredContext,
    cancel: CancellationToken,
}

impl RecoverySequencer {
    pub fn new(ctx: DeferredContext, cancel: CancellationToken) -> Self {
        Self { ctx, cancel }
    }

    /// Recovers reminders, polls and giveaways in turn.
    ///
    /// Must run after the task processor has been spawned: queueing waits for room and
    /// would stall on a full queue that nothing drains.
    ///
    /// When this returns, every overdue or unresolvable record has been finalized or
    /// marked complete and every other readable record has exactly one queued task.
    pub async fn run(&self) -> RecoveryReport {
        let report = RecoveryReport {
            reminders: self.recover_reminders().await,
            polls: self.recover_polls().await,
            giveaways: self.recover_giveaways().await,
        };

        for (kind, counts) in [
            (TaskKind::Reminder, report.reminders),
            (TaskKind::PollFinalization, report.polls),
            (TaskKind::GiveawayFinalization, report.giveaways),
        ] {
            tracing::info!(
                "Recovered {} {} record(s): {} overdue, {} queued, {} unresolvable, {} failed",
                counts.recovered,
                kind,
                counts.overdue,
                counts.queued,
                counts.unresolvable,
                counts.failed
            );
        }

        report
    }

    async fn recover_reminders(&self) -> KindReport {
        let mut report = KindReport::default();
        let repo = ReminderRepository::new(&self.ctx.db);

        let rows = match repo.list_incomplete().await {
            Ok(rows) => rows,
            Err(e) => {
                tracing::error!("Failed to load incomplete reminders: {}", e);
                return report;
            }
        };
        report.recovered = rows.len();

        for entity in rows {
            let id = entity.id;
            let result = match ReminderParam::from_entity(entity) {
                Ok(reminder) => {
                    let this = self.clone();
                    self.isolated(TaskKind::Reminder, id, async move {
                        let task = reminder_task(this.ctx.clone(), &reminder);
                        this.dispatch(task, reminder.due_time).await
                    })
                    .await
                }
                Err(e) => self.discard(TaskKind::Reminder, id, e).await,
            };
            log_failure(TaskKind::Reminder, id, &result);
            report.record(result);
        }

        report
    }

    async fn recover_polls(&self) -> KindReport {
        let mut report = KindReport::default();
        let repo = PollRepository::new(&self.ctx.db);

        let rows = match repo.list_incomplete().await {
            Ok(rows) => rows,
            Err(e) => {
                tracing::error!("Failed to load incomplete polls: {}", e);
                return report;
            }
        };
        report.recovered = rows.len();

        for entity in rows {
            let id = entity.id;
            let result = match PollParam::from_entity(entity) {
                Ok(poll) => {
                    let this = self.clone();
                    self.isolated(TaskKind::PollFinalization, id, async move {
                        this.recover_poll(poll).await
                    })
                    .await
                }
                Err(e) => self.discard(TaskKind::PollFinalization, id, e).await,
            };
            log_failure(TaskKind::PollFinalization, id, &result);
            report.record(result);
        }

        report
    }

    async fn recover_poll(&self, poll: PollParam) -> Result<Recovered, AppError> {
        let service = PollService::new(&self.ctx.db, self.ctx.platform.as_ref());

        if !service.resolve(&poll).await? {
            tracing::warn!(
                "Poll {} message {} no longer exists, marking complete",
                poll.id,
                poll.message_id
            );
            service.mark_completed(poll.id).await?;
            return Ok(Recovered::Unresolvable);
        }

        self.dispatch(poll_task(self.ctx.clone(), &poll), poll.due_time)
            .await
    }

    async fn recover_giveaways(&self) -> KindReport {
        let mut report = KindReport::default();
        let repo = GiveawayRepository::new(&self.ctx.db);

        let rows = match repo.list_incomplete().await {
            Ok(rows) => rows,
            Err(e) => {
                tracing::error!("Failed to load incomplete giveaways: {}", e);
                return report;
            }
        };
        report.recovered = rows.len();

        for entity in rows {
            let id = entity.id;
            let result = match GiveawayParam::from_entity(entity) {
                Ok(giveaway) => {
                    let this = self.clone();
                    self.isolated(TaskKind::GiveawayFinalization, id, async move {
                        this.recover_giveaway(giveaway).await
                    })
                    .await
                }
                Err(e) => self.discard(TaskKind::GiveawayFinalization, id, e).await,
            };
            log_failure(TaskKind::GiveawayFinalization, id, &result);
            report.record(result);
        }

        report
    }

    async fn recover_giveaway(&self, giveaway: GiveawayParam) -> Result<Recovered, AppError> {
        let service = GiveawayService::new(&self.ctx.db, self.ctx.platform.as_ref());

        if !service.resolve(&giveaway).await? {
            tracing::warn!(
                "Giveaway {} message {} no longer exists, marking complete",
                giveaway.id,
                giveaway.message_id
            );
            service.mark_completed(giveaway.id).await?;
            return Ok(Recovered::Unresolvable);
        }

        self.dispatch(giveaway_task(self.ctx.clone(), &giveaway), giveaway.due_time)
            .await
    }

    /// Recovers one record on its own task so a panic counts as a failed record.
    async fn isolated<F>(
        &self,
        kind: TaskKind,
        record_id: i32,
        recover: F,
    ) -> Result<Recovered, AppError>
    where
        F: Future<Output = Result<Recovered, AppError>> + Send + 'static,
    {
        match tokio::spawn(recover).await {
            Ok(result) => result,
            Err(_) => Err(InternalError::RecoveryPanicked {
                kind: kind.to_string(),
                record_id,
            }
            .into()),
        }
    }

    /// Runs an overdue task now or queues a future one.
    ///
    /// Overdue payloads run in their own task so a panic is contained like in the
    /// processor.
    async fn dispatch(
        &self,
        task: DeferredTask,
        due_time: DateTime<Utc>,
    ) -> Result<Recovered, AppError> {
        if time_until(due_time, Utc::now()).is_some() {
            self.ctx.queue.enqueue(task).await?;
            return Ok(Recovered::Queued);
        }

        let id = task.id;
        let task_kind = task.kind;
        match tokio::spawn(task.run(self.cancel.clone())).await {
            Ok(outcome) => {
                if outcome? == TaskOutcome::Cancelled {
                    tracing::info!("{} {} left for next boot, shutting down", task_kind, id);
                }
                Ok(Recovered::Overdue)
            }
            Err(_) => Err(InternalError::TaskPanicked { task_id: id }.into()),
        }
    }

    /// Marks a record that cannot be decoded as complete so it is not loaded again.
    async fn discard(
        &self,
        kind: TaskKind,
        record_id: i32,
        cause: AppError,
    ) -> Result<Recovered, AppError> {
        tracing::error!("{} {} is unreadable, marking complete: {}", kind, record_id, cause);

        match kind {
            TaskKind::Reminder => {
                ReminderRepository::new(&self.ctx.db)
                    .mark_completed(record_id)
                    .await?
            }
            TaskKind::PollFinalization => {
                PollRepository::new(&self.ctx.db)
                    .mark_completed(record_id)
                    .await?
            }
            TaskKind::GiveawayFinalization => {
                GiveawayRepository::new(&self.ctx.db)
                    .mark_completed(record_id)
                    .await?
            }
        }

        Ok(Recovered::Unresolvable)
    }
}

fn log_failure(kind: TaskKind, record_id: i32, result: &Result<Recovered, AppError>) {
    if let Err(e) = result {
        tracing::error!("Failed to recover {} {}: {}", kind, record_id, e);
    }
}
