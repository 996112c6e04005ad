//! The wait-finalize-complete template shared by every kind of deferred work.

use chrono::{DateTime, Utc};
use sea_orm::DatabaseConnection;
use std::future::Future;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

use crate::{
    error::AppError,
    platform::Platform,
    scheduler::{
        inflight::InFlight,
        queue::TaskQueue,
        task::{TaskKind, TaskOutcome},
    },
};

/// Owned handles a deferred payload captures.
#[derive(Clone)]
pub struct DeferredContext {
    pub db: DatabaseConnection,
    pub platform: Arc<dyn Platform>,
    pub queue: TaskQueue,
    pub inflight: InFlight,
}

/// Result of a finalization side effect.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Finalized {
    Performed,
    /// The message or user is gone; nothing could be done.
    TargetMissing,
    /// The record was completed or deleted by someone else.
    AlreadyCompleted,
}

/// Identifies the record a payload finalizes and when.
#[derive(Debug, Clone, Copy)]
pub struct DueRecord {
    pub kind: TaskKind,
    pub record_id: i32,
    pub due_time: DateTime<Utc>,
}

/// Time left until `due`, or `None` if it has passed.
pub fn time_until(due: DateTime<Utc>, now: DateTime<Utc>) -> Option<std::time::Duration> {
    (due - now).to_std().ok().filter(|remaining| !remaining.is_zero())
}

/// Waits until the record is due, then finalizes it and marks it complete.
///
/// The wait is interrupted by `cancel`, in which case the record is left incomplete for
/// recovery. Once awake the record is claimed in `inflight`; a record another payload is
/// already finalizing is skipped. A failed or target-less finalization is logged and the
/// record is still marked complete so it is not retried forever.
///
/// # Arguments
/// - `record` - Kind, id and due time of the record
/// - `cancel` - Process shutdown signal
/// - `inflight` - In-process duplicate guard
/// - `finalize` - Re-reads the record and performs the side effect
/// - `complete` - Marks the record complete; must be idempotent
///
/// # Returns
/// - `Ok(TaskOutcome)` - How the payload ended
/// - `Err(AppError)` - Marking the record complete failed
pub async fn run_when_due<F, FFut, C, CFut>(
    record: DueRecord,
    cancel: &CancellationToken,
    inflight: &InFlight,
    finalize: F,
    complete: C,
) -> Result<TaskOutcome, AppError>
where
    F: FnOnce() -> FFut,
    FFut: Future<Output = Result<Finalized, AppError>>,
    C: FnOnce() -> CFut,
    CFut: Future<Output = Result<(), AppError>>,
{
    let DueRecord {
        kind,
        record_id,
        due_time,
    } = record;

    if let Some(remaining) = time_until(due_time, Utc::now()) {
        tokio::select! {
            biased;
            _ = cancel.cancelled() => {
                tracing::info!("{} {} wait cancelled by shutdown", kind, record_id);
                return Ok(TaskOutcome::Cancelled);
            }
            _ = tokio::time::sleep(remaining) => {}
        }
    }

    if cancel.is_cancelled() {
        tracing::info!("{} {} not started, shutting down", kind, record_id);
        return Ok(TaskOutcome::Cancelled);
    }

    let Some(_claim) = inflight.claim(kind, record_id) else {
        tracing::debug!("{} {} already in flight, skipping", kind, record_id);
        return Ok(TaskOutcome::Skipped);
    };

    let outcome = match finalize().await {
        Ok(Finalized::Performed) => TaskOutcome::Completed,
        Ok(Finalized::AlreadyCompleted) => {
            tracing::debug!("{} {} already completed, skipping", kind, record_id);
            return Ok(TaskOutcome::Skipped);
        }
        Ok(Finalized::TargetMissing) => {
            tracing::warn!("{} {} target no longer exists", kind, record_id);
            TaskOutcome::CompletedWithFailure
        }
        Err(e) => {
            tracing::error!("Failed to finalize {} {}: {}", kind, record_id, e);
            TaskOutcome::CompletedWithFailure
        }
    };

    if let Err(e) = complete().await {
        tracing::error!("Failed to mark {} {} complete: {}", kind, record_id, e);
        return Err(e);
    }

    Ok(outcome)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn record(due_time: DateTime<Utc>) -> DueRecord {
        DueRecord {
            kind: TaskKind::Reminder,
            record_id: 1,
            due_time,
        }
    }

    #[test]
    fn time_until_is_none_for_past_or_present() {
        let now = Utc::now();

        assert_eq!(time_until(now, now), None);
        assert_eq!(time_until(now - Duration::seconds(5), now), None);
        assert_eq!(
            time_until(now + Duration::seconds(5), now),
            Some(std::time::Duration::from_secs(5))
        );
    }

    #[tokio::test]
    async fn overdue_record_is_finalized_and_completed() {
        let finalized = AtomicUsize::new(0);
        let completed = AtomicUsize::new(0);

        let outcome = run_when_due(
            record(Utc::now() - Duration::minutes(1)),
            &CancellationToken::new(),
            &InFlight::new(),
            || async {
                finalized.fetch_add(1, Ordering::SeqCst);
                Ok(Finalized::Performed)
            },
            || async {
                completed.fetch_add(1, Ordering::SeqCst);
                Ok(())
            },
        )
        .await
        .unwrap();

        assert_eq!(outcome, TaskOutcome::Completed);
        assert_eq!(finalized.load(Ordering::SeqCst), 1);
        assert_eq!(completed.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn waits_until_due_before_finalizing() {
        let started = tokio::time::Instant::now();

        let outcome = run_when_due(
            record(Utc::now() + Duration::minutes(10)),
            &CancellationToken::new(),
            &InFlight::new(),
            || async { Ok(Finalized::Performed) },
            || async { Ok(()) },
        )
        .await
        .unwrap();

        assert_eq!(outcome, TaskOutcome::Completed);
        assert!(started.elapsed() >= std::time::Duration::from_secs(9 * 60));
    }

    #[tokio::test]
    async fn failed_finalization_still_completes_record() {
        let completed = AtomicUsize::new(0);

        let outcome = run_when_due(
            record(Utc::now()),
            &CancellationToken::new(),
            &InFlight::new(),
            || async { Err(AppError::NotFound("message".to_string())) },
            || async {
                completed.fetch_add(1, Ordering::SeqCst);
                Ok(())
            },
        )
        .await
        .unwrap();

        assert_eq!(outcome, TaskOutcome::CompletedWithFailure);
        assert_eq!(completed.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn cancellation_mid_wait_leaves_record_incomplete() {
        let cancel = CancellationToken::new();
        let finalized = AtomicUsize::new(0);
        let completed = AtomicUsize::new(0);

        let trigger = cancel.clone();
        tokio::spawn(async move {
            tokio::time::sleep(std::time::Duration::from_millis(20)).await;
            trigger.cancel();
        });

        let outcome = run_when_due(
            record(Utc::now() + Duration::hours(1)),
            &cancel,
            &InFlight::new(),
            || async {
                finalized.fetch_add(1, Ordering::SeqCst);
                Ok(Finalized::Performed)
            },
            || async {
                completed.fetch_add(1, Ordering::SeqCst);
                Ok(())
            },
        )
        .await
        .unwrap();

        assert_eq!(outcome, TaskOutcome::Cancelled);
        assert_eq!(finalized.load(Ordering::SeqCst), 0);
        assert_eq!(completed.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn claimed_record_is_skipped() {
        let inflight = InFlight::new();
        let _held = inflight.claim(TaskKind::Reminder, 1);
        let finalized = AtomicUsize::new(0);

        let outcome = run_when_due(
            record(Utc::now()),
            &CancellationToken::new(),
            &inflight,
            || async {
                finalized.fetch_add(1, Ordering::SeqCst);
                Ok(Finalized::Performed)
            },
            || async { Ok(()) },
        )
        .await
        .unwrap();

        assert_eq!(outcome, TaskOutcome::Skipped);
        assert_eq!(finalized.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn completion_failure_is_returned() {
        let outcome = run_when_due(
            record(Utc::now()),
            &CancellationToken::new(),
            &InFlight::new(),
            || async { Ok(Finalized::Performed) },
            || async { Err(AppError::DbErr(sea_orm::DbErr::Custom("offline".to_string()))) },
        )
        .await;

        assert!(matches!(outcome, Err(AppError::DbErr(_))));
    }
}
