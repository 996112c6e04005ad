//! The single long-running consumer of the task queue.

use tokio::sync::watch;
use tokio_util::{sync::CancellationToken, task::TaskTracker};

use crate::{
    error::internal::InternalError,
    scheduler::{
        queue::TaskReceiver,
        task::{DeferredTask, TaskOutcome},
    },
};

/// Observable state of the processor loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProcessorState {
    Idle,
    AwaitingTask,
    /// Handing a dequeued payload to its own contained task.
    Executing,
    Stopped,
}

pub struct TaskProcessor {
    receiver: TaskReceiver,
    tracker: TaskTracker,
    state: watch::Sender<ProcessorState>,
}

impl TaskProcessor {
    pub fn new(receiver: TaskReceiver) -> Self {
        let (state, _) = watch::channel(ProcessorState::Idle);
        Self {
            receiver,
            tracker: TaskTracker::new(),
            state,
        }
    }

    /// Subscribes to processor state changes.
    pub fn subscribe(&self) -> watch::Receiver<ProcessorState> {
        self.state.subscribe()
    }

    /// Runs the dequeue loop until `cancel` fires.
    ///
    /// Each payload is spawned separately so that its wait overlaps with others and so
    /// that an error or panic inside it is logged with the task's kind and id without
    /// ending the loop. On shutdown the queue is closed and every spawned payload is
    /// awaited; payloads observe the same token and return promptly.
    pub async fn run(mut self, cancel: CancellationToken) {
        tracing::info!("Task processor started");

        loop {
            self.state.send_replace(ProcessorState::AwaitingTask);

            let Some(task) = self.receiver.dequeue(&cancel).await else {
                break;
            };

            self.state.send_replace(ProcessorState::Executing);
            self.execute(task, cancel.clone());
            self.state.send_replace(ProcessorState::Idle);
        }

        self.receiver.close();
        if !self.receiver.is_empty() {
            tracing::info!(
                "Dropping {} queued task(s); their records stay incomplete for recovery",
                self.receiver.len()
            );
        }
        self.tracker.close();

        tracing::info!(
            "Task processor stopping, waiting for {} running task(s)",
            self.tracker.len()
        );
        self.tracker.wait().await;

        self.state.send_replace(ProcessorState::Stopped);
        tracing::info!("Task processor stopped");
    }

    fn execute(&self, task: DeferredTask, cancel: CancellationToken) {
        let id = task.id;
        let kind = task.kind;
        let description = task.description.clone();
        let queued_ms = (chrono::Utc::now() - task.created_at).num_milliseconds();

        tracing::debug!(
            "Starting {} task {} ({}) after {}ms in queue",
            kind,
            id,
            description,
            queued_ms
        );

        let handle = tokio::spawn(task.run(cancel));

        self.tracker.spawn(async move {
            match handle.await {
                Ok(Ok(TaskOutcome::Cancelled)) => {
                    tracing::info!("{} task {} cancelled by shutdown", kind, id);
                }
                Ok(Ok(outcome)) => {
                    tracing::debug!("{} task {} finished: {:?}", kind, id, outcome);
                }
                Ok(Err(e)) => {
                    tracing::error!("{} task {} ({}) failed: {}", kind, id, description, e);
                }
                Err(join_err) if join_err.is_panic() => {
                    tracing::error!(
                        "{} ({})",
                        InternalError::TaskPanicked { task_id: id },
                        kind
                    );
                }
                Err(_) => {
                    tracing::info!("{} task {} aborted", kind, id);
                }
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        error::AppError,
        scheduler::{queue::task_queue, task::TaskKind},
    };
    use std::sync::{
        atomic::{AtomicUsize, Ordering},
        Arc,
    };
    use std::time::Duration;

    fn counting_task(counter: Arc<AtomicUsize>) -> DeferredTask {
        DeferredTask::new(TaskKind::Reminder, "count", move |_cancel| async move {
            counter.fetch_add(1, Ordering::SeqCst);
            Ok(TaskOutcome::Completed)
        })
    }

    async fn explode() -> Result<TaskOutcome, AppError> {
        panic!("boom")
    }

    #[tokio::test]
    async fn keeps_running_after_failing_and_panicking_tasks() {
        let (queue, receiver) = task_queue(16);
        let cancel = CancellationToken::new();
        let counter = Arc::new(AtomicUsize::new(0));

        let processor = tokio::spawn(TaskProcessor::new(receiver).run(cancel.clone()));

        queue
            .enqueue(DeferredTask::new(
                TaskKind::PollFinalization,
                "fails",
                |_cancel| async {
                    Err::<TaskOutcome, _>(AppError::NotFound("poll 1".to_string()))
                },
            ))
            .await
            .unwrap();
        queue
            .enqueue(DeferredTask::new(
                TaskKind::GiveawayFinalization,
                "panics",
                |_cancel| explode(),
            ))
            .await
            .unwrap();
        queue
            .enqueue(counting_task(counter.clone()))
            .await
            .unwrap();

        tokio::time::timeout(Duration::from_secs(2), async {
            while counter.load(Ordering::SeqCst) == 0 {
                tokio::time::sleep(Duration::from_millis(5)).await;
            }
        })
        .await
        .unwrap();

        cancel.cancel();
        processor.await.unwrap();
    }

    #[tokio::test]
    async fn waits_overlap_instead_of_running_serially() {
        let (queue, receiver) = task_queue(16);
        let cancel = CancellationToken::new();
        let counter = Arc::new(AtomicUsize::new(0));

        let processor = tokio::spawn(TaskProcessor::new(receiver).run(cancel.clone()));

        // a long wait queued first must not delay the short one behind it
        queue
            .enqueue(DeferredTask::new(
                TaskKind::Reminder,
                "long",
                |cancel: CancellationToken| async move {
                    cancel.cancelled().await;
                    Ok(TaskOutcome::Cancelled)
                },
            ))
            .await
            .unwrap();
        queue
            .enqueue(counting_task(counter.clone()))
            .await
            .unwrap();

        tokio::time::timeout(Duration::from_secs(2), async {
            while counter.load(Ordering::SeqCst) == 0 {
                tokio::time::sleep(Duration::from_millis(5)).await;
            }
        })
        .await
        .unwrap();

        cancel.cancel();
        processor.await.unwrap();
    }

    #[tokio::test]
    async fn stops_on_cancellation_and_drains_running_tasks() {
        let (queue, receiver) = task_queue(16);
        let cancel = CancellationToken::new();
        let finished = Arc::new(AtomicUsize::new(0));

        let processor = TaskProcessor::new(receiver);
        let mut state = processor.subscribe();
        let handle = tokio::spawn(processor.run(cancel.clone()));

        let done = finished.clone();
        queue
            .enqueue(DeferredTask::new(
                TaskKind::Reminder,
                "waits for shutdown",
                move |cancel: CancellationToken| async move {
                    cancel.cancelled().await;
                    done.fetch_add(1, Ordering::SeqCst);
                    Ok(TaskOutcome::Cancelled)
                },
            ))
            .await
            .unwrap();

        state
            .wait_for(|s| *s == ProcessorState::AwaitingTask)
            .await
            .unwrap();
        tokio::time::sleep(Duration::from_millis(10)).await;

        cancel.cancel();
        handle.await.unwrap();

        assert_eq!(*state.borrow(), ProcessorState::Stopped);
        assert_eq!(finished.load(Ordering::SeqCst), 1);
        assert!(matches!(
            queue.enqueue(counting_task(finished.clone())).await,
            Err(AppError::QueueClosed)
        ));
    }
}
