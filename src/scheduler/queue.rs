//! Bounded FIFO hand-off between producers and the task processor.

use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

use crate::{error::AppError, scheduler::task::DeferredTask};

/// Creates a task queue with room for `capacity` pending tasks.
///
/// A capacity of zero is raised to one.
///
/// # Returns
/// - `(TaskQueue, TaskReceiver)` - Cloneable producer handle and the single consumer
pub fn task_queue(capacity: usize) -> (TaskQueue, TaskReceiver) {
    let (sender, receiver) = mpsc::channel(capacity.max(1));
    (TaskQueue { sender }, TaskReceiver { receiver })
}

/// Producer handle; clone freely.
#[derive(Clone, Debug)]
pub struct TaskQueue {
    sender: mpsc::Sender<DeferredTask>,
}

impl TaskQueue {
    /// Adds a task to the back of the queue.
    ///
    /// Suspends while the queue is full. Never drops a task silently.
    ///
    /// # Returns
    /// - `Ok(())` - Task accepted
    /// - `Err(AppError::QueueClosed)` - The processor has stopped
    pub async fn enqueue(&self, task: DeferredTask) -> Result<(), AppError> {
        tracing::debug!("Enqueued {} task {} ({})", task.kind, task.id, task.description);

        self.sender
            .send(task)
            .await
            .map_err(|_| AppError::QueueClosed)
    }
}

/// Consumer end, owned by the task processor.
#[derive(Debug)]
pub struct TaskReceiver {
    receiver: mpsc::Receiver<DeferredTask>,
}

impl TaskReceiver {
    /// Waits for the next task in FIFO order.
    ///
    /// # Returns
    /// - `Some(DeferredTask)` - Next task
    /// - `None` - Shutdown was signalled or every producer is gone
    pub async fn dequeue(&mut self, cancel: &CancellationToken) -> Option<DeferredTask> {
        tokio::select! {
            biased;
            _ = cancel.cancelled() => None,
            task = self.receiver.recv() => task,
        }
    }

    /// Stops accepting tasks; later enqueues fail with `QueueClosed`.
    pub fn close(&mut self) {
        self.receiver.close();
    }

    /// Number of tasks waiting to be dequeued.
    pub fn len(&self) -> usize {
        self.receiver.len()
    }

    pub fn is_empty(&self) -> bool {
        self.receiver.is_empty()
    }
}
