//! Delayed-task scheduling and recovery.
//!
//! Producers (command handlers and the recovery sequencer) build a `DeferredTask` whose
//! payload waits until its record is due, finalizes it and marks it complete. Tasks flow
//! through a bounded `TaskQueue` to the single `TaskProcessor`, which runs each payload
//! in its own contained task so long waits overlap. Durability lives in the database:
//! the queue is volatile, and `RecoverySequencer` rebuilds it from incomplete records on
//! every boot.
//!
//! A single `CancellationToken` created in `main` stops the processor loop and interrupts
//! every payload that is still waiting; interrupted records stay incomplete for the next
//! boot to pick up.

pub mod deferred;
pub mod inflight;
pub mod processor;
pub mod queue;
pub mod recovery;
pub mod sweep;
pub mod task;
