use std::time::Duration;
use tokio_cron_scheduler::{Job, JobScheduler};
use tokio_util::sync::CancellationToken;

use crate::{error::AppError, state::form::FormStores};

/// Starts the periodic sweep of abandoned wizard state.
///
/// Every `interval` the job removes wizard state older than `max_age` from each store.
/// The scheduler is shut down once `cancel` fires.
///
/// # Arguments
/// - `forms`: Wizard stores to sweep
/// - `interval`: Time between sweeps
/// - `max_age`: Age after which a wizard counts as abandoned
/// - `cancel`: Process shutdown signal
pub async fn start_form_sweep(
    forms: FormStores,
    interval: Duration,
    max_age: chrono::Duration,
    cancel: CancellationToken,
) -> Result<(), AppError> {
    let mut scheduler = JobScheduler::new().await?;

    let job = Job::new_repeated_async(interval, move |_uuid, _lock| {
        let forms = forms.clone();

        Box::pin(async move {
            let removed = forms.sweep_all(max_age);
            if removed > 0 {
                tracing::info!("Swept {} abandoned form state(s)", removed);
            }
        })
    })?;

    scheduler.add(job).await?;
    scheduler.start().await?;

    tracing::info!(
        "Form state sweep started, every {}s, max age {}m",
        interval.as_secs(),
        max_age.num_minutes()
    );

    tokio::spawn(async move {
        cancel.cancelled().await;
        if let Err(e) = scheduler.shutdown().await {
            tracing::error!("Failed to shut down form state sweep: {}", e);
        }
    });

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(flavor = "multi_thread")]
    async fn sweep_job_removes_stale_state() {
        let forms = FormStores::default();
        forms.poll.update(1, |form| form.question = "Stale?".to_string());
        let cancel = CancellationToken::new();

        start_form_sweep(
            forms.clone(),
            Duration::from_secs(1),
            chrono::Duration::zero(),
            cancel.clone(),
        )
        .await
        .unwrap();

        tokio::time::sleep(Duration::from_millis(2500)).await;
        cancel.cancel();

        assert!(forms.poll.is_empty());
    }
}
