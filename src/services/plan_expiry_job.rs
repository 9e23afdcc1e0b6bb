use {
    super::plan_expiry::{sweep, SweepSummary},
    crate::{clock, error::SweeperError, state::AppState},
    chrono::{DateTime, Utc},
    std::{sync::Arc, time::Duration},
    tokio::time,
    tracing::{error, info, warn},
};

#[derive(Debug, Clone)]
pub struct SweepReport {
    /// The single "now" every expiry in the run was compared against.
    pub timestamp: DateTime<Utc>,
    pub summary: SweepSummary,
}

pub async fn start(state: Arc<AppState>, period: Duration) {
    let mut interval = time::interval(period);

    loop {
        interval.tick().await;
        info!("Running plan expiry job");
        match run_once(&state).await {
            Ok(report) => info!(
                "Plan expiry job completed at {}: {} downgraded",
                report.timestamp, report.summary.downgraded
            ),
            Err(SweeperError::SweepInProgress) => {
                warn!("Previous plan expiry sweep still running, skipping this tick")
            }
            Err(e) => error!("Error running plan expiry job: {e:?}"),
        }
    }
}

/// Runs one sweep unless another one is already running in this process.
pub async fn run_once(state: &AppState) -> Result<SweepReport, SweeperError> {
    let _guard = state
        .sweep_lock
        .try_lock()
        .map_err(|_| SweeperError::SweepInProgress)?;

    let timestamp = clock::now(&state.config.clock);
    info!("Checking for expired subscriptions on {timestamp}");

    let summary = sweep(
        state.store.as_ref(),
        &state.config.sweep_settings(),
        timestamp,
    )
    .await?;

    Ok(SweepReport { timestamp, summary })
}
