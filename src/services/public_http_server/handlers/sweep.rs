use {
    crate::{
        error::SweeperError,
        services::{
            plan_expiry::SweepSummary,
            plan_expiry_job::{run_once, SweepReport},
        },
        state::AppState,
    },
    axum::{extract::State, Json},
    chrono::SecondsFormat,
    serde::{Deserialize, Serialize},
    std::{fmt::Display, sync::Arc},
    tracing::instrument,
};

pub const SUCCESS_MESSAGE: &str = "Plan expiry check completed";
pub const FAILURE_MESSAGE: &str = "Failed to check plan expiries";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum SweepResponse {
    Success {
        message: String,
        timestamp: String,
        summary: SweepSummary,
    },
    Error {
        message: String,
        error: String,
    },
}

impl SweepResponse {
    pub fn success(report: SweepReport) -> Self {
        Self::Success {
            message: SUCCESS_MESSAGE.to_owned(),
            timestamp: report
                .timestamp
                .to_rfc3339_opts(SecondsFormat::Millis, true),
            summary: report.summary,
        }
    }

    pub fn error(error: &impl Display) -> Self {
        Self::Error {
            message: FAILURE_MESSAGE.to_owned(),
            error: error.to_string(),
        }
    }
}

#[instrument(name = "sweep_handler", skip_all)]
pub async fn handler(
    State(state): State<Arc<AppState>>,
) -> Result<Json<SweepResponse>, SweeperError> {
    let report = run_once(&state).await?;
    Ok(Json(SweepResponse::success(report)))
}
