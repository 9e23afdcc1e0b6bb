use {
    crate::{
        services::public_http_server::handlers::sweep::SweepResponse, store::error::StoreError,
    },
    axum::{response::IntoResponse, Json},
    hyper::StatusCode,
    tracing::{error, warn},
};

pub type Result<T> = std::result::Result<T, SweeperError>;

#[derive(Debug, thiserror::Error)]
pub enum SweeperError {
    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Envy(#[from] envy::Error),

    #[error(transparent)]
    DotEnvy(#[from] dotenvy::Error),

    #[error("A plan expiry sweep is already in progress")]
    SweepInProgress,
}

impl IntoResponse for SweeperError {
    fn into_response(self) -> axum::response::Response {
        let status = match self {
            Self::SweepInProgress => {
                warn!("Error response: {:?}", self);
                StatusCode::CONFLICT
            }
            _ => {
                error!("Unhandled error: {:?}", self);
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };
        (status, Json(SweepResponse::error(&self))).into_response()
    }
}
