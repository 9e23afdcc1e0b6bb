use {
    crate::{
        config::Configuration,
        services::{plan_expiry_job, public_http_server},
        state::AppState,
        store::{appwrite::AppwriteClient, ProfileStore},
    },
    std::{future, sync::Arc},
    tokio::{select, sync::broadcast},
    tracing::info,
};

pub mod clock;
pub mod config;
pub mod error;
pub mod model;
pub mod services;
pub mod state;
pub mod store;

pub type Result<T> = std::result::Result<T, error::SweeperError>;

pub fn create_store(config: &Configuration) -> Result<Arc<dyn ProfileStore>> {
    let client = AppwriteClient::new(
        &config.appwrite_endpoint,
        &config.appwrite_project_id,
        &config.appwrite_api_key,
        &config.database_id,
        &config.user_profiles_collection_id,
    )?;
    info!(
        "Sweeping documents at {}",
        client.documents_endpoint().as_str()
    );
    Ok(Arc::new(client))
}

pub async fn bootstrap(mut shutdown: broadcast::Receiver<()>, config: Configuration) -> Result<()> {
    let store = create_store(&config)?;
    let state = Arc::new(AppState::new(config, store));

    let public_http_server =
        public_http_server::start(state.config.bind_ip, state.config.port, state.clone());

    let plan_expiry_job = {
        let state = state.clone();
        async move {
            match state.config.sweep_interval {
                Some(period) if !period.is_zero() => {
                    info!("Scheduling plan expiry sweep every {period:?}");
                    plan_expiry_job::start(state, period).await
                }
                _ => {
                    info!("No sweep interval configured, waiting for external triggers");
                    future::pending::<()>().await
                }
            }
        }
    };

    select! {
        e = public_http_server => info!("Public HTTP server terminating {:?}", e),
        _ = plan_expiry_job => info!("Plan expiry job terminating"),
        _ = shutdown.recv() => info!("Shutdown signal received, killing services"),
    }

    Ok(())
}
