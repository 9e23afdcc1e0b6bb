use {
    crate::{config::Configuration, store::ProfileStore},
    build_info::BuildInfo,
    std::sync::Arc,
    tokio::sync::Mutex,
};

pub struct AppState {
    pub config: Configuration,
    pub build_info: BuildInfo,
    pub store: Arc<dyn ProfileStore>,
    /// Held for the duration of a sweep.
    pub sweep_lock: Mutex<()>,
}

build_info::build_info!(fn build_info);

impl AppState {
    pub fn new(config: Configuration, store: Arc<dyn ProfileStore>) -> Self {
        let build_info: &BuildInfo = build_info();

        Self {
            config,
            build_info: build_info.clone(),
            store,
            sweep_lock: Mutex::new(()),
        }
    }
}
