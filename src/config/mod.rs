use {
    crate::{
        clock::Clock,
        error::SweeperError,
        services::plan_expiry::{SweepSettings, DEFAULT_FREE_TIER_CHAR_LIMIT, DEFAULT_PAGE_SIZE},
    },
    std::{env, fmt, net::IpAddr, time::Duration},
    url::Url,
};

mod deployed;
mod local;

#[derive(Clone)]
pub struct Configuration {
    pub bind_ip: IpAddr,
    pub port: u16,
    pub log_level: String,

    /// Appwrite API base e.g. https://fra.cloud.appwrite.io/v1
    pub appwrite_endpoint: Url,
    pub appwrite_project_id: String,
    pub appwrite_api_key: String,
    pub database_id: String,
    pub user_profiles_collection_id: String,

    pub free_tier_char_limit: i64,
    pub sweep_page_size: usize,
    /// In-process schedule. `None` leaves triggering to an external scheduler.
    pub sweep_interval: Option<Duration>,

    pub clock: Clock,
}

impl Configuration {
    pub fn sweep_settings(&self) -> SweepSettings {
        SweepSettings {
            page_size: self.sweep_page_size,
            free_tier_char_limit: self.free_tier_char_limit,
        }
    }
}

impl fmt::Debug for Configuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Configuration")
            .field("bind_ip", &self.bind_ip)
            .field("port", &self.port)
            .field("log_level", &self.log_level)
            .field("appwrite_endpoint", &self.appwrite_endpoint)
            .field("appwrite_project_id", &self.appwrite_project_id)
            .field("appwrite_api_key", &"<redacted>")
            .field("database_id", &self.database_id)
            .field(
                "user_profiles_collection_id",
                &self.user_profiles_collection_id,
            )
            .field("free_tier_char_limit", &self.free_tier_char_limit)
            .field("sweep_page_size", &self.sweep_page_size)
            .field("sweep_interval", &self.sweep_interval)
            .field("clock", &self.clock)
            .finish()
    }
}

pub fn get_configuration() -> Result<Configuration, SweeperError> {
    if env::var("ENVIRONMENT") == Ok("DEPLOYED".to_owned()) {
        deployed::get_configuration()
    } else {
        local::get_configuration()
    }
}

/// `SWEEP_INTERVAL_SECS` unset or 0 disables the in-process schedule.
fn sweep_interval(secs: Option<u64>) -> Option<Duration> {
    secs.filter(|secs| *secs > 0).map(Duration::from_secs)
}

fn default_appwrite_endpoint() -> Url {
    "https://fra.cloud.appwrite.io/v1".parse().unwrap()
}

fn default_free_tier_char_limit() -> i64 {
    DEFAULT_FREE_TIER_CHAR_LIMIT
}

fn default_sweep_page_size() -> usize {
    DEFAULT_PAGE_SIZE
}

fn default_port() -> u16 {
    3000
}
