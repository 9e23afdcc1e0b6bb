use {
    super::{
        default_appwrite_endpoint, default_free_tier_char_limit, default_port,
        default_sweep_page_size, sweep_interval, Configuration,
    },
    crate::error::SweeperError,
    serde::Deserialize,
    std::net::{IpAddr, Ipv4Addr},
    url::Url,
};

// Configuration entrypoint for a deployed service

#[derive(Deserialize, Debug)]
pub struct DeployedConfiguration {
    #[serde(default = "default_bind_ip")]
    pub bind_ip: IpAddr,
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default = "default_log_level")]
    pub log_level: String,

    #[serde(default = "default_appwrite_endpoint")]
    pub appwrite_endpoint: Url,
    #[serde(alias = "appwrite_function_project_id")]
    pub appwrite_project_id: String,
    pub appwrite_api_key: String,
    pub database_id: String,
    pub user_profiles_collection_id: String,

    #[serde(default = "default_free_tier_char_limit")]
    pub free_tier_char_limit: i64,
    #[serde(default = "default_sweep_page_size")]
    pub sweep_page_size: usize,
    pub sweep_interval_secs: Option<u64>,
}

fn default_bind_ip() -> IpAddr {
    IpAddr::V4(Ipv4Addr::UNSPECIFIED)
}

fn default_log_level() -> String {
    "WARN,plan_expiry_sweeper=INFO".to_string()
}

pub fn get_configuration() -> Result<Configuration, SweeperError> {
    let config = envy::from_env::<DeployedConfiguration>()?;

    Ok(Configuration {
        bind_ip: config.bind_ip,
        port: config.port,
        log_level: config.log_level,
        appwrite_endpoint: config.appwrite_endpoint,
        appwrite_project_id: config.appwrite_project_id,
        appwrite_api_key: config.appwrite_api_key,
        database_id: config.database_id,
        user_profiles_collection_id: config.user_profiles_collection_id,
        free_tier_char_limit: config.free_tier_char_limit,
        sweep_page_size: config.sweep_page_size,
        sweep_interval: sweep_interval(config.sweep_interval_secs),
        clock: None,
    })
}
