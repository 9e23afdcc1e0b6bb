pub mod plan_expiry;
pub mod plan_expiry_job;
pub mod public_http_server;
