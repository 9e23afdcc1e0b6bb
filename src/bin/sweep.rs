use {
    plan_expiry_sweeper::{
        config::get_configuration,
        create_store,
        error::SweeperError,
        services::{
            plan_expiry_job::{run_once, SweepReport},
            public_http_server::handlers::sweep::SweepResponse,
        },
        state::AppState,
    },
    std::process::ExitCode,
    tracing::error,
    tracing_subscriber::fmt::format::FmtSpan,
};

/// Runs a single plan expiry sweep and prints the outcome as JSON, for cron-style schedulers
#[tokio::main]
async fn main() -> ExitCode {
    let config = match get_configuration() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load config: {e}");
            return ExitCode::FAILURE;
        }
    };
    tracing_subscriber::fmt()
        .with_env_filter(&config.log_level)
        .with_span_events(FmtSpan::CLOSE)
        .with_ansi(std::env::var("ANSI_LOGS").is_ok())
        .with_writer(std::io::stderr)
        .init();

    let outcome = match create_store(&config) {
        Ok(store) => run_once(&AppState::new(config, store)).await,
        Err(e) => Err(e),
    };

    let (body, exit_code) = report(outcome);
    println!("{body}");
    exit_code
}

/// The JSON line printed to stdout and the process exit code for a finished run.
fn report(outcome: Result<SweepReport, SweeperError>) -> (String, ExitCode) {
    let (response, exit_code) = match outcome {
        Ok(report) => (SweepResponse::success(report), ExitCode::SUCCESS),
        Err(e) => {
            error!("Error during plan expiry check: {e:?}");
            (SweepResponse::error(&e), ExitCode::FAILURE)
        }
    };

    match serde_json::to_string(&response) {
        Ok(body) => (body, exit_code),
        Err(e) => {
            error!("Failed to encode response: {e}");
            (String::new(), ExitCode::FAILURE)
        }
    }
}
