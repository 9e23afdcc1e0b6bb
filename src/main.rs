use {
    plan_expiry_sweeper::{config::get_configuration, Result},
    tokio::{signal::ctrl_c, sync::broadcast},
    tracing::info,
    tracing_subscriber::fmt::format::FmtSpan,
};

#[tokio::main]
async fn main() -> Result<()> {
    let config = get_configuration()?;
    tracing_subscriber::fmt()
        .with_env_filter(&config.log_level)
        .with_span_events(FmtSpan::CLOSE)
        .with_ansi(std::env::var("ANSI_LOGS").is_ok())
        .init();

    let (signal, shutdown) = broadcast::channel(1);
    tokio::spawn(async move {
        if ctrl_c().await.is_ok() {
            info!("Received Ctrl-C");
            let _ = signal.send(());
        }
    });

    plan_expiry_sweeper::bootstrap(shutdown, config).await
}
