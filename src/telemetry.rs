use tracing::info;
use tracing_subscriber::EnvFilter;

/// Initialize tracing for the console process.
pub fn init_telemetry() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,agbot_console=debug"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();

    info!("📊 Telemetry initialized");
}
