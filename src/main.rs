use std::sync::Arc;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use prophet_lib::clipboard::SystemClipboard;
use prophet_lib::config::AppConfig;
use prophet_lib::Prophet;

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "prophet=info,prophet_lib=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = AppConfig::load().expect("failed to load configuration");
    let prophet = Arc::new(Prophet::new(config, Arc::new(SystemClipboard)));

    let monitor = {
        let prophet = prophet.clone();
        tokio::spawn(async move { prophet.run_monitor().await })
    };

    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for ctrl-c: {}", e);
    }
    info!("Shutting down");
    prophet.stop();
    if let Err(e) = monitor.await {
        tracing::error!("Monitor task failed: {}", e);
    }
}
