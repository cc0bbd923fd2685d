use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use msu_relay::{server, RelayConfig};

#[tokio::main]
async fn main() -> std::io::Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,actix_web=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = match RelayConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!(error = %e, "invalid configuration");
            std::process::exit(1);
        }
    };

    tracing::info!("MSU base URL: {}", config.msu_base_url);
    tracing::info!("MSU timeout: {}s", config.msu_timeout_secs);

    server::run(config).await
}
