//! Composition root: binds the socket and serves the relay routes.

use actix_governor::{Governor, GovernorConfigBuilder};
use actix_web::{middleware::Logger, web, App, HttpServer};

use crate::config::RelayConfig;
use crate::cors::build_cors;
use crate::msu::HttpTransport;
use crate::routes;
use crate::state::AppState;

/// Access log format. `%U` is the path only; the query string holds
/// `token` and `data` and must not reach the logs.
const ACCESS_LOG_FORMAT: &str = "%{r}a \"%U\" %s %b %T";

/// Serve until the server is stopped.
pub async fn run(config: RelayConfig) -> std::io::Result<()> {
    let bind_addr = config.bind_addr.clone();
    let port = config.port;
    let allowed_origins = config.allowed_origins.clone();
    let rate_limit_rpm = config.rate_limit_rpm;

    let state = AppState::new(config).map_err(std::io::Error::other)?;
    let state_data = web::Data::new(state);

    let governor_conf = GovernorConfigBuilder::default()
        .requests_per_minute(rate_limit_rpm)
        .finish()
        .ok_or_else(|| std::io::Error::other("invalid rate limiter config"))?;

    tracing::info!("msu-relay listening at http://{bind_addr}:{port}");
    tracing::info!("Endpoints: GET /auth3d, POST /sale, GET /, GET /health");
    tracing::info!("Rate limit: {rate_limit_rpm} req/min per IP");

    HttpServer::new(move || {
        App::new()
            .app_data(state_data.clone())
            .wrap(Logger::new(ACCESS_LOG_FORMAT))
            .wrap(build_cors(&allowed_origins))
            .wrap(Governor::new(&governor_conf))
            .configure(routes::configure::<HttpTransport>)
    })
    .bind((bind_addr.as_str(), port))?
    .run()
    .await
}
