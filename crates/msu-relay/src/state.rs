use crate::config::RelayConfig;
use crate::msu::{HttpTransport, MsuTransport};
use std::sync::Arc;
use std::time::Duration;

/// Shared application state
pub struct AppState<T = HttpTransport> {
    pub config: Arc<RelayConfig>,
    pub transport: T,
}

impl<T: MsuTransport> AppState<T> {
    pub fn with_transport(config: RelayConfig, transport: T) -> Self {
        Self {
            config: Arc::new(config),
            transport,
        }
    }
}

impl AppState<HttpTransport> {
    pub fn new(config: RelayConfig) -> Result<Self, crate::error::SaleError> {
        let transport = HttpTransport::new(Duration::from_secs(config.msu_timeout_secs))?;
        Ok(Self::with_transport(config, transport))
    }
}
