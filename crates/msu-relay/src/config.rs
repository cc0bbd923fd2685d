use std::env;
use url::Url;

pub const DEFAULT_MSU_BASE_URL: &str = "https://entegrasyon.asseco-see.com.tr/msu/api/v2";
const DEFAULT_PORT: u16 = 6600;
const DEFAULT_BIND_ADDR: &str = "0.0.0.0";
const DEFAULT_TIMEOUT_SECS: u64 = 30;
const DEFAULT_RATE_LIMIT_RPM: u64 = 120;

#[derive(Debug, Clone)]
pub struct RelayConfig {
    /// MSU API base; the sale endpoint itself, and the prefix of the 3DS form action
    pub msu_base_url: String,
    /// Server port
    pub port: u16,
    /// Server bind address
    pub bind_addr: String,
    /// Timeout for the outbound SALE call
    pub msu_timeout_secs: u64,
    /// CORS allowed origins (empty = localhost only)
    pub allowed_origins: Vec<String>,
    /// Rate limit requests per minute, per client IP
    pub rate_limit_rpm: u64,
}

impl RelayConfig {
    /// Defaults for everything except the gateway URL. Used by tests and embedders.
    pub fn new(msu_base_url: impl Into<String>) -> Self {
        let msu_base_url: String = msu_base_url.into();
        Self {
            msu_base_url: msu_base_url.trim_end_matches('/').to_string(),
            port: DEFAULT_PORT,
            bind_addr: DEFAULT_BIND_ADDR.to_string(),
            msu_timeout_secs: DEFAULT_TIMEOUT_SECS,
            allowed_origins: Vec::new(),
            rate_limit_rpm: DEFAULT_RATE_LIMIT_RPM,
        }
    }

    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build the config from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let msu_base_url = var("MSU_BASE_URL").unwrap_or_else(|| DEFAULT_MSU_BASE_URL.to_string());
        let parsed =
            Url::parse(&msu_base_url).map_err(|_| ConfigError::InvalidUrl(msu_base_url.clone()))?;
        if parsed.scheme() != "https" && parsed.scheme() != "http" {
            return Err(ConfigError::InvalidUrl(msu_base_url));
        }
        if parsed.scheme() == "http" {
            tracing::warn!("MSU_BASE_URL is not HTTPS; only use this against a local sandbox");
        }

        let port = parse_number(&var, "PORT", DEFAULT_PORT)?;
        let msu_timeout_secs = parse_number(&var, "MSU_TIMEOUT_SECS", DEFAULT_TIMEOUT_SECS)?;
        if msu_timeout_secs == 0 {
            return Err(ConfigError::InvalidNumber {
                var: "MSU_TIMEOUT_SECS",
                value: "0".to_string(),
            });
        }
        let rate_limit_rpm = parse_number(&var, "RATE_LIMIT_RPM", DEFAULT_RATE_LIMIT_RPM)?;

        let bind_addr = var("BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string());

        let allowed_origins: Vec<String> = var("ALLOWED_ORIGINS")
            .map(|origins| {
                origins
                    .split(',')
                    .map(|s| s.trim().to_string())
                    .filter(|s| !s.is_empty())
                    .collect()
            })
            .unwrap_or_default();

        Ok(Self {
            msu_timeout_secs,
            port,
            bind_addr,
            allowed_origins,
            rate_limit_rpm,
            ..Self::new(msu_base_url)
        })
    }

    /// Endpoint receiving the server-to-server SALE form.
    pub fn sale_url(&self) -> &str {
        &self.msu_base_url
    }
}

fn parse_number<T, F>(var: &F, key: &'static str, default: T) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    F: Fn(&str) -> Option<String>,
{
    match var(key) {
        Some(raw) => raw.trim().parse().map_err(|_| ConfigError::InvalidNumber {
            var: key,
            value: raw,
        }),
        None => Ok(default),
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid URL: {0}")]
    InvalidUrl(String),

    #[error("invalid value for {var}: {value}")]
    InvalidNumber { var: &'static str, value: String },
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = RelayConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config.port, 6600);
        assert_eq!(config.msu_base_url, DEFAULT_MSU_BASE_URL);
        assert_eq!(config.sale_url(), DEFAULT_MSU_BASE_URL);
        assert_eq!(config.msu_timeout_secs, 30);
        assert!(config.allowed_origins.is_empty());
    }

    #[test]
    fn test_overrides() {
        let config = RelayConfig::from_lookup(lookup(&[
            ("PORT", "8080"),
            ("MSU_BASE_URL", "https://test.example.com/msu/api/v2/"),
            ("MSU_TIMEOUT_SECS", "5"),
            ("ALLOWED_ORIGINS", "https://shop.example.com, ,https://pay.example.com"),
        ]))
        .unwrap();
        assert_eq!(config.port, 8080);
        assert_eq!(config.msu_base_url, "https://test.example.com/msu/api/v2");
        assert_eq!(config.msu_timeout_secs, 5);
        assert_eq!(
            config.allowed_origins,
            vec!["https://shop.example.com", "https://pay.example.com"]
        );
    }

    #[test]
    fn test_rejects_bad_values() {
        assert!(matches!(
            RelayConfig::from_lookup(lookup(&[("PORT", "not-a-port")])),
            Err(ConfigError::InvalidNumber { var: "PORT", .. })
        ));
        assert!(matches!(
            RelayConfig::from_lookup(lookup(&[("MSU_TIMEOUT_SECS", "0")])),
            Err(ConfigError::InvalidNumber { .. })
        ));
        assert!(matches!(
            RelayConfig::from_lookup(lookup(&[("MSU_BASE_URL", "ftp://example.com")])),
            Err(ConfigError::InvalidUrl(_))
        ));
        assert!(matches!(
            RelayConfig::from_lookup(lookup(&[("MSU_BASE_URL", "not a url")])),
            Err(ConfigError::InvalidUrl(_))
        ));
    }
}
