//! Start-up configuration from environment variables.

use std::net::SocketAddr;
use std::path::PathBuf;

use thiserror::Error;

use eanpay_gateway::GatewaySettings;

pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
pub const DEFAULT_PUBLIC_URL: &str = "http://localhost:8080";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("EANPAY_BIND_ADDR is not a socket address: {0}")]
    BindAddr(String),
}

/// Everything the server needs to start.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub bind_addr: SocketAddr,
    /// Base URL buyers are redirected back to after checkout.
    pub public_url: String,
    /// Optional JSON translation catalog for the gateway's strings.
    pub translations_path: Option<PathBuf>,
    pub gateway: GatewaySettings,
}

impl ApiConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let raw_addr = lookup("EANPAY_BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string());
        let bind_addr = raw_addr
            .parse()
            .map_err(|_| ConfigError::BindAddr(raw_addr.clone()))?;

        Ok(Self {
            bind_addr,
            public_url: lookup("EANPAY_PUBLIC_URL")
                .unwrap_or_else(|| DEFAULT_PUBLIC_URL.to_string()),
            translations_path: lookup("EANPAY_TRANSLATIONS").map(PathBuf::from),
            gateway: GatewaySettings::from_lookup(&lookup),
        })
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([0, 0, 0, 0], 8080)),
            public_url: DEFAULT_PUBLIC_URL.to_string(),
            translations_path: None,
            gateway: GatewaySettings::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_without_environment() {
        let cfg = ApiConfig::from_lookup(|_| None).unwrap();
        assert_eq!(cfg.bind_addr.to_string(), DEFAULT_BIND_ADDR);
        assert_eq!(cfg.public_url, DEFAULT_PUBLIC_URL);
        assert!(cfg.translations_path.is_none());
        assert!(cfg.gateway.enabled);
    }

    #[test]
    fn reads_overrides_including_gateway_settings() {
        let cfg = ApiConfig::from_lookup(|key| match key {
            "EANPAY_BIND_ADDR" => Some("127.0.0.1:9000".into()),
            "EANPAY_PUBLIC_URL" => Some("https://shop.example".into()),
            "EANPAY_GATEWAY_ENABLED" => Some("no".into()),
            _ => None,
        })
        .unwrap();

        assert_eq!(cfg.bind_addr.port(), 9000);
        assert_eq!(cfg.public_url, "https://shop.example");
        assert!(!cfg.gateway.enabled);
    }

    #[test]
    fn rejects_bad_bind_addr() {
        let err = ApiConfig::from_lookup(|key| {
            (key == "EANPAY_BIND_ADDR").then(|| "not an address".to_string())
        })
        .unwrap_err();
        assert!(matches!(err, ConfigError::BindAddr(_)));
    }
}
