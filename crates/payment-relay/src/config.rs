//! Relay settings from the environment. Only the processor's secret key is required.

use crate::error::ConfigError;
use std::env;
use std::fmt;
use tracing::info;

pub struct RelayConfig {
    pub port: u16,
    pub secret_key: String,
    pub api_base: String,
    pub currency: String,
}

impl fmt::Debug for RelayConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RelayConfig")
            .field("port", &self.port)
            .field("secret_key", &"<redacted>")
            .field("api_base", &self.api_base)
            .field("currency", &self.currency)
            .finish()
    }
}

impl RelayConfig {
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let secret_key = lookup("PAYMENT_SECRET_KEY")
            .filter(|key| !key.trim().is_empty())
            .ok_or(ConfigError::Missing("PAYMENT_SECRET_KEY"))?;

        let port = match lookup("PORT") {
            Some(value) => value.parse().map_err(|e: std::num::ParseIntError| {
                ConfigError::Invalid {
                    key: "PORT",
                    reason: e.to_string(),
                    value: value.clone(),
                }
            })?,
            None => {
                info!("PORT not set, using default: 3000");
                3000
            }
        };

        Ok(Self {
            port,
            secret_key,
            api_base: lookup("PAYMENT_API_BASE")
                .unwrap_or_else(|| "https://api.stripe.com".to_string()),
            currency: lookup("PAYMENT_CURRENCY").unwrap_or_else(|| "usd".to_string()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_secret_key_is_required() {
        let err = RelayConfig::from_lookup(|_| None).unwrap_err();
        assert_eq!(err, ConfigError::Missing("PAYMENT_SECRET_KEY"));
    }

    #[test]
    fn test_defaults_and_redaction() {
        let config = RelayConfig::from_lookup(|key: &str| match key {
            "PAYMENT_SECRET_KEY" => Some("sk_test_123".to_string()),
            _ => None,
        })
        .unwrap();
        assert_eq!(config.port, 3000);
        assert_eq!(config.currency, "usd");
        assert_eq!(config.api_base, "https://api.stripe.com");
        assert!(!format!("{config:?}").contains("sk_test_123"));
    }

    #[test]
    fn test_bad_port() {
        let err = RelayConfig::from_lookup(|key: &str| match key {
            "PAYMENT_SECRET_KEY" => Some("sk".to_string()),
            "PORT" => Some("http".to_string()),
            _ => None,
        })
        .unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { key: "PORT", .. }));
    }
}
