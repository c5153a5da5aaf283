//! Runtime settings read from the environment.
//!
//! Every value has a default and a missing variable is logged, not fatal. A variable that is
//! set but unparseable is an error. The remote store is optional: it is only configured when
//! both `FOOD_DATA_URL` and `FOOD_DATA_KEY` are present.

use crate::pricing::TaxRate;
use std::env;
use std::fmt::Display;
use std::num::{NonZeroU64, NonZeroUsize};
use std::str::FromStr;
use std::time::Duration;
use thiserror::Error;
use tracing::{info, warn};

#[derive(Debug, Clone, Error, PartialEq)]
pub enum ConfigError {
    #[error("invalid {key} value {value:?}: {reason}")]
    Invalid {
        key: &'static str,
        value: String,
        reason: String,
    },
}

/// How the synthetic rider moves.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrackingSettings {
    pub interval: Duration,
    /// Degrees added to latitude and longitude per tick.
    pub step: f64,
}

impl Default for TrackingSettings {
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(5),
            step: 0.0001,
        }
    }
}

/// Where the PostgREST/GoTrue backend lives.
#[derive(Debug, Clone, PartialEq)]
pub struct RemoteConfig {
    pub url: String,
    pub api_key: String,
    pub timeout: Duration,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub tax_rate: TaxRate,
    pub currency: String,
    pub tracking: TrackingSettings,
    pub actor_buffer: usize,
    pub remote: Option<RemoteConfig>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            tax_rate: TaxRate::default(),
            currency: "PKR".to_string(),
            tracking: TrackingSettings::default(),
            actor_buffer: 32,
            remote: None,
        }
    }
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the config from any key lookup. `load` uses the process environment.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let timeout = Duration::from_secs(try_load(&lookup, "FOOD_HTTP_TIMEOUT_SECS", "10")?);
        let remote = match (lookup("FOOD_DATA_URL"), lookup("FOOD_DATA_KEY")) {
            (Some(url), Some(api_key)) => Some(RemoteConfig {
                url,
                api_key,
                timeout,
            }),
            (Some(_), None) | (None, Some(_)) => {
                warn!("FOOD_DATA_URL and FOOD_DATA_KEY must be set together, using in-memory store");
                None
            }
            (None, None) => {
                info!("FOOD_DATA_URL not set, using in-memory store");
                None
            }
        };

        Ok(Self {
            tax_rate: try_load(&lookup, "FOOD_TAX_RATE", "0.17")?,
            currency: try_load(&lookup, "FOOD_CURRENCY", "PKR")?,
            tracking: TrackingSettings {
                interval: Duration::from_secs(
                    try_load::<NonZeroU64>(&lookup, "FOOD_TRACKING_INTERVAL_SECS", "5")?.get(),
                ),
                step: try_load::<Finite>(&lookup, "FOOD_TRACKING_STEP", "0.0001")?.0,
            },
            actor_buffer: try_load::<NonZeroUsize>(&lookup, "FOOD_ACTOR_BUFFER", "32")?.get(),
            remote,
        })
    }
}

/// An `f64` that is neither NaN nor infinite.
struct Finite(f64);

impl FromStr for Finite {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value: f64 = s.parse().map_err(|e| format!("{e}"))?;
        if value.is_finite() {
            Ok(Self(value))
        } else {
            Err("must be a finite number".to_string())
        }
    }
}

fn try_load<T>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &'static str,
    default: &str,
) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: Display,
{
    let value = lookup(key).unwrap_or_else(|| {
        info!("{key} not set, using default: {default}");
        default.to_string()
    });
    match value.parse::<T>() {
        Ok(parsed) => Ok(parsed),
        Err(e) => {
            warn!("Invalid {key} value: {e}");
            Err(ConfigError::Invalid {
                key,
                reason: e.to_string(),
                value,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_when_nothing_is_set() {
        let config = AppConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn test_overrides_are_parsed() {
        let config = AppConfig::from_lookup(lookup(&[
            ("FOOD_TAX_RATE", "0.05"),
            ("FOOD_TRACKING_INTERVAL_SECS", "1"),
            ("FOOD_DATA_URL", "https://db.example.test"),
            ("FOOD_DATA_KEY", "anon"),
            ("FOOD_HTTP_TIMEOUT_SECS", "3"),
        ]))
        .unwrap();

        assert_eq!(config.tax_rate.value(), Decimal::new(5, 2));
        assert_eq!(config.tracking.interval, Duration::from_secs(1));
        let remote = config.remote.unwrap();
        assert_eq!(remote.url, "https://db.example.test");
        assert_eq!(remote.timeout, Duration::from_secs(3));
    }

    #[test]
    fn test_bad_values_are_errors() {
        let err = AppConfig::from_lookup(lookup(&[("FOOD_TAX_RATE", "1.5")])).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { key: "FOOD_TAX_RATE", .. }));

        let err = AppConfig::from_lookup(lookup(&[("FOOD_ACTOR_BUFFER", "0")])).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { key: "FOOD_ACTOR_BUFFER", .. }));
    }

    #[test]
    fn test_tracking_step_must_be_finite() {
        for bad in ["NaN", "inf", "-infinity"] {
            let err =
                AppConfig::from_lookup(lookup(&[("FOOD_TRACKING_STEP", bad)])).unwrap_err();
            assert_eq!(
                err,
                ConfigError::Invalid {
                    key: "FOOD_TRACKING_STEP",
                    value: bad.to_string(),
                    reason: "must be a finite number".to_string(),
                }
            );
        }
        let config = AppConfig::from_lookup(lookup(&[("FOOD_TRACKING_STEP", "0.0005")])).unwrap();
        assert_eq!(config.tracking.step, 0.0005);
    }

    #[test]
    fn test_half_configured_remote_is_ignored() {
        let config = AppConfig::from_lookup(lookup(&[("FOOD_DATA_URL", "https://x.test")])).unwrap();
        assert!(config.remote.is_none());
    }
}
