use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::PathBuf;
use std::time::Duration;

/// Application-level constants
pub const APP_NAME: &str = "Triage Service";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Lifetime of an issued verification code (10 minutes).
pub const VERIFICATION_CODE_TTL_SECS: u64 = 10 * 60;

/// Number of decimal digits in a verification code.
pub const VERIFICATION_CODE_LENGTH: usize = 6;

/// Default search radius for the facility locator, in miles.
pub const DEFAULT_FACILITY_RADIUS_MILES: f64 = 10.0;

/// Maximum number of facilities returned by a lookup.
pub const MAX_NEARBY_FACILITIES: usize = 5;

const DEFAULT_PORT: u16 = 5000;
const DEFAULT_MODELS_DIR: &str = "models";
const DEFAULT_SWEEP_INTERVAL_SECS: u64 = 60;

const ENV_HOST: &str = "TRIAGE_HOST";
const ENV_PORT: &str = "TRIAGE_PORT";
const ENV_MODELS_DIR: &str = "TRIAGE_MODELS_DIR";
const ENV_SWEEP_INTERVAL: &str = "TRIAGE_SWEEP_INTERVAL_SECS";

/// Default `tracing` filter when `RUST_LOG` is unset.
pub fn default_log_filter() -> &'static str {
    "triage_lib=info,triage_service=info,tower_http=info"
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {var}: {value:?}")]
    InvalidValue { var: &'static str, value: String },
}

/// Runtime configuration for the HTTP service.
#[derive(Debug, Clone, PartialEq)]
pub struct ServiceConfig {
    pub host: IpAddr,
    pub port: u16,
    /// Directory holding the serialized model files.
    pub models_dir: PathBuf,
    /// Interval between expired-code sweeps. `None` disables the sweeper.
    pub sweep_interval: Option<Duration>,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            host: IpAddr::V4(Ipv4Addr::UNSPECIFIED),
            port: DEFAULT_PORT,
            models_dir: PathBuf::from(DEFAULT_MODELS_DIR),
            sweep_interval: Some(Duration::from_secs(DEFAULT_SWEEP_INTERVAL_SECS)),
        }
    }
}

impl ServiceConfig {
    /// Build configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup. Unset keys keep
    /// their defaults; set-but-invalid keys are errors.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(raw) = lookup(ENV_HOST) {
            config.host = parse_var(ENV_HOST, &raw)?;
        }
        if let Some(raw) = lookup(ENV_PORT) {
            config.port = parse_var(ENV_PORT, &raw)?;
        }
        if let Some(raw) = lookup(ENV_MODELS_DIR) {
            if raw.trim().is_empty() {
                return Err(ConfigError::InvalidValue {
                    var: ENV_MODELS_DIR,
                    value: raw,
                });
            }
            config.models_dir = PathBuf::from(raw);
        }
        if let Some(raw) = lookup(ENV_SWEEP_INTERVAL) {
            let secs: u64 = parse_var(ENV_SWEEP_INTERVAL, &raw)?;
            config.sweep_interval = (secs > 0).then(|| Duration::from_secs(secs));
        }

        Ok(config)
    }

    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

fn parse_var<T: std::str::FromStr>(var: &'static str, raw: &str) -> Result<T, ConfigError> {
    raw.trim().parse().map_err(|_| ConfigError::InvalidValue {
        var,
        value: raw.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_when_environment_empty() {
        let config = ServiceConfig::from_lookup(|_| None).unwrap();
        assert_eq!(config, ServiceConfig::default());
        assert_eq!(config.port, 5000);
        assert_eq!(config.socket_addr().to_string(), "0.0.0.0:5000");
        assert_eq!(config.sweep_interval, Some(Duration::from_secs(60)));
    }

    #[test]
    fn overrides_from_environment() {
        let config = ServiceConfig::from_lookup(lookup_from(&[
            ("TRIAGE_HOST", "127.0.0.1"),
            ("TRIAGE_PORT", "8088"),
            ("TRIAGE_MODELS_DIR", "/srv/triage/models"),
            ("TRIAGE_SWEEP_INTERVAL_SECS", "15"),
        ]))
        .unwrap();

        assert_eq!(config.socket_addr().to_string(), "127.0.0.1:8088");
        assert_eq!(config.models_dir, PathBuf::from("/srv/triage/models"));
        assert_eq!(config.sweep_interval, Some(Duration::from_secs(15)));
    }

    #[test]
    fn zero_sweep_interval_disables_sweeper() {
        let config =
            ServiceConfig::from_lookup(lookup_from(&[("TRIAGE_SWEEP_INTERVAL_SECS", "0")]))
                .unwrap();
        assert!(config.sweep_interval.is_none());
    }

    #[test]
    fn invalid_port_is_rejected() {
        let err = ServiceConfig::from_lookup(lookup_from(&[("TRIAGE_PORT", "not-a-port")]))
            .unwrap_err();
        assert!(err.to_string().contains("TRIAGE_PORT"));
    }

    #[test]
    fn blank_models_dir_is_rejected() {
        let result = ServiceConfig::from_lookup(lookup_from(&[("TRIAGE_MODELS_DIR", "  ")]));
        assert!(result.is_err());
    }

    #[test]
    fn app_version_matches_cargo() {
        assert_eq!(APP_VERSION, "0.1.0");
    }
}
