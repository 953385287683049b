//! Server configuration from the environment.

use std::net::SocketAddr;
use std::path::PathBuf;

use crate::geocode::NominatimConfig;
use crate::planner::{ResolveMode, ResolverConfig};
use crate::routing::OsrmConfig;
use crate::waypoints::ReturnPolicy;

/// Default listen address.
const DEFAULT_BIND_ADDR: &str = "127.0.0.1:3000";

/// Error reading configuration.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: {value:?} ({reason})")]
    Invalid {
        var: &'static str,
        value: String,
        reason: String,
    },
}

/// Everything the server binary needs to start.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub bind_addr: SocketAddr,
    pub nominatim: NominatimConfig,
    pub osrm: OsrmConfig,
    pub resolver: ResolverConfig,
    /// Serve mock providers loaded from this directory instead of the
    /// real services
    pub mock_dir: Option<PathBuf>,
}

impl AppConfig {
    /// Read configuration from `TRIP_*` environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Read configuration through an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |var: &str| lookup(var).filter(|v| !v.trim().is_empty());

        let bind_addr = parse_var(
            "TRIP_BIND_ADDR",
            get("TRIP_BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string()),
        )?;

        let mut nominatim = get("TRIP_NOMINATIM_URL")
            .map(NominatimConfig::new)
            .unwrap_or_default();
        let mut osrm = get("TRIP_OSRM_URL").map(OsrmConfig::new).unwrap_or_default();

        if let Some(value) = get("TRIP_HTTP_TIMEOUT_SECS") {
            let secs: u64 = parse_var("TRIP_HTTP_TIMEOUT_SECS", value)?;
            nominatim = nominatim.with_timeout(secs);
            osrm = osrm.with_timeout(secs);
        }

        let batch_size = match get("TRIP_BATCH_SIZE") {
            Some(value) => {
                let n: usize = parse_var("TRIP_BATCH_SIZE", value.clone())?;
                if n == 0 {
                    return Err(invalid("TRIP_BATCH_SIZE", value, "must be at least 1"));
                }
                Some(n)
            }
            None => None,
        };

        let mode = match get("TRIP_RESOLVE_MODE").map(|v| v.trim().to_lowercase()) {
            None => ResolveMode::Sequential,
            Some(m) if m == "sequential" => ResolveMode::Sequential,
            Some(m) if m == "parallel" => match batch_size {
                Some(batch_size) => ResolveMode::Parallel { batch_size },
                None => ResolveMode::parallel(),
            },
            Some(other) => {
                return Err(invalid(
                    "TRIP_RESOLVE_MODE",
                    other,
                    "expected sequential or parallel",
                ));
            }
        };

        let return_policy = match get("TRIP_ROUND_TRIP") {
            None => ReturnPolicy::default(),
            Some(value) => {
                if parse_bool("TRIP_ROUND_TRIP", value)? {
                    ReturnPolicy::RoundTrip
                } else {
                    ReturnPolicy::OneWay
                }
            }
        };

        Ok(Self {
            bind_addr,
            nominatim,
            osrm,
            resolver: ResolverConfig::new(mode, return_policy),
            mock_dir: get("TRIP_MOCK_DIR").map(PathBuf::from),
        })
    }
}

fn invalid(var: &'static str, value: String, reason: impl Into<String>) -> ConfigError {
    ConfigError::Invalid {
        var,
        value,
        reason: reason.into(),
    }
}

fn parse_var<T>(var: &'static str, value: String) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    value.trim().parse().map_err(|e: T::Err| invalid(var, value, e.to_string()))
}

fn parse_bool(var: &'static str, value: String) -> Result<bool, ConfigError> {
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(invalid(var, value, "expected true or false")),
    }
}
