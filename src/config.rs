use std::{env, fmt::Display, net::SocketAddr, path::PathBuf, str::FromStr, time::Duration};

use thiserror::Error;
use tracing::{debug, info};

pub const DEFAULT_ADDR: &str = "127.0.0.1:5000";
pub const DEFAULT_DATABASE_PATH: &str = "estates.sqlite3";
pub const DEFAULT_MAX_WORKERS: &str = "8";
pub const DEFAULT_API_BASE: &str = "http://127.0.0.1:5000";
pub const DEFAULT_DEBOUNCE_MS: &str = "500";

#[derive(Debug, Error)]
#[error("invalid {key} value {value:?}: {reason}")]
pub struct ConfigError {
    pub key: String,
    pub value: String,
    pub reason: String,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub addr: SocketAddr,
    pub database_path: String,
    /// `None` means the dataset compiled into the binary.
    pub sample_data_path: Option<PathBuf>,
    pub max_workers: usize,
    pub api_base: String,
    pub search_debounce: Duration,
}

impl Config {
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Same as `load`, reading from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        Ok(Self {
            addr: try_load(&lookup, "ESTATES_ADDR", DEFAULT_ADDR)?,
            database_path: try_load(&lookup, "DATABASE_PATH", DEFAULT_DATABASE_PATH)?,
            sample_data_path: lookup("SAMPLE_DATA_PATH")
                .filter(|s| !s.trim().is_empty())
                .map(PathBuf::from),
            max_workers: try_load(&lookup, "MAX_WORKERS", DEFAULT_MAX_WORKERS)?,
            api_base: try_load(&lookup, "API_BASE", DEFAULT_API_BASE)?,
            search_debounce: Duration::from_millis(try_load(
                &lookup,
                "SEARCH_DEBOUNCE_MS",
                DEFAULT_DEBOUNCE_MS,
            )?),
        })
    }
}

fn try_load<T, F>(lookup: &F, key: &str, default: &str) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: Display,
    F: Fn(&str) -> Option<String>,
{
    let value = lookup(key).unwrap_or_else(|| {
        debug!("{key} not set, using default: {default}");
        default.to_string()
    });

    let parsed = value.trim().parse().map_err(|e: T::Err| ConfigError {
        key: key.to_string(),
        value: value.clone(),
        reason: e.to_string(),
    })?;

    info!("{key} = {value}");
    Ok(parsed)
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
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_when_unset() {
        let cfg = Config::from_lookup(lookup(&[])).unwrap();

        assert_eq!(cfg.addr, DEFAULT_ADDR.parse::<SocketAddr>().unwrap());
        assert_eq!(cfg.database_path, DEFAULT_DATABASE_PATH);
        assert_eq!(cfg.sample_data_path, None);
        assert_eq!(cfg.max_workers, 8);
        assert_eq!(cfg.search_debounce, Duration::from_millis(500));
    }

    #[test]
    fn overrides_are_parsed() {
        let cfg = Config::from_lookup(lookup(&[
            ("ESTATES_ADDR", "0.0.0.0:8080"),
            ("SAMPLE_DATA_PATH", "data/other.json"),
            ("SEARCH_DEBOUNCE_MS", "250"),
        ]))
        .unwrap();

        assert_eq!(cfg.addr.port(), 8080);
        assert_eq!(cfg.sample_data_path, Some(PathBuf::from("data/other.json")));
        assert_eq!(cfg.search_debounce, Duration::from_millis(250));
    }

    #[test]
    fn invalid_value_names_the_key() {
        let err = Config::from_lookup(lookup(&[("MAX_WORKERS", "many")])).unwrap_err();
        assert_eq!(err.key, "MAX_WORKERS");
        assert!(err.to_string().contains("many"));
    }
}
