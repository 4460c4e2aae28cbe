use std::{env, net::SocketAddr, path::PathBuf};

use thiserror::Error;

#[cfg(test)]
use once_cell::sync::Lazy;
#[cfg(test)]
pub(crate) static ENV_MUTEX: Lazy<std::sync::Mutex<()>> = Lazy::new(|| std::sync::Mutex::new(()));

use crate::engine::EngineParams;

/// Service configuration, loaded from the environment. Every key has a
/// default, so the service starts with nothing set.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    http_bind: SocketAddr,
    time_decay_factor: f64,
    diversity_weight: f64,
    serendipity_chance: f64,
    trending_window_hours: i64,
    leisure_categories: Vec<String>,
    snapshot_path: PathBuf,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {name}: {source}")]
    Invalid {
        name: &'static str,
        #[source]
        source: anyhow::Error,
    },
}

impl Config {
    /// Load and validate configuration from environment variables.
    ///
    /// # Errors
    /// Returns [`ConfigError`] when a value fails to parse or falls
    /// outside its valid range.
    pub fn from_env() -> Result<Self, ConfigError> {
        let http_bind = parse_socket_addr("FEEDRANK_HTTP_BIND", "0.0.0.0:9010")?;
        let time_decay_factor = parse_unit_f64("FEEDRANK_TIME_DECAY_FACTOR", 0.95)?;
        let diversity_weight = parse_unit_f64("FEEDRANK_DIVERSITY_WEIGHT", 0.3)?;
        let serendipity_chance = parse_unit_f64("FEEDRANK_SERENDIPITY_CHANCE", 0.15)?;
        let trending_window_hours = parse_positive_i64("FEEDRANK_TRENDING_WINDOW_HOURS", 24)?;
        let leisure_categories = parse_csv("FEEDRANK_LEISURE_CATEGORIES", "entertainment,sports");
        let snapshot_path = PathBuf::from(
            env::var("FEEDRANK_SNAPSHOT_PATH")
                .unwrap_or_else(|_| "feedrank_snapshot.json".to_string()),
        );

        Ok(Self {
            http_bind,
            time_decay_factor,
            diversity_weight,
            serendipity_chance,
            trending_window_hours,
            leisure_categories,
            snapshot_path,
        })
    }

    #[must_use]
    pub fn http_bind(&self) -> SocketAddr {
        self.http_bind
    }

    #[must_use]
    pub fn time_decay_factor(&self) -> f64 {
        self.time_decay_factor
    }

    #[must_use]
    pub fn diversity_weight(&self) -> f64 {
        self.diversity_weight
    }

    #[must_use]
    pub fn serendipity_chance(&self) -> f64 {
        self.serendipity_chance
    }

    #[must_use]
    pub fn trending_window_hours(&self) -> i64 {
        self.trending_window_hours
    }

    #[must_use]
    pub fn leisure_categories(&self) -> &[String] {
        &self.leisure_categories
    }

    #[must_use]
    pub fn snapshot_path(&self) -> &PathBuf {
        &self.snapshot_path
    }

    /// Engine parameters derived from this configuration.
    #[must_use]
    pub fn engine_params(&self) -> EngineParams {
        EngineParams {
            time_decay_factor: self.time_decay_factor,
            diversity_weight: self.diversity_weight,
            serendipity_chance: self.serendipity_chance,
            trending_window_hours: self.trending_window_hours,
            leisure_categories: self.leisure_categories.clone(),
        }
    }
}

fn parse_socket_addr(name: &'static str, default: &str) -> Result<SocketAddr, ConfigError> {
    let raw = env::var(name).unwrap_or_else(|_| default.to_string());
    raw.parse().map_err(|error| ConfigError::Invalid {
        name,
        source: anyhow::Error::new(error),
    })
}

fn parse_unit_f64(name: &'static str, default: f64) -> Result<f64, ConfigError> {
    let raw = env::var(name).unwrap_or_else(|_| default.to_string());
    let parsed = raw.parse::<f64>().map_err(|error| ConfigError::Invalid {
        name,
        source: anyhow::Error::new(error),
    })?;
    if !(0.0..=1.0).contains(&parsed) {
        return Err(ConfigError::Invalid {
            name,
            source: anyhow::anyhow!("value must be between 0.0 and 1.0"),
        });
    }
    Ok(parsed)
}

fn parse_positive_i64(name: &'static str, default: i64) -> Result<i64, ConfigError> {
    let raw = env::var(name).unwrap_or_else(|_| default.to_string());
    let parsed = raw.parse::<i64>().map_err(|error| ConfigError::Invalid {
        name,
        source: anyhow::Error::new(error),
    })?;
    if parsed <= 0 {
        return Err(ConfigError::Invalid {
            name,
            source: anyhow::anyhow!("value must be greater than zero"),
        });
    }
    Ok(parsed)
}

fn parse_csv(name: &'static str, default: &str) -> Vec<String> {
    let raw = env::var(name).unwrap_or_else(|_| default.to_string());
    raw.split(',')
        .map(|s| s.trim().to_lowercase())
        .filter(|s| !s.is_empty())
        .collect()
}
