//! Capacity, threshold and polling configuration.

use std::collections::BTreeMap;
use std::env;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::Context;
use serde::{Deserialize, Serialize};

use crate::core::{AppResult, Load, Resources, Thresholds};
use crate::util::bytes::megabytes;

/// Prefix of every environment variable read by [`OversubscriptionConfig::from_env`].
pub const ENV_PREFIX: &str = "OVERSUB_";

/// Resources the operator is willing to lend out. Empty means opted out.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CapacityConfig {
    /// CPU cores.
    #[serde(default)]
    pub cpus: f64,
    /// Memory in MiB.
    #[serde(default)]
    pub mem_mb: u64,
    /// Additional named scalar resources.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub scalars: BTreeMap<String, f64>,
}

impl CapacityConfig {
    /// Validate capacity values.
    pub fn validate(&self) -> Result<(), String> {
        if !self.cpus.is_finite() || self.cpus < 0.0 {
            return Err(format!("cpus must be a non-negative number, got {}", self.cpus));
        }
        for (name, amount) in &self.scalars {
            if !amount.is_finite() || *amount < 0.0 {
                return Err(format!("{name} must be a non-negative number, got {amount}"));
            }
        }
        Ok(())
    }

    /// Capacity as a resource quantity.
    #[must_use]
    pub fn resources(&self) -> Resources {
        self.scalars
            .iter()
            .fold(Resources::new(self.cpus, megabytes(self.mem_mb)), |r, (name, amount)| {
                r.with_scalar(name.clone(), *amount)
            })
    }
}

/// Load ceilings and memory floor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThresholdsConfig {
    /// One-minute load ceiling.
    pub load_one: f64,
    /// Five-minute load ceiling.
    pub load_five: f64,
    /// Fifteen-minute load ceiling.
    pub load_fifteen: f64,
    /// Minimum reclaimable-equivalent free memory in MiB.
    pub memory_floor_mb: u64,
}

impl ThresholdsConfig {
    /// Validate threshold values.
    pub fn validate(&self) -> Result<(), String> {
        for (name, value) in [
            ("load_one", self.load_one),
            ("load_five", self.load_five),
            ("load_fifteen", self.load_fifteen),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(format!("{name} must be a non-negative number, got {value}"));
            }
        }
        Ok(())
    }

    /// Thresholds with the memory floor in bytes.
    #[must_use]
    pub const fn thresholds(&self) -> Thresholds {
        Thresholds::new(
            Load::new(self.load_one, self.load_five, self.load_fifteen),
            megabytes(self.memory_floor_mb),
        )
    }
}

const fn default_interval_ms() -> u64 {
    5_000
}

/// Cadence of the poll drivers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PollingConfig {
    /// Milliseconds between estimate polls.
    #[serde(default = "default_interval_ms")]
    pub estimate_interval_ms: u64,
    /// Milliseconds between correction polls.
    #[serde(default = "default_interval_ms")]
    pub correction_interval_ms: u64,
    /// Optional deadline applied around each poll.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub poll_timeout_ms: Option<u64>,
}

impl Default for PollingConfig {
    fn default() -> Self {
        Self {
            estimate_interval_ms: default_interval_ms(),
            correction_interval_ms: default_interval_ms(),
            poll_timeout_ms: None,
        }
    }
}

impl PollingConfig {
    /// Validate polling values.
    pub fn validate(&self) -> Result<(), String> {
        if self.estimate_interval_ms == 0 {
            return Err("estimate_interval_ms must be greater than 0".into());
        }
        if self.correction_interval_ms == 0 {
            return Err("correction_interval_ms must be greater than 0".into());
        }
        if self.poll_timeout_ms == Some(0) {
            return Err("poll_timeout_ms must be greater than 0".into());
        }
        Ok(())
    }

    /// Interval between estimate polls.
    #[must_use]
    pub const fn estimate_interval(&self) -> Duration {
        Duration::from_millis(self.estimate_interval_ms)
    }

    /// Interval between correction polls.
    #[must_use]
    pub const fn correction_interval(&self) -> Duration {
        Duration::from_millis(self.correction_interval_ms)
    }

    /// Per-poll deadline, if configured.
    #[must_use]
    pub fn poll_timeout(&self) -> Option<Duration> {
        self.poll_timeout_ms.map(Duration::from_millis)
    }
}

/// Root configuration for an estimator/controller pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OversubscriptionConfig {
    /// Oversubscribable capacity; omitted means none.
    #[serde(default)]
    pub capacity: CapacityConfig,
    /// Overload thresholds shared by estimator and controller.
    pub thresholds: ThresholdsConfig,
    /// Poll cadence.
    #[serde(default)]
    pub polling: PollingConfig,
}

impl OversubscriptionConfig {
    /// Validate every section.
    pub fn validate(&self) -> Result<(), String> {
        self.capacity
            .validate()
            .map_err(|e| format!("capacity invalid: {e}"))?;
        self.thresholds
            .validate()
            .map_err(|e| format!("thresholds invalid: {e}"))?;
        self.polling
            .validate()
            .map_err(|e| format!("polling invalid: {e}"))?;
        Ok(())
    }

    /// Parse configuration from a JSON string and validate.
    pub fn from_json_str(input: &str) -> Result<Self, String> {
        let cfg: Self = serde_json::from_str(input).map_err(|e| format!("parse error: {e}"))?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Read and validate a JSON configuration file.
    pub fn from_file(path: impl AsRef<Path>) -> AppResult<Self> {
        let path = path.as_ref();
        let input = std::fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        Self::from_json_str(&input)
            .map_err(anyhow::Error::msg)
            .with_context(|| format!("loading config {}", path.display()))
    }

    /// Build configuration from `OVERSUB_*` environment variables, loading a
    /// `.env` file first when present.
    ///
    /// Thresholds are required: `OVERSUB_LOAD_ONE`, `OVERSUB_LOAD_FIVE`,
    /// `OVERSUB_LOAD_FIFTEEN`, `OVERSUB_MEMORY_FLOOR_MB`. Capacity
    /// (`OVERSUB_CPUS`, `OVERSUB_MEM_MB`) and polling
    /// (`OVERSUB_ESTIMATE_INTERVAL_MS`, `OVERSUB_CORRECTION_INTERVAL_MS`,
    /// `OVERSUB_POLL_TIMEOUT_MS`) are optional.
    pub fn from_env() -> AppResult<Self> {
        dotenv_loaded(dotenvy::dotenv())?;
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Same as [`from_env`](Self::from_env) over an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> AppResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = PollingConfig::default();
        let cfg = Self {
            capacity: CapacityConfig {
                cpus: optional(&lookup, "CPUS")?.unwrap_or(0.0),
                mem_mb: optional(&lookup, "MEM_MB")?.unwrap_or(0),
                scalars: BTreeMap::new(),
            },
            thresholds: ThresholdsConfig {
                load_one: required(&lookup, "LOAD_ONE")?,
                load_five: required(&lookup, "LOAD_FIVE")?,
                load_fifteen: required(&lookup, "LOAD_FIFTEEN")?,
                memory_floor_mb: required(&lookup, "MEMORY_FLOOR_MB")?,
            },
            polling: PollingConfig {
                estimate_interval_ms: optional(&lookup, "ESTIMATE_INTERVAL_MS")?
                    .unwrap_or(defaults.estimate_interval_ms),
                correction_interval_ms: optional(&lookup, "CORRECTION_INTERVAL_MS")?
                    .unwrap_or(defaults.correction_interval_ms),
                poll_timeout_ms: optional(&lookup, "POLL_TIMEOUT_MS")?,
            },
        };
        cfg.validate().map_err(anyhow::Error::msg)?;
        Ok(cfg)
    }
}

/// A missing `.env` is fine; an unreadable or malformed one is not.
fn dotenv_loaded(result: Result<PathBuf, dotenvy::Error>) -> AppResult<()> {
    match result {
        Ok(path) => {
            tracing::debug!(path = %path.display(), "loaded .env");
            Ok(())
        }
        Err(e) if e.not_found() => Ok(()),
        Err(e) => Err(e).context("loading .env"),
    }
}

fn optional<T, F>(lookup: &F, key: &str) -> AppResult<Option<T>>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
    F: Fn(&str) -> Option<String>,
{
    let name = format!("{ENV_PREFIX}{key}");
    lookup(&name)
        .map(|raw| {
            raw.trim()
                .parse::<T>()
                .map_err(|e| anyhow::anyhow!("{name}=`{raw}` is invalid: {e}"))
        })
        .transpose()
}

fn required<T, F>(lookup: &F, key: &str) -> AppResult<T>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
    F: Fn(&str) -> Option<String>,
{
    optional(lookup, key)?.ok_or_else(|| anyhow::anyhow!("{ENV_PREFIX}{key} is not set"))
}
