//! Linux `/proc` backed load and memory providers.

use std::path::{Path, PathBuf};

use async_trait::async_trait;

use crate::core::{Load, LoadProvider, MemInfo, MemoryProvider, Signal, ThresholdError};
use crate::util::bytes::kilobytes;

/// Default location of the kernel load averages.
pub const PROC_LOADAVG: &str = "/proc/loadavg";
/// Default location of the kernel memory counters.
pub const PROC_MEMINFO: &str = "/proc/meminfo";

/// Parse the first three fields of `/proc/loadavg`. Negative or non-finite
/// averages are rejected.
pub fn parse_loadavg(content: &str) -> Result<Load, String> {
    let mut fields = content.split_whitespace();
    let mut next = |name: &str| -> Result<f64, String> {
        let raw = fields
            .next()
            .ok_or_else(|| format!("loadavg missing {name} field"))?;
        let value = raw
            .parse::<f64>()
            .map_err(|e| format!("invalid {name} load `{raw}`: {e}"))?;
        if value.is_finite() && value >= 0.0 {
            Ok(value)
        } else {
            Err(format!("{name} load `{raw}` is not a non-negative number"))
        }
    };
    let one = next("1m")?;
    let five = next("5m")?;
    let fifteen = next("15m")?;
    Ok(Load::new(one, five, fifteen))
}

/// Extract `MemTotal`, `MemFree` and `Cached` from `/proc/meminfo`.
pub fn parse_meminfo(content: &str) -> Result<MemInfo, String> {
    let (mut total, mut free, mut cached) = (None, None, None);

    for line in content.lines() {
        let Some((key, rest)) = line.split_once(':') else {
            continue;
        };
        let slot = match key.trim() {
            "MemTotal" => &mut total,
            "MemFree" => &mut free,
            "Cached" => &mut cached,
            _ => continue,
        };
        let raw = rest.split_whitespace().next().unwrap_or_default();
        let kb = raw
            .parse::<u64>()
            .map_err(|e| format!("invalid {} value `{raw}`: {e}", key.trim()))?;
        *slot = Some(kilobytes(kb));
    }

    match (total, free, cached) {
        (Some(total), Some(free), Some(cached)) => Ok(MemInfo::new(total, free, cached)),
        _ => Err("meminfo missing MemTotal, MemFree or Cached".to_string()),
    }
}

async fn read(path: &Path, signal: Signal) -> Result<String, ThresholdError> {
    tokio::fs::read_to_string(path)
        .await
        .map_err(|e| ThresholdError::unavailable(signal, format!("{}: {e}", path.display())))
}

/// Reads load averages from `/proc/loadavg`.
#[derive(Debug, Clone)]
pub struct ProcLoadAvg {
    path: PathBuf,
}

impl ProcLoadAvg {
    /// Read from an alternate file with the same format.
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl Default for ProcLoadAvg {
    fn default() -> Self {
        Self::with_path(PROC_LOADAVG)
    }
}

#[async_trait]
impl LoadProvider for ProcLoadAvg {
    async fn load(&self) -> Result<Load, ThresholdError> {
        let content = read(&self.path, Signal::Load).await?;
        parse_loadavg(&content).map_err(|reason| ThresholdError::unavailable(Signal::Load, reason))
    }
}

/// Reads memory counters from `/proc/meminfo`.
#[derive(Debug, Clone)]
pub struct ProcMemInfo {
    path: PathBuf,
}

impl ProcMemInfo {
    /// Read from an alternate file with the same format.
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl Default for ProcMemInfo {
    fn default() -> Self {
        Self::with_path(PROC_MEMINFO)
    }
}

#[async_trait]
impl MemoryProvider for ProcMemInfo {
    async fn memory(&self) -> Result<MemInfo, ThresholdError> {
        let content = read(&self.path, Signal::Memory).await?;
        parse_meminfo(&content)
            .map_err(|reason| ThresholdError::unavailable(Signal::Memory, reason))
    }
}
