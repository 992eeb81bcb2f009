//! Resource quantities exchanged with the host.

use std::collections::BTreeMap;
use std::fmt;
use std::ops::Sub;

use serde::{Deserialize, Serialize};

use crate::util::bytes::format_bytes;

/// A non-negative amount of named scalar resources.
///
/// `cpus` and `mem` (bytes) are first-class; any further named scalar
/// (`disk`, `gpus`, ...) lives in `scalars`. Negative or NaN amounts are
/// treated as zero by every operation. Arithmetic and emptiness are judged
/// at a fixed precision of three decimal places.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Resources {
    /// CPU cores.
    #[serde(default)]
    pub cpus: f64,
    /// Memory in bytes.
    #[serde(default)]
    pub mem: u64,
    /// Additional named scalar resources.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub scalars: BTreeMap<String, f64>,
}

const SCALAR_SCALE: f64 = 1000.0;

fn non_negative(amount: f64) -> f64 {
    // NaN.max(0.0) is 0.0
    amount.max(0.0)
}

fn fixed(amount: f64) -> f64 {
    (non_negative(amount) * SCALAR_SCALE).round() / SCALAR_SCALE
}

impl Resources {
    /// No resources at all.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Cpu and memory only.
    #[must_use]
    pub fn new(cpus: f64, mem: u64) -> Self {
        Self {
            cpus: non_negative(cpus),
            mem,
            scalars: BTreeMap::new(),
        }
    }

    /// Add (or replace) a named scalar resource.
    #[must_use]
    pub fn with_scalar(mut self, name: impl Into<String>, amount: f64) -> Self {
        let amount = non_negative(amount);
        let name = name.into();
        if amount > 0.0 {
            self.scalars.insert(name, amount);
        } else {
            self.scalars.remove(&name);
        }
        self
    }

    /// Amount of a named scalar, zero when absent.
    #[must_use]
    pub fn scalar(&self, name: &str) -> f64 {
        self.scalars.get(name).copied().map_or(0.0, non_negative)
    }

    /// True when no resource has a positive quantity.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        fixed(self.cpus) <= 0.0 && self.mem == 0 && !self.scalars.values().any(|v| fixed(*v) > 0.0)
    }

    /// Component-wise subtraction floored at zero.
    ///
    /// Resources only present in `other` do not appear in the result.
    #[must_use]
    pub fn saturating_sub(&self, other: &Self) -> Self {
        let scalars = self
            .scalars
            .iter()
            .filter_map(|(name, amount)| {
                let left = fixed(fixed(*amount) - fixed(other.scalar(name)));
                (left > 0.0).then(|| (name.clone(), left))
            })
            .collect();

        Self {
            cpus: fixed(fixed(self.cpus) - fixed(other.cpus)),
            mem: self.mem.saturating_sub(other.mem),
            scalars,
        }
    }
}

impl Sub<&Resources> for &Resources {
    type Output = Resources;

    fn sub(self, rhs: &Resources) -> Resources {
        self.saturating_sub(rhs)
    }
}

impl fmt::Display for Resources {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "cpus:{};mem:{}", non_negative(self.cpus), format_bytes(self.mem))?;
        for (name, amount) in &self.scalars {
            write!(f, ";{name}:{amount}")?;
        }
        Ok(())
    }
}
