//! Per-device GPU query results.
//!
//! `nvidia-smi --format=csv,nounits,noheader` prints one value per device,
//! one device per line. These types hold the parsed values keyed by device
//! index and render them with `gpu_<index>` keys.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Serialize, Serializer};
use thiserror::Error;

/// Errors from GPU queries. Unlike watermark facts these propagate.
#[derive(Debug, Error)]
pub enum GpuQueryError {
    /// The query tool could not be started.
    #[error("{tool} is not available: {reason}")]
    Unavailable { tool: String, reason: String },

    /// The query tool exited unsuccessfully.
    #[error("{tool} failed ({status}): {stderr}")]
    Failed {
        tool: String,
        status: String,
        stderr: String,
    },

    /// A line of output could not be parsed.
    #[error("Cannot parse {line:?} for device {device}: {reason}")]
    Parse {
        device: usize,
        line: String,
        reason: String,
    },
}

/// Values keyed by device index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GpuMap<T> {
    devices: BTreeMap<usize, T>,
}

impl<T> Default for GpuMap<T> {
    fn default() -> Self {
        Self {
            devices: BTreeMap::new(),
        }
    }
}

impl<T> GpuMap<T> {
    pub fn get(&self, device: usize) -> Option<&T> {
        self.devices.get(&device)
    }

    pub fn len(&self) -> usize {
        self.devices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.devices.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (usize, &T)> {
        self.devices.iter().map(|(i, v)| (*i, v))
    }

    /// Key used when the map is displayed or serialized.
    pub fn key(device: usize) -> String {
        format!("gpu_{device}")
    }
}

impl<T> FromIterator<T> for GpuMap<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self {
            devices: iter.into_iter().enumerate().collect(),
        }
    }
}

impl<T: fmt::Display> fmt::Display for GpuMap<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (device, value) in self.iter() {
            if !first {
                writeln!(f)?;
            }
            first = false;
            write!(f, "{}: {value}", Self::key(device))?;
        }
        Ok(())
    }
}

impl<T: Serialize> Serialize for GpuMap<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(self.iter().map(|(device, v)| (Self::key(device), v)))
    }
}

/// Parse one value per non-empty line, device index = line position.
pub fn parse_device_lines<T>(output: &str) -> Result<GpuMap<T>, GpuQueryError>
where
    T: FromStr,
    T::Err: fmt::Display,
{
    output
        .trim()
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .enumerate()
        .map(|(device, line)| {
            line.parse::<T>().map_err(|e| GpuQueryError::Parse {
                device,
                line: line.to_string(),
                reason: e.to_string(),
            })
        })
        .collect()
}
