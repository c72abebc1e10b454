//! Inference device selection
//!
//! The device is resolved once per scoring run, logged, and handed to the
//! tagger before the first forward pass.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Where the tagger runs its forward passes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComputeDevice {
    Cpu,
    /// CUDA ordinal, relative to the visible devices
    Cuda { device_id: usize },
}

impl ComputeDevice {
    /// First visible GPU, or the CPU when none is found
    #[must_use]
    pub fn auto_detect() -> Self {
        let env = std::env::var("CUDA_VISIBLE_DEVICES").ok();
        match visible_from_env(env.as_deref()) {
            Some(0) => Self::Cpu,
            Some(_) => Self::Cuda { device_id: 0 },
            None if nvidia_smi_gpu_count() > 0 => Self::Cuda { device_id: 0 },
            None => Self::Cpu,
        }
    }

    #[must_use]
    pub const fn is_cuda(&self) -> bool {
        matches!(self, Self::Cuda { .. })
    }
}

/// Number of GPUs listed in `CUDA_VISIBLE_DEVICES`
///
/// `None` when the variable is unset, so the caller should probe the driver.
/// An empty value or a leading `-1` hides every device.
fn visible_from_env(value: Option<&str>) -> Option<usize> {
    let value = value?.trim();
    if value.is_empty() || value.starts_with("-1") {
        return Some(0);
    }
    Some(value.split(',').filter(|d| !d.trim().is_empty()).count())
}

fn nvidia_smi_gpu_count() -> usize {
    std::process::Command::new("nvidia-smi")
        .arg("--list-gpus")
        .output()
        .ok()
        .filter(|o| o.status.success())
        .map_or(0, |o| {
            String::from_utf8_lossy(&o.stdout)
                .lines()
                .filter(|l| l.starts_with("GPU "))
                .count()
        })
}

impl fmt::Display for ComputeDevice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Cpu => f.write_str("cpu"),
            Self::Cuda { device_id } => write!(f, "cuda:{device_id}"),
        }
    }
}

/// Device selection as written in configuration files
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeviceChoice {
    /// Prefer CUDA, fall back to CPU
    #[default]
    Auto,
    Cpu,
    Cuda,
}

impl DeviceChoice {
    pub fn resolve(self) -> ComputeDevice {
        match self {
            Self::Auto => ComputeDevice::auto_detect(),
            Self::Cpu => ComputeDevice::Cpu,
            Self::Cuda => ComputeDevice::Cuda { device_id: 0 },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_matches_torch_names() {
        assert_eq!(ComputeDevice::Cpu.to_string(), "cpu");
        assert_eq!(ComputeDevice::Cuda { device_id: 1 }.to_string(), "cuda:1");
    }

    #[test]
    fn test_visible_devices_parsing() {
        assert_eq!(visible_from_env(None), None);
        assert_eq!(visible_from_env(Some("")), Some(0));
        assert_eq!(visible_from_env(Some("-1")), Some(0));
        assert_eq!(visible_from_env(Some("0")), Some(1));
        assert_eq!(visible_from_env(Some("2, 3,")), Some(2));
        assert_eq!(visible_from_env(Some("GPU-8f3a")), Some(1));
    }

    #[test]
    fn test_auto_detect_never_picks_a_hidden_ordinal() {
        match ComputeDevice::auto_detect() {
            ComputeDevice::Cpu => {}
            ComputeDevice::Cuda { device_id } => assert_eq!(device_id, 0),
        }
    }

    #[test]
    fn test_choice_resolves() {
        assert_eq!(DeviceChoice::Cpu.resolve(), ComputeDevice::Cpu);
        assert!(DeviceChoice::Cuda.resolve().is_cuda());
        assert_eq!(DeviceChoice::default(), DeviceChoice::Auto);
    }

    #[test]
    fn test_choice_deserializes_lowercase() {
        let choice: DeviceChoice = serde_yaml::from_str("cuda").unwrap();
        assert_eq!(choice, DeviceChoice::Cuda);
        assert!(serde_yaml::from_str::<DeviceChoice>("tpu").is_err());
    }
}
