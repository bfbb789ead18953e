use crate::InferError;
use serde::Deserialize;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
#[serde(try_from = "String")]
pub enum Device {
    #[default]
    Cpu,
    Cuda {
        device_id: i32,
    },
}

impl fmt::Display for Device {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Device::Cpu => write!(f, "CPU"),
            Device::Cuda { device_id } => write!(f, "CUDA(device_id={device_id})"),
        }
    }
}

/// Accepts `cpu`, `cuda` (device 0) and `cuda:<id>`.
impl FromStr for Device {
    type Err = InferError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim().to_ascii_lowercase();
        match s.as_str() {
            "cpu" => Ok(Device::Cpu),
            "cuda" => Ok(Device::Cuda { device_id: 0 }),
            _ => {
                let id = s
                    .strip_prefix("cuda:")
                    .ok_or_else(|| InferError::InvalidDevice(s.clone()))?;
                let device_id = id
                    .parse::<i32>()
                    .ok()
                    .filter(|id| *id >= 0)
                    .ok_or_else(|| InferError::InvalidDevice(s.clone()))?;
                Ok(Device::Cuda { device_id })
            }
        }
    }
}

impl TryFrom<String> for Device {
    type Error = InferError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}
