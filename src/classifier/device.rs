use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::warn;

/// Compute target used for every evaluation on a classifier instance.
///
/// The ONNX runtime executes on the host CPU only, so this is the single
/// variant; the handle is kept explicit so configuration can name it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Device {
    #[default]
    Cpu,
}

impl Device {
    /// Resolve a device from a user-supplied name, falling back to CPU.
    pub fn from_name(name: &str) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "cpu" | "" => Device::Cpu,
            other => {
                warn!("Unknown device '{other}', defaulting to CPU.");
                Device::Cpu
            }
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Device::Cpu => "cpu",
        }
    }
}

impl fmt::Display for Device {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
