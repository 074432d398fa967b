//! Device selection for inference.

use candle_core::Device;
use tracing::info;

/// Returns the device the scoring models run on.
///
/// With `cpu_only` unset, uses Metal or CUDA when the matching feature is
/// enabled and a device is present, falling back to CPU.
#[must_use]
pub fn get_device(cpu_only: bool) -> Device {
    if cpu_only {
        info!("CPU inference requested");
        return Device::Cpu;
    }

    #[cfg(feature = "metal")]
    {
        if let Ok(device) = Device::new_metal(0) {
            info!("Using Metal device for inference");
            return device;
        }
    }

    #[cfg(feature = "cuda")]
    {
        if let Ok(device) = Device::new_cuda(0) {
            info!("Using CUDA device for inference");
            return device;
        }
    }

    info!("Using CPU for inference");
    Device::Cpu
}
