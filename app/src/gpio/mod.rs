use crate::config::{Config, GpioBackend};
use crate::error::GpioError;
use soilsim_core::{DigitalOutput, MemoryOutput};
use tracing::info;

mod sysfs;

pub use sysfs::SysfsOutput;

/// Claims the relay line for the configured backend.
///
/// The sysfs claim sleeps between retries, so call this from
/// `tokio::task::spawn_blocking` when a runtime is running.
pub fn build_output(config: &Config) -> Result<Box<dyn DigitalOutput>, GpioError> {
    let pin = config.relay_pin();
    match config.gpio_backend() {
        GpioBackend::Simulated => {
            info!(pin, "Using simulated relay output");
            Ok(Box::new(MemoryOutput::new(pin)))
        }
        GpioBackend::Sysfs => {
            let output = SysfsOutput::claim(config.gpio_sysfs_root(), pin)?;
            info!(pin, root = %config.gpio_sysfs_root().display(), "Claimed sysfs relay output");
            Ok(Box::new(output))
        }
    }
}
