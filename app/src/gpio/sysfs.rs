use crate::error::GpioError;
use soilsim_core::error::RelayError;
use soilsim_core::{DigitalOutput, PinLevel};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, error, warn};

const CLAIM_RETRIES: usize = 5;
const CLAIM_BACKOFF: Duration = Duration::from_millis(20);

/// Output line driven through the legacy `/sys/class/gpio` interface
#[derive(Debug)]
pub struct SysfsOutput {
    root: PathBuf,
    pin: u32,
    claimed: bool,
}

impl SysfsOutput {
    /// Exports the line if needed and configures it as output
    pub fn claim(root: &Path, pin: u32) -> Result<Self, GpioError> {
        let line_dir = root.join(format!("gpio{}", pin));
        let exported = !line_dir.exists();
        if exported {
            fs::write(root.join("export"), pin.to_string())
                .map_err(|e| GpioError::Claim(pin, e))?;
            debug!(pin, "Exported gpio line");
        }

        // udev may still be fixing permissions right after the export.
        // Blocks the calling thread, so claim from a blocking context.
        let direction = line_dir.join("direction");
        let mut attempt = 0;
        loop {
            match fs::write(&direction, "out") {
                Ok(()) => break,
                Err(e) if attempt + 1 < CLAIM_RETRIES => {
                    debug!(pin, attempt, "Direction not writable yet: {}", e);
                    attempt += 1;
                    std::thread::sleep(CLAIM_BACKOFF);
                }
                Err(e) => {
                    if exported {
                        if let Err(unexport_err) = fs::write(root.join("unexport"), pin.to_string())
                        {
                            warn!(pin, "Failed unexporting gpio line: {}", unexport_err);
                        }
                    }
                    return Err(GpioError::Claim(pin, e));
                }
            }
        }

        Ok(SysfsOutput {
            root: root.to_owned(),
            pin,
            claimed: true,
        })
    }

    fn value_path(&self) -> PathBuf {
        self.root.join(format!("gpio{}", self.pin)).join("value")
    }
}

impl DigitalOutput for SysfsOutput {
    fn pin(&self) -> u32 {
        self.pin
    }

    fn write(&mut self, level: PinLevel) -> Result<(), RelayError> {
        if !self.claimed {
            return Err(RelayError::Write(self.pin, "line already released".to_owned()));
        }
        let raw = match level {
            PinLevel::High => "1",
            PinLevel::Low => "0",
        };
        fs::write(self.value_path(), raw)?;
        Ok(())
    }

    fn release(&mut self) -> Result<(), RelayError> {
        if !self.claimed {
            return Ok(());
        }
        self.claimed = false;
        fs::write(self.root.join("unexport"), self.pin.to_string())?;
        debug!(pin = self.pin, "Unexported gpio line");
        Ok(())
    }
}

impl Drop for SysfsOutput {
    fn drop(&mut self) {
        if self.claimed {
            warn!(pin = self.pin, "Releasing gpio line on drop");
            if let Err(e) = self.release() {
                error!(pin = self.pin, "{}", e);
            }
        }
    }
}
