use crate::error::RelayError;
use crate::reading::SoilStatus;
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::debug;
use utoipa::ToSchema;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum PinLevel {
    Low,
    High,
}

impl PinLevel {
    pub fn is_high(&self) -> bool {
        *self == PinLevel::High
    }
}

impl From<SoilStatus> for PinLevel {
    fn from(status: SoilStatus) -> Self {
        match status {
            SoilStatus::Dry => PinLevel::High,
            SoilStatus::Wet => PinLevel::Low,
        }
    }
}

impl fmt::Display for PinLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PinLevel::Low => write!(f, "LOW"),
            PinLevel::High => write!(f, "HIGH"),
        }
    }
}

/// A single digital output line
pub trait DigitalOutput: fmt::Debug + Send {
    fn pin(&self) -> u32;

    fn write(&mut self, level: PinLevel) -> Result<(), RelayError>;

    /// Gives the line back to the system, called once on shutdown
    fn release(&mut self) -> Result<(), RelayError> {
        Ok(())
    }
}

impl<T: DigitalOutput + ?Sized> DigitalOutput for Box<T> {
    fn pin(&self) -> u32 {
        (**self).pin()
    }

    fn write(&mut self, level: PinLevel) -> Result<(), RelayError> {
        (**self).write(level)
    }

    fn release(&mut self) -> Result<(), RelayError> {
        (**self).release()
    }
}

#[derive(Debug)]
pub struct RelayController<O> {
    output: O,
    last_status: Option<SoilStatus>,
}

impl<O: DigitalOutput> RelayController<O> {
    pub fn new(output: O) -> Self {
        RelayController {
            output,
            last_status: None,
        }
    }

    /// Drives the relay line, HIGH for dry soil and LOW for wet soil
    pub fn set_relay(&mut self, status: SoilStatus) -> Result<PinLevel, RelayError> {
        let level = PinLevel::from(status);
        self.output.write(level)?;
        self.last_status = Some(status);

        match level {
            PinLevel::High => debug!(pin = self.output.pin(), "Relay ON - soil is dry"),
            PinLevel::Low => debug!(pin = self.output.pin(), "Relay OFF - soil is wet"),
        }
        Ok(level)
    }

    pub fn pin(&self) -> u32 {
        self.output.pin()
    }

    pub fn last_status(&self) -> Option<SoilStatus> {
        self.last_status
    }

    pub fn last_level(&self) -> Option<PinLevel> {
        self.last_status.map(PinLevel::from)
    }

    pub fn release(&mut self) -> Result<(), RelayError> {
        self.output.release()
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::stubs::MemoryOutput;

    #[test]
    fn test_dry_sets_high() {
        // prepare
        let output = MemoryOutput::new(36);
        let mut relay = RelayController::new(output.clone());

        // execute
        let level = relay.set_relay(SoilStatus::Dry).unwrap();

        // validate
        assert_eq!(PinLevel::High, level);
        assert_eq!(Some(PinLevel::High), output.level());
        assert_eq!(Some(SoilStatus::Dry), relay.last_status());
    }

    #[test]
    fn test_wet_sets_low() {
        let output = MemoryOutput::new(36);
        let mut relay = RelayController::new(output.clone());

        let level = relay.set_relay(SoilStatus::Wet).unwrap();

        assert_eq!(PinLevel::Low, level);
        assert_eq!(Some(PinLevel::Low), output.level());
    }

    #[test]
    fn test_repeated_calls_are_idempotent() {
        // prepare
        let output = MemoryOutput::new(36);
        let mut relay = RelayController::new(output.clone());

        // execute
        for _ in 0..3 {
            relay.set_relay(SoilStatus::Dry).unwrap();
        }

        // validate
        assert_eq!(Some(PinLevel::High), output.level());
        assert_eq!(3, output.writes());
    }

    #[test]
    fn test_last_writer_wins() {
        let output = MemoryOutput::new(36);
        let mut relay = RelayController::new(output.clone());

        relay.set_relay(SoilStatus::Dry).unwrap();
        relay.set_relay(SoilStatus::Wet).unwrap();

        assert_eq!(Some(PinLevel::Low), output.level());
        assert_eq!(Some(PinLevel::Low), relay.last_level());
    }

    #[test]
    fn test_failed_write_keeps_previous_state() {
        // prepare
        let output = MemoryOutput::new(36);
        let mut relay = RelayController::new(output.clone());
        relay.set_relay(SoilStatus::Wet).unwrap();
        output.fail_writes(true);

        // execute
        let res = relay.set_relay(SoilStatus::Dry);

        // validate
        assert!(res.is_err());
        assert_eq!(Some(SoilStatus::Wet), relay.last_status());
        assert_eq!(Some(PinLevel::Low), output.level());
    }

    #[test]
    fn test_boxed_output() {
        let output = MemoryOutput::new(5);
        let boxed: Box<dyn DigitalOutput> = Box::new(output.clone());
        let mut relay = RelayController::new(boxed);

        relay.set_relay(SoilStatus::Dry).unwrap();
        relay.release().unwrap();

        assert_eq!(5, relay.pin());
        assert!(output.is_released());
    }
}
