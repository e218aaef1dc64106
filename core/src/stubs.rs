use crate::error::RelayError;
use crate::relay::{DigitalOutput, PinLevel};
use parking_lot::Mutex;
use std::sync::Arc;
use tracing::info;

/*
 * in-memory outputs
 */

#[derive(Debug, Default)]
struct MemoryPinState {
    level: Option<PinLevel>,
    writes: usize,
    released: bool,
    fail_writes: bool,
}

/// Output line kept in memory.
/// Clones share the same line, so a test can keep a handle and observe writes.
#[derive(Debug, Clone)]
pub struct MemoryOutput {
    pin: u32,
    state: Arc<Mutex<MemoryPinState>>,
}

impl MemoryOutput {
    pub fn new(pin: u32) -> Self {
        MemoryOutput {
            pin,
            state: Arc::new(Mutex::new(MemoryPinState::default())),
        }
    }

    pub fn level(&self) -> Option<PinLevel> {
        self.state.lock().level
    }

    pub fn writes(&self) -> usize {
        self.state.lock().writes
    }

    pub fn is_released(&self) -> bool {
        self.state.lock().released
    }

    /// Makes every following write fail
    pub fn fail_writes(&self, fail: bool) {
        self.state.lock().fail_writes = fail;
    }
}

impl DigitalOutput for MemoryOutput {
    fn pin(&self) -> u32 {
        self.pin
    }

    fn write(&mut self, level: PinLevel) -> Result<(), RelayError> {
        let mut state = self.state.lock();
        if state.fail_writes {
            return Err(RelayError::Write(self.pin, "simulated failure".to_owned()));
        }
        state.level = Some(level);
        state.writes += 1;
        info!(pin = self.pin, %level, "Simulated relay switched");
        Ok(())
    }

    fn release(&mut self) -> Result<(), RelayError> {
        self.state.lock().released = true;
        Ok(())
    }
}

/// Output that accepts and drops every write
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopOutput {
    pub pin: u32,
}

impl DigitalOutput for NoopOutput {
    fn pin(&self) -> u32 {
        self.pin
    }

    fn write(&mut self, _level: PinLevel) -> Result<(), RelayError> {
        // no-op
        Ok(())
    }
}
