use crate::config::Config;
use crate::error::ObserverError;
use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use rand::rngs::StdRng;
use soilsim_core::{DigitalOutput, Mode, PinLevel, Reading, ReadingGenerator, RelayController, SoilStatus};
use std::fmt::Debug;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, info_span};


/// Snapshot of the relay line after the last request
#[derive(Debug, Clone, PartialEq)]
pub struct RelayStatus {
    pub pin: u32,
    pub level: Option<PinLevel>,
    pub soil_status: Option<SoilStatus>,
    pub switched_at: Option<DateTime<Utc>>,
}

struct RelayState {
    controller: RelayController<Box<dyn DigitalOutput>>,
    switched_at: Option<DateTime<Utc>>,
}

/// Request state shared by all routes.
/// Locks are never held across an await point.
pub struct ConcurrentStation {
    generator: Mutex<ReadingGenerator<StdRng>>,
    relay: Mutex<RelayState>,
    response_delay: Duration,
    strict_range: bool,
}

impl Debug for ConcurrentStation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConcurrentStation")
            .field("response_delay", &self.response_delay)
            .field("strict_range", &self.strict_range)
            .finish()
    }
}

impl ConcurrentStation {
    pub fn new(config: &Config, output: Box<dyn DigitalOutput>) -> Arc<Self> {
        let generator = match config.rng_seed() {
            Some(seed) => {
                info!(seed, "Using seeded reading generator");
                ReadingGenerator::seeded(seed)
            }
            None => ReadingGenerator::from_entropy(),
        };
        let generator = generator.with_span(info_span!("reading_generator"));

        Arc::new(ConcurrentStation {
            generator: Mutex::new(generator),
            relay: Mutex::new(RelayState {
                controller: RelayController::new(output),
                switched_at: None,
            }),
            response_delay: config.response_delay(),
            strict_range: config.strict_range(),
        })
    }

    /// Generates a reading, switches the relay from its soil status
    /// and waits out the simulated latency before handing it back
    #[tracing::instrument(skip(self))]
    pub async fn weather_data(&self, range: Option<String>) -> Result<Reading, ObserverError> {
        let mode = self.mode(range.as_deref())?;
        let reading = self.generator.lock().generate(mode);

        {
            let mut relay = self.relay.lock();
            let level = relay.controller.set_relay(reading.soil_status())?;
            relay.switched_at = Some(Utc::now());
            debug!(%level, soil_status = %reading.soil_status(), "Relay updated");
        }

        if !self.response_delay.is_zero() {
            tokio::time::sleep(self.response_delay).await;
        }
        Ok(reading)
    }

    pub fn relay_status(&self) -> RelayStatus {
        let relay = self.relay.lock();
        RelayStatus {
            pin: relay.controller.pin(),
            level: relay.controller.last_level(),
            soil_status: relay.controller.last_status(),
            switched_at: relay.switched_at,
        }
    }

    pub fn response_delay(&self) -> Duration {
        self.response_delay
    }

    /// Hands the relay line back, called once on shutdown
    pub fn release(&self) -> Result<(), ObserverError> {
        let mut relay = self.relay.lock();
        relay.controller.release()?;
        info!(pin = relay.controller.pin(), "Released relay output");
        Ok(())
    }

    /*
     * Helpers
     */

    fn mode(&self, range: Option<&str>) -> Result<Mode, ObserverError> {
        match range {
            Some(raw) if self.strict_range => Ok(raw.parse::<Mode>()?),
            _ => Ok(Mode::from_query(range)),
        }
    }
}
