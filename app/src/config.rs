use crate::error::ConfigError;
use std::env;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;

const DEFAULT_BIND_ADDR: ([u8; 4], u16) = ([0, 0, 0, 0], 5000);
// BCM line 16 is physical board pin 36
const DEFAULT_RELAY_PIN: u32 = 16;
const DEFAULT_SYSFS_ROOT: &str = "/sys/class/gpio";
const DEFAULT_RESPONSE_DELAY_MS: u64 = 10_000;
const DEFAULT_LOG_LEVEL: &str = "info";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GpioBackend {
    Simulated,
    Sysfs,
}

impl FromStr for GpioBackend {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "simulated" => Ok(GpioBackend::Simulated),
            "sysfs" => Ok(GpioBackend::Sysfs),
            _ => Err(()),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    bind_addr: SocketAddr,
    relay_pin: u32,
    gpio_backend: GpioBackend,
    gpio_sysfs_root: PathBuf,
    response_delay: Duration,
    rng_seed: Option<u64>,
    strict_range: bool,
    log_level: String,
}

impl Config {
    /// Reads the process environment, after loading an optional `.env` file
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenv::dotenv().ok();
        Config::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let delay_ms = parse_var(&lookup, "RESPONSE_DELAY_MS")?;

        Ok(Config {
            bind_addr: parse_var(&lookup, "BIND_ADDR")?
                .unwrap_or_else(|| SocketAddr::from(DEFAULT_BIND_ADDR)),
            relay_pin: parse_var(&lookup, "RELAY_PIN")?.unwrap_or(DEFAULT_RELAY_PIN),
            gpio_backend: parse_var(&lookup, "GPIO_BACKEND")?.unwrap_or(GpioBackend::Simulated),
            gpio_sysfs_root: lookup("GPIO_SYSFS_ROOT")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_SYSFS_ROOT)),
            response_delay: Duration::from_millis(delay_ms.unwrap_or(DEFAULT_RESPONSE_DELAY_MS)),
            rng_seed: parse_var(&lookup, "RNG_SEED")?,
            strict_range: parse_var(&lookup, "STRICT_RANGE")?.unwrap_or(false),
            log_level: lookup("LOG_LEVEL").unwrap_or_else(|| DEFAULT_LOG_LEVEL.to_owned()),
        })
    }

    pub fn bind_addr(&self) -> SocketAddr {
        self.bind_addr
    }

    pub fn relay_pin(&self) -> u32 {
        self.relay_pin
    }

    pub fn gpio_backend(&self) -> GpioBackend {
        self.gpio_backend
    }

    pub fn gpio_sysfs_root(&self) -> &Path {
        self.gpio_sysfs_root.as_path()
    }

    pub fn response_delay(&self) -> Duration {
        self.response_delay
    }

    pub fn rng_seed(&self) -> Option<u64> {
        self.rng_seed
    }

    /// Reject unknown `range` values instead of falling back to normal
    pub fn strict_range(&self) -> bool {
        self.strict_range
    }

    pub fn log_level(&self) -> &str {
        &self.log_level
    }
}

/// Blank values count as unset
fn parse_var<F, T>(lookup: &F, key: &'static str) -> Result<Option<T>, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    match lookup(key) {
        Some(raw) if raw.trim().is_empty() => Ok(None),
        Some(raw) => raw
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| ConfigError::Invalid(key, raw)),
        None => Ok(None),
    }
}
