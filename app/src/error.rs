use soilsim_core::error::{ReadingError, RelayError};
use std::error;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid value for {0}: {1}")]
    Invalid(&'static str, std::string::String),
}

#[derive(Debug, Error)]
pub enum GpioError {
    #[error("Failed claiming pin {0}: {1}")]
    Claim(u32, #[source] std::io::Error),
}

#[derive(Debug, Error)]
#[error(transparent)]
pub enum ObserverError {
    User(Box<dyn error::Error + Send + Sync>),
    Internal(Box<dyn error::Error + Send + Sync>),
}

impl From<ReadingError> for ObserverError {
    fn from(err: ReadingError) -> Self {
        ObserverError::User(Box::from(err))
    }
}

impl From<RelayError> for ObserverError {
    fn from(err: RelayError) -> Self {
        ObserverError::Internal(Box::from(err))
    }
}
