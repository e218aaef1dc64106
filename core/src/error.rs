use std::error;
use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub enum ReadingError {
    InvalidMode(std::string::String),
    EmptyBounds(i32, i32),
    StatusMismatch(i32),
}

impl fmt::Display for ReadingError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ReadingError::InvalidMode(mode) => write!(f, "Invalid mode: {}", mode),
            ReadingError::EmptyBounds(min, max) => {
                write!(f, "Empty bounds: [{}, {}) contains no value", min, max)
            }
            ReadingError::StatusMismatch(moisture) => write!(
                f,
                "Soil status does not match soil moisture {}",
                moisture
            ),
        }
    }
}

impl error::Error for ReadingError {}

#[derive(Debug)]
pub enum RelayError {
    Write(u32, std::string::String),
    Io(std::io::Error),
}

impl fmt::Display for RelayError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            RelayError::Write(pin, msg) => write!(f, "Failed writing pin {}: {}", pin, msg),
            RelayError::Io(err) => write!(f, "GPIO io error: {}", err),
        }
    }
}

impl error::Error for RelayError {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match self {
            RelayError::Io(err) => Some(err),
            _ => None,
        }
    }
}

impl From<std::io::Error> for RelayError {
    fn from(err: std::io::Error) -> Self {
        RelayError::Io(err)
    }
}
