use crate::error::ReadingError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use utoipa::ToSchema;

/// Soil moisture at or above this value counts as dry
pub const DRY_THRESHOLD: i32 = 500;

/// Selects which temperature/humidity bounds a reading is drawn from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    #[default]
    Normal,
    High,
}

impl Mode {
    /// Lenient parsing used by the HTTP layer.
    /// Anything but `high` selects the normal range, including a missing value.
    pub fn from_query(range: Option<&str>) -> Self {
        match range {
            Some("high") => Mode::High,
            _ => Mode::Normal,
        }
    }
}

impl FromStr for Mode {
    type Err = ReadingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "normal" => Ok(Mode::Normal),
            "high" => Ok(Mode::High),
            other => Err(ReadingError::InvalidMode(other.to_owned())),
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mode::Normal => write!(f, "normal"),
            Mode::High => write!(f, "high"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
pub enum SoilStatus {
    Wet,
    Dry,
}

impl SoilStatus {
    pub fn from_moisture(soil_moisture: i32) -> Self {
        if soil_moisture < DRY_THRESHOLD {
            SoilStatus::Wet
        } else {
            SoilStatus::Dry
        }
    }
}

impl fmt::Display for SoilStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SoilStatus::Wet => write!(f, "Wet"),
            SoilStatus::Dry => write!(f, "Dry"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
pub enum WindDirection {
    #[serde(rename = "N")]
    North,
    #[serde(rename = "NE")]
    NorthEast,
    #[serde(rename = "E")]
    East,
    #[serde(rename = "SE")]
    SouthEast,
    #[serde(rename = "S")]
    South,
    #[serde(rename = "SW")]
    SouthWest,
    #[serde(rename = "W")]
    West,
    #[serde(rename = "NW")]
    NorthWest,
}

impl WindDirection {
    pub const ALL: [WindDirection; 8] = [
        WindDirection::North,
        WindDirection::NorthEast,
        WindDirection::East,
        WindDirection::SouthEast,
        WindDirection::South,
        WindDirection::SouthWest,
        WindDirection::West,
        WindDirection::NorthWest,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            WindDirection::North => "N",
            WindDirection::NorthEast => "NE",
            WindDirection::East => "E",
            WindDirection::SouthEast => "SE",
            WindDirection::South => "S",
            WindDirection::SouthWest => "SW",
            WindDirection::West => "W",
            WindDirection::NorthWest => "NW",
        }
    }
}

impl fmt::Display for WindDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
pub enum WeatherCondition {
    Clear,
    Cloudy,
    Rainy,
    Stormy,
    Snowy,
    Foggy,
    Windy,
}

impl WeatherCondition {
    pub const ALL: [WeatherCondition; 7] = [
        WeatherCondition::Clear,
        WeatherCondition::Cloudy,
        WeatherCondition::Rainy,
        WeatherCondition::Stormy,
        WeatherCondition::Snowy,
        WeatherCondition::Foggy,
        WeatherCondition::Windy,
    ];
}

impl fmt::Display for WeatherCondition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// One simulated weather and soil data point.
///
/// `soil_status` is always derived from `soil_moisture`, both on
/// construction and when deserializing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(try_from = "RawReading")]
pub struct Reading {
    temperature: i32,
    humidity: i32,
    wind_speed: i32,
    wind_direction: WindDirection,
    wind_degree: i32,
    weather_description: WeatherCondition,
    soil_moisture: i32,
    soil_status: SoilStatus,
}

impl Reading {
    pub fn new(
        temperature: i32,
        humidity: i32,
        wind_speed: i32,
        wind_direction: WindDirection,
        wind_degree: i32,
        weather_description: WeatherCondition,
        soil_moisture: i32,
    ) -> Self {
        Reading {
            temperature,
            humidity,
            wind_speed,
            wind_direction,
            wind_degree,
            weather_description,
            soil_moisture,
            soil_status: SoilStatus::from_moisture(soil_moisture),
        }
    }

    pub fn temperature(&self) -> i32 {
        self.temperature
    }

    pub fn humidity(&self) -> i32 {
        self.humidity
    }

    pub fn wind_speed(&self) -> i32 {
        self.wind_speed
    }

    pub fn wind_direction(&self) -> WindDirection {
        self.wind_direction
    }

    pub fn wind_degree(&self) -> i32 {
        self.wind_degree
    }

    pub fn weather_description(&self) -> WeatherCondition {
        self.weather_description
    }

    pub fn soil_moisture(&self) -> i32 {
        self.soil_moisture
    }

    pub fn soil_status(&self) -> SoilStatus {
        self.soil_status
    }
}

#[derive(Deserialize)]
struct RawReading {
    temperature: i32,
    humidity: i32,
    wind_speed: i32,
    wind_direction: WindDirection,
    wind_degree: i32,
    weather_description: WeatherCondition,
    soil_moisture: i32,
    soil_status: SoilStatus,
}

impl TryFrom<RawReading> for Reading {
    type Error = ReadingError;

    fn try_from(raw: RawReading) -> Result<Self, Self::Error> {
        let reading = Reading::new(
            raw.temperature,
            raw.humidity,
            raw.wind_speed,
            raw.wind_direction,
            raw.wind_degree,
            raw.weather_description,
            raw.soil_moisture,
        );
        if reading.soil_status != raw.soil_status {
            return Err(ReadingError::StatusMismatch(raw.soil_moisture));
        }
        Ok(reading)
    }
}
