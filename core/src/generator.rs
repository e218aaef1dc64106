use crate::error::ReadingError;
use crate::reading::{Mode, Reading, WeatherCondition, WindDirection};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use tracing::debug;

/// Half-open integer range `[min, max)`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bounds {
    min: i32,
    max: i32,
}

impl Bounds {
    pub fn new(min: i32, max: i32) -> Result<Self, ReadingError> {
        if min >= max {
            return Err(ReadingError::EmptyBounds(min, max));
        }
        Ok(Bounds { min, max })
    }

    const fn fixed(min: i32, max: i32) -> Self {
        Bounds { min, max }
    }

    pub fn min(&self) -> i32 {
        self.min
    }

    pub fn max(&self) -> i32 {
        self.max
    }

    pub fn contains(&self, value: i32) -> bool {
        self.min <= value && value < self.max
    }

    fn sample<R: Rng>(&self, rng: &mut R) -> i32 {
        rng.gen_range(self.min..self.max)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModeBounds {
    pub temperature: Bounds,
    pub humidity: Bounds,
}

/// Temperature and humidity bounds per mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RangeTable {
    pub normal: ModeBounds,
    pub high: ModeBounds,
}

impl RangeTable {
    pub fn bounds(&self, mode: Mode) -> &ModeBounds {
        match mode {
            Mode::Normal => &self.normal,
            Mode::High => &self.high,
        }
    }
}

impl Default for RangeTable {
    fn default() -> Self {
        RangeTable {
            normal: ModeBounds {
                temperature: Bounds::fixed(60, 85),
                humidity: Bounds::fixed(30, 60),
            },
            high: ModeBounds {
                temperature: Bounds::fixed(85, 110),
                humidity: Bounds::fixed(60, 100),
            },
        }
    }
}

/*
 * mode independent draws
 */

pub const WIND_SPEED_MAX: i32 = 30;
pub const WIND_DEGREE: Bounds = Bounds::fixed(0, 360);
pub const SOIL_MOISTURE: Bounds = Bounds::fixed(300, 700);

pub struct ReadingGenerator<R> {
    rng: R,
    table: RangeTable,
    span: tracing::Span,
}

impl ReadingGenerator<StdRng> {
    pub fn seeded(seed: u64) -> Self {
        ReadingGenerator::new(StdRng::seed_from_u64(seed))
    }

    pub fn from_entropy() -> Self {
        ReadingGenerator::new(StdRng::from_entropy())
    }
}

impl<R: Rng> ReadingGenerator<R> {
    pub fn new(rng: R) -> Self {
        ReadingGenerator {
            rng,
            table: RangeTable::default(),
            span: tracing::Span::none(),
        }
    }

    pub fn with_table(mut self, table: RangeTable) -> Self {
        self.table = table;
        self
    }

    /// Debug traces of every reading are recorded inside `span`
    pub fn with_span(mut self, span: tracing::Span) -> Self {
        self.span = span;
        self
    }

    pub fn table(&self) -> &RangeTable {
        &self.table
    }

    pub fn generate(&mut self, mode: Mode) -> Reading {
        let _enter = self.span.enter();
        let bounds = *self.table.bounds(mode);

        let temperature = bounds.temperature.sample(&mut self.rng);
        let humidity = bounds.humidity.sample(&mut self.rng);
        let wind_speed = self.rng.gen_range(0..=WIND_SPEED_MAX);
        let wind_direction = *WindDirection::ALL
            .choose(&mut self.rng)
            .unwrap_or(&WindDirection::North);
        let wind_degree = WIND_DEGREE.sample(&mut self.rng);
        let weather_description = *WeatherCondition::ALL
            .choose(&mut self.rng)
            .unwrap_or(&WeatherCondition::Clear);
        let soil_moisture = SOIL_MOISTURE.sample(&mut self.rng);

        let reading = Reading::new(
            temperature,
            humidity,
            wind_speed,
            wind_direction,
            wind_degree,
            weather_description,
            soil_moisture,
        );

        debug!(
            %mode,
            temperature_f = reading.temperature(),
            humidity_pct = reading.humidity(),
            wind_speed_mph = reading.wind_speed(),
            wind_direction = %reading.wind_direction(),
            wind_degree = reading.wind_degree(),
            weather = %reading.weather_description(),
            soil_moisture = reading.soil_moisture(),
            soil_status = %reading.soil_status(),
            "Generated reading"
        );
        reading
    }
}
