use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use super::Table;
use super::channel::Channel;

/// Raw values returned by one successful sensor poll.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Measurements {
    pub temperature: f64,
    pub moisture: f64,
    pub light: f64,
    pub conductivity: f64,
    pub battery: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Reading {
    pub plant_id: String,
    /// UTC, truncated to whole seconds; the series key within a plant.
    pub time: OffsetDateTime,
    /// Temperature in Celsius
    pub temperature: f64,
    /// Soil moisture %
    pub moisture: f64,
    /// Light in lux
    pub light: f64,
    /// Soil conductivity in uS/cm
    pub conductivity: f64,
    /// Battery %
    pub battery: f64,
}

impl Reading {
    pub fn new(
        plant_id: impl Into<String>,
        time: OffsetDateTime,
        measurements: &Measurements,
    ) -> Self {
        Self {
            plant_id: plant_id.into(),
            time: time.replace_nanosecond(0).unwrap_or(time),
            temperature: measurements.temperature,
            moisture: measurements.moisture,
            light: measurements.light,
            conductivity: measurements.conductivity,
            battery: measurements.battery,
        }
    }

    pub fn value(&self, channel: Channel) -> f64 {
        match channel {
            Channel::Temperature => self.temperature,
            Channel::Moisture => self.moisture,
            Channel::Light => self.light,
            Channel::Conductivity => self.conductivity,
            Channel::Battery => self.battery,
        }
    }
}

pub struct ReadingTable;

impl Table for ReadingTable {
    fn name(&self) -> &'static str {
        "readings"
    }

    fn create(&self) -> String {
        String::from(
            r#"
            CREATE TABLE IF NOT EXISTS readings (
                plant_id VARCHAR(64) NOT NULL,
                time TIMESTAMP NOT NULL,
                temperature REAL NOT NULL,
                moisture REAL NOT NULL,
                light REAL NOT NULL,
                conductivity REAL NOT NULL,
                battery REAL NOT NULL,
                PRIMARY KEY (plant_id, time),
                FOREIGN KEY (plant_id) REFERENCES plants (id) ON DELETE CASCADE
            );
            "#,
        )
    }

    fn dispose(&self) -> String {
        String::from("DROP TABLE IF EXISTS readings;")
    }

    fn dependencies(&self) -> Vec<&'static str> {
        vec!["plants"]
    }
}
