use serde::{Deserialize, Serialize};

use super::Table;
use super::channel::Channel;

/// Half-open value range `[min, max)`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub min: f64,
    pub max: f64,
}

impl Bounds {
    pub fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value < self.max
    }
}

/// Per-channel alert bounds. Channels without bounds are never evaluated.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Thresholds {
    pub temperature: Option<Bounds>,
    pub moisture: Option<Bounds>,
    pub light: Option<Bounds>,
    pub conductivity: Option<Bounds>,
    pub battery: Option<Bounds>,
}

impl Thresholds {
    pub fn moisture_only(bounds: Bounds) -> Self {
        Self {
            moisture: Some(bounds),
            ..Self::default()
        }
    }

    pub fn bounds(&self, channel: Channel) -> Option<Bounds> {
        match channel {
            Channel::Temperature => self.temperature,
            Channel::Moisture => self.moisture,
            Channel::Light => self.light,
            Channel::Conductivity => self.conductivity,
            Channel::Battery => self.battery,
        }
    }
}

/// A registered plant sensor. The set of plants is fixed at startup;
/// thresholds come from configuration, not the database.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Plant {
    pub id: String,
    pub name: String,
    /// Transport address of the sensor (MAC for BLE transports).
    pub address: String,
    pub thresholds: Thresholds,
}

pub struct PlantTable;

impl Table for PlantTable {
    fn name(&self) -> &'static str {
        "plants"
    }

    fn create(&self) -> String {
        String::from(
            r#"
            CREATE TABLE IF NOT EXISTS plants (
                id VARCHAR(64) PRIMARY KEY,
                name VARCHAR(255) NOT NULL,
                address VARCHAR(64) NOT NULL
            );
            "#,
        )
    }

    fn dispose(&self) -> String {
        String::from("DROP TABLE IF EXISTS plants;")
    }

    fn dependencies(&self) -> Vec<&'static str> {
        vec![]
    }
}
