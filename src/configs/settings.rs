use std::env;

use config::{Config, ConfigError, Environment, File};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Logger {
    pub level: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Database {
    pub clean_start: bool,
    pub url: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Location {
    pub latitude: f64,
    pub longitude: f64,
    /// Overrides the detected local offset for window arithmetic.
    pub utc_offset_hours: Option<i8>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Poll {
    pub day_interval_minutes: u32,
    pub night_interval_minutes: u32,
    pub timeout_secs: u64,
    pub transport: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Thresholds {
    pub moisture_min: f64,
    pub moisture_max: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Notify {
    pub slack_webhook_url: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlantDef {
    pub id: String,
    pub name: String,
    pub address: String,
    pub moisture_min: Option<f64>,
    pub moisture_max: Option<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    pub logger: Logger,
    pub database: Database,
    pub location: Location,
    pub poll: Poll,
    pub thresholds: Thresholds,
    pub notify: Notify,
    pub plants: Vec<PlantDef>,
}

impl Settings {
    pub fn new() -> Result<Self, ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or("development".into());

        Config::builder()
            .add_source(File::with_name("configs/default"))
            .add_source(File::with_name(&format!("configs/{run_mode}")).required(false))
            .add_source(
                Environment::with_prefix("PLANTBOT")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()
    }
}
