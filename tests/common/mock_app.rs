use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use plantbot::configs::schema::SchemaManager;
use plantbot::configs::settings::{Database, Location, Poll};
use plantbot::configs::storage::Storage;
use plantbot::errors::{NotifyError, PollError};
use plantbot::models::{AlertDecision, Bounds, Measurements, Plant, Thresholds};
use plantbot::repositories::{PlantRepository, ReadingRepository};
use plantbot::services::{DaylightOracle, Notifier, PlantPoller, PollingScheduler};
use time::UtcOffset;

pub struct MockApp {
    pub storage: Arc<Storage>,
    pub plant_repository: Arc<PlantRepository>,
    pub reading_repository: Arc<ReadingRepository>,
}

impl MockApp {
    pub async fn new() -> Self {
        let storage = Arc::new(
            Storage::new(
                Database {
                    clean_start: true,
                    url: String::from("sqlite::memory:"),
                },
                SchemaManager::default(),
            )
            .await
            .unwrap(),
        );

        Self {
            plant_repository: Arc::new(PlantRepository::new(storage.clone())),
            reading_repository: Arc::new(ReadingRepository::new(storage.clone())),
            storage,
        }
    }

    pub fn scheduler(
        &self,
        plants: Vec<Plant>,
        oracle: Arc<dyn DaylightOracle>,
        poller: Arc<dyn PlantPoller>,
        notifier: Arc<dyn Notifier>,
    ) -> Arc<PollingScheduler> {
        Arc::new(PollingScheduler::new(
            plants,
            Location {
                latitude: 52.52,
                longitude: 13.405,
                utc_offset_hours: None,
            },
            Poll {
                day_interval_minutes: 10,
                night_interval_minutes: 60,
                timeout_secs: 2,
                transport: String::from("scripted"),
            },
            UtcOffset::UTC,
            oracle,
            poller,
            self.plant_repository.clone(),
            self.reading_repository.clone(),
            notifier,
        ))
    }
}

pub fn test_plant(id: &str, moisture_min: f64, moisture_max: f64) -> Plant {
    Plant {
        id: id.to_string(),
        name: id.to_string(),
        address: format!("C4:7C:8D:00:00:{:02}", id.len()),
        thresholds: Thresholds::moisture_only(Bounds::new(moisture_min, moisture_max)),
    }
}

pub fn healthy_measurements(moisture: f64) -> Measurements {
    Measurements {
        temperature: 21.5,
        moisture,
        light: 400.0,
        conductivity: 350.0,
        battery: 88.0,
    }
}

/// Transport scripted per plant id; listed ids fail with a transport error.
pub struct ScriptedPoller {
    measurements: HashMap<String, Measurements>,
    failing: HashSet<String>,
}

impl ScriptedPoller {
    pub fn new() -> Self {
        Self {
            measurements: HashMap::new(),
            failing: HashSet::new(),
        }
    }

    pub fn with_measurements(mut self, plant_id: &str, measurements: Measurements) -> Self {
        self.measurements.insert(plant_id.to_string(), measurements);
        self
    }

    pub fn with_failure(mut self, plant_id: &str) -> Self {
        self.failing.insert(plant_id.to_string());
        self
    }
}

#[async_trait]
impl PlantPoller for ScriptedPoller {
    async fn poll(&self, plant: &Plant) -> Result<Measurements, PollError> {
        if self.failing.contains(&plant.id) {
            return Err(PollError::Unreachable(plant.address.clone()));
        }

        self.measurements
            .get(&plant.id)
            .copied()
            .ok_or_else(|| PollError::Transport(format!("no script for {}", plant.id)))
    }
}

/// Captures alert decisions instead of delivering them.
pub struct RecordingNotifier {
    pub alerts: Mutex<Vec<AlertDecision>>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self {
            alerts: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait]
impl Notifier for RecordingNotifier {
    async fn notify(&self, decision: &AlertDecision, _text: &str) -> Result<(), NotifyError> {
        self.alerts.lock().await.push(decision.clone());
        Ok(())
    }
}
