use std::f64::consts::PI;

use async_trait::async_trait;
use rand::Rng;
use rand_distr::StandardNormal;
use time::{OffsetDateTime, UtcOffset};

use crate::errors::PollError;
use crate::models::{Measurements, Plant};

/// Sensor transport: one call per plant per tick. Implementations talk to
/// the actual hardware; a failure is isolated to that plant and tick.
#[async_trait]
pub trait PlantPoller: Send + Sync {
    async fn poll(&self, plant: &Plant) -> Result<Measurements, PollError>;
}

/// Hardware-free transport producing plausible diurnal curves with gaussian
/// noise. Stands in for the BLE transport on development machines.
pub struct SimulatedPoller {
    offset: UtcOffset,
}

impl SimulatedPoller {
    pub fn new(offset: UtcOffset) -> Self {
        Self { offset }
    }

    fn daylight_lux(day_fraction: f64) -> f64 {
        const MAX_SUNLIGHT_LUX: f64 = 500.0;
        const MAX_MOONLIGHT_LUX: f64 = 5.0;
        const SUNRISE: f64 = 0.25;
        const SUNSET: f64 = 0.75;

        if (SUNRISE..SUNSET).contains(&day_fraction) {
            let arc = (day_fraction - SUNRISE) / (SUNSET - SUNRISE) * PI;
            arc.sin() * MAX_SUNLIGHT_LUX
        } else {
            let radians = day_fraction * 2.0 * PI;
            (radians + PI).cos().max(0.0) * (MAX_MOONLIGHT_LUX - 0.01) + 0.01
        }
    }
}

#[async_trait]
impl PlantPoller for SimulatedPoller {
    async fn poll(&self, _plant: &Plant) -> Result<Measurements, PollError> {
        let now = OffsetDateTime::now_utc().to_offset(self.offset);
        let day_fraction = f64::from(now.hour()) / 24.0 + f64::from(now.minute()) / 1440.0;

        let mut rng = rand::rng();
        let mut noise = |scale: f64| -> f64 {
            let z: f64 = rng.sample(StandardNormal);
            z * scale
        };

        Ok(Measurements {
            temperature: 18.0 + 6.0 * (day_fraction * 2.0 * PI - PI / 2.0).sin() + noise(0.4),
            moisture: (45.0 + noise(8.0)).clamp(0.0, 100.0),
            light: (Self::daylight_lux(day_fraction) + noise(10.0)).max(0.0),
            conductivity: (400.0 + noise(40.0)).max(0.0),
            battery: (90.0 + noise(2.0)).clamp(0.0, 100.0),
        })
    }
}
