use std::sync::Arc;

use anyhow::{Context, bail};
use time::UtcOffset;

use crate::configs::settings::Location;
use crate::configs::{SchemaManager, Settings, Storage};
use crate::models::{Bounds, Plant, Thresholds};
use crate::repositories::{PlantRepository, ReadingRepository};
use crate::services::{
    DaylightOracle, LogNotifier, Notifier, PlantPoller, PollingScheduler, SimulatedPoller,
    SlackNotifier, SpaOracle,
};

pub async fn create_scheduler(settings: &Arc<Settings>) -> anyhow::Result<Arc<PollingScheduler>> {
    if settings.plants.is_empty() {
        bail!("no plants configured");
    }

    let storage = Arc::new(
        Storage::new(settings.database.clone(), SchemaManager::default())
            .await
            .context("failed to open storage")?,
    );

    let offset = local_offset(&settings.location);

    let plants: Vec<Plant> = settings
        .plants
        .iter()
        .map(|def| Plant {
            id: def.id.clone(),
            name: def.name.clone(),
            address: def.address.clone(),
            thresholds: Thresholds::moisture_only(Bounds::new(
                def.moisture_min.unwrap_or(settings.thresholds.moisture_min),
                def.moisture_max.unwrap_or(settings.thresholds.moisture_max),
            )),
        })
        .collect();

    let poller: Arc<dyn PlantPoller> = match settings.poll.transport.as_str() {
        "simulated" => Arc::new(SimulatedPoller::new(offset)),
        other => bail!("unsupported transport {other:?}"),
    };

    let notifier: Arc<dyn Notifier> = match &settings.notify.slack_webhook_url {
        Some(url) => Arc::new(SlackNotifier::new(url.clone())),
        None => Arc::new(LogNotifier),
    };

    let oracle: Arc<dyn DaylightOracle> = Arc::new(SpaOracle::new(offset));

    Ok(Arc::new(PollingScheduler::new(
        plants,
        settings.location.clone(),
        settings.poll.clone(),
        offset,
        oracle,
        poller,
        Arc::new(PlantRepository::new(storage.clone())),
        Arc::new(ReadingRepository::new(storage)),
        notifier,
    )))
}

fn local_offset(location: &Location) -> UtcOffset {
    if let Some(hours) = location.utc_offset_hours {
        return UtcOffset::from_hms(hours, 0, 0).unwrap_or(UtcOffset::UTC);
    }

    match UtcOffset::current_local_offset() {
        Ok(offset) => offset,
        Err(_) => {
            tracing::warn!("local UTC offset unavailable, using UTC for window times");
            UtcOffset::UTC
        }
    }
}
