use std::sync::Arc;
use std::time::Duration;

use time::{Date, OffsetDateTime, PrimitiveDateTime, Time, UtcOffset};
use tokio::task::JoinSet;

use crate::configs::settings::{Location, Poll};
use crate::models::{Plant, Reading};
use crate::repositories::{PlantRepository, ReadingRepository};
use crate::services::cadence::{CadencePlan, CadencePlanner};
use crate::services::daylight::DaylightOracle;
use crate::services::notifier::{Notifier, format_alert};
use crate::services::poller::PlantPoller;
use crate::services::threshold::ThresholdEvaluator;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchedulerState {
    Idle,
    Planning,
    Armed,
    Polling,
    Replanning,
}

/// Timer-driven run loop: once per day asks the daylight oracle for the
/// sunrise/sunset boundary, arms the day's cadence plan, and on each tick
/// polls every registered plant. Terminal only on process shutdown.
pub struct PollingScheduler {
    plants: Vec<Plant>,
    planner: CadencePlanner,
    oracle: Arc<dyn DaylightOracle>,
    poller: Arc<dyn PlantPoller>,
    plant_repository: Arc<PlantRepository>,
    reading_repository: Arc<ReadingRepository>,
    notifier: Arc<dyn Notifier>,
    latitude: f64,
    longitude: f64,
    poll_timeout: Duration,
    offset: UtcOffset,
}

impl PollingScheduler {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        plants: Vec<Plant>,
        location: Location,
        poll: Poll,
        offset: UtcOffset,
        oracle: Arc<dyn DaylightOracle>,
        poller: Arc<dyn PlantPoller>,
        plant_repository: Arc<PlantRepository>,
        reading_repository: Arc<ReadingRepository>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self {
            plants,
            planner: CadencePlanner::new(poll.day_interval_minutes, poll.night_interval_minutes),
            oracle,
            poller,
            plant_repository,
            reading_repository,
            notifier,
            latitude: location.latitude,
            longitude: location.longitude,
            poll_timeout: Duration::from_secs(poll.timeout_secs),
            offset,
        }
    }

    fn local_now(&self) -> OffsetDateTime {
        OffsetDateTime::now_utc().to_offset(self.offset)
    }

    fn transition(state: &mut SchedulerState, next: SchedulerState) {
        tracing::debug!(from = ?state, to = ?next, "scheduler transition");
        *state = next;
    }

    /// Today's plan. An oracle failure degrades to the uniform
    /// night-interval plan; the real computation is retried at the next
    /// midnight boundary.
    pub fn plan_for(&self, date: Date) -> CadencePlan {
        match self.oracle.sun_times(date, self.latitude, self.longitude) {
            Ok((sunrise_hour, sunset_hour)) => {
                tracing::info!(%date, sunrise_hour, sunset_hour, "daylight hours");
                self.planner.build(date, sunrise_hour, sunset_hour)
            }
            Err(e) => {
                tracing::warn!(%date, error = %e, "daylight lookup failed, using degraded plan");
                self.planner.degraded(date)
            }
        }
    }

    pub async fn run(self: Arc<Self>) -> anyhow::Result<()> {
        let mut state = SchedulerState::Idle;

        Self::transition(&mut state, SchedulerState::Planning);
        for plant in &self.plants {
            self.plant_repository.ensure_series(plant).await?;
        }
        tracing::info!(plants = self.plants.len(), "series registered");

        loop {
            let today = self.local_now().date();
            let plan = self.plan_for(today);
            if plan.degraded {
                tracing::warn!(%today, "running on degraded plan");
            }

            Self::transition(&mut state, SchedulerState::Armed);

            let mut now = self.local_now();
            while let Some(tick) = plan.next_tick_after(now) {
                let wait = (tick - now).try_into().unwrap_or(Duration::ZERO);
                tokio::time::sleep(wait).await;

                // Ticks are detached so a slow transport never stalls the
                // timer loop, and in-flight polls survive the midnight
                // replan.
                let scheduler = Arc::clone(&self);
                tokio::spawn(async move {
                    scheduler.tick().await;
                });

                now = self.local_now().max(tick);
            }

            Self::transition(&mut state, SchedulerState::Replanning);
            self.sleep_until_next_day(today).await;
        }
    }

    /// One tick: poll every plant concurrently, then store, evaluate and
    /// notify per plant. A failure on one plant never aborts the others.
    pub async fn tick(&self) {
        tracing::debug!(state = ?SchedulerState::Polling, plants = self.plants.len(), "tick");

        let mut polls = JoinSet::new();
        for plant in self.plants.iter().cloned() {
            let poller = Arc::clone(&self.poller);
            let reading_repository = Arc::clone(&self.reading_repository);
            let notifier = Arc::clone(&self.notifier);
            let poll_timeout = self.poll_timeout;

            polls.spawn(async move {
                Self::poll_one(plant, poller, reading_repository, notifier, poll_timeout).await;
            });
        }

        while let Some(joined) = polls.join_next().await {
            if let Err(e) = joined {
                tracing::error!(error = %e, "poll task aborted");
            }
        }
    }

    async fn poll_one(
        plant: Plant,
        poller: Arc<dyn PlantPoller>,
        reading_repository: Arc<ReadingRepository>,
        notifier: Arc<dyn Notifier>,
        poll_timeout: Duration,
    ) {
        let measurements = match tokio::time::timeout(poll_timeout, poller.poll(&plant)).await {
            Ok(Ok(measurements)) => measurements,
            Ok(Err(e)) => {
                tracing::error!(plant = %plant.id, error = %e, "poll failed, retrying next tick");
                return;
            }
            Err(_) => {
                tracing::error!(plant = %plant.id, timeout = ?poll_timeout, "poll timed out, retrying next tick");
                return;
            }
        };

        let reading = Reading::new(&plant.id, OffsetDateTime::now_utc(), &measurements);
        if let Err(e) = reading_repository.append(&reading).await {
            tracing::error!(plant = %plant.id, error = %e, "failed to store reading");
            return;
        }

        let decision = ThresholdEvaluator::evaluate(&plant, &reading);
        if decision.triggered {
            let text = format_alert(&plant, &decision);
            if let Err(e) = notifier.notify(&decision, &text).await {
                tracing::error!(plant = %plant.id, error = %e, "notification delivery failed");
            }
        } else {
            tracing::info!(plant = %plant.id, moisture = reading.moisture, "within thresholds");
        }
    }

    async fn sleep_until_next_day(&self, today: Date) {
        let Some(tomorrow) = today.next_day() else {
            return;
        };

        let midnight = PrimitiveDateTime::new(tomorrow, Time::MIDNIGHT).assume_offset(self.offset);
        let now = self.local_now();
        if midnight > now {
            let wait = (midnight - now).try_into().unwrap_or(Duration::ZERO);
            tokio::time::sleep(wait).await;
        }
    }
}
