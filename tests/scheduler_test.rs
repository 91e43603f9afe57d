use std::sync::Arc;

use time::macros::date;

use plantbot::errors::OracleError;
use plantbot::models::Channel;
use plantbot::services::{DaylightOracle, FixedDaylight};

mod common;
use common::mock_app::{MockApp, RecordingNotifier, ScriptedPoller, healthy_measurements, test_plant};

#[tokio::test]
async fn test_tick_isolates_poll_failures() {
    let app = MockApp::new().await;

    let plants = vec![
        test_plant("basil", 30.0, 60.0),
        test_plant("monstera", 30.0, 60.0),
        test_plant("fern", 30.0, 60.0),
    ];
    for plant in &plants {
        app.plant_repository.ensure_series(plant).await.unwrap();
    }

    let poller = Arc::new(
        ScriptedPoller::new()
            .with_measurements("basil", healthy_measurements(45.0))
            .with_measurements("monstera", healthy_measurements(50.0))
            .with_failure("fern"),
    );
    let notifier = Arc::new(RecordingNotifier::new());

    let scheduler = app.scheduler(
        plants,
        Arc::new(FixedDaylight::new(6, 20)),
        poller,
        notifier.clone(),
    );

    scheduler.tick().await;

    // The two reachable plants produced exactly one reading each; the
    // unreachable one produced none and nothing escaped the tick.
    assert_eq!(app.reading_repository.count("basil").await.unwrap(), 1);
    assert_eq!(app.reading_repository.count("monstera").await.unwrap(), 1);
    assert_eq!(app.reading_repository.count("fern").await.unwrap(), 0);
    assert!(notifier.alerts.lock().await.is_empty());
}

#[tokio::test]
async fn test_tick_stores_then_alerts_on_breach() {
    let app = MockApp::new().await;

    let plants = vec![
        test_plant("basil", 30.0, 60.0),
        test_plant("monstera", 30.0, 60.0),
    ];
    for plant in &plants {
        app.plant_repository.ensure_series(plant).await.unwrap();
    }

    let poller = Arc::new(
        ScriptedPoller::new()
            .with_measurements("basil", healthy_measurements(25.0))
            .with_measurements("monstera", healthy_measurements(45.0)),
    );
    let notifier = Arc::new(RecordingNotifier::new());

    let scheduler = app.scheduler(
        plants,
        Arc::new(FixedDaylight::new(6, 20)),
        poller,
        notifier.clone(),
    );

    scheduler.tick().await;

    let alerts = notifier.alerts.lock().await;
    assert_eq!(alerts.len(), 1);
    assert_eq!(alerts[0].plant_id, "basil");
    assert!(alerts[0].triggered);
    assert_eq!(alerts[0].breached_channel, Some(Channel::Moisture));

    // The breached reading was stored before the alert went out.
    let latest = app.reading_repository.latest("basil", 1).await.unwrap();
    assert_eq!(latest.len(), 1);
    assert_eq!(latest[0].moisture, 25.0);
}

#[tokio::test]
async fn test_consecutive_ticks_extend_each_series() {
    let app = MockApp::new().await;

    let plants = vec![test_plant("basil", 30.0, 60.0)];
    app.plant_repository.ensure_series(&plants[0]).await.unwrap();

    let poller = Arc::new(
        ScriptedPoller::new().with_measurements("basil", healthy_measurements(45.0)),
    );
    let notifier = Arc::new(RecordingNotifier::new());

    let scheduler = app.scheduler(
        plants,
        Arc::new(FixedDaylight::new(6, 20)),
        poller,
        notifier,
    );

    scheduler.tick().await;
    // Readings are keyed to the second; space the ticks out.
    tokio::time::sleep(std::time::Duration::from_millis(1100)).await;
    scheduler.tick().await;

    let latest = app.reading_repository.latest("basil", 10).await.unwrap();
    assert_eq!(latest.len(), 2);
    assert!(latest[0].time > latest[1].time);
}

struct FailingOracle;

impl DaylightOracle for FailingOracle {
    fn sun_times(
        &self,
        _date: time::Date,
        _latitude: f64,
        _longitude: f64,
    ) -> Result<(u8, u8), OracleError> {
        Err(OracleError::PolarNight)
    }
}

#[tokio::test]
async fn test_plan_for_degrades_when_oracle_fails() {
    let app = MockApp::new().await;

    let scheduler = app.scheduler(
        vec![test_plant("basil", 30.0, 60.0)],
        Arc::new(FailingOracle),
        Arc::new(ScriptedPoller::new()),
        Arc::new(RecordingNotifier::new()),
    );

    let plan = scheduler.plan_for(date!(2024 - 12 - 21));

    assert!(plan.degraded);
    assert_eq!(plan.windows.len(), 1);
    // The fallback samples the whole day at the night interval.
    assert_eq!(plan.window_at(12).unwrap().interval_minutes, 60);
}

#[tokio::test]
async fn test_plan_for_uses_oracle_hours() {
    let app = MockApp::new().await;

    let scheduler = app.scheduler(
        vec![test_plant("basil", 30.0, 60.0)],
        Arc::new(FixedDaylight::new(6, 20)),
        Arc::new(ScriptedPoller::new()),
        Arc::new(RecordingNotifier::new()),
    );

    let plan = scheduler.plan_for(date!(2024 - 06 - 01));

    assert!(!plan.degraded);
    assert_eq!(plan.windows.len(), 3);
    assert_eq!(plan.window_at(3).unwrap().interval_minutes, 60);
    assert_eq!(plan.window_at(12).unwrap().interval_minutes, 10);
    assert_eq!(plan.window_at(23).unwrap().interval_minutes, 60);
}
