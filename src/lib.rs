use std::sync::Arc;

use crate::app::create_scheduler;
use crate::configs::settings::Settings;

pub mod app;
pub mod configs;
pub mod errors;
pub mod models;
pub mod repositories;
pub mod services;

pub async fn run(settings: &Arc<Settings>) -> anyhow::Result<()> {
    let scheduler = create_scheduler(settings).await?;

    scheduler.run().await
}
