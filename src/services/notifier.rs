use async_trait::async_trait;

use crate::errors::NotifyError;
use crate::models::{AlertDecision, Channel, Plant};

/// Notification channel fed by the scheduler. Delivery failures are logged
/// by the caller and never fatal.
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn notify(&self, decision: &AlertDecision, text: &str) -> Result<(), NotifyError>;
}

/// Human-readable alert text for the notification channel.
pub fn format_alert(plant: &Plant, decision: &AlertDecision) -> String {
    let reading = &decision.reading;

    let mut message = match decision.breached_channel {
        Some(Channel::Moisture) | None => {
            format!(":potable_water: *{}* needs water! :potable_water:", plant.name)
        }
        Some(channel) => format!("*{}* {} out of bounds", plant.name, channel),
    };

    message.push_str(&format!("\n\n*Moisture* = {} %", reading.moisture));
    message.push_str(&format!("\n*Temperature* = {} °C", reading.temperature));
    message.push_str(&format!("\n*Light* = {} lux", reading.light));
    message.push_str(&format!("\n*Conductivity* = {} uS/cm", reading.conductivity));

    message
}

/// Posts alert text to a Slack incoming webhook.
pub struct SlackNotifier {
    client: reqwest::Client,
    webhook_url: String,
}

impl SlackNotifier {
    pub fn new(webhook_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            webhook_url: webhook_url.into(),
        }
    }
}

#[async_trait]
impl Notifier for SlackNotifier {
    async fn notify(&self, decision: &AlertDecision, text: &str) -> Result<(), NotifyError> {
        let response = self
            .client
            .post(&self.webhook_url)
            .json(&serde_json::json!({ "text": text }))
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(NotifyError::Rejected(format!(
                "{} for plant {}",
                response.status(),
                decision.plant_id
            )));
        }

        Ok(())
    }
}

/// Fallback channel when no webhook is configured.
pub struct LogNotifier;

#[async_trait]
impl Notifier for LogNotifier {
    async fn notify(&self, decision: &AlertDecision, text: &str) -> Result<(), NotifyError> {
        tracing::warn!(plant = %decision.plant_id, "{text}");
        Ok(())
    }
}
