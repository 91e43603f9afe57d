use super::channel::Channel;
use super::reading::Reading;

/// Outcome of evaluating one reading against a plant's thresholds.
/// Transient: handed to the notification channel, never persisted.
#[derive(Debug, Clone)]
pub struct AlertDecision {
    pub plant_id: String,
    pub triggered: bool,
    pub breached_channel: Option<Channel>,
    pub reading: Reading,
}
