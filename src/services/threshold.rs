use crate::models::{AlertDecision, Channel, Plant, Reading};

/// Compares one reading against the plant's configured bounds. Pure and
/// history-free: every tick is evaluated independently, so an alert can
/// fire on every tick while a value stays out of bounds.
pub struct ThresholdEvaluator;

impl ThresholdEvaluator {
    pub fn evaluate(plant: &Plant, reading: &Reading) -> AlertDecision {
        let breached_channel = Channel::ALL.into_iter().find(|channel| {
            plant
                .thresholds
                .bounds(*channel)
                .is_some_and(|bounds| !bounds.contains(reading.value(*channel)))
        });

        AlertDecision {
            plant_id: plant.id.clone(),
            triggered: breached_channel.is_some(),
            breached_channel,
            reading: reading.clone(),
        }
    }
}
