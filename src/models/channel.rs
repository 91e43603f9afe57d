use std::fmt;

use serde::{Deserialize, Serialize};

/// Measurement channels reported by a plant sensor, in declared order.
/// Threshold evaluation reports the first breached channel in this order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Channel {
    Temperature,
    Moisture,
    Light,
    Conductivity,
    Battery,
}

impl Channel {
    pub const ALL: [Channel; 5] = [
        Channel::Temperature,
        Channel::Moisture,
        Channel::Light,
        Channel::Conductivity,
        Channel::Battery,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Channel::Temperature => "temperature",
            Channel::Moisture => "moisture",
            Channel::Light => "light",
            Channel::Conductivity => "conductivity",
            Channel::Battery => "battery",
        }
    }
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
