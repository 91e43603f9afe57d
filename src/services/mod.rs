mod cadence;
mod daylight;
mod notifier;
mod poller;
mod scheduler;
mod threshold;

pub use cadence::{CadencePlan, CadencePlanner, Window};
pub use daylight::{DaylightOracle, FixedDaylight, SpaOracle};
pub use notifier::{LogNotifier, Notifier, SlackNotifier, format_alert};
pub use poller::{PlantPoller, SimulatedPoller};
pub use scheduler::{PollingScheduler, SchedulerState};
pub use threshold::ThresholdEvaluator;
