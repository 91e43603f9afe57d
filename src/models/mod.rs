pub mod alert;
pub mod channel;
pub mod plant;
pub mod reading;

pub use alert::AlertDecision;
pub use channel::Channel;
pub use plant::{Bounds, Plant, PlantTable, Thresholds};
pub use reading::{Measurements, Reading, ReadingTable};

pub trait Table {
    /// The name of the table
    fn name(&self) -> &'static str;

    /// The SQL statement to create the table
    fn create(&self) -> String;

    /// The SQL statement to dispose the table
    fn dispose(&self) -> String;

    /// The dependencies of the table
    fn dependencies(&self) -> Vec<&'static str>;
}
