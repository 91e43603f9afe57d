pub mod plant;
pub mod reading;

pub use plant::PlantRepository;
pub use reading::ReadingRepository;
