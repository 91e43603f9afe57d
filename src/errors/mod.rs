pub mod daylight;
pub mod notify;
pub mod poll;
pub mod store;

pub use daylight::OracleError;
pub use notify::NotifyError;
pub use poll::PollError;
pub use store::StoreError;
