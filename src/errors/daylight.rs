#[derive(Debug, thiserror::Error)]
pub enum OracleError {
    #[error("polar day: no sunset at this location and date")]
    PolarDay,

    #[error("polar night: no sunrise at this location and date")]
    PolarNight,

    #[error("solar computation failed: {0}")]
    Computation(String),
}
