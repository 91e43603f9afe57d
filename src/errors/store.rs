use time::OffsetDateTime;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("duplicate reading for plant {plant_id} at {time}")]
    DuplicateTimestamp {
        plant_id: String,
        time: OffsetDateTime,
    },

    #[error("unknown plant {0}")]
    UnknownDevice(String),

    #[error(transparent)]
    Database(#[from] sqlx::Error),
}
