use std::sync::Arc;

use crate::configs::Storage;
use crate::errors::StoreError;
use crate::models::Reading;

/// Append-only time series of readings, one logical series per plant.
/// The series key is `(plant_id, time)`; within a plant, insertion order
/// follows strictly increasing timestamps.
pub struct ReadingRepository {
    storage: Arc<Storage>,
}

impl ReadingRepository {
    pub fn new(storage: Arc<Storage>) -> Self {
        Self { storage }
    }

    /// Inserts one reading. Re-delivery of an already stored timestamp is
    /// rejected with `DuplicateTimestamp`, not overwritten; callers needing
    /// idempotence must dedupe upstream.
    pub async fn append(&self, reading: &Reading) -> Result<(), StoreError> {
        let mut transaction = self.storage.get_pool().begin().await?;

        let registered: i64 = sqlx::query_scalar("SELECT COUNT(1) FROM plants WHERE id = $1")
            .bind(&reading.plant_id)
            .fetch_one(&mut *transaction)
            .await?;

        if registered == 0 {
            return Err(StoreError::UnknownDevice(reading.plant_id.clone()));
        }

        sqlx::query(
            r#"
            INSERT INTO readings (plant_id, time, temperature, moisture, light, conductivity, battery)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(&reading.plant_id)
        .bind(reading.time)
        .bind(reading.temperature)
        .bind(reading.moisture)
        .bind(reading.light)
        .bind(reading.conductivity)
        .bind(reading.battery)
        .execute(&mut *transaction)
        .await
        .map_err(|e| match &e {
            sqlx::Error::Database(db) if db.is_unique_violation() => {
                StoreError::DuplicateTimestamp {
                    plant_id: reading.plant_id.clone(),
                    time: reading.time,
                }
            }
            _ => StoreError::from(e),
        })?;

        transaction.commit().await?;

        Ok(())
    }

    /// Latest `limit` readings for a plant, newest first. A plant with no
    /// readings yields an empty vec, not an error.
    pub async fn latest(&self, plant_id: &str, limit: i64) -> Result<Vec<Reading>, StoreError> {
        let readings: Vec<Reading> = sqlx::query_as(
            r#"
            SELECT * FROM readings
            WHERE plant_id = $1
            ORDER BY time DESC
            LIMIT $2
            "#,
        )
        .bind(plant_id)
        .bind(limit)
        .fetch_all(self.storage.get_pool())
        .await?;

        Ok(readings)
    }

    pub async fn count(&self, plant_id: &str) -> Result<i64, StoreError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(1) FROM readings WHERE plant_id = $1")
            .bind(plant_id)
            .fetch_one(self.storage.get_pool())
            .await?;

        Ok(count)
    }
}
