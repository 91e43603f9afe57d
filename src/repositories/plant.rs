use std::sync::Arc;

use crate::configs::Storage;
use crate::errors::StoreError;
use crate::models::Plant;

pub struct PlantRepository {
    storage: Arc<Storage>,
}

impl PlantRepository {
    pub fn new(storage: Arc<Storage>) -> Self {
        Self { storage }
    }

    /// Registers the plant's series. Idempotent: repeated calls update the
    /// display name and address but never touch existing readings.
    pub async fn ensure_series(&self, plant: &Plant) -> Result<(), StoreError> {
        sqlx::query(
            r#"
            INSERT INTO plants (id, name, address)
            VALUES ($1, $2, $3)
            ON CONFLICT (id) DO UPDATE SET name = excluded.name, address = excluded.address
            "#,
        )
        .bind(&plant.id)
        .bind(&plant.name)
        .bind(&plant.address)
        .execute(self.storage.get_pool())
        .await?;

        Ok(())
    }

    pub async fn exists(&self, plant_id: &str) -> Result<bool, StoreError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(1) FROM plants WHERE id = $1")
            .bind(plant_id)
            .fetch_one(self.storage.get_pool())
            .await?;

        Ok(count > 0)
    }
}
