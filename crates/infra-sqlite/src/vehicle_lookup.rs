// SQLite VehicleLookup Implementation

use crate::error::map_sqlx_error;
use async_trait::async_trait;
use carmaint_core::domain::Vehicle;
use carmaint_core::error::Result;
use carmaint_core::port::VehicleLookup;
use sqlx::SqlitePool;

pub struct SqliteVehicleLookup {
    pool: SqlitePool,
}

impl SqliteVehicleLookup {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Insert or replace a vehicle row
    ///
    /// Vehicles are owned by another subsystem; this is only used to mirror
    /// them into the maintenance database.
    pub async fn upsert(&self, vehicle: &Vehicle) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO vehicles (id, owner_id, brand, model, year, odometer)
            VALUES (?, ?, ?, ?, ?, ?)
            ON CONFLICT(id) DO UPDATE SET
                owner_id = excluded.owner_id,
                brand = excluded.brand,
                model = excluded.model,
                year = excluded.year,
                odometer = excluded.odometer
            "#,
        )
        .bind(&vehicle.id)
        .bind(&vehicle.owner_id)
        .bind(&vehicle.brand)
        .bind(&vehicle.model)
        .bind(vehicle.year)
        .bind(vehicle.odometer)
        .execute(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        Ok(())
    }
}

#[async_trait]
impl VehicleLookup for SqliteVehicleLookup {
    async fn get(&self, vehicle_id: &str) -> Result<Option<Vehicle>> {
        let row = sqlx::query_as::<_, VehicleRow>(
            "SELECT id, owner_id, brand, model, year, odometer FROM vehicles WHERE id = ?",
        )
        .bind(vehicle_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        Ok(row.map(|r| r.into_vehicle()))
    }
}

#[derive(Debug, sqlx::FromRow)]
struct VehicleRow {
    id: String,
    owner_id: String,
    brand: String,
    model: String,
    year: Option<i32>,
    odometer: i64,
}

impl VehicleRow {
    fn into_vehicle(self) -> Vehicle {
        Vehicle {
            id: self.id,
            owner_id: self.owner_id,
            brand: self.brand,
            model: self.model,
            year: self.year,
            odometer: self.odometer,
        }
    }
}
