//! Repositório de manutenções
//!
//! Sub-recurso de veículo: toda operação é delimitada pelo `vehicle_id`,
//! e a posse do veículo já foi verificada pelo controller.

use sqlx::PgPool;
use uuid::Uuid;

use crate::models::maintenance::{Maintenance, MaintenanceRow};
use crate::utils::errors::AppError;

pub struct MaintenanceRepository {
    pool: PgPool,
}

impl MaintenanceRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(
        &self,
        vehicle_id: Uuid,
        record: &Maintenance,
    ) -> Result<MaintenanceRow, AppError> {
        let row = sqlx::query_as::<_, MaintenanceRow>(
            r#"
            INSERT INTO maintenances (
                id, vehicle_id, service_type, date, cost, mileage, description
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(vehicle_id)
        .bind(&record.service_type)
        .bind(record.date)
        .bind(record.cost)
        .bind(record.mileage)
        .bind(&record.description)
        .fetch_one(&self.pool)
        .await?;

        Ok(row)
    }

    /// Lista em ordem de data decrescente, como a tela de histórico exibe
    pub async fn list_by_vehicle(&self, vehicle_id: Uuid) -> Result<Vec<MaintenanceRow>, AppError> {
        let rows = sqlx::query_as::<_, MaintenanceRow>(
            "SELECT * FROM maintenances WHERE vehicle_id = $1 ORDER BY date DESC NULLS LAST",
        )
        .bind(vehicle_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    pub async fn find_by_id(
        &self,
        vehicle_id: Uuid,
        id: Uuid,
    ) -> Result<Option<MaintenanceRow>, AppError> {
        let row = sqlx::query_as::<_, MaintenanceRow>(
            "SELECT * FROM maintenances WHERE id = $1 AND vehicle_id = $2",
        )
        .bind(id)
        .bind(vehicle_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }

    pub async fn update(
        &self,
        vehicle_id: Uuid,
        id: Uuid,
        record: &Maintenance,
    ) -> Result<MaintenanceRow, AppError> {
        let row = sqlx::query_as::<_, MaintenanceRow>(
            r#"
            UPDATE maintenances
            SET service_type = $3, date = $4, cost = $5, mileage = $6,
                description = $7
            WHERE id = $1 AND vehicle_id = $2
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(vehicle_id)
        .bind(&record.service_type)
        .bind(record.date)
        .bind(record.cost)
        .bind(record.mileage)
        .bind(&record.description)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound("Manutenção não encontrada".to_string()))?;

        Ok(row)
    }

    pub async fn delete(&self, vehicle_id: Uuid, id: Uuid) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM maintenances WHERE id = $1 AND vehicle_id = $2")
            .bind(id)
            .bind(vehicle_id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Manutenção não encontrada".to_string()));
        }

        Ok(())
    }
}
