//! Repositório de veículos
//!
//! Todas as operações são delimitadas pelo `owner_id` do usuário
//! autenticado; um veículo de outro dono se comporta como inexistente. As
//! consultas são aguardadas em sequência, sem paralelismo — o modelo de
//! recursos da aplicação é uma requisição por vez.

use sqlx::PgPool;
use uuid::Uuid;

use crate::models::maintenance::MaintenanceRow;
use crate::models::vehicle::{Vehicle, VehicleKind, VehicleRecord};
use crate::utils::errors::AppError;

pub struct VehicleRepository {
    pool: PgPool,
}

impl VehicleRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Insere um veículo; placa duplicada vira conflito pelo índice único
    pub async fn create(
        &self,
        owner_id: Uuid,
        plate: &str,
        model: &str,
        color: &str,
        kind: &VehicleKind,
        image_url: Option<&str>,
    ) -> Result<Vehicle, AppError> {
        let columns = kind.columns();

        let record = sqlx::query_as::<_, VehicleRecord>(
            r#"
            INSERT INTO vehicles (
                id, owner_id, kind, plate, model, color,
                doors, axles, load_capacity, turbo_on, current_load, image_url
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(owner_id)
        .bind(kind.discriminator())
        .bind(plate)
        .bind(model)
        .bind(color)
        .bind(columns.doors)
        .bind(columns.axles)
        .bind(columns.load_capacity)
        .bind(columns.turbo_on)
        .bind(columns.current_load)
        .bind(image_url)
        .fetch_one(&self.pool)
        .await?;

        Vehicle::reconstruct(record, &[])
            .ok_or_else(|| AppError::Internal("veículo recém-criado não pôde ser reconstruído".to_string()))
    }

    /// Busca um veículo do dono, com o histórico embutido
    pub async fn find_by_id(&self, id: Uuid, owner_id: Uuid) -> Result<Option<Vehicle>, AppError> {
        let record = sqlx::query_as::<_, VehicleRecord>(
            "SELECT * FROM vehicles WHERE id = $1 AND owner_id = $2",
        )
        .bind(id)
        .bind(owner_id)
        .fetch_optional(&self.pool)
        .await?;

        match record {
            Some(record) => {
                let history = self.history_rows(record.id).await?;
                Ok(Vehicle::reconstruct(record, &history))
            }
            None => Ok(None),
        }
    }

    /// Lista os veículos do dono com o histórico embutido; linhas com tipo
    /// desconhecido são descartadas (com log) pela reconstrução
    pub async fn list_by_owner(&self, owner_id: Uuid) -> Result<Vec<Vehicle>, AppError> {
        let records = sqlx::query_as::<_, VehicleRecord>(
            "SELECT * FROM vehicles WHERE owner_id = $1 ORDER BY created_at DESC",
        )
        .bind(owner_id)
        .fetch_all(&self.pool)
        .await?;

        let mut vehicles = Vec::with_capacity(records.len());
        for record in records {
            let history = self.history_rows(record.id).await?;
            if let Some(vehicle) = Vehicle::reconstruct(record, &history) {
                vehicles.push(vehicle);
            }
        }

        Ok(vehicles)
    }

    /// Atualização integral das colunas editáveis; quem chama resolve a
    /// mesclagem parcial antes
    #[allow(clippy::too_many_arguments)]
    pub async fn update(
        &self,
        id: Uuid,
        owner_id: Uuid,
        plate: &str,
        model: &str,
        color: &str,
        kind: &VehicleKind,
        ignition: bool,
        speed: f64,
        image_url: Option<&str>,
    ) -> Result<Vehicle, AppError> {
        let columns = kind.columns();

        let record = sqlx::query_as::<_, VehicleRecord>(
            r#"
            UPDATE vehicles
            SET kind = $3, plate = $4, model = $5, color = $6, doors = $7,
                axles = $8, load_capacity = $9, turbo_on = $10,
                current_load = $11, ignition = $12, speed = $13,
                image_url = $14, updated_at = now()
            WHERE id = $1 AND owner_id = $2
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(owner_id)
        .bind(kind.discriminator())
        .bind(plate)
        .bind(model)
        .bind(color)
        .bind(columns.doors)
        .bind(columns.axles)
        .bind(columns.load_capacity)
        .bind(columns.turbo_on)
        .bind(columns.current_load)
        .bind(ignition)
        .bind(speed)
        .bind(image_url)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound("Veículo não encontrado".to_string()))?;

        let history = self.history_rows(record.id).await?;
        Vehicle::reconstruct(record, &history)
            .ok_or_else(|| AppError::Internal("veículo atualizado não pôde ser reconstruído".to_string()))
    }

    /// Remove o veículo; as manutenções caem junto pelo ON DELETE CASCADE
    pub async fn delete(&self, id: Uuid, owner_id: Uuid) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM vehicles WHERE id = $1 AND owner_id = $2")
            .bind(id)
            .bind(owner_id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Veículo não encontrado".to_string()));
        }

        Ok(())
    }

    pub async fn exists(&self, id: Uuid, owner_id: Uuid) -> Result<bool, AppError> {
        let result: (bool,) = sqlx::query_as(
            "SELECT EXISTS(SELECT 1 FROM vehicles WHERE id = $1 AND owner_id = $2)",
        )
        .bind(id)
        .bind(owner_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(result.0)
    }

    /// Pré-checagem de unicidade da placa; a corrida restante é resolvida
    /// pelo índice único, que o mapeamento de erros devolve como 409
    pub async fn plate_exists(&self, plate: &str) -> Result<bool, AppError> {
        let result: (bool,) =
            sqlx::query_as("SELECT EXISTS(SELECT 1 FROM vehicles WHERE plate = $1)")
                .bind(plate)
                .fetch_one(&self.pool)
                .await?;

        Ok(result.0)
    }

    async fn history_rows(&self, vehicle_id: Uuid) -> Result<Vec<MaintenanceRow>, AppError> {
        let rows = sqlx::query_as::<_, MaintenanceRow>(
            "SELECT * FROM maintenances WHERE vehicle_id = $1 ORDER BY date DESC NULLS LAST",
        )
        .bind(vehicle_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }
}
