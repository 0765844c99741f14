//! Controller de manutenções
//!
//! Sub-recurso de veículo: toda operação verifica primeiro que o veículo
//! existe e pertence ao usuário autenticado (senão 404). A criação usa o
//! caminho estrito de construção — dados incompletos ou inválidos viram 400,
//! nunca um registro defeituoso.

use sqlx::PgPool;
use uuid::Uuid;

use crate::dto::maintenance_dto::{
    CreateMaintenanceRequest, MaintenanceResponse, UpdateMaintenanceRequest,
};
use crate::models::maintenance::{CostInput, DateInput, Maintenance};
use crate::repositories::maintenance_repository::MaintenanceRepository;
use crate::repositories::vehicle_repository::VehicleRepository;
use crate::utils::errors::AppError;

const INCOMPLETE_DATA: &str = "Dados incompletos: descricaoServico, data e custo são obrigatórios";

pub struct MaintenanceController {
    vehicles: VehicleRepository,
    repository: MaintenanceRepository,
}

impl MaintenanceController {
    pub fn new(pool: PgPool) -> Self {
        Self {
            vehicles: VehicleRepository::new(pool.clone()),
            repository: MaintenanceRepository::new(pool),
        }
    }

    async fn ensure_vehicle(&self, vehicle_id: Uuid, owner_id: Uuid) -> Result<(), AppError> {
        if !self.vehicles.exists(vehicle_id, owner_id).await? {
            return Err(AppError::NotFound("Veículo não encontrado".to_string()));
        }
        Ok(())
    }

    pub async fn create(
        &self,
        vehicle_id: Uuid,
        owner_id: Uuid,
        request: CreateMaintenanceRequest,
    ) -> Result<MaintenanceResponse, AppError> {
        self.ensure_vehicle(vehicle_id, owner_id).await?;

        let (Some(service_type), Some(date), Some(cost)) =
            (request.descricao_servico, request.data, request.custo)
        else {
            return Err(AppError::BadRequest(INCOMPLETE_DATA.to_string()));
        };

        let record = Maintenance::parse(
            date,
            &service_type,
            cost,
            request.quilometragem,
            request.descricao,
        )
        .map_err(|e| AppError::BadRequest(e.to_string()))?;

        let row = self.repository.create(vehicle_id, &record).await?;

        MaintenanceResponse::from_row(&row)
            .ok_or_else(|| AppError::Internal("manutenção recém-criada não pôde ser lida".to_string()))
    }

    pub async fn list(
        &self,
        vehicle_id: Uuid,
        owner_id: Uuid,
    ) -> Result<Vec<MaintenanceResponse>, AppError> {
        self.ensure_vehicle(vehicle_id, owner_id).await?;

        let rows = self.repository.list_by_vehicle(vehicle_id).await?;

        Ok(rows.iter().filter_map(MaintenanceResponse::from_row).collect())
    }

    pub async fn update(
        &self,
        vehicle_id: Uuid,
        owner_id: Uuid,
        id: Uuid,
        request: UpdateMaintenanceRequest,
    ) -> Result<MaintenanceResponse, AppError> {
        self.ensure_vehicle(vehicle_id, owner_id).await?;

        let row = self
            .repository
            .find_by_id(vehicle_id, id)
            .await?
            .ok_or_else(|| AppError::NotFound("Manutenção não encontrada".to_string()))?;

        // Mescla campo a campo com a linha atual; o resultado passa pelos
        // mesmos invariantes da criação
        let service_type = match request.descricao_servico {
            Some(value) => value,
            None => row
                .service_type
                .clone()
                .ok_or_else(|| AppError::BadRequest(INCOMPLETE_DATA.to_string()))?,
        };

        let date = match request.data {
            Some(input) => Some(input),
            None => row.date.map(DateInput::Date),
        }
        .ok_or_else(|| AppError::BadRequest(INCOMPLETE_DATA.to_string()))?;

        let cost = match request.custo {
            Some(input) => Some(input),
            None => row.cost.map(|c| CostInput::Text(c.to_string())),
        }
        .ok_or_else(|| AppError::BadRequest(INCOMPLETE_DATA.to_string()))?;

        let record = Maintenance::parse(
            date,
            &service_type,
            cost,
            request.quilometragem.or(row.mileage),
            request.descricao.or_else(|| row.description.clone()),
        )
        .map_err(|e| AppError::BadRequest(e.to_string()))?;

        let updated = self.repository.update(vehicle_id, id, &record).await?;

        MaintenanceResponse::from_row(&updated)
            .ok_or_else(|| AppError::Internal("manutenção atualizada não pôde ser lida".to_string()))
    }

    pub async fn delete(&self, vehicle_id: Uuid, owner_id: Uuid, id: Uuid) -> Result<(), AppError> {
        self.ensure_vehicle(vehicle_id, owner_id).await?;
        self.repository.delete(vehicle_id, id).await
    }
}
