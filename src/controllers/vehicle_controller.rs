//! Controller de veículos
//!
//! CRUD da garagem do usuário autenticado. A placa é normalizada e validada
//! aqui; a unicidade final é garantida pelo índice único do banco.

use sqlx::PgPool;
use uuid::Uuid;
use validator::Validate;

use crate::dto::vehicle_dto::{CreateVehicleRequest, UpdateVehicleRequest, VehicleResponse};
use crate::models::vehicle::{normalize_plate, VehicleKind};
use crate::repositories::vehicle_repository::VehicleRepository;
use crate::utils::errors::AppError;
use crate::utils::validation::validate_plate;

pub struct VehicleController {
    repository: VehicleRepository,
}

impl VehicleController {
    pub fn new(pool: PgPool) -> Self {
        Self {
            repository: VehicleRepository::new(pool),
        }
    }

    pub async fn create(
        &self,
        owner_id: Uuid,
        request: CreateVehicleRequest,
    ) -> Result<VehicleResponse, AppError> {
        request.validate()?;

        let plate = normalize_plate(&request.placa);
        if plate.is_empty() {
            return Err(AppError::BadRequest("A placa é obrigatória".to_string()));
        }
        validate_plate(&plate).map_err(|_| {
            AppError::BadRequest("Placa inválida: use o formato AAA9999 ou AAA9A99".to_string())
        })?;

        let kind = VehicleKind::from_parts(
            &request.tipo,
            request.num_portas,
            request.num_eixos,
            request.capacidade_carga,
            None,
            None,
        )
        .ok_or_else(|| {
            AppError::BadRequest(format!("Tipo de veículo desconhecido: {}", request.tipo))
        })?;

        if request.capacidade_carga.is_some_and(|c| c.is_sign_negative()) {
            return Err(AppError::BadRequest(
                "A capacidade de carga não pode ser negativa".to_string(),
            ));
        }

        if self.repository.plate_exists(&plate).await? {
            return Err(AppError::Conflict("Esta placa já está cadastrada".to_string()));
        }

        let vehicle = self
            .repository
            .create(
                owner_id,
                &plate,
                request.modelo.trim(),
                request.cor.trim(),
                &kind,
                request.image_url.as_deref(),
            )
            .await?;

        Ok(VehicleResponse::from_vehicle(&vehicle))
    }

    pub async fn get_by_id(&self, id: Uuid, owner_id: Uuid) -> Result<VehicleResponse, AppError> {
        let vehicle = self
            .repository
            .find_by_id(id, owner_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Veículo não encontrado".to_string()))?;

        Ok(VehicleResponse::from_vehicle(&vehicle))
    }

    pub async fn list_by_owner(&self, owner_id: Uuid) -> Result<Vec<VehicleResponse>, AppError> {
        let vehicles = self.repository.list_by_owner(owner_id).await?;

        Ok(vehicles.iter().map(VehicleResponse::from_vehicle).collect())
    }

    pub async fn update(
        &self,
        id: Uuid,
        owner_id: Uuid,
        request: UpdateVehicleRequest,
    ) -> Result<VehicleResponse, AppError> {
        request.validate()?;

        let current = self
            .repository
            .find_by_id(id, owner_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Veículo não encontrado".to_string()))?;

        let plate = match &request.placa {
            Some(placa) => {
                let plate = normalize_plate(placa);
                validate_plate(&plate).map_err(|_| {
                    AppError::BadRequest(
                        "Placa inválida: use o formato AAA9999 ou AAA9A99".to_string(),
                    )
                })?;
                if plate != current.plate && self.repository.plate_exists(&plate).await? {
                    return Err(AppError::Conflict("Esta placa já está cadastrada".to_string()));
                }
                plate
            }
            None => current.plate.clone(),
        };

        // Trocar o tipo substitui os campos específicos; sem troca, a
        // atualização parcial mantém a variante atual
        let kind = match &request.tipo {
            Some(tipo) => VehicleKind::from_parts(
                tipo,
                request.num_portas,
                request.num_eixos,
                request.capacidade_carga,
                request.turbo_ativado,
                request.carga_atual,
            )
            .ok_or_else(|| {
                AppError::BadRequest(format!("Tipo de veículo desconhecido: {}", tipo))
            })?,
            None => current.kind.with_updates(
                request.num_portas,
                request.num_eixos,
                request.capacidade_carga,
                request.turbo_ativado,
                request.carga_atual,
            ),
        };

        if !kind.load_within_capacity() {
            return Err(AppError::BadRequest(
                "A carga atual excede a capacidade do caminhão".to_string(),
            ));
        }

        let model = match &request.modelo {
            Some(modelo) => modelo.trim().to_string(),
            None => current.model.clone(),
        };
        let color = match &request.cor {
            Some(cor) => cor.trim().to_string(),
            None => current.color.clone(),
        };
        let ignition = request.ligado.unwrap_or(current.ignition);
        let speed = request.velocidade.unwrap_or(current.speed);
        let image_url = request.image_url.clone().or_else(|| current.image_url.clone());

        let vehicle = self
            .repository
            .update(
                id,
                owner_id,
                &plate,
                &model,
                &color,
                &kind,
                ignition,
                speed,
                image_url.as_deref(),
            )
            .await?;

        Ok(VehicleResponse::from_vehicle(&vehicle))
    }

    pub async fn delete(&self, id: Uuid, owner_id: Uuid) -> Result<(), AppError> {
        self.repository.delete(id, owner_id).await
    }
}
