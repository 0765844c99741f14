//! Rotas de manutenções (autenticadas)
//!
//! Sub-recurso de veículo: `/api/veiculos/:id/manutencoes`.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{delete, get, post, put},
    Extension, Json, Router,
};
use uuid::Uuid;

use crate::controllers::maintenance_controller::MaintenanceController;
use crate::dto::maintenance_dto::{
    CreateMaintenanceRequest, MaintenanceResponse, UpdateMaintenanceRequest,
};
use crate::dto::vehicle_dto::MessageResponse;
use crate::middleware::auth::AuthenticatedUser;
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_maintenance_router() -> Router<AppState> {
    Router::new()
        .route("/:id/manutencoes", post(create_maintenance))
        .route("/:id/manutencoes", get(list_maintenances))
        .route("/:id/manutencoes/:mid", put(update_maintenance))
        .route("/:id/manutencoes/:mid", delete(delete_maintenance))
}

async fn create_maintenance(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(vehicle_id): Path<Uuid>,
    Json(request): Json<CreateMaintenanceRequest>,
) -> Result<(StatusCode, Json<MaintenanceResponse>), AppError> {
    let controller = MaintenanceController::new(state.pool.clone());
    let response = controller.create(vehicle_id, user.user_id, request).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

async fn list_maintenances(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(vehicle_id): Path<Uuid>,
) -> Result<Json<Vec<MaintenanceResponse>>, AppError> {
    let controller = MaintenanceController::new(state.pool.clone());
    let response = controller.list(vehicle_id, user.user_id).await?;
    Ok(Json(response))
}

async fn update_maintenance(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path((vehicle_id, id)): Path<(Uuid, Uuid)>,
    Json(request): Json<UpdateMaintenanceRequest>,
) -> Result<Json<MaintenanceResponse>, AppError> {
    let controller = MaintenanceController::new(state.pool.clone());
    let response = controller.update(vehicle_id, user.user_id, id, request).await?;
    Ok(Json(response))
}

async fn delete_maintenance(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path((vehicle_id, id)): Path<(Uuid, Uuid)>,
) -> Result<Json<MessageResponse>, AppError> {
    let controller = MaintenanceController::new(state.pool.clone());
    controller.delete(vehicle_id, user.user_id, id).await?;
    Ok(Json(MessageResponse::new("Manutenção excluída com sucesso")))
}
