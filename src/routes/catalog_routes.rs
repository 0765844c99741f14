//! Rotas do catálogo da garagem (públicas)
//!
//! Montadas sob `/api/garagem`.

use axum::{
    extract::{Path, State},
    routing::get,
    Json, Router,
};

use crate::controllers::catalog_controller::CatalogController;
use crate::models::catalog::{GarageService, GarageTip, KindTip};
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_catalog_router() -> Router<AppState> {
    Router::new()
        .route("/dicas", get(list_tips))
        .route("/dicas/:tipo", get(list_tips_by_kind))
        .route("/servicos", get(list_services))
}

async fn list_tips(State(state): State<AppState>) -> Result<Json<Vec<GarageTip>>, AppError> {
    let controller = CatalogController::new(state.pool.clone());
    Ok(Json(controller.list_tips().await?))
}

async fn list_tips_by_kind(
    State(state): State<AppState>,
    Path(tipo): Path<String>,
) -> Result<Json<Vec<KindTip>>, AppError> {
    let controller = CatalogController::new(state.pool.clone());
    Ok(Json(controller.list_tips_by_kind(&tipo).await?))
}

async fn list_services(
    State(state): State<AppState>,
) -> Result<Json<Vec<GarageService>>, AppError> {
    let controller = CatalogController::new(state.pool.clone());
    Ok(Json(controller.list_services().await?))
}
