//! Controller do catálogo da garagem

use sqlx::PgPool;

use crate::models::catalog::{GarageService, GarageTip, KindTip};
use crate::repositories::catalog_repository::CatalogRepository;
use crate::utils::errors::AppError;

pub struct CatalogController {
    repository: CatalogRepository,
}

impl CatalogController {
    pub fn new(pool: PgPool) -> Self {
        Self {
            repository: CatalogRepository::new(pool),
        }
    }

    pub async fn list_tips(&self) -> Result<Vec<GarageTip>, AppError> {
        self.repository.list_tips().await
    }

    /// Dicas por tipo de veículo; tipo sem dicas cadastradas vira 404
    pub async fn list_tips_by_kind(&self, kind: &str) -> Result<Vec<KindTip>, AppError> {
        let normalized = kind.trim().to_lowercase();
        let tips = self.repository.list_tips_by_kind(&normalized).await?;

        if tips.is_empty() {
            return Err(AppError::NotFound(format!(
                "Nenhuma dica específica encontrada para o tipo: {}",
                kind
            )));
        }

        Ok(tips)
    }

    pub async fn list_services(&self) -> Result<Vec<GarageService>, AppError> {
        self.repository.list_services().await
    }
}
