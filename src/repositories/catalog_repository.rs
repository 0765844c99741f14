//! Repositório do catálogo da garagem

use sqlx::PgPool;

use crate::models::catalog::{GarageService, GarageTip, KindTip};
use crate::utils::errors::AppError;

pub struct CatalogRepository {
    pool: PgPool,
}

impl CatalogRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn list_tips(&self) -> Result<Vec<GarageTip>, AppError> {
        let tips = sqlx::query_as::<_, GarageTip>("SELECT * FROM garage_tips ORDER BY id")
            .fetch_all(&self.pool)
            .await?;

        Ok(tips)
    }

    pub async fn list_tips_by_kind(&self, kind: &str) -> Result<Vec<KindTip>, AppError> {
        let tips =
            sqlx::query_as::<_, KindTip>("SELECT * FROM kind_tips WHERE kind = $1 ORDER BY id")
                .bind(kind)
                .fetch_all(&self.pool)
                .await?;

        Ok(tips)
    }

    pub async fn list_services(&self) -> Result<Vec<GarageService>, AppError> {
        let services =
            sqlx::query_as::<_, GarageService>("SELECT * FROM garage_services ORDER BY id")
                .fetch_all(&self.pool)
                .await?;

        Ok(services)
    }
}
