//! Estado compartilhado da aplicação
//!
//! Este módulo define o estado que circula pelo router do Axum: o pool de
//! conexões e a configuração do ambiente. Não há outro estado mutável em
//! processo — unicidade é responsabilidade do banco.

use sqlx::PgPool;

use crate::config::environment::EnvironmentConfig;
use crate::utils::jwt::JwtConfig;

#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    pub config: EnvironmentConfig,
}

impl AppState {
    pub fn new(pool: PgPool, config: EnvironmentConfig) -> Self {
        Self { pool, config }
    }

    /// Configuração de JWT derivada do ambiente
    pub fn jwt_config(&self) -> JwtConfig {
        JwtConfig::from(&self.config)
    }
}
