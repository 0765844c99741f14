//! Módulo de banco de dados
//!
//! Pool de conexões e migrações do PostgreSQL.

pub mod connection;

pub use connection::{create_pool, mask_database_url, run_migrations};
