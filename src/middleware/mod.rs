//! Middleware do sistema
//!
//! Autenticação JWT e CORS.

pub mod auth;
pub mod cors;
