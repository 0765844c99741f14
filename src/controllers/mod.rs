//! Controllers
//!
//! Validação de entrada na fronteira e orquestração dos repositórios.

pub mod auth_controller;
pub mod catalog_controller;
pub mod maintenance_controller;
pub mod vehicle_controller;
