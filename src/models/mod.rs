//! Modelos do domínio
//!
//! Este módulo contém o núcleo da aplicação: veículos, manutenções, usuários
//! e o catálogo da garagem, com as regras de validação e reconstrução.

pub mod catalog;
pub mod maintenance;
pub mod user;
pub mod vehicle;
