//! Catálogo da garagem
//!
//! Conteúdo somente leitura exibido na página inicial: dicas gerais de
//! manutenção, dicas por tipo de veículo e serviços oferecidos. Os structs
//! são serializados direto na API com os nomes de campo do frontend.

use serde::Serialize;
use sqlx::FromRow;

/// Dica geral de manutenção
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct GarageTip {
    pub id: i32,
    #[serde(rename = "dica")]
    pub tip: String,
}

/// Dica específica por tipo de veículo (`carro`, `carroesportivo`, `caminhao`)
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct KindTip {
    pub id: i32,
    #[serde(rename = "tipo")]
    pub kind: String,
    #[serde(rename = "dica")]
    pub tip: String,
}

/// Serviço oferecido pela garagem
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct GarageService {
    pub id: i32,
    #[serde(rename = "nome")]
    pub name: String,
    #[serde(rename = "descricao")]
    pub description: String,
    #[serde(rename = "precoEstimado")]
    pub estimated_price: String,
}
