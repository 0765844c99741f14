//! DTOs de manutenção
//!
//! Os nomes de campo seguem o que o frontend envia e espera
//! (`descricaoServico`, `data`, `custo`, `quilometragem`).

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::maintenance::{CostInput, DateInput, Maintenance, MaintenanceRow};

/// Request de criação de manutenção. Os campos obrigatórios são opcionais
/// aqui para que a ausência vire um 400 de "dados incompletos" no
/// controller, e não um erro de desserialização.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateMaintenanceRequest {
    pub descricao_servico: Option<String>,
    pub data: Option<DateInput>,
    pub custo: Option<CostInput>,
    pub quilometragem: Option<i32>,
    pub descricao: Option<String>,
}

/// Request de atualização parcial de manutenção
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateMaintenanceRequest {
    pub descricao_servico: Option<String>,
    pub data: Option<DateInput>,
    pub custo: Option<CostInput>,
    pub quilometragem: Option<i32>,
    pub descricao: Option<String>,
}

/// Manutenção exposta na API, com o resumo formatado em pt-BR
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MaintenanceResponse {
    pub id: Uuid,
    pub descricao_servico: String,
    pub data: NaiveDate,
    pub custo: Decimal,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quilometragem: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub descricao: Option<String>,
    pub resumo: String,
}

impl MaintenanceResponse {
    /// Monta a resposta a partir de um registro reconstruído; devolve `None`
    /// quando o registro ainda não foi persistido (sem id).
    pub fn from_record(record: &Maintenance) -> Option<Self> {
        Some(Self {
            id: record.id?,
            descricao_servico: record.service_type.clone(),
            data: record.date,
            custo: record.cost,
            quilometragem: record.mileage,
            descricao: record.description.clone(),
            resumo: record.format(),
        })
    }

    /// Monta a resposta direto de uma linha do banco, descartando linhas
    /// irrecuperáveis como na reconstrução do agregado
    pub fn from_row(row: &MaintenanceRow) -> Option<Self> {
        let record = Maintenance::from_row(row)?;
        Self::from_record(&record)
    }
}
