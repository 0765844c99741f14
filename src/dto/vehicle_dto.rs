//! DTOs de veículo
//!
//! Os nomes de campo seguem o que o frontend envia e espera (`tipo`,
//! `placa`, `modelo`, `cor`, `numPortas`, `numEixos`, `capacidadeCarga`,
//! `historicoManutencao`).

use chrono::Utc;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::dto::maintenance_dto::MaintenanceResponse;
use crate::models::maintenance::{partition_by_due, sort_date_descending};
use crate::models::vehicle::Vehicle;

/// Request de criação de veículo
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateVehicleRequest {
    /// `Carro` | `CarroEsportivo` | `Caminhao`
    pub tipo: String,

    pub placa: String,

    #[validate(length(min = 1, max = 100, message = "O modelo é obrigatório"))]
    pub modelo: String,

    #[validate(length(min = 1, max = 50, message = "A cor é obrigatória"))]
    pub cor: String,

    #[validate(range(min = 1, max = 8))]
    pub num_portas: Option<i32>,

    #[validate(range(min = 2, max = 10))]
    pub num_eixos: Option<i32>,

    pub capacidade_carga: Option<Decimal>,

    pub image_url: Option<String>,
}

/// Request de atualização parcial de veículo: campos de identidade, troca de
/// tipo e o estado de interação (ignição, velocidade, turbo, carga)
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateVehicleRequest {
    pub tipo: Option<String>,

    pub placa: Option<String>,

    #[validate(length(min = 1, max = 100))]
    pub modelo: Option<String>,

    #[validate(length(min = 1, max = 50))]
    pub cor: Option<String>,

    #[validate(range(min = 1, max = 8))]
    pub num_portas: Option<i32>,

    #[validate(range(min = 2, max = 10))]
    pub num_eixos: Option<i32>,

    pub capacidade_carga: Option<Decimal>,

    pub turbo_ativado: Option<bool>,

    pub carga_atual: Option<Decimal>,

    pub ligado: Option<bool>,

    #[validate(range(min = 0.0))]
    pub velocidade: Option<f64>,

    pub image_url: Option<String>,
}

/// Veículo exposto na API, com o estado derivado e o histórico particionado
/// em realizadas (decrescente) e agendadas (crescente)
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VehicleResponse {
    pub id: Uuid,
    pub tipo: String,
    pub placa: String,
    pub modelo: String,
    pub cor: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub num_portas: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub num_eixos: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub capacidade_carga: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub turbo_ativado: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub carga_atual: Option<Decimal>,
    pub ligado: bool,
    pub velocidade: f64,
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    pub historico_manutencao: Vec<MaintenanceResponse>,
    pub manutencoes_agendadas: Vec<MaintenanceResponse>,
}

impl VehicleResponse {
    pub fn from_vehicle(vehicle: &Vehicle) -> Self {
        let columns = vehicle.kind.columns();

        let (mut done, mut scheduled) =
            partition_by_due(vehicle.history.clone(), Utc::now().date_naive());
        sort_date_descending(&mut done);
        scheduled.sort_by(|a, b| a.date.cmp(&b.date));

        Self {
            id: vehicle.id,
            tipo: vehicle.kind.discriminator().to_string(),
            placa: vehicle.plate.clone(),
            modelo: vehicle.model.clone(),
            cor: vehicle.color.clone(),
            num_portas: columns.doors,
            num_eixos: columns.axles,
            capacidade_carga: columns.load_capacity,
            turbo_ativado: columns.turbo_on,
            carga_atual: columns.current_load,
            ligado: vehicle.ignition,
            velocidade: vehicle.speed,
            status: vehicle.status(),
            image_url: vehicle.image_url.clone(),
            historico_manutencao: done
                .iter()
                .filter_map(MaintenanceResponse::from_record)
                .collect(),
            manutencoes_agendadas: scheduled
                .iter()
                .filter_map(MaintenanceResponse::from_record)
                .collect(),
        }
    }
}

/// Resposta genérica com mensagem, usada em remoções
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: &str) -> Self {
        Self {
            message: message.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::maintenance::Maintenance;
    use crate::models::vehicle::VehicleRecord;
    use chrono::{Days, NaiveDate};

    #[test]
    fn test_from_vehicle_particiona_e_ordena_historico() {
        let record = VehicleRecord {
            id: Uuid::new_v4(),
            owner_id: Uuid::new_v4(),
            kind: "Carro".to_string(),
            plate: "ABC1234".to_string(),
            model: "Uno".to_string(),
            color: "Vermelho".to_string(),
            doors: Some(4),
            axles: None,
            load_capacity: None,
            turbo_on: None,
            current_load: None,
            ignition: false,
            speed: 0.0,
            image_url: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        let mut vehicle = Vehicle::reconstruct(record, &[]).unwrap();

        let today = Utc::now().date_naive();
        let mut push = |name: &str, date: NaiveDate| {
            let mut record =
                Maintenance::new(name, date, Decimal::ZERO, None, None).unwrap();
            record.id = Some(Uuid::new_v4());
            vehicle.add_maintenance(record);
        };
        push("antiga", today.checked_sub_days(Days::new(30)).unwrap());
        push("recente", today.checked_sub_days(Days::new(1)).unwrap());
        push("agendada", today.checked_add_days(Days::new(7)).unwrap());

        let response = VehicleResponse::from_vehicle(&vehicle);

        assert_eq!(response.tipo, "Carro");
        assert_eq!(response.num_portas, Some(4));
        assert_eq!(response.historico_manutencao.len(), 2);
        assert_eq!(response.historico_manutencao[0].descricao_servico, "recente");
        assert_eq!(response.historico_manutencao[1].descricao_servico, "antiga");
        assert_eq!(response.manutencoes_agendadas.len(), 1);
        assert_eq!(response.manutencoes_agendadas[0].descricao_servico, "agendada");
    }
}
