//! Modelo de Veículo
//!
//! Este módulo contém o agregado Vehicle (identidade, atributos e histórico
//! de manutenções) e o tipo discriminado de veículo. A fábrica `reconstruct`
//! transforma linhas persistidas no agregado tipado, descartando (com log)
//! discriminadores desconhecidos e registros de histórico inválidos.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::FromRow;
use uuid::Uuid;

use crate::models::maintenance::{Maintenance, MaintenanceRow};

/// Tipo do veículo com os campos específicos de cada variante. Serializado
/// no banco pelo discriminador `Carro` | `CarroEsportivo` | `Caminhao`.
#[derive(Debug, Clone, PartialEq)]
pub enum VehicleKind {
    Carro {
        doors: i32,
    },
    CarroEsportivo {
        doors: i32,
        turbo_on: bool,
    },
    Caminhao {
        axles: i32,
        load_capacity: Decimal,
        current_load: Decimal,
    },
}

/// Colunas específicas de tipo, como vão para o banco
#[derive(Debug, Clone, Default)]
pub struct KindColumns {
    pub doors: Option<i32>,
    pub axles: Option<i32>,
    pub load_capacity: Option<Decimal>,
    pub turbo_on: Option<bool>,
    pub current_load: Option<Decimal>,
}

impl VehicleKind {
    /// Monta a variante certa a partir do discriminador persistido, copiando
    /// os campos opcionais (turbo, carga atual) apenas quando presentes.
    /// Discriminador desconhecido devolve `None` — quem chama decide logar.
    pub fn from_parts(
        kind: &str,
        doors: Option<i32>,
        axles: Option<i32>,
        load_capacity: Option<Decimal>,
        turbo_on: Option<bool>,
        current_load: Option<Decimal>,
    ) -> Option<Self> {
        match kind {
            "Carro" => Some(VehicleKind::Carro {
                doors: doors.unwrap_or(4),
            }),
            "CarroEsportivo" => Some(VehicleKind::CarroEsportivo {
                doors: doors.unwrap_or(2),
                turbo_on: turbo_on.unwrap_or(false),
            }),
            "Caminhao" => Some(VehicleKind::Caminhao {
                axles: axles.unwrap_or(2),
                load_capacity: load_capacity.unwrap_or(Decimal::ZERO),
                current_load: current_load.unwrap_or(Decimal::ZERO),
            }),
            _ => None,
        }
    }

    /// Discriminador persistido no banco e exposto na API
    pub fn discriminator(&self) -> &'static str {
        match self {
            VehicleKind::Carro { .. } => "Carro",
            VehicleKind::CarroEsportivo { .. } => "CarroEsportivo",
            VehicleKind::Caminhao { .. } => "Caminhao",
        }
    }

    /// Decompõe nas colunas anuláveis do banco
    pub fn columns(&self) -> KindColumns {
        match self {
            VehicleKind::Carro { doors } => KindColumns {
                doors: Some(*doors),
                ..KindColumns::default()
            },
            VehicleKind::CarroEsportivo { doors, turbo_on } => KindColumns {
                doors: Some(*doors),
                turbo_on: Some(*turbo_on),
                ..KindColumns::default()
            },
            VehicleKind::Caminhao {
                axles,
                load_capacity,
                current_load,
            } => KindColumns {
                axles: Some(*axles),
                load_capacity: Some(*load_capacity),
                current_load: Some(*current_load),
                ..KindColumns::default()
            },
        }
    }

    /// Aplica uma atualização parcial mantendo a variante atual
    pub fn with_updates(
        &self,
        doors: Option<i32>,
        axles: Option<i32>,
        load_capacity: Option<Decimal>,
        turbo_on: Option<bool>,
        current_load: Option<Decimal>,
    ) -> Self {
        match self.clone() {
            VehicleKind::Carro { doors: current } => VehicleKind::Carro {
                doors: doors.unwrap_or(current),
            },
            VehicleKind::CarroEsportivo {
                doors: current_doors,
                turbo_on: current_turbo,
            } => VehicleKind::CarroEsportivo {
                doors: doors.unwrap_or(current_doors),
                turbo_on: turbo_on.unwrap_or(current_turbo),
            },
            VehicleKind::Caminhao {
                axles: current_axles,
                load_capacity: current_capacity,
                current_load: current_cargo,
            } => VehicleKind::Caminhao {
                axles: axles.unwrap_or(current_axles),
                load_capacity: load_capacity.unwrap_or(current_capacity),
                current_load: current_load.unwrap_or(current_cargo),
            },
        }
    }

    /// Falso apenas para caminhão com carga atual acima da capacidade
    pub fn load_within_capacity(&self) -> bool {
        match self {
            VehicleKind::Caminhao {
                load_capacity,
                current_load,
                ..
            } => current_load <= load_capacity,
            _ => true,
        }
    }
}

/// Veículo da garagem de um usuário
#[derive(Debug, Clone)]
pub struct Vehicle {
    pub id: Uuid,
    pub owner_id: Uuid,
    pub plate: String,
    pub model: String,
    pub color: String,
    pub kind: VehicleKind,
    pub ignition: bool,
    pub speed: f64,
    pub image_url: Option<String>,
    /// Sem ordem garantida; quem exibe ordena por data decrescente
    pub history: Vec<Maintenance>,
    pub created_at: DateTime<Utc>,
}

impl Vehicle {
    /// Reconstrói o agregado a partir da linha persistida e do histórico
    /// bruto. Tipo desconhecido devolve `None` (com log, nunca pânico);
    /// registros de histórico irrecuperáveis são descartados e o resto
    /// mantido.
    pub fn reconstruct(record: VehicleRecord, history: &[MaintenanceRow]) -> Option<Self> {
        let Some(kind) = VehicleKind::from_parts(
            &record.kind,
            record.doors,
            record.axles,
            record.load_capacity,
            record.turbo_on,
            record.current_load,
        ) else {
            tracing::warn!(id = %record.id, tipo = %record.kind, "tipo de veículo desconhecido, ignorando");
            return None;
        };

        let history = history.iter().filter_map(Maintenance::from_row).collect();

        Some(Self {
            id: record.id,
            owner_id: record.owner_id,
            plate: record.plate,
            model: record.model,
            color: record.color,
            kind,
            ignition: record.ignition,
            speed: record.speed,
            image_url: record.image_url,
            history,
            created_at: record.created_at,
        })
    }

    /// Acrescenta um registro ao histórico, sem impor ordem
    pub fn add_maintenance(&mut self, record: Maintenance) {
        self.history.push(record);
    }

    /// Estado de exibição derivado de {ignição, velocidade} e dos campos
    /// específicos do tipo (turbo, carga). Nada disso é persistido além dos
    /// próprios campos.
    pub fn status(&self) -> String {
        let mut status = if !self.ignition {
            "Desligado".to_string()
        } else if self.speed > 0.0 {
            format!("Em movimento a {} km/h", self.speed)
        } else {
            "Ligado, parado".to_string()
        };

        match &self.kind {
            VehicleKind::CarroEsportivo { turbo_on: true, .. } => {
                status.push_str(" com turbo ativado");
            }
            VehicleKind::Caminhao {
                load_capacity,
                current_load,
                ..
            } => {
                status.push_str(&format!(" | carga: {}/{} kg", current_load, load_capacity));
            }
            _ => {}
        }

        status
    }
}

/// Normaliza a placa para a forma canônica: maiúscula e sem espaços nas pontas
pub fn normalize_plate(plate: &str) -> String {
    plate.trim().to_uppercase()
}

/// Linha de veículo como está no banco, com o discriminador em texto e as
/// colunas específicas de tipo anuláveis
#[derive(Debug, Clone, FromRow)]
pub struct VehicleRecord {
    pub id: Uuid,
    pub owner_id: Uuid,
    pub kind: String,
    pub plate: String,
    pub model: String,
    pub color: String,
    pub doors: Option<i32>,
    pub axles: Option<i32>,
    pub load_capacity: Option<Decimal>,
    pub turbo_on: Option<bool>,
    pub current_load: Option<Decimal>,
    pub ignition: bool,
    pub speed: f64,
    pub image_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn record(kind: &str) -> VehicleRecord {
        VehicleRecord {
            id: Uuid::new_v4(),
            owner_id: Uuid::new_v4(),
            kind: kind.to_string(),
            plate: "ABC1D23".to_string(),
            model: "Fusca".to_string(),
            color: "Azul".to_string(),
            doors: None,
            axles: None,
            load_capacity: None,
            turbo_on: None,
            current_load: None,
            ignition: false,
            speed: 0.0,
            image_url: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn history_row(service_type: Option<&str>, cost: Option<Decimal>) -> MaintenanceRow {
        MaintenanceRow {
            id: Uuid::new_v4(),
            vehicle_id: Uuid::new_v4(),
            service_type: service_type.map(str::to_string),
            date: Some(NaiveDate::from_ymd_opt(2024, 5, 1).unwrap()),
            cost,
            mileage: None,
            description: None,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_reconstruct_tipo_desconhecido_devolve_none() {
        assert!(Vehicle::reconstruct(record("Moto"), &[]).is_none());
        assert!(Vehicle::reconstruct(record(""), &[]).is_none());
    }

    #[test]
    fn test_reconstruct_copia_campos_opcionais_quando_presentes() {
        let mut raw = record("CarroEsportivo");
        raw.doors = Some(2);
        raw.turbo_on = Some(true);

        let vehicle = Vehicle::reconstruct(raw, &[]).unwrap();
        assert_eq!(
            vehicle.kind,
            VehicleKind::CarroEsportivo { doors: 2, turbo_on: true }
        );

        // sem o campo opcional, o turbo fica desativado
        let vehicle = Vehicle::reconstruct(record("CarroEsportivo"), &[]).unwrap();
        assert_eq!(
            vehicle.kind,
            VehicleKind::CarroEsportivo { doors: 2, turbo_on: false }
        );
    }

    #[test]
    fn test_reconstruct_descarta_historico_invalido_e_mantem_o_resto() {
        let history = vec![
            history_row(Some("Troca de óleo"), Some(Decimal::new(100, 0))),
            history_row(None, Some(Decimal::new(50, 0))),
            history_row(Some("Revisão"), None),
        ];

        let vehicle = Vehicle::reconstruct(record("Carro"), &history).unwrap();
        assert_eq!(vehicle.history.len(), 1);
        assert_eq!(vehicle.history[0].service_type, "Troca de óleo");
    }

    #[test]
    fn test_status_derivado() {
        let mut vehicle = Vehicle::reconstruct(record("Carro"), &[]).unwrap();
        assert_eq!(vehicle.status(), "Desligado");

        vehicle.ignition = true;
        assert_eq!(vehicle.status(), "Ligado, parado");

        vehicle.speed = 80.0;
        assert_eq!(vehicle.status(), "Em movimento a 80 km/h");
    }

    #[test]
    fn test_status_com_turbo_e_carga() {
        let mut raw = record("CarroEsportivo");
        raw.turbo_on = Some(true);
        let mut esportivo = Vehicle::reconstruct(raw, &[]).unwrap();
        esportivo.ignition = true;
        esportivo.speed = 120.0;
        assert_eq!(esportivo.status(), "Em movimento a 120 km/h com turbo ativado");

        let mut raw = record("Caminhao");
        raw.axles = Some(3);
        raw.load_capacity = Some(Decimal::new(10000, 0));
        raw.current_load = Some(Decimal::new(2500, 0));
        let caminhao = Vehicle::reconstruct(raw, &[]).unwrap();
        assert_eq!(caminhao.status(), "Desligado | carga: 2500/10000 kg");
    }

    #[test]
    fn test_with_updates_mantem_variante() {
        let kind = VehicleKind::Caminhao {
            axles: 2,
            load_capacity: Decimal::new(5000, 0),
            current_load: Decimal::ZERO,
        };

        let updated = kind.with_updates(None, None, None, None, Some(Decimal::new(1000, 0)));
        assert_eq!(
            updated,
            VehicleKind::Caminhao {
                axles: 2,
                load_capacity: Decimal::new(5000, 0),
                current_load: Decimal::new(1000, 0),
            }
        );
        assert!(updated.load_within_capacity());

        let overloaded = updated.with_updates(None, None, None, None, Some(Decimal::new(9000, 0)));
        assert!(!overloaded.load_within_capacity());
    }

    #[test]
    fn test_normalize_plate() {
        assert_eq!(normalize_plate("  abc1d23 "), "ABC1D23");
    }

    #[test]
    fn test_add_maintenance_nao_ordena() {
        let mut vehicle = Vehicle::reconstruct(record("Carro"), &[]).unwrap();
        let newer = Maintenance::new(
            "b",
            NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(),
            Decimal::ZERO,
            None,
            None,
        )
        .unwrap();
        let older = Maintenance::new(
            "a",
            NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            Decimal::ZERO,
            None,
            None,
        )
        .unwrap();

        vehicle.add_maintenance(newer);
        vehicle.add_maintenance(older);

        assert_eq!(vehicle.history[0].service_type, "b");
        assert_eq!(vehicle.history[1].service_type, "a");
    }
}
