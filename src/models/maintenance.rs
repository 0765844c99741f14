//! Modelo de Manutenção
//!
//! Este módulo contém o objeto de valor Manutencao (registro de um serviço
//! realizado ou agendado em um veículo), com os dois caminhos de construção:
//! `parse` (estrito, retorna erro tipado) e `lenient` (melhor esforço, para
//! conveniência da interface — nunca falha).

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::Deserialize;
use sqlx::FromRow;
use thiserror::Error;
use uuid::Uuid;

/// Tipo de serviço usado quando o campo vem em branco no caminho leniente
pub const DEFAULT_SERVICE_TYPE: &str = "Serviço não especificado";

/// Registro de manutenção de um veículo. Uma vez construído, satisfaz os
/// invariantes: data de calendário válida, tipo de serviço não vazio e custo
/// não negativo.
#[derive(Debug, Clone, PartialEq)]
pub struct Maintenance {
    /// Presente apenas quando o registro veio do banco
    pub id: Option<Uuid>,
    pub service_type: String,
    pub date: NaiveDate,
    pub cost: Decimal,
    pub mileage: Option<i32>,
    pub description: Option<String>,
}

/// Erros do caminho estrito de construção
#[derive(Error, Debug, PartialEq)]
pub enum MaintenanceParseError {
    #[error("Data inválida: {0}")]
    InvalidDate(String),

    #[error("O tipo de serviço é obrigatório")]
    MissingServiceType,

    #[error("Custo inválido: {0}")]
    InvalidCost(String),

    #[error("O custo não pode ser negativo")]
    NegativeCost,

    #[error("A quilometragem não pode ser negativa")]
    NegativeMileage,
}

/// Data de manutenção como chega na API: já estruturada ou como texto
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum DateInput {
    Date(NaiveDate),
    Text(String),
}

impl DateInput {
    fn raw(&self) -> String {
        match self {
            DateInput::Date(date) => date.to_string(),
            DateInput::Text(text) => text.clone(),
        }
    }
}

/// Custo como chega na API: número ou texto numérico
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum CostInput {
    Number(f64),
    Text(String),
}

impl CostInput {
    /// Converte para decimal; aceita vírgula como separador decimal
    pub fn to_decimal(&self) -> Option<Decimal> {
        match self {
            CostInput::Number(n) => Decimal::from_f64_retain(*n),
            CostInput::Text(text) => {
                let text = text.trim();
                text.parse::<Decimal>()
                    .ok()
                    .or_else(|| text.replace(',', ".").parse::<Decimal>().ok())
            }
        }
    }

    fn raw(&self) -> String {
        match self {
            CostInput::Number(n) => n.to_string(),
            CostInput::Text(text) => text.clone(),
        }
    }
}

/// Interpreta a data no dia UTC, sem deslocamento de fuso: texto `YYYY-MM-DD`
/// vira aquele dia exato; timestamps RFC 3339 são normalizados para UTC antes
/// de extrair o dia.
fn parse_date(input: &DateInput) -> Option<NaiveDate> {
    match input {
        DateInput::Date(date) => Some(*date),
        DateInput::Text(text) => {
            let text = text.trim();
            NaiveDate::parse_from_str(text, "%Y-%m-%d").ok().or_else(|| {
                DateTime::parse_from_rfc3339(text)
                    .ok()
                    .map(|dt| dt.with_timezone(&Utc).date_naive())
            })
        }
    }
}

impl Maintenance {
    /// Constrói a partir de valores já tipados, validando os invariantes
    pub fn new(
        service_type: &str,
        date: NaiveDate,
        cost: Decimal,
        mileage: Option<i32>,
        description: Option<String>,
    ) -> Result<Self, MaintenanceParseError> {
        let service_type = service_type.trim();
        if service_type.is_empty() {
            return Err(MaintenanceParseError::MissingServiceType);
        }
        if cost.is_sign_negative() && !cost.is_zero() {
            return Err(MaintenanceParseError::NegativeCost);
        }
        if mileage.is_some_and(|m| m < 0) {
            return Err(MaintenanceParseError::NegativeMileage);
        }

        Ok(Self {
            id: None,
            service_type: service_type.to_string(),
            date,
            cost,
            mileage,
            description: description
                .map(|d| d.trim().to_string())
                .filter(|d| !d.is_empty()),
        })
    }

    /// Caminho estrito: interpreta as entradas e rejeita com erro tipado
    /// qualquer data inválida, tipo em branco ou custo negativo/não numérico.
    pub fn parse(
        date: DateInput,
        service_type: &str,
        cost: CostInput,
        mileage: Option<i32>,
        description: Option<String>,
    ) -> Result<Self, MaintenanceParseError> {
        let parsed_date =
            parse_date(&date).ok_or_else(|| MaintenanceParseError::InvalidDate(date.raw()))?;
        let parsed_cost = cost
            .to_decimal()
            .ok_or_else(|| MaintenanceParseError::InvalidCost(cost.raw()))?;

        Self::new(service_type, parsed_date, parsed_cost, mileage, description)
    }

    /// Caminho leniente, para conveniência da interface: nunca falha. Data
    /// inválida cai para o dia atual (UTC), tipo em branco vira
    /// "Serviço não especificado" e custo inválido ou negativo vira zero.
    /// Cada anomalia é registrada no log.
    pub fn lenient(
        date: DateInput,
        service_type: &str,
        cost: CostInput,
        mileage: Option<i32>,
        description: Option<String>,
    ) -> Self {
        let parsed_date = parse_date(&date).unwrap_or_else(|| {
            tracing::warn!(entrada = %date.raw(), "data de manutenção inválida, usando a data atual");
            Utc::now().date_naive()
        });

        let service_type = {
            let trimmed = service_type.trim();
            if trimmed.is_empty() {
                DEFAULT_SERVICE_TYPE
            } else {
                trimmed
            }
        };

        let mut parsed_cost = cost.to_decimal().unwrap_or_else(|| {
            tracing::warn!(entrada = %cost.raw(), "custo de manutenção inválido, usando zero");
            Decimal::ZERO
        });
        if parsed_cost.is_sign_negative() {
            tracing::warn!(custo = %parsed_cost, "custo de manutenção negativo, usando zero");
            parsed_cost = Decimal::ZERO;
        }

        Self {
            id: None,
            service_type: service_type.to_string(),
            date: parsed_date,
            cost: parsed_cost,
            mileage: mileage.filter(|m| *m >= 0),
            description: description
                .map(|d| d.trim().to_string())
                .filter(|d| !d.is_empty()),
        }
    }

    /// Reconstrói a partir de uma linha persistida. Linhas sem `date`,
    /// `service_type` ou `cost`, ou que violam os invariantes, são
    /// descartadas (com log) e as demais mantidas.
    pub fn from_row(row: &MaintenanceRow) -> Option<Self> {
        let (Some(service_type), Some(date), Some(cost)) =
            (row.service_type.as_deref(), row.date, row.cost)
        else {
            tracing::warn!(id = %row.id, "registro de manutenção sem campos obrigatórios, descartando");
            return None;
        };

        match Self::new(service_type, date, cost, row.mileage, row.description.clone()) {
            Ok(record) => Some(Self {
                id: Some(row.id),
                ..record
            }),
            Err(e) => {
                tracing::warn!(id = %row.id, erro = %e, "registro de manutenção inválido, descartando");
                None
            }
        }
    }

    /// Verdadeiro sse a data é um dia de calendário válido, o tipo de serviço
    /// é texto não vazio e o custo é não negativo. Puro, sem efeitos.
    pub fn is_valid(&self) -> bool {
        !self.service_type.trim().is_empty()
            && (!self.cost.is_sign_negative() || self.cost.is_zero())
    }

    /// Resumo de uma linha no formato pt-BR:
    /// `"Troca de óleo em 10/03/2024 - R$ 150,50 (descrição)"`.
    pub fn format(&self) -> String {
        self.format_with(&DisplayLocale::default())
    }

    /// Resumo de uma linha com formatação de data e moeda configurável
    pub fn format_with(&self, locale: &DisplayLocale) -> String {
        let mut out = format!(
            "{} em {} - {}",
            self.service_type,
            locale.format_date(self.date),
            locale.format_currency(self.cost),
        );
        if let Some(description) = &self.description {
            out.push_str(&format!(" ({})", description));
        }
        out
    }

    /// Verdadeiro quando a manutenção já aconteceu (ou é hoje), pelo dia UTC
    pub fn is_due(&self, today: NaiveDate) -> bool {
        self.date <= today
    }
}

/// Particiona o histórico em (realizadas, agendadas): registros com
/// `date <= today` já aconteceram, os demais estão agendados. A comparação é
/// por dia UTC.
pub fn partition_by_due(
    records: Vec<Maintenance>,
    today: NaiveDate,
) -> (Vec<Maintenance>, Vec<Maintenance>) {
    records.into_iter().partition(|m| m.is_due(today))
}

/// Ordena para exibição: mais recente primeiro
pub fn sort_date_descending(records: &mut [Maintenance]) {
    records.sort_by(|a, b| b.date.cmp(&a.date));
}

/// Convenções de exibição de data e moeda. O padrão é pt-BR
/// (`DD/MM/YYYY`, `R$` com vírgula decimal e ponto de milhar).
#[derive(Debug, Clone)]
pub struct DisplayLocale {
    pub currency_symbol: &'static str,
    pub decimal_separator: char,
    pub thousands_separator: char,
    pub date_format: &'static str,
}

impl DisplayLocale {
    pub const PT_BR: DisplayLocale = DisplayLocale {
        currency_symbol: "R$",
        decimal_separator: ',',
        thousands_separator: '.',
        date_format: "%d/%m/%Y",
    };

    pub fn format_date(&self, date: NaiveDate) -> String {
        date.format(self.date_format).to_string()
    }

    pub fn format_currency(&self, value: Decimal) -> String {
        let rounded = value.round_dp(2);
        let raw = format!("{:.2}", rounded.abs());
        let (int_part, frac_part) = raw.split_once('.').unwrap_or((raw.as_str(), "00"));

        let mut grouped = String::new();
        for (i, c) in int_part.chars().enumerate() {
            if i > 0 && (int_part.len() - i) % 3 == 0 {
                grouped.push(self.thousands_separator);
            }
            grouped.push(c);
        }

        let sign = if rounded.is_sign_negative() && !rounded.is_zero() {
            "-"
        } else {
            ""
        };

        format!(
            "{}{} {}{}{}",
            sign, self.currency_symbol, grouped, self.decimal_separator, frac_part
        )
    }
}

impl Default for DisplayLocale {
    fn default() -> Self {
        Self::PT_BR
    }
}

/// Linha de manutenção como está no banco. Os campos obrigatórios do domínio
/// são anuláveis aqui: dados legados migrados do armazenamento de documentos
/// podem não tê-los, e `Maintenance::from_row` decide o que ainda é
/// reconstruível.
#[derive(Debug, Clone, FromRow)]
pub struct MaintenanceRow {
    pub id: Uuid,
    pub vehicle_id: Uuid,
    pub service_type: Option<String>,
    pub date: Option<NaiveDate>,
    pub cost: Option<Decimal>,
    pub mileage: Option<i32>,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Days;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn text(s: &str) -> DateInput {
        DateInput::Text(s.to_string())
    }

    #[test]
    fn test_parse_entrada_valida() {
        let record = Maintenance::parse(
            text("2024-03-10"),
            "Troca de óleo",
            CostInput::Text("150.5".to_string()),
            None,
            Some(String::new()),
        )
        .unwrap();

        assert!(record.is_valid());
        assert_eq!(record.date, date(2024, 3, 10));
        assert_eq!(record.cost, Decimal::new(1505, 1));
        assert_eq!(record.description, None);

        let resumo = record.format();
        assert!(resumo.contains("Troca de óleo"));
        assert!(resumo.contains("10/03/2024"));
        assert!(resumo.contains("R$ 150,50"));
    }

    #[test]
    fn test_parse_rejeita_data_invalida() {
        let result = Maintenance::parse(
            text("10/03/2024"),
            "Revisão",
            CostInput::Number(100.0),
            None,
            None,
        );
        assert!(matches!(result, Err(MaintenanceParseError::InvalidDate(_))));
    }

    #[test]
    fn test_parse_rejeita_custo_negativo_e_tipo_vazio() {
        assert_eq!(
            Maintenance::parse(text("2024-01-01"), "Freios", CostInput::Number(-1.0), None, None),
            Err(MaintenanceParseError::NegativeCost),
        );
        assert_eq!(
            Maintenance::parse(text("2024-01-01"), "   ", CostInput::Number(10.0), None, None),
            Err(MaintenanceParseError::MissingServiceType),
        );
        assert_eq!(
            Maintenance::parse(
                text("2024-01-01"),
                "Pneus",
                CostInput::Text("abc".to_string()),
                None,
                None,
            ),
            Err(MaintenanceParseError::InvalidCost("abc".to_string())),
        );
    }

    #[test]
    fn test_parse_aceita_timestamp_e_virgula_decimal() {
        let record = Maintenance::parse(
            text("2024-03-10T00:00:00Z"),
            "Revisão",
            CostInput::Text("1234,56".to_string()),
            None,
            None,
        )
        .unwrap();

        assert_eq!(record.date, date(2024, 3, 10));
        assert_eq!(record.cost, Decimal::new(123456, 2));
    }

    #[test]
    fn test_lenient_coage_custo_invalido_para_zero() {
        let negativo = Maintenance::lenient(
            text("2024-01-01"),
            "Freios",
            CostInput::Number(-50.0),
            None,
            None,
        );
        assert_eq!(negativo.cost, Decimal::ZERO);
        assert!(negativo.is_valid());

        let nao_numerico = Maintenance::lenient(
            text("2024-01-01"),
            "Freios",
            CostInput::Text("muito caro".to_string()),
            None,
            None,
        );
        assert_eq!(nao_numerico.cost, Decimal::ZERO);
    }

    #[test]
    fn test_lenient_data_invalida_cai_para_hoje() {
        let record = Maintenance::lenient(
            text("não é uma data"),
            "Revisão",
            CostInput::Number(10.0),
            None,
            None,
        );
        assert_eq!(record.date, Utc::now().date_naive());
        // format nunca entra em pânico sobre o resultado
        assert!(record.format().contains("Revisão"));
    }

    #[test]
    fn test_lenient_tipo_em_branco_usa_padrao() {
        let record = Maintenance::lenient(
            text("2024-01-01"),
            "   ",
            CostInput::Number(10.0),
            None,
            None,
        );
        assert_eq!(record.service_type, DEFAULT_SERVICE_TYPE);
        assert!(record.is_valid());
    }

    #[test]
    fn test_format_com_descricao() {
        let record = Maintenance::new(
            "Alinhamento",
            date(2025, 12, 1),
            Decimal::new(18000, 2),
            None,
            Some("dianteira".to_string()),
        )
        .unwrap();

        assert_eq!(record.format(), "Alinhamento em 01/12/2025 - R$ 180,00 (dianteira)");
    }

    #[test]
    fn test_format_currency_agrupa_milhares() {
        let locale = DisplayLocale::default();
        assert_eq!(locale.format_currency(Decimal::new(123456789, 2)), "R$ 1.234.567,89");
        assert_eq!(locale.format_currency(Decimal::ZERO), "R$ 0,00");
        assert_eq!(locale.format_currency(Decimal::new(9, 1)), "R$ 0,90");
    }

    #[test]
    fn test_partition_por_dia() {
        let today = date(2025, 6, 15);
        let yesterday = today.checked_sub_days(Days::new(1)).unwrap();
        let tomorrow = today.checked_add_days(Days::new(1)).unwrap();

        let records = vec![
            Maintenance::new("Ontem", yesterday, Decimal::ZERO, None, None).unwrap(),
            Maintenance::new("Hoje", today, Decimal::ZERO, None, None).unwrap(),
            Maintenance::new("Amanhã", tomorrow, Decimal::ZERO, None, None).unwrap(),
        ];

        let (done, scheduled) = partition_by_due(records, today);

        let done_types: Vec<&str> = done.iter().map(|m| m.service_type.as_str()).collect();
        let scheduled_types: Vec<&str> = scheduled.iter().map(|m| m.service_type.as_str()).collect();

        assert_eq!(done_types, vec!["Ontem", "Hoje"]);
        assert_eq!(scheduled_types, vec!["Amanhã"]);
    }

    #[test]
    fn test_sort_date_descending() {
        let mut records = vec![
            Maintenance::new("a", date(2024, 1, 1), Decimal::ZERO, None, None).unwrap(),
            Maintenance::new("b", date(2024, 6, 1), Decimal::ZERO, None, None).unwrap(),
            Maintenance::new("c", date(2024, 3, 1), Decimal::ZERO, None, None).unwrap(),
        ];

        sort_date_descending(&mut records);

        let types: Vec<&str> = records.iter().map(|m| m.service_type.as_str()).collect();
        assert_eq!(types, vec!["b", "c", "a"]);
    }

    fn row(
        service_type: Option<&str>,
        row_date: Option<NaiveDate>,
        cost: Option<Decimal>,
    ) -> MaintenanceRow {
        MaintenanceRow {
            id: Uuid::new_v4(),
            vehicle_id: Uuid::new_v4(),
            service_type: service_type.map(str::to_string),
            date: row_date,
            cost,
            mileage: None,
            description: None,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_from_row_descarta_campos_faltando() {
        assert!(Maintenance::from_row(&row(None, Some(date(2024, 1, 1)), Some(Decimal::ZERO))).is_none());
        assert!(Maintenance::from_row(&row(Some("Revisão"), None, Some(Decimal::ZERO))).is_none());
        assert!(Maintenance::from_row(&row(Some("Revisão"), Some(date(2024, 1, 1)), None)).is_none());
    }

    #[test]
    fn test_from_row_descarta_invalidos_e_mantem_o_resto() {
        let invalid = row(Some("Revisão"), Some(date(2024, 1, 1)), Some(Decimal::new(-100, 0)));
        assert!(Maintenance::from_row(&invalid).is_none());

        let valid = row(Some("Revisão"), Some(date(2024, 1, 1)), Some(Decimal::new(100, 0)));
        let record = Maintenance::from_row(&valid).unwrap();
        assert_eq!(record.id, Some(valid.id));
        assert!(record.is_valid());
    }
}
