//! Tratamento de erros da aplicação
//!
//! Este módulo define os tipos de erro do sistema
//! e a sua conversão em respostas HTTP apropriadas.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Erros principais da aplicação
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Validation error: {0}")]
    Validation(#[from] validator::ValidationErrors),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("JWT error: {0}")]
    Jwt(String),

    #[error("Internal server error: {0}")]
    Internal(String),
}

/// Resposta de erro da API
#[derive(Debug, serde::Serialize)]
struct ErrorResponse {
    error: String,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    code: Option<String>,
}

impl ErrorResponse {
    fn new(error: &str, message: String, code: &str) -> Self {
        Self {
            error: error.to_string(),
            message,
            details: None,
            code: Some(code.to_string()),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_response) = match self {
            AppError::Database(e) => database_error_response(e),

            AppError::Validation(e) => {
                tracing::warn!("erro de validação: {}", e);
                (
                    StatusCode::BAD_REQUEST,
                    ErrorResponse {
                        error: "Erro de validação".to_string(),
                        message: "Os dados fornecidos são inválidos".to_string(),
                        details: Some(json!(e)),
                        code: Some("VALIDATION_ERROR".to_string()),
                    },
                )
            }

            AppError::BadRequest(msg) => (
                StatusCode::BAD_REQUEST,
                ErrorResponse::new("Requisição inválida", msg, "BAD_REQUEST"),
            ),

            AppError::Unauthorized(msg) => (
                StatusCode::UNAUTHORIZED,
                ErrorResponse::new("Não autorizado", msg, "UNAUTHORIZED"),
            ),

            AppError::NotFound(msg) => (
                StatusCode::NOT_FOUND,
                ErrorResponse::new("Não encontrado", msg, "NOT_FOUND"),
            ),

            AppError::Conflict(msg) => (
                StatusCode::CONFLICT,
                ErrorResponse::new("Conflito de dados", msg, "CONFLICT"),
            ),

            AppError::Jwt(msg) => (
                StatusCode::UNAUTHORIZED,
                ErrorResponse::new("Não autorizado", msg, "JWT_ERROR"),
            ),

            AppError::Internal(msg) => {
                tracing::error!("erro interno: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorResponse::new(
                        "Erro interno do servidor",
                        "Ocorreu um erro inesperado".to_string(),
                        "INTERNAL_ERROR",
                    ),
                )
            }
        };

        (status, Json(error_response)).into_response()
    }
}

/// Mapeia erros do sqlx para a taxonomia HTTP: violação de índice único vira
/// conflito (409), linha inexistente vira 404 e o resto é erro interno. O
/// detalhe do erro fica no log, nunca na resposta.
fn database_error_response(e: sqlx::Error) -> (StatusCode, ErrorResponse) {
    if matches!(e, sqlx::Error::RowNotFound) {
        return (
            StatusCode::NOT_FOUND,
            ErrorResponse::new(
                "Não encontrado",
                "Registro não encontrado".to_string(),
                "NOT_FOUND",
            ),
        );
    }

    if let Some(db_err) = e.as_database_error() {
        // 23505 = unique_violation no PostgreSQL
        if db_err.code().as_deref() == Some("23505") {
            let message = match db_err.constraint() {
                Some(c) if c.contains("email") => "Este email já está em uso",
                Some(c) if c.contains("plate") => "Esta placa já está cadastrada",
                _ => "Este registro já existe",
            };

            return (
                StatusCode::CONFLICT,
                ErrorResponse::new("Conflito de dados", message.to_string(), "CONFLICT"),
            );
        }
    }

    tracing::error!("erro de banco de dados: {}", e);
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        ErrorResponse::new(
            "Erro interno do servidor",
            "Ocorreu um erro ao acessar o banco de dados".to_string(),
            "DB_ERROR",
        ),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_por_variante() {
        let cases = [
            (AppError::BadRequest("x".to_string()), StatusCode::BAD_REQUEST),
            (AppError::Unauthorized("x".to_string()), StatusCode::UNAUTHORIZED),
            (AppError::NotFound("x".to_string()), StatusCode::NOT_FOUND),
            (AppError::Conflict("x".to_string()), StatusCode::CONFLICT),
            (AppError::Jwt("x".to_string()), StatusCode::UNAUTHORIZED),
            (AppError::Internal("x".to_string()), StatusCode::INTERNAL_SERVER_ERROR),
        ];

        for (error, expected) in cases {
            assert_eq!(error.into_response().status(), expected);
        }
    }

    #[test]
    fn test_row_not_found_vira_404() {
        let error = AppError::Database(sqlx::Error::RowNotFound);
        assert_eq!(error.into_response().status(), StatusCode::NOT_FOUND);
    }
}
