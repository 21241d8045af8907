//! API error types with IntoResponse
//!
//! Every handler returns `Result<_, ApiError>`; this is the single place
//! where outcomes become status codes. Storage details are logged, never
//! sent to the client.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

use crate::db::repos::{ConflictKind, DbError};
use crate::models::ValidationError;

/// API error type with automatic HTTP status mapping
#[derive(Debug)]
pub enum ApiError {
    /// Validation failed (400)
    Validation(ValidationError),

    /// Resource not found (404)
    NotFound { resource: &'static str, id: i64 },

    /// Storage constraint rejected the write (409)
    Conflict(ConflictKind),

    /// No connection became available in time (503)
    Unavailable,

    /// Database error (500, logged)
    Database(DbError),
}

/// Client-facing message for a missing resource
fn not_found_message(resource: &'static str) -> String {
    match resource {
        "aluno" => "Aluno não encontrado".to_owned(),
        "nota" => "Nota não encontrada".to_owned(),
        "notas" => "Notas não encontradas".to_owned(),
        other => format!("{} não encontrado", other),
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match &self {
            Self::Validation(e) => (
                StatusCode::BAD_REQUEST,
                json!({
                    "error": "validation_error",
                    "message": e.to_string()
                }),
            ),
            Self::NotFound { resource, id } => {
                tracing::debug!(resource, id, "not found");
                (
                    StatusCode::NOT_FOUND,
                    json!({
                        "error": "not_found",
                        "message": not_found_message(*resource)
                    }),
                )
            }
            Self::Conflict(kind) => {
                let message = match kind {
                    ConflictKind::Duplicate => "registro duplicado",
                    ConflictKind::Reference => "referência inexistente ou registro em uso",
                };
                (
                    StatusCode::CONFLICT,
                    json!({
                        "error": "conflict",
                        "message": message
                    }),
                )
            }
            Self::Unavailable => (
                StatusCode::SERVICE_UNAVAILABLE,
                json!({
                    "error": "unavailable",
                    "message": "banco de dados indisponível, tente novamente"
                }),
            ),
            Self::Database(e) => {
                // Log the actual error, return generic message
                tracing::error!("Database error: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({
                        "error": "internal_error",
                        "message": "erro interno"
                    }),
                )
            }
        };

        (status, Json(body)).into_response()
    }
}

impl From<ValidationError> for ApiError {
    fn from(e: ValidationError) -> Self {
        Self::Validation(e)
    }
}

impl From<DbError> for ApiError {
    fn from(e: DbError) -> Self {
        match e {
            DbError::NotFound { resource, id } => Self::NotFound { resource, id },
            DbError::Conflict { kind, detail } => {
                tracing::warn!(?kind, %detail, "constraint violation");
                Self::Conflict(kind)
            }
            DbError::Unavailable => {
                tracing::warn!("connection pool exhausted");
                Self::Unavailable
            }
            DbError::Sqlx(_) => Self::Database(e),
        }
    }
}
