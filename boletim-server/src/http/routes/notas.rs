//! Grade endpoints

use std::sync::Arc;

use axum::{
    extract::State,
    routing::{get, post, put},
    Json, Router,
};

use super::MessageResponse;
use crate::http::error::ApiError;
use crate::http::extractors::{ValidId, ValidJson};
use crate::http::server::AppState;
use crate::models::{CreateNotaRequest, Media, Nota, NotaComDisciplina, UpdateNotaRequest};

/// GET /notas/aluno/{aluno_id} - grades with subject names, by trimestre
async fn list_notas_for_aluno(
    State(state): State<Arc<AppState>>,
    ValidId(aluno_id): ValidId,
) -> Result<Json<Vec<NotaComDisciplina>>, ApiError> {
    Ok(Json(state.store.list_notas_for_aluno(aluno_id).await?))
}

/// POST /notas - record a grade
async fn create_nota(
    State(state): State<Arc<AppState>>,
    ValidJson(req): ValidJson<CreateNotaRequest>,
) -> Result<Json<Nota>, ApiError> {
    let nota = req.validate()?;
    let nota = state.store.create_nota(nota).await?;
    tracing::info!(id = nota.id, aluno_id = nota.aluno_id, "nota created");
    Ok(Json(nota))
}

/// PUT /notas/{id} - overwrite a grade
async fn update_nota(
    State(state): State<Arc<AppState>>,
    ValidId(id): ValidId,
    ValidJson(req): ValidJson<UpdateNotaRequest>,
) -> Result<Json<MessageResponse>, ApiError> {
    let update = req.validate()?;
    state.store.update_nota(id, update).await?;
    Ok(Json(MessageResponse::new("Nota atualizada com sucesso")))
}

/// DELETE /notas/{id}
async fn delete_nota(
    State(state): State<Arc<AppState>>,
    ValidId(id): ValidId,
) -> Result<Json<MessageResponse>, ApiError> {
    state.store.delete_nota(id).await?;
    Ok(Json(MessageResponse::new("Nota removida com sucesso")))
}

/// GET /notas/media/{aluno_id} - average and pass/fail verdict
async fn media_for_aluno(
    State(state): State<Arc<AppState>>,
    ValidId(aluno_id): ValidId,
) -> Result<Json<Media>, ApiError> {
    let values = state.store.nota_values_for_aluno(aluno_id).await?;
    let media = Media::from_notas(&values).ok_or(ApiError::NotFound {
        resource: "notas",
        id: aluno_id,
    })?;
    Ok(Json(media))
}

/// Grade routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/notas", post(create_nota))
        .route("/notas/{id}", put(update_nota).delete(delete_nota))
        .route("/notas/aluno/{aluno_id}", get(list_notas_for_aluno))
        .route("/notas/media/{aluno_id}", get(media_for_aluno))
}
