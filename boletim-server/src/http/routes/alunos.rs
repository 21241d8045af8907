//! Student endpoints

use std::sync::Arc;

use axum::{extract::State, routing::get, Json, Router};

use super::MessageResponse;
use crate::http::error::ApiError;
use crate::http::extractors::{ValidId, ValidJson};
use crate::http::server::AppState;
use crate::models::{Aluno, AlunoInput};

/// POST /alunos - create a student
async fn create_aluno(
    State(state): State<Arc<AppState>>,
    ValidJson(input): ValidJson<AlunoInput>,
) -> Result<Json<Aluno>, ApiError> {
    let aluno = state.store.create_aluno(input).await?;
    tracing::info!(id = aluno.id, "aluno created");
    Ok(Json(aluno))
}

/// GET /alunos - list every student
async fn list_alunos(State(state): State<Arc<AppState>>) -> Result<Json<Vec<Aluno>>, ApiError> {
    Ok(Json(state.store.list_alunos().await?))
}

/// GET /alunos/{id}
async fn get_aluno(
    State(state): State<Arc<AppState>>,
    ValidId(id): ValidId,
) -> Result<Json<Aluno>, ApiError> {
    Ok(Json(state.store.get_aluno(id).await?))
}

/// PUT /alunos/{id} - overwrite all fields
async fn update_aluno(
    State(state): State<Arc<AppState>>,
    ValidId(id): ValidId,
    ValidJson(input): ValidJson<AlunoInput>,
) -> Result<Json<MessageResponse>, ApiError> {
    state.store.update_aluno(id, input).await?;
    Ok(Json(MessageResponse::new("Aluno atualizado com sucesso")))
}

/// DELETE /alunos/{id}
async fn delete_aluno(
    State(state): State<Arc<AppState>>,
    ValidId(id): ValidId,
) -> Result<Json<MessageResponse>, ApiError> {
    state.store.delete_aluno(id).await?;
    tracing::info!(id, "aluno removed");
    Ok(Json(MessageResponse::new("Aluno removido com sucesso")))
}

/// Student routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/alunos", get(list_alunos).post(create_aluno))
        .route(
            "/alunos/{id}",
            get(get_aluno).put(update_aluno).delete(delete_aluno),
        )
}
