//! Subject endpoints

use std::sync::Arc;

use axum::{extract::State, routing::get, Json, Router};

use crate::http::error::ApiError;
use crate::http::server::AppState;
use crate::models::Disciplina;

/// GET /disciplinas - all subjects ordered by id
async fn list_disciplinas(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<Disciplina>>, ApiError> {
    Ok(Json(state.store.list_disciplinas().await?))
}

/// Subject routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/disciplinas", get(list_disciplinas))
}
