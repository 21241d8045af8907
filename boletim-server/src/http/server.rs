//! Axum server setup
//!
//! Server skeleton with:
//! - CORS open to any origin
//! - Tracing middleware
//! - Graceful shutdown on SIGTERM/Ctrl+C

use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use super::routes;
use crate::db::SchoolStore;

/// Server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Address to bind to (default: 0.0.0.0:3001)
    pub bind_addr: SocketAddr,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([0, 0, 0, 0], 3001)),
        }
    }
}

/// Shared application state
pub struct AppState {
    pub store: Arc<dyn SchoolStore>,
}

impl AppState {
    pub fn new(store: Arc<dyn SchoolStore>) -> Self {
        Self { store }
    }
}

/// Build the application router with all routes.
pub fn build_router(store: Arc<dyn SchoolStore>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .merge(routes::health::router())
        .merge(routes::alunos::router())
        .merge(routes::disciplinas::router())
        .merge(routes::notas::router())
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(Arc::new(AppState::new(store)))
}

/// Run the HTTP server until a shutdown signal arrives.
///
/// # Example
///
/// ```ignore
/// let pool = create_pool(&database_url).await?;
/// let store = Arc::new(MySqlStore::new(pool));
/// run_server(store, ServerConfig::default()).await?;
/// ```
pub async fn run_server(
    store: Arc<dyn SchoolStore>,
    config: ServerConfig,
) -> Result<(), ServerError> {
    let app = build_router(store);

    let listener = TcpListener::bind(config.bind_addr).await?;
    tracing::info!("Server listening on {}", config.bind_addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server shutdown complete");
    Ok(())
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM).
///
/// If a handler cannot be installed that branch never completes, leaving
/// the other one in charge.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C, starting shutdown");
        }
        _ = terminate => {
            tracing::info!("Received SIGTERM, starting shutdown");
        }
    }
}

/// Server error type
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{default_disciplinas, MemoryStore};
    use crate::models::Disciplina;
    use axum::body::{to_bytes, Body};
    use axum::http::{Request, StatusCode};
    use serde_json::{json, Value};
    use tower::ServiceExt;

    async fn app_with_disciplinas(disciplinas: &[(i64, &str)]) -> Router {
        let store = MemoryStore::new();
        for (id, nome) in disciplinas {
            store
                .insert_disciplina(Disciplina {
                    id: *id,
                    nome: (*nome).to_owned(),
                })
                .await;
        }
        build_router(Arc::new(store))
    }

    async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let request = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(body) => request
                .header("content-type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => request.body(Body::empty()).unwrap(),
        };

        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, value)
    }

    fn aluno_payload() -> Value {
        json!({
            "nome": "Ana",
            "sobrenome": "Souza",
            "dataNascimento": "2009-05-20",
            "cpf": "123.456.789-00",
            "status": "ativo"
        })
    }

    #[test]
    fn default_config() {
        let config = ServerConfig::default();
        assert_eq!(config.bind_addr.port(), 3001);
    }

    #[tokio::test]
    async fn health_endpoint() {
        let app = app_with_disciplinas(&[]).await;
        let (status, body) = send(&app, "GET", "/health", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
    }

    #[tokio::test]
    async fn create_then_get_aluno() {
        let app = app_with_disciplinas(&[]).await;

        let (status, created) = send(&app, "POST", "/alunos", Some(aluno_payload())).await;
        assert_eq!(status, StatusCode::OK);
        let id = created["id"].as_i64().unwrap();

        let (status, fetched) = send(&app, "GET", &format!("/alunos/{id}"), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(fetched, created);
        assert_eq!(fetched["dataNascimento"], "2009-05-20");

        let (status, list) = send(&app, "GET", "/alunos", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(list.as_array().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn update_and_delete_aluno() {
        let app = app_with_disciplinas(&[]).await;
        let (_, created) = send(&app, "POST", "/alunos", Some(aluno_payload())).await;
        let uri = format!("/alunos/{}", created["id"]);

        let mut changed = aluno_payload();
        changed["status"] = json!("inativo");
        let (status, body) = send(&app, "PUT", &uri, Some(changed)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["message"], "Aluno atualizado com sucesso");

        let (_, fetched) = send(&app, "GET", &uri, None).await;
        assert_eq!(fetched["status"], "inativo");

        let (status, _) = send(&app, "DELETE", &uri, None).await;
        assert_eq!(status, StatusCode::OK);

        let (status, body) = send(&app, "GET", &uri, None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"], "not_found");
    }

    #[tokio::test]
    async fn partial_update_clears_omitted_fields() {
        let app = app_with_disciplinas(&[]).await;
        let (_, created) = send(&app, "POST", "/alunos", Some(aluno_payload())).await;
        let uri = format!("/alunos/{}", created["id"]);

        let (status, _) = send(&app, "PUT", &uri, Some(json!({"nome": "X"}))).await;
        assert_eq!(status, StatusCode::OK);

        let (status, fetched) = send(&app, "GET", &uri, None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(fetched["id"], created["id"]);
        assert_eq!(fetched["nome"], "X");
        for field in ["sobrenome", "dataNascimento", "cpf", "status"] {
            assert_eq!(fetched[field], Value::Null, "{field} should be cleared");
        }
    }

    #[tokio::test]
    async fn seeded_memory_store_accepts_notas() {
        let app = build_router(Arc::new(MemoryStore::with_disciplinas(default_disciplinas())));

        let (status, aluno) = send(&app, "POST", "/alunos", Some(json!({}))).await;
        assert_eq!(status, StatusCode::OK);

        let (status, nota) = send(
            &app,
            "POST",
            "/notas",
            Some(json!({"aluno_id": aluno["id"], "disciplina_id": 1, "trimestre": 1, "nota": 7})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(nota["nota"], 7.0);

        let (status, body) = send(&app, "GET", &format!("/notas/media/{}", aluno["id"]), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"media": "7.00", "passou": true}));
    }

    #[tokio::test]
    async fn missing_aluno_is_404_on_every_verb() {
        let app = app_with_disciplinas(&[]).await;
        let (status, _) = send(&app, "PUT", "/alunos/99", Some(aluno_payload())).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        let (status, _) = send(&app, "DELETE", "/alunos/99", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn non_numeric_id_is_400() {
        let app = app_with_disciplinas(&[]).await;
        let (status, body) = send(&app, "GET", "/alunos/abc", None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "validation_error");
    }

    #[tokio::test]
    async fn malformed_body_is_400() {
        let app = app_with_disciplinas(&[]).await;
        let (status, body) = send(&app, "POST", "/notas", Some(json!({"nota": "dez"}))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "validation_error");
    }

    #[tokio::test]
    async fn disciplinas_ordered_by_id() {
        let app = app_with_disciplinas(&[(5, "Geografia"), (2, "Ciências"), (9, "Artes")]).await;
        let (status, body) = send(&app, "GET", "/disciplinas", None).await;
        assert_eq!(status, StatusCode::OK);
        let ids: Vec<i64> = body
            .as_array()
            .unwrap()
            .iter()
            .map(|d| d["id"].as_i64().unwrap())
            .collect();
        assert_eq!(ids, vec![2, 5, 9]);
    }

    #[tokio::test]
    async fn nota_zero_accepted_and_missing_nota_rejected() {
        let app = app_with_disciplinas(&[(1, "Matemática")]).await;
        let (_, aluno) = send(&app, "POST", "/alunos", Some(aluno_payload())).await;

        let (status, nota) = send(
            &app,
            "POST",
            "/notas",
            Some(json!({"aluno_id": aluno["id"], "disciplina_id": 1, "trimestre": 1, "nota": 0})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(nota["nota"], 0.0);
        assert_eq!(nota["descricao"], Value::Null);

        let (status, body) = send(
            &app,
            "POST",
            "/notas",
            Some(json!({"aluno_id": aluno["id"], "disciplina_id": 1, "trimestre": 1})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["message"].as_str().unwrap().contains("nota"));

        let (status, _) = send(
            &app,
            "PUT",
            &format!("/notas/{}", nota["id"]),
            Some(json!({"disciplina_id": 1, "trimestre": 2, "nota": 0})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
    }

    #[tokio::test]
    async fn nota_update_requires_fields_and_existing_row() {
        let app = app_with_disciplinas(&[(1, "Matemática")]).await;

        let (status, _) = send(&app, "PUT", "/notas/1", Some(json!({"nota": 5}))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, body) = send(
            &app,
            "PUT",
            "/notas/1",
            Some(json!({"disciplina_id": 1, "trimestre": 1, "nota": 5})),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["message"], "Nota não encontrada");

        let (status, _) = send(&app, "DELETE", "/notas/1", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn nota_for_unknown_aluno_is_conflict() {
        let app = app_with_disciplinas(&[(1, "Matemática")]).await;
        let (status, body) = send(
            &app,
            "POST",
            "/notas",
            Some(json!({"aluno_id": 77, "disciplina_id": 1, "trimestre": 1, "nota": 8})),
        )
        .await;
        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(body["error"], "conflict");
    }

    #[tokio::test]
    async fn notas_listed_with_subject_by_trimestre() {
        let app = app_with_disciplinas(&[(1, "Matemática"), (2, "Português")]).await;
        let (_, aluno) = send(&app, "POST", "/alunos", Some(aluno_payload())).await;

        for (disciplina_id, trimestre) in [(2, 3), (1, 1), (2, 2)] {
            let (status, _) = send(
                &app,
                "POST",
                "/notas",
                Some(json!({
                    "aluno_id": aluno["id"],
                    "disciplina_id": disciplina_id,
                    "trimestre": trimestre,
                    "nota": 7,
                    "descricao": "prova"
                })),
            )
            .await;
            assert_eq!(status, StatusCode::OK);
        }

        let (status, body) = send(&app, "GET", &format!("/notas/aluno/{}", aluno["id"]), None).await;
        assert_eq!(status, StatusCode::OK);
        let notas = body.as_array().unwrap();
        let trimestres: Vec<i64> = notas.iter().map(|n| n["trimestre"].as_i64().unwrap()).collect();
        assert_eq!(trimestres, vec![1, 2, 3]);
        assert_eq!(notas[0]["disciplina"], "Matemática");

        let (status, body) = send(&app, "GET", "/notas/aluno/12345", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!([]));
    }

    #[tokio::test]
    async fn media_pass_and_fail() {
        let app = app_with_disciplinas(&[(1, "Matemática")]).await;

        for (notas, expected) in [
            ([4, 8], json!({"media": "6.00", "passou": true})),
            ([4, 5], json!({"media": "4.50", "passou": false})),
        ] {
            let (_, aluno) = send(&app, "POST", "/alunos", Some(aluno_payload())).await;
            for nota in notas {
                send(
                    &app,
                    "POST",
                    "/notas",
                    Some(json!({"aluno_id": aluno["id"], "disciplina_id": 1, "trimestre": 1, "nota": nota})),
                )
                .await;
            }

            let (status, body) =
                send(&app, "GET", &format!("/notas/media/{}", aluno["id"]), None).await;
            assert_eq!(status, StatusCode::OK);
            assert_eq!(body, expected);
        }
    }

    #[tokio::test]
    async fn media_without_notas_is_404() {
        let app = app_with_disciplinas(&[]).await;
        let (_, aluno) = send(&app, "POST", "/alunos", Some(aluno_payload())).await;
        let (status, body) = send(&app, "GET", &format!("/notas/media/{}", aluno["id"]), None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["message"], "Notas não encontradas");
    }

    #[tokio::test]
    async fn cors_allows_any_origin() {
        let app = app_with_disciplinas(&[]).await;
        let response = app
            .oneshot(
                Request::builder()
                    .uri("/disciplinas")
                    .header("origin", "http://example.com")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(
            response.headers().get("access-control-allow-origin").unwrap(),
            "*"
        );
    }
}
