//! boletim-server: HTTP API for students, subjects and grades
//!
//! Students (`alunos`), subjects (`disciplinas`) and grades (`notas`) are
//! kept in MySQL and exposed as JSON over axum. Each request runs exactly one
//! parameterized statement through a shared connection pool.

pub mod db;
pub mod http;
pub mod models;

pub use db::{create_pool, create_pool_with_options, MemoryStore, MySqlStore, PoolConfig, SchoolStore};
pub use http::{build_router, run_server, ApiError, ServerConfig, ServerError};
