//! Storage trait used by the HTTP handlers
//!
//! Provides a seam between routes and persistence, with:
//! - MySQL implementation delegating to the repositories
//! - In-memory implementation (see [`super::memory`]) for tests and local runs

use async_trait::async_trait;
use sqlx::MySqlPool;

use super::repos::{AlunoRepo, DbError, DisciplinaRepo, NotaRepo};
use crate::models::{Aluno, AlunoInput, Disciplina, NewNota, Nota, NotaComDisciplina, NotaUpdate};

/// One method per handler operation; each maps to a single statement.
#[async_trait]
pub trait SchoolStore: Send + Sync {
    async fn create_aluno(&self, input: AlunoInput) -> Result<Aluno, DbError>;
    async fn list_alunos(&self) -> Result<Vec<Aluno>, DbError>;
    async fn get_aluno(&self, id: i64) -> Result<Aluno, DbError>;
    async fn update_aluno(&self, id: i64, input: AlunoInput) -> Result<(), DbError>;
    async fn delete_aluno(&self, id: i64) -> Result<(), DbError>;

    async fn list_disciplinas(&self) -> Result<Vec<Disciplina>, DbError>;

    async fn list_notas_for_aluno(&self, aluno_id: i64) -> Result<Vec<NotaComDisciplina>, DbError>;
    async fn create_nota(&self, nota: NewNota) -> Result<Nota, DbError>;
    async fn update_nota(&self, id: i64, update: NotaUpdate) -> Result<(), DbError>;
    async fn delete_nota(&self, id: i64) -> Result<(), DbError>;
    async fn nota_values_for_aluno(&self, aluno_id: i64) -> Result<Vec<f64>, DbError>;

    /// Cheap liveness probe for the health endpoint.
    async fn ping(&self) -> Result<(), DbError>;
}

/// MySQL-backed store
#[derive(Clone)]
pub struct MySqlStore {
    pool: MySqlPool,
}

impl MySqlStore {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &MySqlPool {
        &self.pool
    }
}

#[async_trait]
impl SchoolStore for MySqlStore {
    async fn create_aluno(&self, input: AlunoInput) -> Result<Aluno, DbError> {
        AlunoRepo::new(&self.pool).create(input).await
    }

    async fn list_alunos(&self) -> Result<Vec<Aluno>, DbError> {
        AlunoRepo::new(&self.pool).list().await
    }

    async fn get_aluno(&self, id: i64) -> Result<Aluno, DbError> {
        AlunoRepo::new(&self.pool).get(id).await
    }

    async fn update_aluno(&self, id: i64, input: AlunoInput) -> Result<(), DbError> {
        AlunoRepo::new(&self.pool).update(id, input).await
    }

    async fn delete_aluno(&self, id: i64) -> Result<(), DbError> {
        AlunoRepo::new(&self.pool).delete(id).await
    }

    async fn list_disciplinas(&self) -> Result<Vec<Disciplina>, DbError> {
        DisciplinaRepo::new(&self.pool).list().await
    }

    async fn list_notas_for_aluno(&self, aluno_id: i64) -> Result<Vec<NotaComDisciplina>, DbError> {
        NotaRepo::new(&self.pool).list_for_aluno(aluno_id).await
    }

    async fn create_nota(&self, nota: NewNota) -> Result<Nota, DbError> {
        NotaRepo::new(&self.pool).create(nota).await
    }

    async fn update_nota(&self, id: i64, update: NotaUpdate) -> Result<(), DbError> {
        NotaRepo::new(&self.pool).update(id, update).await
    }

    async fn delete_nota(&self, id: i64) -> Result<(), DbError> {
        NotaRepo::new(&self.pool).delete(id).await
    }

    async fn nota_values_for_aluno(&self, aluno_id: i64) -> Result<Vec<f64>, DbError> {
        NotaRepo::new(&self.pool).values_for_aluno(aluno_id).await
    }

    async fn ping(&self) -> Result<(), DbError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
