//! Student repository
//!
//! Full-row CRUD over `alunos`. Updates overwrite all five mutable fields.

use sqlx::MySqlPool;

use super::{expect_affected, DbError};
use crate::models::{Aluno, AlunoInput};

const SELECT_ALUNOS: &str = "SELECT id, nome, sobrenome, dataNascimento, cpf, status FROM alunos";

const SELECT_ALUNO_BY_ID: &str =
    "SELECT id, nome, sobrenome, dataNascimento, cpf, status FROM alunos WHERE id = ?";

/// Student repository
pub struct AlunoRepo<'a> {
    pool: &'a MySqlPool,
}

impl<'a> AlunoRepo<'a> {
    pub fn new(pool: &'a MySqlPool) -> Self {
        Self { pool }
    }

    /// Insert a student, returning the stored record with its generated id.
    pub async fn create(&self, input: AlunoInput) -> Result<Aluno, DbError> {
        let result = sqlx::query(
            "INSERT INTO alunos (nome, sobrenome, dataNascimento, cpf, status) VALUES (?, ?, ?, ?, ?)",
        )
        .bind(input.nome.as_deref())
        .bind(input.sobrenome.as_deref())
        .bind(input.data_nascimento)
        .bind(input.cpf.as_deref())
        .bind(input.status.as_deref())
        .execute(self.pool)
        .await?;

        Ok(input.with_id(result.last_insert_id() as i64))
    }

    /// List all students in storage order.
    pub async fn list(&self) -> Result<Vec<Aluno>, DbError> {
        let alunos = sqlx::query_as::<_, Aluno>(SELECT_ALUNOS)
            .fetch_all(self.pool)
            .await?;
        Ok(alunos)
    }

    /// Get a single student by id.
    pub async fn get(&self, id: i64) -> Result<Aluno, DbError> {
        sqlx::query_as::<_, Aluno>(SELECT_ALUNO_BY_ID)
            .bind(id)
            .fetch_optional(self.pool)
            .await?
            .ok_or(DbError::NotFound {
                resource: "aluno",
                id,
            })
    }

    /// Overwrite every mutable field of a student.
    ///
    /// sqlx connects with CLIENT_FOUND_ROWS, so an update that rewrites the
    /// same values still counts as one affected row.
    pub async fn update(&self, id: i64, input: AlunoInput) -> Result<(), DbError> {
        let result = sqlx::query(
            r#"
            UPDATE alunos
            SET nome = ?, sobrenome = ?, dataNascimento = ?, cpf = ?, status = ?
            WHERE id = ?
            "#,
        )
        .bind(input.nome.as_deref())
        .bind(input.sobrenome.as_deref())
        .bind(input.data_nascimento)
        .bind(input.cpf.as_deref())
        .bind(input.status.as_deref())
        .bind(id)
        .execute(self.pool)
        .await?;

        expect_affected(result.rows_affected(), "aluno", id)
    }

    /// Hard-delete a student.
    pub async fn delete(&self, id: i64) -> Result<(), DbError> {
        let result = sqlx::query("DELETE FROM alunos WHERE id = ?")
            .bind(id)
            .execute(self.pool)
            .await?;

        expect_affected(result.rows_affected(), "aluno", id)
    }
}
