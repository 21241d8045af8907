//! Grade repository
//!
//! `nota` is read back through `CAST(... AS DOUBLE)` so DECIMAL columns
//! decode as f64 without a decimal crate.

use sqlx::MySqlPool;

use super::{expect_affected, DbError};
use crate::models::{NewNota, Nota, NotaComDisciplina, NotaUpdate};

/// Grade repository
pub struct NotaRepo<'a> {
    pool: &'a MySqlPool,
}

impl<'a> NotaRepo<'a> {
    pub fn new(pool: &'a MySqlPool) -> Self {
        Self { pool }
    }

    /// List a student's grades with subject names, ordered by trimestre.
    ///
    /// Single INNER JOIN; a student without grades yields an empty list.
    pub async fn list_for_aluno(&self, aluno_id: i64) -> Result<Vec<NotaComDisciplina>, DbError> {
        let notas = sqlx::query_as::<_, NotaComDisciplina>(
            r#"
            SELECT
                notas.id,
                notas.aluno_id,
                notas.disciplina_id,
                disciplinas.nome AS disciplina,
                notas.trimestre,
                CAST(notas.nota AS DOUBLE) AS nota,
                notas.descricao
            FROM notas
            INNER JOIN disciplinas ON notas.disciplina_id = disciplinas.id
            WHERE notas.aluno_id = ?
            ORDER BY notas.trimestre
            "#,
        )
        .bind(aluno_id)
        .fetch_all(self.pool)
        .await?;

        Ok(notas)
    }

    /// Insert a grade. Missing student/subject rows are rejected by the
    /// engine's foreign keys and surface as `DbError::Conflict`.
    pub async fn create(&self, nota: NewNota) -> Result<Nota, DbError> {
        let result = sqlx::query(
            "INSERT INTO notas (aluno_id, disciplina_id, trimestre, nota, descricao) VALUES (?, ?, ?, ?, ?)",
        )
        .bind(nota.aluno_id)
        .bind(nota.disciplina_id)
        .bind(nota.trimestre)
        .bind(nota.nota)
        .bind(nota.descricao.as_deref())
        .execute(self.pool)
        .await?;

        Ok(nota.with_id(result.last_insert_id() as i64))
    }

    /// Overwrite a grade's subject, trimestre, value and description.
    pub async fn update(&self, id: i64, update: NotaUpdate) -> Result<(), DbError> {
        let result = sqlx::query(
            r#"
            UPDATE notas
            SET disciplina_id = ?, trimestre = ?, nota = ?, descricao = ?
            WHERE id = ?
            "#,
        )
        .bind(update.disciplina_id)
        .bind(update.trimestre)
        .bind(update.nota)
        .bind(update.descricao.as_deref())
        .bind(id)
        .execute(self.pool)
        .await?;

        expect_affected(result.rows_affected(), "nota", id)
    }

    /// Hard-delete a grade.
    pub async fn delete(&self, id: i64) -> Result<(), DbError> {
        let result = sqlx::query("DELETE FROM notas WHERE id = ?")
            .bind(id)
            .execute(self.pool)
            .await?;

        expect_affected(result.rows_affected(), "nota", id)
    }

    /// All grade values of a student, for averaging.
    pub async fn values_for_aluno(&self, aluno_id: i64) -> Result<Vec<f64>, DbError> {
        let values: Vec<(f64,)> =
            sqlx::query_as("SELECT CAST(nota AS DOUBLE) FROM notas WHERE aluno_id = ?")
                .bind(aluno_id)
                .fetch_all(self.pool)
                .await?;

        Ok(values.into_iter().map(|(v,)| v).collect())
    }
}
