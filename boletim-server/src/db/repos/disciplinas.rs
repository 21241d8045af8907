//! Subject repository (read-only)

use sqlx::MySqlPool;

use super::DbError;
use crate::models::Disciplina;

/// Subject repository
pub struct DisciplinaRepo<'a> {
    pool: &'a MySqlPool,
}

impl<'a> DisciplinaRepo<'a> {
    pub fn new(pool: &'a MySqlPool) -> Self {
        Self { pool }
    }

    /// List all subjects ordered by id.
    pub async fn list(&self) -> Result<Vec<Disciplina>, DbError> {
        let disciplinas =
            sqlx::query_as::<_, Disciplina>("SELECT id, nome FROM disciplinas ORDER BY id")
                .fetch_all(self.pool)
                .await?;
        Ok(disciplinas)
    }
}
