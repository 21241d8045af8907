//! Repository implementations for database access
//!
//! Each repository follows these patterns:
//! - One parameterized statement per operation
//! - Zero affected/matched rows becomes `DbError::NotFound`
//! - Constraint violations from the engine become `DbError::Conflict`

pub mod alunos;
pub mod disciplinas;
pub mod notas;

pub use alunos::AlunoRepo;
pub use disciplinas::DisciplinaRepo;
pub use notas::NotaRepo;

use sqlx::error::ErrorKind;

/// Which storage constraint rejected a write
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConflictKind {
    /// Unique key already taken (e.g., duplicate cpf)
    Duplicate,
    /// Foreign key points at a missing row, or a row is still referenced
    Reference,
}

/// Database error type
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    #[error("database error: {0}")]
    Sqlx(#[source] sqlx::Error),

    #[error("not found: {resource} '{id}'")]
    NotFound { resource: &'static str, id: i64 },

    #[error("constraint violation ({kind:?}): {detail}")]
    Conflict { kind: ConflictKind, detail: String },

    #[error("no database connection available")]
    Unavailable,
}

impl From<sqlx::Error> for DbError {
    fn from(e: sqlx::Error) -> Self {
        if matches!(e, sqlx::Error::PoolTimedOut) {
            return Self::Unavailable;
        }

        let conflict = match &e {
            sqlx::Error::Database(db) => match db.kind() {
                ErrorKind::UniqueViolation => Some((ConflictKind::Duplicate, db.message().to_owned())),
                ErrorKind::ForeignKeyViolation => {
                    Some((ConflictKind::Reference, db.message().to_owned()))
                }
                _ => None,
            },
            _ => None,
        };

        match conflict {
            Some((kind, detail)) => Self::Conflict { kind, detail },
            None => Self::Sqlx(e),
        }
    }
}

/// Map a zero-row mutation to `NotFound`.
pub(crate) fn expect_affected(
    rows_affected: u64,
    resource: &'static str,
    id: i64,
) -> Result<(), DbError> {
    if rows_affected == 0 {
        Err(DbError::NotFound { resource, id })
    } else {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pool_timeout_is_unavailable() {
        assert!(matches!(
            DbError::from(sqlx::Error::PoolTimedOut),
            DbError::Unavailable
        ));
    }

    #[test]
    fn other_errors_stay_generic() {
        assert!(matches!(
            DbError::from(sqlx::Error::RowNotFound),
            DbError::Sqlx(_)
        ));
    }

    #[test]
    fn zero_rows_is_not_found() {
        assert!(expect_affected(1, "aluno", 3).is_ok());
        assert!(matches!(
            expect_affected(0, "aluno", 3),
            Err(DbError::NotFound { resource: "aluno", id: 3 })
        ));
    }
}
