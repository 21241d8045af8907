//! Subject (disciplina) records

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Subject row; read-only through the API
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Disciplina {
    pub id: i64,
    pub nome: String,
}
